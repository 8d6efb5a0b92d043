//! Format implementations
//!
//! This module contains all format implementations that convert between the
//! document tree and text representations.

pub mod html;
pub mod icons;
pub mod json;
pub mod treeviz;

pub use html::{HtmlFormat, MentionText, ParseOptions, QuoteType};
pub use json::JsonFormat;
pub use treeviz::TreevizFormat;
