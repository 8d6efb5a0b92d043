//! The document tree shared by every format and by the editor host.
//!
//! A document is a sequence of block nodes. Blocks are elements; leaves are
//! text nodes with marks. Mentions are inline void elements.

pub mod nodes;

pub use nodes::{Document, Element, ElementKind, Mark, Marks, Node, Text};
