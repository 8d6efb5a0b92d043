//! Document tree, HTML interop and mention autocomplete for the mentionpad editor
//!
//!     This crate holds everything in the editor that is not rendering: the document tree, its
//!     conversion to and from HTML, an in-memory editing host, and the mention autocomplete that
//!     watches the text before the cursor.
//!
//!     This is a pure lib, that is, it powers the mentionpad cli but is shell agnostic: no code
//!     here prints, reads env vars or touches the file system.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── model                   # Document tree: nodes, marks, element kinds
//!     ├── formats
//!     │   ├── html                # parser.rs (DOM → tree), serializer.rs (tree → HTML)
//!     │   ├── json                # The editor's own JSON value
//!     │   └── treeviz             # Tree visualization for inspection
//!     ├── editor                  # EditorHost trait and the in-memory Editor
//!     ├── mention                 # Autocomplete state machine
//!     ├── session.rs              # Key dispatch: matcher, hotkeys, default editing
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── html                    # Export, import and round trip
//!     ├── mention                 # Matcher driven through an Editor
//!     └── editor                  # Marks, blocks and sessions
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Round Tripping
//!
//!     HTML is the interchange format, but the mapping is lossy on purpose: a style tag imports as
//!     a single-mark text leaf, so text carrying several marks comes back with the outermost one
//!     only. JSON is the lossless format; use it to store documents.
//!
//! The Editing Host
//!
//!     The mention matcher never touches the tree directly. It asks an [`EditorHost`] for the
//!     selection, for points one character or word away, and for the text of a range, and it
//!     writes through `select` and `insert_node`. [`Editor`] implements the host over a
//!     [`Document`]; other hosts can drive the same matcher.

pub mod editor;
pub mod error;
pub mod format;
pub mod formats;
pub mod mention;
pub mod model;
pub mod registry;
pub mod session;

pub use editor::{Editor, EditorHost, Key, KeyEvent, Point, Range, Unit};
pub use error::FormatError;
pub use format::Format;
pub use formats::html::ParseOptions;
pub use mention::{KeyOutcome, MentionMatcher, MentionState};
pub use model::{Document, Element, ElementKind, Mark, Marks, Node, Text};
pub use registry::FormatRegistry;
pub use session::Session;

/// Serialize a document to an HTML fragment.
pub fn to_html(doc: &Document) -> Result<String, FormatError> {
    formats::html::serialize_document(doc)
}

/// Parse HTML into a document with default import options.
pub fn from_html(source: &str) -> Document {
    formats::html::parse_html(source)
}
