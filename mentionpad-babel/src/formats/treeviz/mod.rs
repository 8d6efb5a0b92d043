//! Treeviz formatter for document trees
//!
//! Encodes the node structure with box-drawing connectors, one node per line:
//! `<prefix><connector> <icon> <label>`
//!
//! Example:
//!
//! ```text
//! ⧉ Document (2 items)
//! ├─ § heading-one
//! │ └─ ◦ "Title"
//! └─ ¶ paragraph
//!   ├─ ◦ "hey " [bold]
//!   ├─ @ mention {{Sarang}}
//!   └─ ◦ ""
//! ```
//!
//! Text labels are truncated to 30 characters unless the `truncate`
//! parameter says otherwise (`0` disables truncation).

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Document, ElementKind, Node};
use std::collections::HashMap;

const DEFAULT_TRUNCATE: usize = 30;

fn label(node: &Node, truncate: usize) -> String {
    match node {
        Node::Text(text) => {
            let quoted = format!("{:?}", shorten(&text.text, truncate));
            let marks = text.marks.active();
            if marks.is_empty() {
                quoted
            } else {
                let names: Vec<&str> = marks.iter().map(|mark| mark.name()).collect();
                format!("{quoted} [{}]", names.join(", "))
            }
        }
        Node::Element(element) => match &element.kind {
            ElementKind::Mention { character } => format!("mention {character}"),
            kind => kind.tag().to_string(),
        },
    }
}

fn shorten(text: &str, truncate: usize) -> String {
    if truncate == 0 || text.chars().count() <= truncate {
        return text.to_string();
    }
    let mut short: String = text.chars().take(truncate).collect();
    short.push('…');
    short
}

fn format_node(
    node: &Node,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    truncate: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = match node {
        Node::Text(_) => get_icon("text"),
        Node::Element(element) => get_icon(element.kind.tag()),
    };

    let mut output = format!("{prefix}{connector} {icon} {}\n", label(node, truncate));

    // Mentions always hold one empty text child; showing it is noise.
    if let Node::Element(element) = node {
        if !element.kind.is_void() {
            let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            output.push_str(&format_children(&element.children, &child_prefix, truncate));
        }
    }
    output
}

fn format_children(children: &[Node], prefix: &str, truncate: usize) -> String {
    let mut output = String::new();
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        output.push_str(&format_node(child, prefix, i, child_count, truncate));
    }
    output
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Convert a document to a treeviz string.
///
/// # Parameters
///
/// - `"truncate"`: maximum characters shown per text label, `0` for no limit.
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let truncate = params
        .get("truncate")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TRUNCATE);

    let icon = get_icon("document");
    let output = format!("{} Document ({} items)\n", icon, doc.children.len());
    output + &format_children(&doc.children, "", truncate)
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(doc, options))
    }
}
