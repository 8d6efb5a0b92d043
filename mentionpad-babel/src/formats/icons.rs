//! Icon mapping for the tree visualization format

/// Get the Unicode icon for a node type tag
///
/// Text leaves use `"text"`, the root uses `"document"`; element tags are the
/// JSON type names.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "document" => "⧉",
        "paragraph" => "¶",
        "heading-one" | "heading-two" => "§",
        "block-quote" => "\"",
        "numbered-list" | "bulleted-list" => "☰",
        "list-item" => "•",
        "mention" => "@",
        "text" => "◦",
        _ => "○",
    }
}
