//! JSON format implementation
//!
//! The editor's own value shape: an array of nodes where text leaves are
//! `{"text": ..}` objects with optional mark flags and elements carry `type`
//! and `children`. This is what an editing session loads and saves, so it is
//! the lossless counterpart to the HTML export.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

/// Format implementation for the JSON document value
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Editor document value as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let doc: Document = serde_json::from_str(source)?;
        Ok(doc)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(doc)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, Mark, Marks, Node, Text};

    #[test]
    fn test_parse_editor_value() {
        let source = r#"[
            {"type": "heading-one", "children": [{"text": "Title"}]},
            {"type": "paragraph", "children": [
                {"text": "hi ", "italic": true},
                {"type": "mention", "character": "{{Ayushi}}", "children": [{"text": ""}]},
                {"text": ""}
            ]}
        ]"#;
        let doc = JsonFormat.parse(source).unwrap();
        assert_eq!(doc.children.len(), 2);
        let heading = doc.children[0].as_element().unwrap();
        assert_eq!(heading.kind, ElementKind::HeadingOne);
        assert_eq!(
            doc.children[1].children()[0],
            Node::Text(Text::with_marks("hi ", Marks::only(Mark::Italic)))
        );
        assert_eq!(doc.children[1].children()[1], Node::mention("{{Ayushi}}"));
    }

    #[test]
    fn test_serialize_is_parseable() {
        let doc = Document::initial();
        let json = JsonFormat.serialize(&doc).unwrap();
        assert!(json.ends_with('\n'));
        assert_eq!(JsonFormat.parse(&json).unwrap(), doc);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        match JsonFormat.parse("{not json") {
            Err(FormatError::ParseError(msg)) => assert!(msg.contains("Invalid document JSON")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
