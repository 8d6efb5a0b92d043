//! Export tests for HTML format (tree → HTML)

use mentionpad_babel::format::Format;
use mentionpad_babel::formats::html::{serialize_document, HtmlFormat};
use mentionpad_babel::{Document, ElementKind, Mark, Marks, Node, Text};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([a-z0-9]+)[ >]").unwrap());

/// Opening tag names in document order.
fn tags(html: &str) -> Vec<String> {
    TAG.captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn to_html(children: Vec<Node>) -> String {
    serialize_document(&Document::new(children)).unwrap()
}

fn styled(text: &str, marks: &[Mark]) -> Node {
    let marks = marks
        .iter()
        .fold(Marks::default(), |acc, mark| acc.with(*mark, true));
    Node::Text(Text::with_marks(text, marks))
}

// ============================================================================
// BLOCKS
// ============================================================================

#[test]
fn test_paragraph_exact() {
    assert_eq!(
        to_html(vec![Node::paragraph(vec![Node::text("hi")])]),
        "<p>hi</p>"
    );
}

#[test]
fn test_bulleted_list_exact() {
    let list = Node::element(
        ElementKind::BulletedList,
        vec![Node::element(ElementKind::ListItem, vec![Node::text("item")])],
    );
    assert_eq!(to_html(vec![list]), "<ul><li>item</li></ul>");
}

#[test]
fn test_blocks_concatenate_without_separator() {
    let html = to_html(vec![
        Node::element(ElementKind::HeadingTwo, vec![Node::text("Notes")]),
        Node::element(ElementKind::BlockQuote, vec![Node::text("quoted")]),
        Node::paragraph(vec![Node::text("after")]),
    ]);
    assert_eq!(
        html,
        "<h2>Notes</h2><blockquote><p>quoted</p></blockquote><p>after</p>"
    );
    assert_eq!(tags(&html), vec!["h2", "blockquote", "p", "p"]);
}

#[test]
fn test_unknown_block_types_are_transparent() {
    let html = to_html(vec![Node::element(
        ElementKind::Other("callout".to_string()),
        vec![Node::paragraph(vec![Node::text("inner")])],
    )]);
    assert_eq!(html, "<p>inner</p>");
}

// ============================================================================
// MARKS AND MENTIONS
// ============================================================================

#[test]
fn test_mark_nesting_order() {
    let html = to_html(vec![Node::paragraph(vec![styled(
        "t",
        &[Mark::Code, Mark::Underline],
    )])]);
    assert_eq!(html, "<p><code><u>t</u></code></p>");

    let html = to_html(vec![Node::paragraph(vec![styled("t", &[Mark::Bold, Mark::Italic])])]);
    assert_eq!(tags(&html), vec!["p", "em", "strong"]);
}

#[test]
fn test_mention_span() {
    let html = to_html(vec![Node::paragraph(vec![
        Node::text("ping "),
        Node::mention("{{Ayushi}}"),
        Node::text(""),
    ])]);
    assert_eq!(
        html,
        "<p>ping <span style=\"color: darkblue\">{{Ayushi}}</span></p>"
    );
}

#[test]
fn test_mention_payload_is_escaped() {
    let html = to_html(vec![Node::paragraph(vec![Node::mention("<b>")])]);
    assert!(html.contains("&lt;b&gt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn test_format_trait_serializes() {
    let format = HtmlFormat::default();
    assert!(format.supports_serialization());
    assert_eq!(
        format.serialize(&Document::initial()).unwrap(),
        "<p></p>"
    );
}
