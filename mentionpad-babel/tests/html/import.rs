//! Import tests for HTML format (HTML → tree)

use mentionpad_babel::format::Format;
use mentionpad_babel::formats::html::{parse_html, parse_html_with_options, HtmlFormat};
use mentionpad_babel::formats::{MentionText, ParseOptions, QuoteType};
use mentionpad_babel::{ElementKind, Mark, Marks, Node, Text};
use std::collections::HashMap;

#[test]
fn test_paragraph_with_text() {
    let doc = parse_html("<p>hello</p>");
    assert_eq!(doc.children, vec![Node::paragraph(vec![Node::text("hello")])]);
}

#[test]
fn test_full_document_uses_body() {
    let doc = parse_html(
        "<!DOCTYPE html><html><head><title>ignored</title></head>\
         <body><h1>Title</h1><p>Body</p></body></html>",
    );
    assert_eq!(
        doc.children,
        vec![
            Node::element(ElementKind::HeadingOne, vec![Node::text("Title")]),
            Node::paragraph(vec![Node::text("Body")]),
        ]
    );
}

#[test]
fn test_loose_text_at_body_level() {
    let doc = parse_html("loose<p>p</p>");
    assert_eq!(
        doc.children,
        vec![Node::text("loose"), Node::paragraph(vec![Node::text("p")])]
    );
}

#[test]
fn test_mixed_inline_content() {
    let doc = parse_html("<p>a <em>b</em> c<br>d</p>");
    assert_eq!(
        doc.children,
        vec![Node::paragraph(vec![
            Node::text("a "),
            Node::Text(Text::with_marks("b", Marks::only(Mark::Italic))),
            Node::text(" c\nd"),
        ])]
    );
}

#[test]
fn test_exported_mention_comes_back() {
    let doc = parse_html("<p>hey <span style=\"color: darkblue\">{{Sarang}}</span></p>");
    assert_eq!(
        doc.children,
        vec![Node::paragraph(vec![
            Node::text("hey "),
            Node::mention("{{Sarang}}"),
        ])]
    );
}

#[test]
fn test_empty_list_item_gets_text() {
    let doc = parse_html("<ul><li></li></ul>");
    assert_eq!(
        doc.children,
        vec![Node::element(
            ElementKind::BulletedList,
            vec![Node::element(ElementKind::ListItem, vec![Node::text("")])],
        )]
    );
}

#[test]
fn test_options_through_format_trait() {
    let format = HtmlFormat::new(ParseOptions::new(QuoteType::Legacy, MentionText::Concat));
    let doc = format.parse("<blockquote><p>q</p></blockquote>").unwrap();
    assert_eq!(
        doc.children[0].as_element().unwrap().kind,
        ElementKind::Other("quote".to_string())
    );

    let mut overrides = HashMap::new();
    overrides.insert("quote-type".to_string(), "block-quote".to_string());
    let doc = format
        .parse_with_options("<blockquote><p>q</p></blockquote>", &overrides)
        .unwrap();
    assert_eq!(
        doc.children[0].as_element().unwrap().kind,
        ElementKind::BlockQuote
    );
}

#[test]
fn test_comma_joined_mentions() {
    let options = ParseOptions::new(QuoteType::BlockQuote, MentionText::CommaJoined);
    let doc = parse_html_with_options("<p><span>x<br>y</span></p>", &options);
    assert_eq!(doc.children, vec![Node::paragraph(vec![Node::mention("x,\n,y")])]);
}
