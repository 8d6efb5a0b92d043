//! Round trips through HTML (tree → HTML → tree)

use mentionpad_babel::{from_html, to_html, Document, ElementKind, Mark, Marks, Node, Text};
use proptest::prelude::*;

fn round_trip(doc: &Document) -> Document {
    from_html(&to_html(doc).unwrap())
}

fn paragraph_with(text: Text) -> Document {
    Document::new(vec![Node::paragraph(vec![Node::Text(text)])])
}

fn any_mark() -> impl Strategy<Value = Mark> {
    prop_oneof![
        Just(Mark::Bold),
        Just(Mark::Italic),
        Just(Mark::Underline),
        Just(Mark::Code),
    ]
}

proptest! {
    #[test]
    fn single_mark_text_survives(text in "[a-zA-Z0-9]{1,20}", mark in any_mark()) {
        let doc = paragraph_with(Text::with_marks(text, Marks::only(mark)));
        prop_assert_eq!(round_trip(&doc), doc);
    }

    #[test]
    fn plain_paragraphs_survive(texts in prop::collection::vec("[a-z ]{1,12}", 1..5)) {
        let doc = Document::new(
            texts.iter().map(|text| Node::paragraph(vec![Node::text(text.as_str())])).collect(),
        );
        prop_assert_eq!(round_trip(&doc), doc);
    }
}

#[test]
fn multi_mark_text_keeps_only_the_outer_mark() {
    let marks = Marks::only(Mark::Bold).with(Mark::Italic, true);
    let doc = paragraph_with(Text::with_marks("both", marks));
    assert_eq!(
        round_trip(&doc),
        paragraph_with(Text::with_marks("both", Marks::only(Mark::Italic)))
    );
}

#[test]
fn block_quote_gains_an_inner_paragraph() {
    let doc = Document::new(vec![Node::element(
        ElementKind::BlockQuote,
        vec![Node::text("q")],
    )]);
    assert_eq!(
        round_trip(&doc),
        Document::new(vec![Node::element(
            ElementKind::BlockQuote,
            vec![Node::paragraph(vec![Node::text("q")])],
        )])
    );
}

#[test]
fn lists_and_mentions_survive() {
    let doc = Document::new(vec![
        Node::element(
            ElementKind::NumberedList,
            vec![
                Node::element(ElementKind::ListItem, vec![Node::text("one")]),
                Node::element(ElementKind::ListItem, vec![Node::text("two")]),
            ],
        ),
        Node::paragraph(vec![Node::text("to "), Node::mention("{{Ayushi}}")]),
    ]);
    assert_eq!(round_trip(&doc), doc);
}

#[test]
fn escaped_text_survives() {
    let doc = paragraph_with(Text::new("1 < 2 && 3 > 2"));
    assert_eq!(round_trip(&doc), doc);
}
