//! Editing commands observed through their HTML output.

use mentionpad_babel::editor::Editor;
use mentionpad_babel::{to_html, Document, EditorHost, ElementKind, Mark, Node, Point, Range};

fn editor(children: Vec<Node>) -> Editor {
    Editor::new(Document::new(children))
}

fn html(editor: &Editor) -> String {
    to_html(editor.document()).unwrap()
}

#[test]
fn test_bold_then_italic_on_a_word() {
    let mut editor = editor(vec![Node::paragraph(vec![Node::text("make this loud")])]);
    editor.select(Range::new(
        Point::new(vec![0, 0], 5),
        Point::new(vec![0, 0], 9),
    ));
    editor.toggle_mark(Mark::Bold);
    editor.toggle_mark(Mark::Italic);
    assert_eq!(html(&editor), "<p>make <em><strong>this</strong></em> loud</p>");
    assert!(editor.is_mark_active(Mark::Bold));
    assert!(editor.is_mark_active(Mark::Italic));
    assert!(!editor.is_mark_active(Mark::Code));
}

#[test]
fn test_mark_across_blocks() {
    let mut editor = editor(vec![
        Node::paragraph(vec![Node::text("ab")]),
        Node::paragraph(vec![Node::text("cd")]),
    ]);
    editor.select(Range::new(
        Point::new(vec![0, 0], 1),
        Point::new(vec![1, 0], 1),
    ));
    editor.add_mark(Mark::Code);
    assert_eq!(html(&editor), "<p>a<code>b</code></p><p><code>c</code>d</p>");

    editor.remove_mark(Mark::Code);
    assert_eq!(html(&editor), "<p>ab</p><p>cd</p>");
}

#[test]
fn test_toggle_block_kinds() {
    let mut editor = editor(vec![
        Node::paragraph(vec![Node::text("one")]),
        Node::paragraph(vec![Node::text("two")]),
    ]);
    editor.select_start();
    editor.toggle_block(ElementKind::HeadingTwo);
    assert_eq!(html(&editor), "<h2>one</h2><p>two</p>");

    editor.select_end();
    editor.toggle_block(ElementKind::NumberedList);
    assert_eq!(html(&editor), "<h2>one</h2><ol><li>two</li></ol>");
    assert!(editor.is_block_active(&ElementKind::NumberedList));
    assert!(!editor.is_block_active(&ElementKind::BulletedList));

    editor.toggle_block(ElementKind::NumberedList);
    assert_eq!(html(&editor), "<h2>one</h2><p>two</p>");
}

#[test]
fn test_block_quote_toggle_exports_with_inner_paragraph() {
    let mut editor = editor(vec![Node::paragraph(vec![Node::text("wise")])]);
    editor.select_end();
    editor.toggle_block(ElementKind::BlockQuote);
    assert_eq!(html(&editor), "<blockquote><p>wise</p></blockquote>");
}

#[test]
fn test_delete_selection_then_type() {
    let mut editor = editor(vec![Node::paragraph(vec![Node::text("hello world")])]);
    editor.select(Range::new(
        Point::new(vec![0, 0], 6),
        Point::new(vec![0, 0], 11),
    ));
    editor.insert_text("there");
    assert_eq!(html(&editor), "<p>hello there</p>");
}

#[test]
fn test_word_backspace() {
    let mut editor = editor(vec![Node::paragraph(vec![Node::text("keep drop")])]);
    editor.select_end();
    editor.delete_backward(mentionpad_babel::Unit::Word);
    assert_eq!(html(&editor), "<p>keep </p>");
}
