//! Mention matcher driven through the in-memory editor.

use mentionpad_babel::editor::Editor;
use mentionpad_babel::mention::{filter_candidates, ActiveMention, CHARACTERS};
use mentionpad_babel::{
    to_html, Document, EditorHost, ElementKind, Key, KeyOutcome, MentionMatcher, MentionState,
    Node, Point, Range,
};

fn editor_with(children: Vec<Node>) -> Editor {
    let mut editor = Editor::new(Document::new(children));
    editor.select_end();
    editor
}

fn active(matcher: &MentionMatcher) -> &ActiveMention {
    match matcher.state() {
        MentionState::Active(active) => active,
        MentionState::Inactive => panic!("matcher should be active"),
    }
}

#[test]
fn test_foo_brace_bar_activates_with_search_bar() {
    let editor = editor_with(vec![Node::paragraph(vec![Node::text("foo {bar")])]);
    let mut matcher = MentionMatcher::new();
    matcher.on_change(&editor);

    let active = active(&matcher);
    assert_eq!(active.search, "bar");
    assert_eq!(active.index, 0);
    assert_eq!(
        active.target,
        Range::new(Point::new(vec![0, 0], 4), Point::new(vec![0, 0], 8))
    );
}

#[test]
fn test_sa_filters_to_sarang() {
    let candidates: Vec<String> = CHARACTERS.iter().map(|c| c.to_string()).collect();
    assert_eq!(filter_candidates(&candidates, "sa"), vec!["Sarang"]);
}

#[test]
fn test_arrow_down_wraps_from_last_to_first() {
    let mut editor = editor_with(vec![Node::paragraph(vec![Node::text("{a")])]);
    let mut matcher = MentionMatcher::with_candidates(["Ayushi", "Ava"]);
    matcher.on_change(&editor);
    assert_eq!(matcher.suggestions().len(), 2);

    matcher.on_key_down(&mut editor, &Key::ArrowDown);
    assert_eq!(active(&matcher).index, 1);
    assert_eq!(
        matcher.on_key_down(&mut editor, &Key::ArrowDown),
        KeyOutcome::Handled
    );
    assert_eq!(active(&matcher).index, 0);
}

#[test]
fn test_trigger_inside_a_list_item() {
    let mut editor = editor_with(vec![Node::element(
        ElementKind::BulletedList,
        vec![Node::element(
            ElementKind::ListItem,
            vec![Node::text("cc {ay")],
        )],
    )]);
    let mut matcher = MentionMatcher::new();
    matcher.on_change(&editor);
    assert_eq!(matcher.selected(), Some("Ayushi"));

    matcher.on_key_down(&mut editor, &Key::Tab);
    assert_eq!(
        to_html(editor.document()).unwrap(),
        "<ul><li>cc <span style=\"color: darkblue\">{{Ayushi}}</span></li></ul>"
    );
}

#[test]
fn test_trigger_after_a_mention() {
    let editor = editor_with(vec![Node::paragraph(vec![
        Node::text(""),
        Node::mention("{{Sarang}}"),
        Node::text(" {s"),
    ])]);
    let mut matcher = MentionMatcher::new();
    matcher.on_change(&editor);
    assert_eq!(active(&matcher).search, "s");
    assert_eq!(editor.string(&active(&matcher).target), "{s");
}

#[test]
fn test_trigger_does_not_span_blocks() {
    let mut editor = editor_with(vec![
        Node::paragraph(vec![Node::text("{")]),
        Node::paragraph(vec![Node::text("sa")]),
    ]);
    let mut matcher = MentionMatcher::new();
    matcher.on_change(&editor);
    assert!(!matcher.is_active());

    editor.select_start();
    matcher.on_change(&editor);
    assert!(!matcher.is_active());
}

#[test]
fn test_no_selection_is_inactive() {
    let editor = Editor::new(Document::new(vec![Node::paragraph(vec![Node::text(
        "{sa",
    )])]));
    let mut matcher = MentionMatcher::new();
    matcher.on_change(&editor);
    assert_eq!(matcher.state(), &MentionState::Inactive);
    assert!(matcher.suggestions().is_empty());
    assert!(matcher.selected().is_none());
}
