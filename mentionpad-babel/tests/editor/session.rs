//! Full sessions: keystrokes in, HTML out.

use insta::assert_snapshot;
use mentionpad_babel::format::Format;
use mentionpad_babel::formats::TreevizFormat;
use mentionpad_babel::{to_html, Document, KeyEvent, KeyOutcome, Session};

fn key(descriptor: &str) -> KeyEvent {
    descriptor.parse().unwrap()
}

#[test]
fn test_typing_a_mention_end_to_end() {
    let mut session = Session::new(Document::initial());
    session.type_text("cc {ay");
    assert_eq!(session.matcher().suggestions(), vec!["Ayushi"]);
    assert_eq!(session.handle_key(&key("Enter")), KeyOutcome::Handled);
    session.type_text(" thanks");

    assert_eq!(
        to_html(session.document()).unwrap(),
        "<p>cc <span style=\"color: darkblue\">{{Ayushi}}</span> thanks</p>"
    );
}

#[test]
fn test_enter_without_trigger_splits_the_paragraph() {
    let mut session = Session::new(Document::initial());
    session.type_text("one");
    session.handle_key(&key("Enter"));
    session.type_text("two");
    assert_eq!(
        to_html(session.document()).unwrap(),
        "<p>one</p><p>two</p>"
    );
}

#[test]
fn test_hotkeys_format_as_you_type() {
    let mut session = Session::new(Document::initial());
    session.type_text("a ");
    session.handle_key(&key("mod+i"));
    session.type_text("b");
    session.handle_key(&key("mod+i"));
    session.type_text(" c");
    assert_eq!(
        to_html(session.document()).unwrap(),
        "<p>a <em>b</em> c</p>"
    );
}

#[test]
fn test_session_tree_snapshot() {
    let mut session = Session::new(Document::initial());
    session.type_text("hi {sa");
    session.handle_key(&key("Tab"));
    session.handle_key(&key("mod+b"));
    session.type_text("!");

    let tree = TreevizFormat.serialize(session.document()).unwrap();
    assert_snapshot!(tree, @r###"
    ⧉ Document (1 items)
    └─ ¶ paragraph
      ├─ ◦ "hi "
      ├─ @ mention {{Sarang}}
      └─ ◦ "!" [bold]
    "###);
}
