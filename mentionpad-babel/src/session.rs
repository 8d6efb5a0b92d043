//! Event loop glue for one editing session.
//!
//! A key press goes to the mention matcher first, then to the formatting
//! hotkeys, then to default editing. Default editing makes the matcher
//! re-evaluate its trigger; a key the matcher consumed leaves its state as the
//! matcher set it, so Escape keeps the list closed until the next edit.

use crate::editor::{hotkey_mark, Editor, EditorHost, Key, KeyEvent, Point, Range, Unit};
use crate::mention::{KeyOutcome, MentionMatcher};
use crate::model::{Document, Marks, Node};

#[derive(Debug, Clone, Default)]
pub struct Session {
    editor: Editor,
    matcher: MentionMatcher,
}

impl Session {
    /// Start a session on `document` with the cursor at its end.
    pub fn new(document: Document) -> Self {
        Self::with_matcher(document, MentionMatcher::new())
    }

    pub fn with_matcher(document: Document, matcher: MentionMatcher) -> Self {
        let mut editor = Editor::new(document);
        editor.select_end();
        let mut session = Session { editor, matcher };
        session.changed();
        session
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn matcher(&self) -> &MentionMatcher {
        &self.matcher
    }

    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    /// Type `text` one character at a time, as keystrokes would.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.handle_key(&KeyEvent::new(Key::Char(ch)));
        }
    }

    /// Dispatch one key press. Returns whether anything consumed it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        if self.matcher.on_key_down(&mut self.editor, &event.key).is_handled() {
            return KeyOutcome::Handled;
        }

        if let Some(mark) = hotkey_mark(event) {
            self.editor.toggle_mark(mark);
            return KeyOutcome::Handled;
        }

        let unit = if event.modifiers.alt {
            Unit::Word
        } else {
            Unit::Character
        };
        let outcome = match &event.key {
            Key::Char(ch) if !event.modifiers.mod_key => {
                let mut buf = [0u8; 4];
                self.editor.insert_text(ch.encode_utf8(&mut buf));
                KeyOutcome::Handled
            }
            Key::Backspace => {
                self.editor.delete_backward(unit);
                KeyOutcome::Handled
            }
            Key::Enter => {
                self.editor.insert_break();
                KeyOutcome::Handled
            }
            Key::ArrowLeft => {
                self.editor.move_cursor(unit, false);
                KeyOutcome::Handled
            }
            Key::ArrowRight => {
                self.editor.move_cursor(unit, true);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        };
        if outcome.is_handled() {
            self.changed();
        }
        outcome
    }

    fn changed(&mut self) {
        self.matcher.on_change(&self.editor);
    }
}

impl EditorHost for Session {
    fn selection(&self) -> Option<&Range> {
        self.editor.selection()
    }

    fn before(&self, at: &Point, unit: Unit) -> Option<Point> {
        self.editor.before(at, unit)
    }

    fn after(&self, at: &Point, unit: Unit) -> Option<Point> {
        self.editor.after(at, unit)
    }

    fn string(&self, range: &Range) -> String {
        self.editor.string(range)
    }

    fn select(&mut self, range: Range) {
        self.editor.select(range);
        self.changed();
    }

    fn insert_node(&mut self, node: Node) {
        self.editor.insert_node(node);
        self.changed();
    }

    fn marks(&self) -> Marks {
        self.editor.marks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::MentionState;
    use crate::model::{Mark, Text};

    #[test]
    fn typing_a_trigger_opens_suggestions() {
        let mut session = Session::new(Document::initial());
        session.type_text("hey {s");
        assert_eq!(session.matcher().suggestions(), vec!["Sarang"]);

        session.handle_key(&"Tab".parse().unwrap());
        assert_eq!(session.matcher().state(), &MentionState::Inactive);
        assert_eq!(
            session.document().children,
            vec![Node::paragraph(vec![
                Node::text("hey "),
                Node::mention("{{Sarang}}"),
                Node::text(""),
            ])]
        );

        session.type_text(" hi");
        assert_eq!(session.editor().text(), "hey  hi");
    }

    #[test]
    fn arrows_are_consumed_only_while_active() {
        let mut session = Session::new(Document::initial());
        session.type_text("{a");
        let down = "ArrowDown".parse().unwrap();
        assert_eq!(session.handle_key(&down), KeyOutcome::Handled);
        assert_eq!(session.handle_key(&"Escape".parse().unwrap()), KeyOutcome::Handled);
        assert_eq!(session.handle_key(&down), KeyOutcome::Ignored);
    }

    #[test]
    fn hotkeys_toggle_marks_for_typed_text() {
        let mut session = Session::new(Document::initial());
        session.handle_key(&"mod+b".parse().unwrap());
        session.type_text("bold");
        assert_eq!(
            session.document().children,
            vec![Node::paragraph(vec![Node::Text(Text::with_marks(
                "bold",
                Marks::only(Mark::Bold)
            ))])]
        );
    }

    #[test]
    fn backspace_reopens_the_trigger() {
        let mut session = Session::new(Document::initial());
        session.type_text("{sa ");
        assert!(!session.matcher().is_active());
        session.handle_key(&"Backspace".parse().unwrap());
        assert!(session.matcher().is_active());
    }
}
