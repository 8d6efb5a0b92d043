//! Mention autocomplete.
//!
//! Typing `{` followed by word characters right before the cursor opens a
//! suggestion list filtered by what was typed. While the list is open the
//! arrow keys move through it, Tab or Enter replaces the typed trigger with a
//! mention element, and Escape closes the list.
//!
//! The matcher is an explicit two-state machine. It never owns the document:
//! every read and write goes through an [`EditorHost`].

use crate::editor::{EditorHost, Key, Range, Unit};
use crate::model::Node;
use once_cell::sync::Lazy;
use regex::Regex;

/// Names offered by the suggestion list.
pub const CHARACTERS: [&str; 2] = ["Ayushi", "Sarang"];

/// The suggestion list never shows more than this many names.
pub const MAX_SUGGESTIONS: usize = 10;

static BEFORE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{([A-Za-z0-9_]+)$").unwrap());
static AFTER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s|$)").unwrap());

/// Case-insensitive prefix filter over `candidates`, capped at
/// [`MAX_SUGGESTIONS`].
pub fn filter_candidates<'a>(candidates: &'a [String], search: &str) -> Vec<&'a str> {
    let search = search.to_lowercase();
    candidates
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&search))
        .take(MAX_SUGGESTIONS)
        .map(String::as_str)
        .collect()
}

/// Wrap a candidate name in the `{{` `}}` delimiters mentions carry.
pub fn mention_character(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// An open suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMention {
    /// The typed trigger, `{` included. Replaced on insertion.
    pub target: Range,
    /// Word characters typed after `{`.
    pub search: String,
    /// Highlighted suggestion.
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MentionState {
    #[default]
    Inactive,
    Active(ActiveMention),
}

/// Whether a key press was consumed. A handled key must not fall through to
/// default editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

impl KeyOutcome {
    pub fn is_handled(self) -> bool {
        self == KeyOutcome::Handled
    }
}

#[derive(Debug, Clone)]
pub struct MentionMatcher {
    candidates: Vec<String>,
    state: MentionState,
}

impl Default for MentionMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionMatcher {
    /// A matcher over the built-in [`CHARACTERS`].
    pub fn new() -> Self {
        Self::with_candidates(CHARACTERS.iter().map(|name| name.to_string()))
    }

    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MentionMatcher {
            candidates: candidates.into_iter().map(Into::into).collect(),
            state: MentionState::Inactive,
        }
    }

    pub fn state(&self) -> &MentionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, MentionState::Active(_))
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Filtered candidates for the current search; empty while inactive.
    pub fn suggestions(&self) -> Vec<&str> {
        match &self.state {
            MentionState::Active(active) => filter_candidates(&self.candidates, &active.search),
            MentionState::Inactive => Vec::new(),
        }
    }

    /// The highlighted suggestion, if any.
    pub fn selected(&self) -> Option<&str> {
        match &self.state {
            MentionState::Active(active) => self.suggestions().get(active.index).copied(),
            MentionState::Inactive => None,
        }
    }

    /// Re-evaluate the trigger after any document or selection change.
    pub fn on_change<H: EditorHost + ?Sized>(&mut self, host: &H) {
        let next = match detect(host) {
            Some((target, search)) => MentionState::Active(ActiveMention {
                target,
                search,
                index: 0,
            }),
            None => MentionState::Inactive,
        };
        if next != self.state {
            match &next {
                MentionState::Active(active) => {
                    tracing::debug!(search = %active.search, "mention trigger active")
                }
                MentionState::Inactive if self.is_active() => {
                    tracing::debug!("mention trigger cleared")
                }
                MentionState::Inactive => {}
            }
        }
        self.state = next;
    }

    /// Handle a key press. Only the navigation and commit keys are consumed,
    /// and only while a suggestion list is open.
    pub fn on_key_down<H: EditorHost + ?Sized>(&mut self, host: &mut H, key: &Key) -> KeyOutcome {
        let MentionState::Active(active) = &self.state else {
            return KeyOutcome::Ignored;
        };
        let count = self.suggestions().len();
        let index = active.index;

        match key {
            Key::ArrowDown => {
                let next = if count == 0 || index + 1 >= count { 0 } else { index + 1 };
                self.set_index(next);
            }
            Key::ArrowUp => {
                let next = if index == 0 { count.saturating_sub(1) } else { index - 1 };
                self.set_index(next);
            }
            Key::Tab | Key::Enter => {
                let target = active.target.clone();
                match self.selected().map(mention_character) {
                    Some(character) => {
                        host.select(target);
                        host.insert_node(Node::mention(character.as_str()));
                        tracing::debug!(%character, "inserted mention");
                    }
                    None => tracing::debug!("no suggestion to insert"),
                }
                self.state = MentionState::Inactive;
            }
            Key::Escape => {
                tracing::debug!("mention suggestions dismissed");
                self.state = MentionState::Inactive;
            }
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    fn set_index(&mut self, index: usize) {
        if let MentionState::Active(active) = &mut self.state {
            active.index = index;
        }
    }
}

/// The trigger range and search text at a collapsed cursor, if the text just
/// before it is `{word` and nothing but whitespace (or the end) follows.
fn detect<H: EditorHost + ?Sized>(host: &H) -> Option<(Range, String)> {
    let selection = host.selection()?;
    if !selection.is_collapsed() {
        return None;
    }
    let cursor = selection.anchor.clone();

    let word_before = host.before(&cursor, Unit::Word)?;
    let before = host.before(&word_before, Unit::Character)?;
    let before_range = Range::new(before, cursor.clone());
    let before_text = host.string(&before_range);
    let search = BEFORE_PATTERN.captures(&before_text)?.get(1)?.as_str().to_string();

    let after_text = match host.after(&cursor, Unit::Character) {
        Some(after) => host.string(&Range::new(cursor, after)),
        None => String::new(),
    };
    if !AFTER_PATTERN.is_match(&after_text) {
        return None;
    }

    Some((before_range, search))
}
