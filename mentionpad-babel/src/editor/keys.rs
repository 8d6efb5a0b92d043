//! Key events and the formatting hotkeys.
//!
//! Key descriptors use the browser's key names (`ArrowDown`, `Enter`, `a`)
//! with optional `mod+`, `alt+` and `shift+` prefixes. `mod` is the platform
//! command key, so `mod+b` is the bold hotkey everywhere.

use crate::model::Mark;
use std::fmt;
use std::str::FromStr;

/// Formatting hotkeys, matched in order.
pub const HOTKEYS: [(&str, Mark); 4] = [
    ("mod+b", Mark::Bold),
    ("mod+i", Mark::Italic),
    ("mod+u", Mark::Underline),
    ("mod+`", Mark::Code),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Tab,
    Enter,
    Escape,
    Backspace,
    Char(char),
    /// Any other named key, kept verbatim.
    Named(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub mod_key: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    Empty,
    UnknownModifier(String),
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseError::Empty => write!(f, "Empty key descriptor"),
            KeyParseError::UnknownModifier(name) => write!(f, "Unknown key modifier '{name}'"),
        }
    }
}

impl std::error::Error for KeyParseError {}

impl Key {
    pub fn name(&self) -> String {
        match self {
            Key::ArrowDown => "ArrowDown".to_string(),
            Key::ArrowUp => "ArrowUp".to_string(),
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Char(' ') => "Space".to_string(),
            Key::Char(ch) => ch.to_string(),
            Key::Named(name) => name.clone(),
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let key = match (chars.next(), chars.next()) {
            (None, _) => return Err(KeyParseError::Empty),
            (Some(ch), None) => Key::Char(ch),
            _ => match s {
                "ArrowDown" | "Down" => Key::ArrowDown,
                "ArrowUp" | "Up" => Key::ArrowUp,
                "ArrowLeft" | "Left" => Key::ArrowLeft,
                "ArrowRight" | "Right" => Key::ArrowRight,
                "Tab" => Key::Tab,
                "Enter" | "Return" => Key::Enter,
                "Escape" | "Esc" => Key::Escape,
                "Backspace" => Key::Backspace,
                "Space" => Key::Char(' '),
                other => Key::Named(other.to_string()),
            },
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        KeyEvent {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_mod(key: Key) -> Self {
        KeyEvent {
            key,
            modifiers: Modifiers {
                mod_key: true,
                ..Modifiers::default()
            },
        }
    }

    /// Whether this event matches a descriptor such as `mod+b`. Character
    /// keys compare case-insensitively.
    pub fn matches(&self, descriptor: &str) -> bool {
        match descriptor.parse::<KeyEvent>() {
            Ok(expected) => {
                expected.modifiers == self.modifiers
                    && match (&expected.key, &self.key) {
                        (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(b),
                        (a, b) => a == b,
                    }
            }
            Err(_) => false,
        }
    }
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    /// `+` separates modifiers, so a lone `+` or a trailing `++` names the
    /// plus key itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, key) = match s.strip_suffix("++") {
            Some(prefix) => (prefix, "+"),
            None if s == "+" => ("", "+"),
            None => match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            },
        };

        let mut modifiers = Modifiers::default();
        for name in prefix.split('+').filter(|name| !name.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "mod" | "cmd" | "ctrl" | "control" | "meta" => modifiers.mod_key = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => return Err(KeyParseError::UnknownModifier(name.to_string())),
            }
        }

        Ok(KeyEvent {
            key: key.parse()?,
            modifiers,
        })
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.mod_key {
            f.write_str("mod+")?;
        }
        if self.modifiers.alt {
            f.write_str("alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// The mark a formatting hotkey toggles, if `event` is one.
pub fn hotkey_mark(event: &KeyEvent) -> Option<Mark> {
    HOTKEYS
        .iter()
        .find(|(descriptor, _)| event.matches(descriptor))
        .map(|(_, mark)| *mark)
}
