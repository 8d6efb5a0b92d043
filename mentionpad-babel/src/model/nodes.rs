//! Core data structures for the document tree.
//!
//! The serde shape matches the editor's JSON value: text leaves are
//! `{"text": "..", "bold": true}` with false marks omitted, elements are
//! `{"type": "..", "children": [..]}` and mentions carry `"character"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(Text),
    Element(Element),
}

/// The root of a document: an ordered sequence of block-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub children: Vec<Node>,
}

/// A text leaf and its marks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(flatten)]
    pub marks: Marks,
}

/// Independent style flags carried by a text leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marks {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single mark, used by toggles and hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Code];

    pub fn name(self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Code => "code",
        }
    }

    pub fn from_name(name: &str) -> Option<Mark> {
        Mark::ALL.into_iter().find(|mark| mark.name() == name)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Marks {
    pub fn only(mark: Mark) -> Self {
        Marks::default().with(mark, true)
    }

    pub fn get(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Code => self.code,
        }
    }

    pub fn set(&mut self, mark: Mark, value: bool) {
        match mark {
            Mark::Bold => self.bold = value,
            Mark::Italic => self.italic = value,
            Mark::Underline => self.underline = value,
            Mark::Code => self.code = value,
        }
    }

    pub fn with(mut self, mark: Mark, value: bool) -> Self {
        self.set(mark, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Mark::ALL.iter().all(|mark| !self.get(*mark))
    }

    /// Marks that are set, in declaration order.
    pub fn active(&self) -> Vec<Mark> {
        Mark::ALL
            .into_iter()
            .filter(|mark| self.get(*mark))
            .collect()
    }
}

/// An element node: a type tag plus ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawElement", into = "RawElement")]
pub struct Element {
    pub kind: ElementKind,
    pub children: Vec<Node>,
}

/// The element type vocabulary.
///
/// `Other` keeps any tag outside the vocabulary so that it survives a JSON
/// round trip; such elements serialize to HTML as their bare children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    NumberedList,
    BulletedList,
    ListItem,
    Mention { character: String },
    Other(String),
}

impl ElementKind {
    /// The type tag as it appears in the JSON value.
    pub fn tag(&self) -> &str {
        match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::HeadingOne => "heading-one",
            ElementKind::HeadingTwo => "heading-two",
            ElementKind::BlockQuote => "block-quote",
            ElementKind::NumberedList => "numbered-list",
            ElementKind::BulletedList => "bulleted-list",
            ElementKind::ListItem => "list-item",
            ElementKind::Mention { .. } => "mention",
            ElementKind::Other(tag) => tag,
        }
    }

    /// Build a kind from a type tag. Mentions need their payload, so the
    /// `mention` tag maps to a mention with an empty character.
    pub fn from_tag(tag: &str) -> ElementKind {
        match tag {
            "paragraph" => ElementKind::Paragraph,
            "heading-one" => ElementKind::HeadingOne,
            "heading-two" => ElementKind::HeadingTwo,
            "block-quote" => ElementKind::BlockQuote,
            "numbered-list" => ElementKind::NumberedList,
            "bulleted-list" => ElementKind::BulletedList,
            "list-item" => ElementKind::ListItem,
            "mention" => ElementKind::Mention {
                character: String::new(),
            },
            other => ElementKind::Other(other.to_string()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ElementKind::NumberedList | ElementKind::BulletedList)
    }

    /// Inline elements live among text leaves. Only mentions are inline.
    pub fn is_inline(&self) -> bool {
        matches!(self, ElementKind::Mention { .. })
    }

    /// Void elements have no editable content. Only mentions are void.
    pub fn is_void(&self) -> bool {
        matches!(self, ElementKind::Mention { .. })
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Serialize, Deserialize)]
struct RawElement {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    character: Option<String>,
    children: Vec<Node>,
}

impl TryFrom<RawElement> for Element {
    type Error = String;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let kind = match (raw.kind.as_str(), raw.character) {
            ("mention", Some(character)) => ElementKind::Mention { character },
            ("mention", None) => return Err("mention element without a character".to_string()),
            (tag, _) => ElementKind::from_tag(tag),
        };
        Ok(Element {
            kind,
            children: raw.children,
        })
    }
}

impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        let kind = element.kind.tag().to_string();
        let character = match element.kind {
            ElementKind::Mention { character } => Some(character),
            _ => None,
        };
        RawElement {
            kind,
            character,
            children: element.children,
        }
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: Marks) -> Self {
        Text {
            text: text.into(),
            marks,
        }
    }
}

impl Element {
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Element { kind, children }
    }

    /// A mention is always an inline void holding one empty text child.
    pub fn mention(character: impl Into<String>) -> Self {
        Element {
            kind: ElementKind::Mention {
                character: character.into(),
            },
            children: vec![Node::Text(Text::default())],
        }
    }

    /// Whether this element directly holds inline content (text leaves and
    /// inline elements) rather than other blocks.
    pub fn has_inline_children(&self) -> bool {
        self.children.iter().all(Node::is_inline)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(Text::new(text))
    }

    pub fn element(kind: ElementKind, children: Vec<Node>) -> Node {
        Node::Element(Element::new(kind, children))
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        Node::element(ElementKind::Paragraph, children)
    }

    pub fn mention(character: impl Into<String>) -> Node {
        Node::Element(Element::mention(character))
    }

    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text(_) => true,
            Node::Element(element) => element.kind.is_inline(),
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Element(element) => &element.children,
        }
    }

    /// Concatenated text of all leaves below this node. Void elements
    /// contribute nothing.
    pub fn string(&self) -> String {
        let mut output = String::new();
        collect_string(self, &mut output);
        output
    }
}

fn collect_string(node: &Node, output: &mut String) {
    match node {
        Node::Text(text) => output.push_str(&text.text),
        Node::Element(element) if element.kind.is_void() => {}
        Node::Element(element) => {
            for child in &element.children {
                collect_string(child, output);
            }
        }
    }
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }

    /// The document every editor session starts from: one empty paragraph.
    pub fn initial() -> Self {
        Document {
            children: vec![Node::paragraph(vec![Node::text("")])],
        }
    }

    /// Node at `path`, descending through children indices.
    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for index in rest {
            node = match node {
                Node::Element(element) => element.children.get_mut(*index)?,
                Node::Text(_) => return None,
            };
        }
        Some(node)
    }

    /// Children of the node at `path`; the empty path addresses the root.
    pub fn children_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Node>> {
        if path.is_empty() {
            return Some(&mut self.children);
        }
        match self.node_mut(path)? {
            Node::Element(element) => Some(&mut element.children),
            Node::Text(_) => None,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_serializes_without_false_marks() {
        let text = Node::Text(Text::with_marks("hi", Marks::only(Mark::Bold)));
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#"{"text":"hi","bold":true}"#);
    }

    #[test]
    fn mention_round_trips_through_json() {
        let node = Node::mention("{{Sarang}}");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"mention","character":"{{Sarang}}","children":[{"text":""}]}"#
        );
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn unknown_type_is_preserved() {
        let json = r#"{"type":"quote","children":[{"text":"x"}]}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let element = node.as_element().unwrap();
        assert_eq!(element.kind, ElementKind::Other("quote".to_string()));
        assert_eq!(serde_json::to_string(&node).unwrap(), json);
    }

    #[test]
    fn mention_without_character_is_rejected() {
        let json = r#"{"type":"mention","children":[{"text":""}]}"#;
        assert!(serde_json::from_str::<Node>(json).is_err());
    }

    #[test]
    fn document_is_a_bare_array() {
        let doc = Document::initial();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"[{"type":"paragraph","children":[{"text":""}]}]"#);
    }

    #[test]
    fn string_skips_void_content() {
        let para = Node::paragraph(vec![
            Node::text("hello "),
            Node::mention("{{Ayushi}}"),
            Node::text("!"),
        ]);
        assert_eq!(para.string(), "hello !");
    }

    #[test]
    fn node_lookup_by_path() {
        let doc = Document::new(vec![Node::element(
            ElementKind::BulletedList,
            vec![Node::element(
                ElementKind::ListItem,
                vec![Node::text("item")],
            )],
        )]);
        let leaf = doc.node(&[0, 0, 0]).and_then(Node::as_text).unwrap();
        assert_eq!(leaf.text, "item");
        assert!(doc.node(&[0, 1]).is_none());
        assert!(doc.node(&[]).is_none());
    }

    #[test]
    fn marks_helpers() {
        let marks = Marks::only(Mark::Italic).with(Mark::Code, true);
        assert_eq!(marks.active(), vec![Mark::Italic, Mark::Code]);
        assert!(!marks.is_empty());
        assert_eq!(Mark::from_name("underline"), Some(Mark::Underline));
        assert_eq!(Mark::from_name("strike"), None);
    }
}
