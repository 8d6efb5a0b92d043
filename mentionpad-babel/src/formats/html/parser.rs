//! HTML parsing (HTML import → tree)
//!
//! Pipeline: HTML string → html5ever RcDom → walk `<body>` → document tree
//!
//! The walk is a thin switch over known tag names. Every DOM node yields a
//! [`Deserialized`] value; unknown elements fall back to their text content
//! and nothing here ever fails.

use super::{MentionText, ParseOptions};
use crate::model::{Document, ElementKind, Mark, Marks, Node, Text};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Result of deserializing one DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deserialized {
    /// A tree node.
    Node(Node),
    /// A raw text run, or the `"\n"` marker produced by `<br>`.
    Text(String),
    /// The resolved children of the root container.
    Fragment(Vec<Node>),
    /// Comments, doctypes and processing instructions.
    Nothing,
}

/// Parse an HTML string with default options.
pub fn parse_html(source: &str) -> Document {
    parse_html_with_options(source, &ParseOptions::default())
}

/// Parse an HTML string and deserialize its `<body>`.
pub fn parse_html_with_options(source: &str, options: &ParseOptions) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);

    let Some(body) = find_element(&dom.document, "body") else {
        tracing::debug!("html input has no body, producing an empty document");
        return Document::new(Vec::new());
    };

    let children = match deserialize_node(&body, options) {
        Deserialized::Fragment(nodes) => nodes,
        other => resolve_descendants(vec![other]),
    };
    tracing::debug!(blocks = children.len(), "parsed html document");
    Document::new(children)
}

/// Deserialize a DOM node and its subtree.
pub fn deserialize_node(handle: &Handle, options: &ParseOptions) -> Deserialized {
    let name = match &handle.data {
        NodeData::Text { contents } => return Deserialized::Text(contents.borrow().to_string()),
        NodeData::Element { name, .. } => name.local.clone(),
        _ => return Deserialized::Nothing,
    };

    let children = || -> Vec<Deserialized> {
        handle
            .children
            .borrow()
            .iter()
            .map(|child| deserialize_node(child, options))
            .collect()
    };

    match &*name {
        "body" => Deserialized::Fragment(resolve_descendants(children())),
        "br" => Deserialized::Text("\n".to_string()),
        "blockquote" => element(options.quote_kind(), children()),
        "p" => element(ElementKind::Paragraph, children()),
        "strong" => styled(Mark::Bold, children()),
        "em" => styled(Mark::Italic, children()),
        "u" => styled(Mark::Underline, children()),
        "code" => styled(Mark::Code, children()),
        "span" => {
            let character = mention_text(&children(), options.mention_text);
            Deserialized::Node(Node::mention(character))
        }
        "h1" => element(ElementKind::HeadingOne, children()),
        "h2" => element(ElementKind::HeadingTwo, children()),
        "li" => element(ElementKind::ListItem, children()),
        "ol" => element(ElementKind::NumberedList, children()),
        "ul" => element(ElementKind::BulletedList, children()),
        _ => Deserialized::Text(text_content(handle)),
    }
}

/// Turn child results into tree nodes: strings become plain text leaves,
/// adjacent strings merge, fragments flatten and `Nothing` disappears.
fn resolve_descendants(children: Vec<Deserialized>) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut last_was_string = false;

    for child in children {
        match child {
            Deserialized::Nothing => {}
            Deserialized::Text(text) => {
                if last_was_string {
                    if let Some(Node::Text(prev)) = nodes.last_mut() {
                        prev.text.push_str(&text);
                        continue;
                    }
                }
                nodes.push(Node::text(text));
                last_was_string = true;
            }
            Deserialized::Node(node) => {
                nodes.push(node);
                last_was_string = false;
            }
            Deserialized::Fragment(inner) => {
                nodes.extend(inner);
                last_was_string = false;
            }
        }
    }

    nodes
}

fn element(kind: ElementKind, children: Vec<Deserialized>) -> Deserialized {
    let mut nodes = resolve_descendants(children);
    if nodes.is_empty() {
        nodes.push(Node::text(""));
    }
    Deserialized::Node(Node::element(kind, nodes))
}

/// A style tag becomes one text leaf carrying only `mark`, built from the
/// first child that produced anything. A leading run of strings counts as one
/// child, so `<br>` and comments inside the tag keep the text around them.
/// Marks of nested style tags are lost.
fn styled(mark: Mark, children: Vec<Deserialized>) -> Deserialized {
    let mut results = children
        .into_iter()
        .filter(|child| !matches!(child, Deserialized::Nothing))
        .peekable();

    let text = match results.next() {
        Some(Deserialized::Text(mut text)) => {
            while let Some(Deserialized::Text(next)) = results.peek() {
                text.push_str(next);
                results.next();
            }
            text
        }
        Some(other) => string_of(&other),
        None => String::new(),
    };
    Deserialized::Node(Node::Text(Text::with_marks(text, Marks::only(mark))))
}

fn mention_text(children: &[Deserialized], mode: MentionText) -> String {
    match mode {
        MentionText::Concat => children.iter().map(string_of).collect(),
        MentionText::CommaJoined => children
            .iter()
            .map(string_of)
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn string_of(result: &Deserialized) -> String {
    match result {
        Deserialized::Text(text) => text.clone(),
        Deserialized::Node(node) => node.string(),
        Deserialized::Fragment(nodes) => nodes.iter().map(Node::string).collect(),
        Deserialized::Nothing => String::new(),
    }
}

/// Concatenated text of every descendant text node, like DOM `textContent`.
fn text_content(handle: &Handle) -> String {
    let mut output = String::new();
    collect_text(handle, &mut output);
    output
}

fn collect_text(handle: &Handle, output: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => output.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, output);
            }
        }
        _ => {}
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}
