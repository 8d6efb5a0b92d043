//! Structural helpers shared by the editor commands.
//!
//! Everything here works on plain `Vec<Node>` runs so that the commands can
//! take children out of the document, rebuild them and put them back.

use crate::model::{Document, Element, Node, Text};

/// Split a run of inline nodes at unit `at`. Text leaves are cut on
/// character boundaries; a void always lands whole on one side.
pub(crate) fn split_inline(nodes: Vec<Node>, at: usize) -> (Vec<Node>, Vec<Node>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut seen = 0;

    for node in nodes {
        if seen >= at {
            right.push(node);
            continue;
        }
        match node {
            Node::Text(text) => {
                let len = text.text.chars().count();
                if seen + len <= at {
                    seen += len;
                    left.push(Node::Text(text));
                } else {
                    let cut = byte_index(&text.text, at - seen);
                    let (head, tail) = text.text.split_at(cut);
                    left.push(Node::Text(Text::with_marks(head, text.marks)));
                    right.push(Node::Text(Text::with_marks(tail, text.marks)));
                    seen = at;
                }
            }
            Node::Element(element) => {
                seen += 1;
                left.push(Node::Element(element));
            }
        }
    }

    (left, right)
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

/// Bring a run of inline nodes back into canonical shape:
/// - adjacent leaves with equal marks merge
/// - an empty leaf next to another leaf disappears
/// - every inline element has a leaf on both sides
/// - the run is never empty
pub(crate) fn normalize_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());

    for node in nodes {
        let node = match node {
            Node::Element(element) => Node::Element(normalize_element(element)),
            text => text,
        };
        match (merged.last_mut(), node) {
            (Some(Node::Text(prev)), Node::Text(next)) => {
                if prev.marks == next.marks || prev.text.is_empty() {
                    if prev.marks != next.marks {
                        prev.marks = next.marks;
                    }
                    prev.text.push_str(&next.text);
                } else if !next.text.is_empty() {
                    merged.push(Node::Text(next));
                }
            }
            (_, node) => merged.push(node),
        }
    }

    let mut output = Vec::with_capacity(merged.len() + 2);
    for node in merged {
        if !matches!(node, Node::Text(_)) && !matches!(output.last(), Some(Node::Text(_))) {
            output.push(Node::text(""));
        }
        output.push(node);
    }
    if !matches!(output.last(), Some(Node::Text(_))) {
        output.push(Node::text(""));
    }
    output
}

/// Canonical shape for one element and everything below it.
pub(crate) fn normalize_element(mut element: Element) -> Element {
    if element.kind.is_void() {
        element.children = vec![Node::text("")];
        return element;
    }
    element.children = normalize_children(std::mem::take(&mut element.children));
    element
}

fn normalize_children(children: Vec<Node>) -> Vec<Node> {
    if children.iter().all(Node::is_inline) {
        return normalize_inline(children);
    }
    normalize_blocks(children)
}

/// Block containers hold only blocks: runs of loose inline nodes are wrapped
/// in paragraphs.
pub(crate) fn normalize_blocks(children: Vec<Node>) -> Vec<Node> {
    let mut output = Vec::with_capacity(children.len());
    let mut run = Vec::new();

    for node in children {
        if node.is_inline() {
            run.push(node);
            continue;
        }
        if !run.is_empty() {
            output.push(Node::paragraph(normalize_inline(std::mem::take(&mut run))));
        }
        if let Node::Element(element) = node {
            output.push(Node::Element(normalize_element(element)));
        }
    }
    if !run.is_empty() {
        output.push(Node::paragraph(normalize_inline(run)));
    }
    output
}

pub(crate) fn normalize_document(document: Document) -> Document {
    let children = normalize_blocks(document.children);
    if children.is_empty() {
        return Document::initial();
    }
    Document::new(children)
}

/// Remove the node at `path`, then every ancestor left without children.
pub(crate) fn remove_pruning(document: &mut Document, path: &[usize]) {
    let Some((index, parent)) = path.split_last() else {
        return;
    };
    let Some(siblings) = document.children_mut(parent) else {
        return;
    };
    if *index < siblings.len() {
        siblings.remove(*index);
    }
    if siblings.is_empty() && !parent.is_empty() {
        remove_pruning(document, parent);
    }
}

/// Insert `node` as the sibling right after `path`.
pub(crate) fn insert_after(document: &mut Document, path: &[usize], node: Node) -> bool {
    let Some((index, parent)) = path.split_last() else {
        return false;
    };
    match document.children_mut(parent) {
        Some(siblings) => {
            let at = (*index + 1).min(siblings.len());
            siblings.insert(at, node);
            true
        }
        None => false,
    }
}
