//! Block commands: headings, quotes and lists.
//!
//! Top-level lists are flattened into entries tagged with the list they came
//! from. Toggling rewrites the selected entries and regroups consecutive
//! entries that still share a list, which splits a list around an unwrapped
//! item the same way an unwrap-with-split would.

use super::{text_blocks, Editor};
use crate::model::{ElementKind, Node};

/// One top-level block, or one item of a top-level list.
struct Entry {
    node: Node,
    list: Option<(ElementKind, usize)>,
}

fn flatten(children: Vec<Node>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (index, node) in children.into_iter().enumerate() {
        match node {
            Node::Element(list) if list.kind.is_list() => {
                let kind = list.kind;
                entries.extend(list.children.into_iter().map(|item| Entry {
                    node: item,
                    list: Some((kind.clone(), index)),
                }));
            }
            node => entries.push(Entry { node, list: None }),
        }
    }
    entries
}

fn rebuild(entries: Vec<Entry>) -> Vec<Node> {
    let mut output = Vec::new();
    let mut group: Option<((ElementKind, usize), Vec<Node>)> = None;

    for entry in entries {
        if let Some((key, items)) = group.as_mut() {
            if entry.list.as_ref() == Some(key) {
                items.push(entry.node);
                continue;
            }
        }
        if let Some(((kind, _), items)) = group.take() {
            output.push(Node::element(kind, items));
        }
        match entry.list {
            Some(key) => group = Some((key, vec![entry.node])),
            None => output.push(entry.node),
        }
    }
    if let Some(((kind, _), items)) = group {
        output.push(Node::element(kind, items));
    }
    output
}

/// Index of the entry holding the node at `path`.
fn entry_index(children: &[Node], path: &[usize]) -> Option<usize> {
    let (&root, rest) = path.split_first()?;
    let mut index = 0;
    for node in children.get(..root)? {
        index += match node {
            Node::Element(list) if list.kind.is_list() => list.children.len(),
            _ => 1,
        };
    }
    match children.get(root)? {
        Node::Element(list) if list.kind.is_list() => Some(index + rest.first()?),
        _ => Some(index),
    }
}

impl Editor {
    /// Whether a text block touched by the selection, or one of its
    /// ancestors, is of type `format`.
    pub fn is_block_active(&self, format: &ElementKind) -> bool {
        let Some((start, end)) = self.selection_locations() else {
            return false;
        };
        let positions = self.positions();
        let doc = self.document();
        (start.block..=end.block)
            .filter_map(|block| positions.block_path(block))
            .any(|path| {
                (1..=path.len()).any(|depth| {
                    doc.node(&path[..depth])
                        .and_then(Node::as_element)
                        .is_some_and(|element| element.kind == *format)
                })
            })
    }

    /// Switch the selected blocks to `format`, or back to paragraphs when
    /// they already are. List formats wrap the blocks in a list of that kind.
    pub fn toggle_block(&mut self, format: ElementKind) {
        let Some((first, last)) = self.selected_entries() else {
            return;
        };
        let Some((start, end)) = self.selection_locations() else {
            return;
        };
        let Some(selection) = self.anchor_focus() else {
            return;
        };

        let active = self.is_block_active(&format);
        let is_list = format.is_list();
        let kind = if active {
            ElementKind::Paragraph
        } else if is_list {
            ElementKind::ListItem
        } else {
            format.clone()
        };

        let blocks = text_blocks(self.document());
        for path in &blocks[start.block..=end.block] {
            if let Some(Node::Element(element)) = self.document_mut().node_mut(path) {
                element.kind = kind.clone();
            }
        }

        let document = self.document_mut();
        let group = document.children.len();
        let mut entries = flatten(std::mem::take(&mut document.children));
        for entry in entries.iter_mut().take(last + 1).skip(first) {
            entry.list = if !active && is_list {
                Some((format.clone(), group))
            } else {
                None
            };
        }
        document.children = rebuild(entries);

        tracing::debug!(%format, active, entries = last - first + 1, "toggled block");
        self.select_locations(selection.0, selection.1);
    }

    fn selected_entries(&self) -> Option<(usize, usize)> {
        let (start, end) = self.selection_locations()?;
        let blocks = text_blocks(self.document());
        let children = &self.document().children;
        Some((
            entry_index(children, &blocks[start.block])?,
            entry_index(children, &blocks[end.block])?,
        ))
    }
}
