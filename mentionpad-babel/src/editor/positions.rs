//! Cursor positions over text blocks.
//!
//! A text block is an element whose children are all inline (text leaves and
//! mentions). Inside a block every character is one unit and every void
//! inline is one unit, so a cursor location is a block index plus a unit
//! count. Leaf boundaries do not cost a step, crossing into the previous or
//! next block does.

use super::point::{Path, Point, Range};
use crate::model::{Document, Element, Node};
use once_cell::sync::Lazy;
use regex::Regex;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}$").unwrap());

/// A cursor location: which text block, and how many units into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Location {
    pub block: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(block: usize, offset: usize) -> Self {
        Location { block, offset }
    }
}

/// One step inside a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Char { child: usize, offset: usize, ch: char },
    Void { child: usize },
}

impl Slot {
    fn is_word(&self) -> bool {
        match self {
            Slot::Char { ch, .. } => is_word_char(*ch),
            Slot::Void { .. } => false,
        }
    }
}

fn is_word_char(ch: char) -> bool {
    if ch.is_whitespace() {
        return false;
    }
    let mut buf = [0u8; 4];
    !PUNCTUATION.is_match(ch.encode_utf8(&mut buf))
}

/// Paths of every text block, in document order.
pub(crate) fn text_blocks(doc: &Document) -> Vec<Path> {
    let mut blocks = Vec::new();
    let mut path = Vec::new();
    collect_blocks(&doc.children, &mut path, &mut blocks);
    blocks
}

fn collect_blocks(nodes: &[Node], path: &mut Path, out: &mut Vec<Path>) {
    for (index, node) in nodes.iter().enumerate() {
        let Node::Element(element) = node else {
            continue;
        };
        if element.kind.is_inline() {
            continue;
        }
        path.push(index);
        if element.has_inline_children() {
            out.push(path.clone());
        } else {
            collect_blocks(&element.children, path, out);
        }
        path.pop();
    }
}

/// Units of a text block.
pub(crate) fn slots(block: &Element) -> Vec<Slot> {
    let mut slots = Vec::new();
    for (child, node) in block.children.iter().enumerate() {
        match node {
            Node::Text(text) => {
                slots.extend(
                    text.text
                        .char_indices()
                        .map(|(offset, ch)| Slot::Char { child, offset, ch }),
                );
            }
            Node::Element(_) => slots.push(Slot::Void { child }),
        }
    }
    slots
}

/// Number of units a run of inline nodes occupies.
pub(crate) fn unit_len(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) => text.text.chars().count(),
            Node::Element(_) => 1,
        })
        .sum()
}

/// Read-only view used by the editor to move between points and locations.
pub(crate) struct Positions<'a> {
    doc: &'a Document,
    blocks: Vec<Path>,
}

impl<'a> Positions<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Positions {
            doc,
            blocks: text_blocks(doc),
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_path(&self, block: usize) -> Option<&Path> {
        self.blocks.get(block)
    }

    pub fn block(&self, block: usize) -> Option<&'a Element> {
        let path = self.blocks.get(block)?;
        self.doc.node(path)?.as_element()
    }

    pub fn block_len(&self, block: usize) -> usize {
        self.block(block)
            .map(|element| unit_len(&element.children))
            .unwrap_or(0)
    }

    pub fn end(&self) -> Option<Location> {
        let last = self.blocks.len().checked_sub(1)?;
        Some(Location::new(last, self.block_len(last)))
    }

    /// Resolve a point to a location. Offsets past the leaf end clamp to it.
    pub fn locate(&self, point: &Point) -> Option<Location> {
        let block = self
            .blocks
            .iter()
            .position(|path| point.path.len() > path.len() && point.path.starts_with(path))?;
        let element = self.block(block)?;
        let depth = self.blocks[block].len();
        let child = point.path[depth];
        let before = unit_len(element.children.get(..child)?);

        let offset = match element.children.get(child)? {
            Node::Text(text) => {
                let mut end = point.offset.min(text.text.len());
                while !text.text.is_char_boundary(end) {
                    end -= 1;
                }
                before + text.text[..end].chars().count()
            }
            Node::Element(_) => before,
        };
        Some(Location::new(block, offset))
    }

    /// The point a location maps to. Boundaries between leaves resolve to
    /// the start of the following leaf; the block end resolves to the end of
    /// the last leaf.
    pub fn point(&self, location: Location) -> Option<Point> {
        let element = self.block(location.block)?;
        let path = &self.blocks[location.block];
        let slots = slots(element);

        let with_child = |child: usize, tail: &[usize], offset: usize| {
            let mut full = path.clone();
            full.push(child);
            full.extend_from_slice(tail);
            Point::new(full, offset)
        };

        if let Some(slot) = slots.get(location.offset) {
            return Some(match *slot {
                Slot::Char { child, offset, .. } => with_child(child, &[], offset),
                Slot::Void { child } => with_child(child, &[0], 0),
            });
        }

        let last = element.children.len().checked_sub(1)?;
        Some(match &element.children[last] {
            Node::Text(text) => with_child(last, &[], text.text.len()),
            Node::Element(_) => with_child(last, &[0], 0),
        })
    }

    pub fn before_char(&self, at: Location) -> Option<Location> {
        if at.offset > 0 {
            Some(Location::new(at.block, at.offset - 1))
        } else {
            let previous = at.block.checked_sub(1)?;
            Some(Location::new(previous, self.block_len(previous)))
        }
    }

    pub fn after_char(&self, at: Location) -> Option<Location> {
        if at.offset < self.block_len(at.block) {
            Some(Location::new(at.block, at.offset + 1))
        } else if at.block + 1 < self.blocks.len() {
            Some(Location::new(at.block + 1, 0))
        } else {
            None
        }
    }

    /// Skip separators, then one run of word characters, going backwards.
    pub fn before_word(&self, at: Location) -> Option<Location> {
        if at.offset == 0 {
            return self.before_char(at);
        }
        let slots = slots(self.block(at.block)?);
        let mut offset = at.offset.min(slots.len());
        let mut started = false;
        while offset > 0 {
            let word = slots[offset - 1].is_word();
            if word {
                started = true;
            } else if started {
                break;
            }
            offset -= 1;
        }
        Some(Location::new(at.block, offset))
    }

    pub fn after_word(&self, at: Location) -> Option<Location> {
        let slots = slots(self.block(at.block)?);
        if at.offset >= slots.len() {
            return self.after_char(at);
        }
        let mut offset = at.offset;
        let mut started = false;
        while offset < slots.len() {
            let word = slots[offset].is_word();
            if word {
                started = true;
            } else if started {
                break;
            }
            offset += 1;
        }
        Some(Location::new(at.block, offset))
    }

    /// Text between two locations; voids contribute nothing and blocks are
    /// joined without separators.
    pub fn string(&self, start: Location, end: Location) -> String {
        let mut output = String::new();
        for block in start.block..=end.block {
            let Some(element) = self.block(block) else {
                continue;
            };
            let slots = slots(element);
            let from = if block == start.block { start.offset } else { 0 };
            let to = if block == end.block {
                end.offset.min(slots.len())
            } else {
                slots.len()
            };
            for slot in slots.get(from..to).unwrap_or(&[]) {
                if let Slot::Char { ch, .. } = slot {
                    output.push(*ch);
                }
            }
        }
        output
    }

    pub fn range_locations(&self, range: &Range) -> Option<(Location, Location)> {
        let (start, end) = range.edges();
        Some((self.locate(start)?, self.locate(end)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;

    fn doc() -> Document {
        Document::new(vec![
            Node::paragraph(vec![Node::text("foo {bar")]),
            Node::element(
                ElementKind::BulletedList,
                vec![Node::element(
                    ElementKind::ListItem,
                    vec![Node::text("a "), Node::mention("{{X}}"), Node::text("b")],
                )],
            ),
        ])
    }

    #[test]
    fn finds_nested_text_blocks() {
        let doc = doc();
        assert_eq!(text_blocks(&doc), vec![vec![0], vec![1, 0]]);
    }

    #[test]
    fn locate_and_point_agree() {
        let doc = doc();
        let positions = Positions::new(&doc);
        let point = Point::new(vec![1, 0, 2], 1);
        let location = positions.locate(&point).unwrap();
        assert_eq!(location, Location::new(1, 4));
        assert_eq!(positions.point(location), Some(point));
    }

    #[test]
    fn void_counts_as_one_unit() {
        let doc = doc();
        let positions = Positions::new(&doc);
        let inside = Point::new(vec![1, 0, 1, 0], 0);
        assert_eq!(positions.locate(&inside), Some(Location::new(1, 2)));
        assert_eq!(
            positions.point(Location::new(1, 3)),
            Some(Point::new(vec![1, 0, 2], 0))
        );
    }

    #[test]
    fn word_movement_stops_at_punctuation() {
        let doc = doc();
        let positions = Positions::new(&doc);
        let end = Location::new(0, 8);
        let word = positions.before_word(end).unwrap();
        assert_eq!(word, Location::new(0, 5));
        let before = positions.before_char(word).unwrap();
        assert_eq!(positions.string(before, end), "{bar");
    }

    #[test]
    fn word_movement_skips_leading_separators() {
        let doc = Document::new(vec![Node::paragraph(vec![Node::text("one two  ")])]);
        let positions = Positions::new(&doc);
        assert_eq!(
            positions.before_word(Location::new(0, 9)),
            Some(Location::new(0, 4))
        );
        assert_eq!(
            positions.after_word(Location::new(0, 0)),
            Some(Location::new(0, 3))
        );
    }

    #[test]
    fn character_movement_crosses_blocks() {
        let doc = doc();
        let positions = Positions::new(&doc);
        assert_eq!(
            positions.before_char(Location::new(1, 0)),
            Some(Location::new(0, 8))
        );
        assert_eq!(
            positions.after_char(Location::new(0, 8)),
            Some(Location::new(1, 0))
        );
        assert_eq!(positions.after_char(Location::new(1, 4)), None);
        assert_eq!(positions.before_char(Location::new(0, 0)), None);
    }

    #[test]
    fn string_skips_voids_and_joins_blocks() {
        let doc = doc();
        let positions = Positions::new(&doc);
        assert_eq!(
            positions.string(Location::new(0, 4), Location::new(1, 4)),
            "{bara b"
        );
    }
}
