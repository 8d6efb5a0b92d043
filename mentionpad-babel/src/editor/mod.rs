//! Editing host: the document, its selection, and the commands that mutate it.
//!
//! The mention matcher and the hotkey handlers only talk to the document
//! through [`EditorHost`]. [`Editor`] is the in-memory implementation used by
//! the session driver, the CLI and the tests.
//!
//! Points address text leaves by path and byte offset. Internally every
//! command resolves points to block locations (see `positions`), rewrites the
//! affected block's inline run and maps the cursor back to a canonical point.

mod blocks;
pub mod keys;
mod marks;
pub mod point;
mod positions;
mod transforms;

pub use keys::{hotkey_mark, Key, KeyEvent, KeyParseError, Modifiers, HOTKEYS};
pub use point::{Path, Point, Range, Unit};

use crate::model::{Document, Marks, Node, Text};
use positions::{text_blocks, unit_len, Location, Positions, Slot};
use transforms::{insert_after, normalize_document, normalize_inline, remove_pruning, split_inline};

/// Operations the mention matcher and the editing commands need from the
/// document owner.
pub trait EditorHost {
    /// Current selection, if the document has one.
    fn selection(&self) -> Option<&Range>;

    /// The point one `unit` before `at`, or `None` at the document start.
    fn before(&self, at: &Point, unit: Unit) -> Option<Point>;

    /// The point one `unit` after `at`, or `None` at the document end.
    fn after(&self, at: &Point, unit: Unit) -> Option<Point>;

    /// Text covered by `range`. Void elements contribute nothing.
    fn string(&self, range: &Range) -> String;

    fn select(&mut self, range: Range);

    /// Insert `node` at the selection, replacing it when expanded, and leave
    /// the cursor after the inserted node.
    fn insert_node(&mut self, node: Node);

    /// Marks the next inserted text will carry.
    fn marks(&self) -> Marks;
}

/// In-memory document plus selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    document: Document,
    selection: Option<Range>,
    pending_marks: Option<Marks>,
}

impl Editor {
    /// Take ownership of `document`, normalizing it into editable shape.
    pub fn new(document: Document) -> Self {
        Editor {
            document: normalize_document(document),
            selection: None,
            pending_marks: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Collapse the cursor at the start of the document.
    pub fn select_start(&mut self) {
        self.select_location(Location::new(0, 0));
    }

    /// Collapse the cursor at the end of the document.
    pub fn select_end(&mut self) {
        if let Some(end) = self.positions().end() {
            self.select_location(end);
        }
    }

    /// Collapse the cursor `offset` characters into the text of the document,
    /// counting every block in order.
    pub fn select_offset(&mut self, offset: usize) {
        let positions = self.positions();
        let mut remaining = offset;
        let mut target = positions.end();
        for block in 0..positions.block_count() {
            let len = positions.block_len(block);
            if remaining <= len {
                target = Some(Location::new(block, remaining));
                break;
            }
            remaining -= len;
        }
        if let Some(location) = target {
            self.select_location(location);
        }
    }

    /// Text of the whole document, one line per text block.
    pub fn text(&self) -> String {
        let positions = self.positions();
        (0..positions.block_count())
            .map(|block| {
                positions.string(
                    Location::new(block, 0),
                    Location::new(block, positions.block_len(block)),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Insert `text` at the cursor, carrying pending marks if any were set.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.delete_selection();
        let Some(at) = self.cursor() else {
            return;
        };
        let marks = self.marks();
        let inserted = text.chars().count();
        self.splice_inline(at, Node::Text(Text::with_marks(text, marks)));
        self.pending_marks = None;
        self.select_location(Location::new(at.block, at.offset + inserted));
    }

    /// Remove the content covered by `range`. Blocks touched by the end of the
    /// range merge into the block holding its start.
    pub fn delete_range(&mut self, range: &Range) {
        let Some((start, end)) = self.positions().range_locations(range) else {
            return;
        };
        if start == end {
            self.select_location(start);
            return;
        }

        let blocks = text_blocks(&self.document);
        let tail = match self.document.children_mut(&blocks[end.block]) {
            Some(children) => split_inline(std::mem::take(children), end.offset).1,
            None => return,
        };

        if start.block != end.block {
            for block in (start.block + 1..=end.block).rev() {
                remove_pruning(&mut self.document, &blocks[block]);
            }
        }

        if let Some(children) = self.document.children_mut(&blocks[start.block]) {
            let (mut head, _) = split_inline(std::mem::take(children), start.offset);
            head.extend(tail);
            *children = normalize_inline(head);
        }

        tracing::trace!(?start, ?end, "deleted range");
        self.select_location(start);
    }

    /// Backspace: delete the selection, or one `unit` before the cursor.
    pub fn delete_backward(&mut self, unit: Unit) {
        let Some(selection) = self.selection.clone() else {
            return;
        };
        if !selection.is_collapsed() {
            self.delete_range(&selection);
            return;
        }
        if let Some(before) = self.before(&selection.focus, unit) {
            self.delete_range(&Range::new(before, selection.focus));
        }
    }

    /// Arrow-key movement. An expanded selection collapses to the edge in
    /// the direction of travel.
    pub fn move_cursor(&mut self, unit: Unit, forward: bool) {
        let Some(selection) = self.selection.clone() else {
            return;
        };
        let (start, end) = selection.edges();
        if !selection.is_collapsed() {
            let edge = if forward { end } else { start };
            self.select(Range::collapsed(edge.clone()));
            return;
        }
        let next = if forward {
            self.after(&selection.focus, unit)
        } else {
            self.before(&selection.focus, unit)
        };
        if let Some(point) = next {
            self.select(Range::collapsed(point));
        }
    }

    /// Split the cursor's block in two. The new block keeps the type, so a
    /// list item splits into two list items.
    pub fn insert_break(&mut self) {
        self.delete_selection();
        let Some(at) = self.cursor() else {
            return;
        };
        let blocks = text_blocks(&self.document);
        let path = &blocks[at.block];
        let Some(Node::Element(block)) = self.document.node_mut(path) else {
            return;
        };
        let (head, tail) = split_inline(std::mem::take(&mut block.children), at.offset);
        block.children = normalize_inline(head);
        let next = Node::element(block.kind.clone(), normalize_inline(tail));
        insert_after(&mut self.document, path, next);
        self.select_location(Location::new(at.block + 1, 0));
    }

    fn positions(&self) -> Positions<'_> {
        Positions::new(&self.document)
    }

    fn cursor(&self) -> Option<Location> {
        let selection = self.selection.as_ref()?;
        self.positions().locate(&selection.focus)
    }

    pub(crate) fn selection_locations(&self) -> Option<(Location, Location)> {
        let selection = self.selection.as_ref()?;
        self.positions().range_locations(selection)
    }

    /// Anchor and focus locations, in selection order rather than document
    /// order.
    pub(crate) fn anchor_focus(&self) -> Option<(Location, Location)> {
        let selection = self.selection.as_ref()?;
        let positions = self.positions();
        Some((
            positions.locate(&selection.anchor)?,
            positions.locate(&selection.focus)?,
        ))
    }

    pub(crate) fn select_location(&mut self, location: Location) {
        if let Some(point) = self.positions().point(location) {
            self.selection = Some(Range::collapsed(point));
        }
    }

    pub(crate) fn select_locations(&mut self, anchor: Location, focus: Location) {
        let positions = self.positions();
        if let (Some(anchor), Some(focus)) = (positions.point(anchor), positions.point(focus)) {
            self.selection = Some(Range::new(anchor, focus));
        }
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub(crate) fn pending_marks(&self) -> Option<Marks> {
        self.pending_marks
    }

    pub(crate) fn set_pending_marks(&mut self, marks: Option<Marks>) {
        self.pending_marks = marks;
    }

    fn delete_selection(&mut self) {
        if let Some(selection) = self.selection.clone() {
            if !selection.is_collapsed() {
                self.delete_range(&selection);
            }
        }
    }

    /// Insert an inline node into the block at `at` and renormalize the run.
    fn splice_inline(&mut self, at: Location, node: Node) {
        let blocks = text_blocks(&self.document);
        let Some(children) = self.document.children_mut(&blocks[at.block]) else {
            return;
        };
        let (mut head, tail) = split_inline(std::mem::take(children), at.offset);
        head.push(node);
        head.extend(tail);
        *children = normalize_inline(head);
    }

    /// Marks of the text the cursor sits in. At a leaf boundary the leaf
    /// before the cursor wins.
    fn marks_at(&self, at: Location) -> Marks {
        let positions = self.positions();
        let Some(block) = positions.block(at.block) else {
            return Marks::default();
        };
        let slots = positions::slots(block);
        let leaf = |child: usize| {
            block.children.get(child).and_then(Node::as_text).map(|text| text.marks)
        };

        if let Some(Slot::Char { child, .. }) =
            at.offset.checked_sub(1).and_then(|i| slots.get(i))
        {
            return leaf(*child).unwrap_or_default();
        }
        if let Some(Slot::Char { child, .. }) = slots.get(at.offset) {
            return leaf(*child).unwrap_or_default();
        }
        match positions.point(at) {
            Some(point) => self
                .document
                .node(&point.path)
                .and_then(Node::as_text)
                .map(|text| text.marks)
                .unwrap_or_default(),
            None => Marks::default(),
        }
    }
}

impl Editor {
    /// Marks of the first character an expanded selection covers.
    fn first_marks(&self, start: Location) -> Marks {
        let positions = self.positions();
        let first = positions.block(start.block).and_then(|block| {
            match positions::slots(block).get(start.offset) {
                Some(Slot::Char { child, .. }) => block.children.get(*child)?.as_text(),
                _ => None,
            }
        });
        match first {
            Some(text) => text.marks,
            None => self.marks_at(start),
        }
    }
}

impl EditorHost for Editor {
    fn selection(&self) -> Option<&Range> {
        self.selection.as_ref()
    }

    fn before(&self, at: &Point, unit: Unit) -> Option<Point> {
        let positions = self.positions();
        let location = positions.locate(at)?;
        let moved = match unit {
            Unit::Character => positions.before_char(location)?,
            Unit::Word => positions.before_word(location)?,
        };
        positions.point(moved)
    }

    fn after(&self, at: &Point, unit: Unit) -> Option<Point> {
        let positions = self.positions();
        let location = positions.locate(at)?;
        let moved = match unit {
            Unit::Character => positions.after_char(location)?,
            Unit::Word => positions.after_word(location)?,
        };
        positions.point(moved)
    }

    fn string(&self, range: &Range) -> String {
        let positions = self.positions();
        match positions.range_locations(range) {
            Some((start, end)) => positions.string(start, end),
            None => String::new(),
        }
    }

    fn select(&mut self, range: Range) {
        if self.selection.as_ref() != Some(&range) {
            self.pending_marks = None;
        }
        self.selection = Some(range);
    }

    fn insert_node(&mut self, node: Node) {
        self.delete_selection();
        let at = match self.cursor() {
            Some(at) => at,
            None => match self.positions().end() {
                Some(end) => end,
                None => return,
            },
        };

        if node.is_inline() {
            let units = unit_len(std::slice::from_ref(&node));
            self.splice_inline(at, node);
            self.select_location(Location::new(at.block, at.offset + units));
            return;
        }

        let nested = text_blocks(&Document::new(vec![node.clone()])).len();
        let blocks = text_blocks(&self.document);
        let Node::Element(element) = node else {
            return;
        };
        let block = Node::Element(transforms::normalize_element(element));
        if insert_after(&mut self.document, &blocks[at.block], block) && nested > 0 {
            let last = at.block + nested;
            let len = self.positions().block_len(last);
            self.select_location(Location::new(last, len));
        }
    }

    fn marks(&self) -> Marks {
        if let Some(marks) = self.pending_marks {
            return marks;
        }
        match self.selection_locations() {
            Some((start, end)) if start != end => self.first_marks(start),
            Some((start, _)) => self.marks_at(start),
            None => Marks::default(),
        }
    }
}
