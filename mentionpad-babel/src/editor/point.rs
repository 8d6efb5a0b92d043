//! Points and ranges inside a document.

use std::cmp::Ordering;

/// Child indices from the root down to a node.
pub type Path = Vec<usize>;

/// A position inside a text leaf: its path plus a byte offset into its text.
///
/// Ordering compares paths lexicographically, then offsets, which is document
/// order for points addressing text leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: Path, offset: usize) -> Self {
        Point { path, offset }
    }
}

/// A selection: where it started (anchor) and where it ends (focus).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    pub anchor: Point,
    pub focus: Point,
}

impl Range {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Range { anchor, focus }
    }

    /// A zero-width range at `point`.
    pub fn collapsed(point: Point) -> Self {
        Range {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_backward(&self) -> bool {
        self.anchor.cmp(&self.focus) == Ordering::Greater
    }

    /// Start and end in document order.
    pub fn edges(&self) -> (&Point, &Point) {
        if self.is_backward() {
            (&self.focus, &self.anchor)
        } else {
            (&self.anchor, &self.focus)
        }
    }

    pub fn start(&self) -> &Point {
        self.edges().0
    }

    pub fn end(&self) -> &Point {
        self.edges().1
    }
}

/// Granularity for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Character,
    Word,
}
