//! Mark commands: bold, italic, underline and code on the selection.

use super::positions::unit_len;
use super::transforms::{normalize_inline, split_inline};
use super::{text_blocks, Editor, EditorHost};
use crate::model::{Mark, Node};

impl Editor {
    pub fn is_mark_active(&self, mark: Mark) -> bool {
        self.marks().get(mark)
    }

    pub fn toggle_mark(&mut self, mark: Mark) {
        if self.is_mark_active(mark) {
            self.remove_mark(mark);
        } else {
            self.add_mark(mark);
        }
    }

    /// Set `mark` on the selected text. On a collapsed cursor the mark is
    /// held for the next insertion instead.
    pub fn add_mark(&mut self, mark: Mark) {
        self.set_mark(mark, true);
    }

    pub fn remove_mark(&mut self, mark: Mark) {
        self.set_mark(mark, false);
    }

    fn set_mark(&mut self, mark: Mark, value: bool) {
        let Some((anchor, focus)) = self.anchor_focus() else {
            return;
        };
        if anchor == focus {
            let marks = self.marks().with(mark, value);
            self.set_pending_marks(Some(marks));
            tracing::debug!(%mark, value, "pending mark");
            return;
        }

        let (start, end) = if anchor <= focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        };
        let blocks = text_blocks(self.document());
        for block in start.block..=end.block {
            let Some(children) = self.document_mut().children_mut(&blocks[block]) else {
                continue;
            };
            let from = if block == start.block { start.offset } else { 0 };
            let to = if block == end.block {
                end.offset
            } else {
                unit_len(children)
            };

            let (mut output, rest) = split_inline(std::mem::take(children), from);
            let (mut covered, tail) = split_inline(rest, to.saturating_sub(from));
            for node in &mut covered {
                if let Node::Text(text) = node {
                    text.marks.set(mark, value);
                }
            }
            output.append(&mut covered);
            output.extend(tail);
            *children = normalize_inline(output);
        }

        tracing::debug!(%mark, value, blocks = end.block - start.block + 1, "applied mark");
        self.select_locations(anchor, focus);
    }
}
