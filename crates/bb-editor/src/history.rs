//! Bounded undo/redo over full-buffer snapshots.
//!
//! Every committing operation records the buffer as it was *before* the
//! edit. Undo swaps the live buffer with the newest snapshot; redo swaps it
//! back. Recording a new edit discards the redo branch.
//!
//! The undo side holds at most `max_depth` snapshots and evicts the oldest
//! on overflow. The redo side is bounded implicitly: it can only grow by
//! undoing, so it never exceeds `max_depth` either.

use bb_core::RgbaImage;
use std::collections::VecDeque;

pub struct History {
    undo_stack: VecDeque<RgbaImage>,
    redo_stack: Vec<RgbaImage>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record the pre-edit buffer. Clears the redo branch.
    pub fn record(&mut self, before: RgbaImage) {
        self.push_undo(before);
        self.redo_stack.clear();
    }

    /// Swap `current` for the newest undo snapshot.
    /// Returns `false` (leaving `current` alone) when there is nothing to undo.
    pub fn undo(&mut self, current: &mut RgbaImage) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(current, previous));
        true
    }

    /// Swap `current` for the newest redo snapshot.
    pub fn redo(&mut self, current: &mut RgbaImage) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let undone = std::mem::replace(current, next);
        self.push_undo(undone);
        true
    }

    fn push_undo(&mut self, snapshot: RgbaImage) {
        if self.max_depth == 0 {
            return;
        }
        if self.undo_stack.len() == self.max_depth {
            self.undo_stack.pop_front();
            log::debug!("history full ({}), evicted oldest snapshot", self.max_depth);
        }
        self.undo_stack.push_back(snapshot);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
