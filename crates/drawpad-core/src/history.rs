//! Undo/redo history of whole-scene snapshots.

use crate::scene::{SceneError, SceneGraph, SceneSnapshot};
use std::collections::VecDeque;

/// Undo/redo stacks plus the snapshot of the scene as last committed.
///
/// Every completed mutation is one [`History::commit`]; restoring a snapshot
/// replaces the whole scene.
#[derive(Debug, Clone)]
pub struct History {
    /// The scene as last committed or restored.
    current: Option<SceneSnapshot>,
    /// Oldest entries at the front.
    undo_stack: VecDeque<SceneSnapshot>,
    redo_stack: Vec<SceneSnapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl History {
    /// Maximum number of undo states kept by default.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Empty history. Call [`History::reset`] to record the baseline scene.
    pub fn new(capacity: usize) -> Self {
        Self {
            current: None,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// Forget both stacks and take `scene` as the baseline.
    pub fn reset<S: SceneGraph>(&mut self, scene: &S) -> Result<(), SceneError> {
        let snapshot = scene.serialize()?;
        self.current = Some(snapshot);
        self.undo_stack.clear();
        self.redo_stack.clear();
        Ok(())
    }

    /// Record the scene after a completed mutation.
    pub fn commit<S: SceneGraph>(&mut self, scene: &S) -> Result<(), SceneError> {
        let snapshot = scene.serialize()?;
        if let Some(previous) = self.current.replace(snapshot) {
            self.push_undo(previous);
        }
        self.redo_stack.clear();
        log::debug!(
            "history commit (undo: {}, redo: {})",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(())
    }

    /// Restore the previous snapshot. Returns false when there is nothing
    /// to undo. On error the scene and both stacks are unchanged.
    pub fn undo<S: SceneGraph>(&mut self, scene: &mut S) -> Result<bool, SceneError> {
        let Some(previous) = self.undo_stack.back() else {
            log::trace!("undo: nothing to undo");
            return Ok(false);
        };
        scene.deserialize(previous)?;

        if let Some(previous) = self.undo_stack.pop_back() {
            if let Some(current) = self.current.replace(previous) {
                self.redo_stack.push(current);
            }
        }
        log::debug!(
            "undo (undo: {}, redo: {})",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(true)
    }

    /// Re-apply the last undone snapshot. Returns false when there is
    /// nothing to redo. On error the scene and both stacks are unchanged.
    pub fn redo<S: SceneGraph>(&mut self, scene: &mut S) -> Result<bool, SceneError> {
        let Some(next) = self.redo_stack.last() else {
            log::trace!("redo: nothing to redo");
            return Ok(false);
        };
        scene.deserialize(next)?;

        if let Some(next) = self.redo_stack.pop() {
            if let Some(current) = self.current.replace(next) {
                self.push_undo(current);
            }
        }
        log::debug!(
            "redo (undo: {}, redo: {})",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(true)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the scene as last committed or restored.
    pub fn current(&self) -> Option<&SceneSnapshot> {
        self.current.as_ref()
    }

    fn push_undo(&mut self, snapshot: SceneSnapshot) {
        if self.capacity == 0 {
            return;
        }
        self.undo_stack.push_back(snapshot);
        // Limit undo history size
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
    }
}
