//! Snapshot-based undo/redo.

use crate::project::ProjectData;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 100;

/// Bounded undo/redo stacks of persisted-state snapshots.
///
/// Snapshots are full copies of the persisted slice; transient editor
/// state (mode, selection, drafts) is never recorded.
#[derive(Debug, Clone)]
pub struct History {
    /// Oldest first, so the cap drops from the front.
    past: VecDeque<ProjectData>,
    future: Vec<ProjectData>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit,
        }
    }

    /// Record the state from before a change. Clears the redo stack.
    pub fn record(&mut self, before: ProjectData) {
        self.past.push_back(before);
        self.future.clear();

        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }

    /// Step back. Takes the current state and returns the one to restore,
    /// or `None` (leaving the stacks untouched) if there is nothing to undo.
    pub fn undo(&mut self, current: ProjectData) -> Option<ProjectData> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: ProjectData) -> Option<ProjectData> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(scale: f64) -> ProjectData {
        ProjectData {
            scale: Some(scale),
            ..ProjectData::default()
        }
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        history.record(state(1.0));
        history.record(state(2.0));

        let restored = history.undo(state(3.0)).unwrap();
        assert_eq!(restored.scale, Some(2.0));
        assert!(history.can_redo());

        let restored = history.undo(restored).unwrap();
        assert_eq!(restored.scale, Some(1.0));
        assert!(!history.can_undo());

        let restored = history.redo(restored).unwrap();
        assert_eq!(restored.scale, Some(2.0));
        let restored = history.redo(restored).unwrap();
        assert_eq!(restored.scale, Some(3.0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::new();
        assert!(history.undo(state(1.0)).is_none());
        assert!(history.redo(state(1.0)).is_none());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_record_clears_future() {
        let mut history = History::new();
        history.record(state(1.0));
        history.undo(state(2.0));
        assert!(history.can_redo());

        history.record(state(1.0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        for i in 0..5 {
            history.record(state(i as f64));
        }
        assert_eq!(history.undo_len(), 3);

        let mut current = state(5.0);
        let mut seen = Vec::new();
        while let Some(previous) = history.undo(current.clone()) {
            seen.push(previous.scale);
            current = previous;
        }
        assert_eq!(seen, [Some(4.0), Some(3.0), Some(2.0)]);
    }

    #[test]
    fn test_default_limit() {
        let mut history = History::new();
        for i in 0..150 {
            history.record(state(i as f64));
        }
        assert_eq!(history.undo_len(), MAX_UNDO_HISTORY);
    }
}
