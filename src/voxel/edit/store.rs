//! Model store: the current block list behind an undo/redo history.

use crate::voxel::block::{Block, BlockId};
use super::delta::EditOp;
use super::history::{History, Snapshot};

/// Owns the model. Every successful edit appends exactly one history entry.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    history: History,
}

impl ModelStore {
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            history: History::new(history_limit),
        }
    }

    /// Blocks at the history cursor
    pub fn blocks(&self) -> &[Block] {
        self.history.current()
    }

    /// Shared handle to the visible state
    pub fn snapshot(&self) -> Snapshot {
        self.history.current().clone()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks().iter().find(|b| &b.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }

    /// Commit a full new state
    pub fn commit(&mut self, blocks: Vec<Block>) {
        self.history.commit(blocks);
        log::debug!(
            "Committed {} blocks (history {}/{})",
            self.len(),
            self.history.cursor(),
            self.history.len() - 1
        );
    }

    /// Apply `op`; returns `false` when it changed nothing.
    pub fn apply(&mut self, op: &EditOp) -> bool {
        match op.apply(self.blocks()) {
            Some(next) => {
                log::debug!("Edit: {}", op.name());
                self.commit(next);
                true
            }
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            log::debug!("Undo -> {}", self.history.cursor());
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            log::debug!("Redo -> {}", self.history.cursor());
        }
        moved
    }

    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
