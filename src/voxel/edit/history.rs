//! Linear snapshot history with an undo/redo cursor.

use std::sync::Arc;

use crate::voxel::block::Block;

/// Immutable model state, shared between the history and readers
pub type Snapshot = Arc<[Block]>;

/// Ordered snapshots plus a cursor into them.
///
/// Index 0 is the initial state. `cursor` always points at a stored
/// snapshot; entries after it form the redo branch.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    /// Max undo steps retained; `None` keeps everything
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(None)
    }
}

impl History {
    /// History holding a single empty snapshot
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: vec![Snapshot::from(Vec::new())],
            cursor: 0,
            limit,
        }
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Append a new state after the cursor, discarding the redo branch.
    pub fn commit(&mut self, blocks: Vec<Block>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Snapshot::from(blocks));
        self.cursor = self.snapshots.len() - 1;

        if let Some(limit) = self.limit {
            let max_len = limit + 1;
            if self.snapshots.len() > max_len {
                let excess = self.snapshots.len() - max_len;
                self.snapshots.drain(0..excess);
                self.cursor = self.snapshots.len() - 1;
            }
        }
    }

    /// Step back one snapshot. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.snapshots.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}
