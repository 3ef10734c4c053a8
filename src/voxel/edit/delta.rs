//! Model edit operations.

use std::collections::HashSet;

use crate::voxel::block::{Block, BlockId, DrillAxis};

/// One mutation of the block list.
#[derive(Clone, Debug, PartialEq)]
pub enum EditOp {
    /// Append new blocks
    Add(Vec<Block>),
    /// Remove a block by id
    Remove(BlockId),
    /// Rewrite a block's color
    Paint { id: BlockId, color: String },
    /// Toggle the holes of a cube along an axis
    Drill { id: BlockId, axis: DrillAxis },
    /// Move a set of blocks up (`dy > 0`) or down by whole cells
    Shift { ids: Vec<BlockId>, dy: i32 },
    /// Swap the whole model for another (import)
    Replace(Vec<Block>),
    /// Remove every block
    Clear,
}

impl EditOp {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::Add(_) => "add",
            EditOp::Remove(_) => "remove",
            EditOp::Paint { .. } => "paint",
            EditOp::Drill { .. } => "drill",
            EditOp::Shift { .. } => "shift",
            EditOp::Replace(_) => "replace",
            EditOp::Clear => "clear",
        }
    }

    /// The block list after this edit, or `None` when the edit would change
    /// nothing or is not allowed (no history entry should be made).
    pub fn apply(&self, blocks: &[Block]) -> Option<Vec<Block>> {
        match self {
            EditOp::Add(new) => {
                if new.is_empty() {
                    return None;
                }
                let mut out = blocks.to_vec();
                out.extend(new.iter().cloned());
                Some(out)
            }
            EditOp::Remove(id) => {
                let index = blocks.iter().position(|b| &b.id == id)?;
                let mut out = blocks.to_vec();
                out.remove(index);
                Some(out)
            }
            EditOp::Paint { id, color } => {
                let index = blocks.iter().position(|b| &b.id == id)?;
                if &blocks[index].color == color {
                    return None;
                }
                let mut out = blocks.to_vec();
                out[index].color = color.clone();
                Some(out)
            }
            EditOp::Drill { id, axis } => {
                let index = blocks.iter().position(|b| &b.id == id)?;
                let mut out = blocks.to_vec();
                out[index].drill(*axis).then_some(out)
            }
            EditOp::Shift { ids, dy } => {
                if *dy == 0 {
                    return None;
                }
                let ids: HashSet<&BlockId> = ids.iter().collect();
                let mut out = blocks.to_vec();
                let mut moved = 0;
                for block in out.iter_mut().filter(|b| ids.contains(&b.id)) {
                    block.cell.y = block.cell.y.checked_add(*dy)?;
                    if block.cell.y < 0 {
                        return None;
                    }
                    moved += 1;
                }
                (moved > 0).then_some(out)
            }
            EditOp::Replace(new) => Some(new.clone()),
            EditOp::Clear => (!blocks.is_empty()).then(Vec::new),
        }
    }
}
