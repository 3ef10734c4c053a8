//! Cell occupancy rule.
//!
//! A cell holds either nothing, one cube, one prism, or two prisms whose
//! rotations are a half turn apart (the two diagonal halves of a cube).

use std::collections::HashSet;

use crate::core::types::IVec3;
use super::block::{Block, BlockKind, Rotation};

/// What currently occupies a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Cube,
    /// One prism with the given rotation; its complement may still fit
    Prism(Rotation),
    /// No further block fits
    Full,
}

impl CellState {
    /// Classify the blocks found at one cell
    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Self {
        let mut iter = blocks.into_iter();
        let Some(first) = iter.next() else {
            return CellState::Empty;
        };
        if iter.next().is_some() {
            return CellState::Full;
        }
        match first.kind {
            BlockKind::Cube => CellState::Cube,
            BlockKind::Prism => CellState::Prism(first.rotation),
        }
    }

    /// Whether a block of `kind`/`rotation` may be added to this cell
    pub fn admits(self, kind: BlockKind, rotation: Rotation) -> bool {
        match (self, kind) {
            (CellState::Empty, _) => true,
            (CellState::Prism(existing), BlockKind::Prism) => rotation == existing.opposite(),
            _ => false,
        }
    }
}

/// Blocks located exactly at `cell`
pub fn blocks_at(blocks: &[Block], cell: IVec3) -> impl Iterator<Item = &Block> {
    blocks.iter().filter(move |b| b.cell == cell)
}

/// Occupancy of `cell` in `blocks`
pub fn cell_state(blocks: &[Block], cell: IVec3) -> CellState {
    CellState::from_blocks(blocks_at(blocks, cell))
}

/// Whether a single block may be placed at `cell`
pub fn can_place(blocks: &[Block], cell: IVec3, kind: BlockKind, rotation: Rotation) -> bool {
    cell_state(blocks, cell).admits(kind, rotation)
}

/// Every cell holding at least one block
pub fn occupied_cells(blocks: &[Block]) -> HashSet<IVec3> {
    blocks.iter().map(|b| b.cell).collect()
}
