//! Shape brushes: expand a gesture's anchor cells into candidate blocks.
//!
//! Every brush works on lattice indices and returns candidates in a
//! deterministic order. Brushes never look at the model; callers drop
//! candidates whose cell is already taken with [`skip_occupied`].

pub mod primitive;
pub mod cuboid;
pub mod disc;
pub mod polygon;

use crate::core::types::IVec3;
use super::block::{Block, BlockKind, Rotation};
use super::occupancy::occupied_cells;

// Re-exports
pub use primitive::BrushPrimitive;
pub use cuboid::cuboid;
pub use disc::{disc, disc_radius, DiscPlane};
pub use polygon::{polygon, ramp_rotation, RampThresholds};

/// A block a brush proposes to place
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub cell: IVec3,
    pub kind: BlockKind,
    pub rotation: Rotation,
}

impl Candidate {
    pub fn cube(cell: IVec3) -> Self {
        Self {
            cell,
            kind: BlockKind::Cube,
            rotation: Rotation::R0,
        }
    }

    pub fn prism(cell: IVec3, rotation: Rotation) -> Self {
        Self {
            cell,
            kind: BlockKind::Prism,
            rotation,
        }
    }

    /// Materialize as a new block with a fresh id
    pub fn to_block(self, color: &str) -> Block {
        Block::new(self.cell, self.kind, self.rotation, color)
    }
}

/// Drop candidates whose cell already holds any block.
pub fn skip_occupied(candidates: Vec<Candidate>, blocks: &[Block]) -> Vec<Candidate> {
    let occupied = occupied_cells(blocks);
    candidates
        .into_iter()
        .filter(|c| !occupied.contains(&c.cell))
        .collect()
}
