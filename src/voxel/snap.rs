//! Lattice snapping of pick results.

use crate::core::types::IVec3;
use super::block::cell_containing;
use super::pick::Hit;

/// Cell adjacent to the struck surface: the hit point pushed half a unit
/// along the outward normal, floored. `None` below the ground.
pub fn snap_cell(hit: &Hit) -> Option<IVec3> {
    let cell = cell_containing(hit.point + hit.normal * 0.5);
    (cell.y >= 0).then_some(cell)
}
