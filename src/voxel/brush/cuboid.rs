//! Box brush: solid or wireframe cuboid between two corner cells.

use crate::core::config::Fill;
use crate::core::types::IVec3;
use super::Candidate;

/// Cubes filling the axis-aligned box spanned by corners `a` and `b`
/// (inclusive, in any order).
///
/// `Fill::Hollow` keeps only cells lying on at least two boundary planes,
/// i.e. the edges and corners of the box.
pub fn cuboid(a: IVec3, b: IVec3, fill: Fill) -> Vec<Candidate> {
    let min = a.min(b);
    let max = a.max(b);

    let mut out = Vec::new();
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let cell = IVec3::new(x, y, z);
                let keep = match fill {
                    Fill::Solid => true,
                    Fill::Hollow => boundary_planes(cell, min, max) >= 2,
                };
                if keep {
                    out.push(Candidate::cube(cell));
                }
            }
        }
    }
    out
}

/// Number of axes on which `cell` touches the min or max face of the box
fn boundary_planes(cell: IVec3, min: IVec3, max: IVec3) -> u32 {
    let on = |v: i32, lo: i32, hi: i32| u32::from(v == lo || v == hi);
    on(cell.x, min.x, max.x) + on(cell.y, min.y, max.y) + on(cell.z, min.z, max.z)
}
