//! Triangle brush: rasterize a triangle through three cells into blocks.
//!
//! A lattice cell is kept when its center lies close to the triangle's plane
//! and its barycentric coordinates fall inside a slightly inflated triangle.
//! Sloped planes are approximated with prisms so the result reads as a ramp.

use crate::core::types::{IVec3, Vec3};
use crate::voxel::block::Rotation;
use super::Candidate;

/// Max distance from a cell center to the plane
const PLANE_TOLERANCE: f32 = 0.8;
/// Barycentric slack so boundary cells are captured
const EDGE_SLACK: f32 = 0.1;

/// Bounds on |normal.y| between which a candidate becomes a ramp prism
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RampThresholds {
    pub min: f32,
    pub max: f32,
}

impl Default for RampThresholds {
    fn default() -> Self {
        Self { min: 0.3, max: 0.9 }
    }
}

/// Prism rotation approximating a plane with unit `normal`, or `None` when
/// the plane is flat or steep enough to be built from cubes.
pub fn ramp_rotation(normal: Vec3, ramp: RampThresholds) -> Option<Rotation> {
    let ny = normal.y.abs();
    if !(ny > ramp.min && ny < ramp.max) {
        return None;
    }
    let rotation = if normal.x.abs() > normal.z.abs() {
        if normal.x * normal.y > 0.0 { Rotation::R0 } else { Rotation::R2 }
    } else if normal.z * normal.y > 0.0 {
        Rotation::R1
    } else {
        Rotation::R3
    };
    Some(rotation)
}

/// Candidates covering the triangle `points`.
///
/// Each cell of the bounding box is visited once, so the result holds at
/// most one candidate per cell. Collinear points give an empty result.
pub fn polygon(points: [IVec3; 3], ramp: RampThresholds) -> Vec<Candidate> {
    let [p1, p2, p3] = points.map(|p| p.as_vec3());

    let v0 = p2 - p1;
    let v1 = p3 - p1;
    let normal = v0.cross(v1).normalize_or_zero();
    if normal == Vec3::ZERO {
        return Vec::new();
    }

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot11 = v1.dot(v1);
    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() <= f32::EPSILON {
        return Vec::new();
    }
    let inv_denom = 1.0 / denom;

    let make = |cell: IVec3| match ramp_rotation(normal, ramp) {
        Some(rotation) => Candidate::prism(cell, rotation),
        None => Candidate::cube(cell),
    };

    let min = points[0].min(points[1]).min(points[2]);
    let max = points[0].max(points[1]).max(points[2]);

    let mut out = Vec::new();
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let cell = IVec3::new(x, y, z);
                let v2 = cell.as_vec3() - p1;
                if normal.dot(v2).abs() >= PLANE_TOLERANCE {
                    continue;
                }

                let dot02 = v0.dot(v2);
                let dot12 = v1.dot(v2);
                let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
                let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

                if u >= -EDGE_SLACK && v >= -EDGE_SLACK && u + v <= 1.0 + EDGE_SLACK {
                    out.push(make(cell));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::voxel::block::BlockKind;

    #[test]
    fn test_flat_triangle() {
        let cells = polygon(
            [IVec3::ZERO, IVec3::new(4, 0, 0), IVec3::new(0, 0, 4)],
            RampThresholds::default(),
        );
        // x + z <= 4 on the ground layer
        assert_eq!(cells.len(), 15);
        assert!(cells.iter().all(|c| c.kind == BlockKind::Cube && c.cell.y == 0));
        assert!(cells.iter().all(|c| c.cell.x + c.cell.z <= 4));
    }

    #[test]
    fn test_vertical_triangle_uses_cubes() {
        let cells = polygon(
            [IVec3::new(0, 0, 2), IVec3::new(3, 0, 2), IVec3::new(0, 3, 2)],
            RampThresholds::default(),
        );
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|c| c.kind == BlockKind::Cube && c.cell.z == 2));
    }

    #[test]
    fn test_sloped_triangle_uses_ramps() {
        // Plane rising along +x: normal ~ (0.71, -0.71, 0)
        let cells = polygon(
            [IVec3::ZERO, IVec3::new(3, 3, 0), IVec3::new(0, 0, 3)],
            RampThresholds::default(),
        );
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|c| c.kind == BlockKind::Prism && c.rotation == Rotation::R2));
        // The anchor cells themselves are part of the surface
        assert!(cells.iter().any(|c| c.cell == IVec3::ZERO));
        assert!(cells.iter().any(|c| c.cell == IVec3::new(3, 3, 0)));
    }

    #[test]
    fn test_ramp_rotation_signs() {
        let t = RampThresholds::default();
        let n = |x: f32, y: f32, z: f32| Vec3::new(x, y, z).normalize();
        assert_eq!(ramp_rotation(n(1.0, 1.0, 0.0), t), Some(Rotation::R0));
        assert_eq!(ramp_rotation(n(-1.0, 1.0, 0.0), t), Some(Rotation::R2));
        assert_eq!(ramp_rotation(n(0.0, 1.0, 1.0), t), Some(Rotation::R1));
        assert_eq!(ramp_rotation(n(0.0, -1.0, 1.0), t), Some(Rotation::R3));
        assert_eq!(ramp_rotation(Vec3::Y, t), None);
        assert_eq!(ramp_rotation(n(1.0, 0.1, 0.0), t), None);
    }

    #[test]
    fn test_collinear_points_are_empty() {
        let cells = polygon(
            [IVec3::ZERO, IVec3::new(1, 1, 1), IVec3::new(2, 2, 2)],
            RampThresholds::default(),
        );
        assert!(cells.is_empty());

        let cells = polygon([IVec3::ONE; 3], RampThresholds::default());
        assert!(cells.is_empty());
    }

    #[test]
    fn test_candidates_are_unique() {
        let cells = polygon(
            [IVec3::new(-2, 0, 1), IVec3::new(5, 4, -3), IVec3::new(1, 6, 4)],
            RampThresholds::default(),
        );
        let unique: HashSet<IVec3> = cells.iter().map(|c| c.cell).collect();
        assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn test_custom_thresholds() {
        let points = [IVec3::ZERO, IVec3::new(3, 3, 0), IVec3::new(0, 0, 3)];
        let strict = RampThresholds { min: 0.8, max: 0.9 };
        let cells = polygon(points, strict);
        assert!(cells.iter().all(|c| c.kind == BlockKind::Cube));
    }
}
