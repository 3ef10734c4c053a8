//! Axis-aligned boxes for lattice cells and export bounds

use crate::core::types::{IVec3, Vec3};
use super::plane::Plane;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The unit box of a lattice cell
    pub fn cell(cell: IVec3) -> Self {
        let min = cell.as_vec3();
        Self::new(min, min + Vec3::ONE)
    }

    /// Smallest box around `points`, or `None` when there are none
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.expand(p);
        }
        Some(aabb)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Inclusive of the boundary
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Grow to include `point`
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Outward face planes in +X, -X, +Y, -Y, +Z, -Z order
    pub fn planes(&self) -> [Plane; 6] {
        [
            Plane::from_point_normal(self.max, Vec3::X),
            Plane::from_point_normal(self.min, Vec3::NEG_X),
            Plane::from_point_normal(self.max, Vec3::Y),
            Plane::from_point_normal(self.min, Vec3::NEG_Y),
            Plane::from_point_normal(self.max, Vec3::Z),
            Plane::from_point_normal(self.min, Vec3::NEG_Z),
        ]
    }
}
