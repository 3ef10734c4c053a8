//! Ray type and operations

use crate::core::types::{Quat, Vec3};
use super::plane::Plane;

/// Directions closer to parallel than this are treated as parallel
const PARALLEL_EPSILON: f32 = 1e-8;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Where a ray enters and leaves a convex volume
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvexHit {
    pub t_enter: f32,
    /// Index of the plane crossed on entry
    pub enter: usize,
    pub t_exit: f32,
    /// Index of the plane crossed on exit
    pub exit: usize,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Parameter where the ray crosses `plane` from its front side
    pub fn intersects_plane_front(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(self.direction);
        if denom >= -PARALLEL_EPSILON {
            return None;
        }
        let t = -plane.distance_to_point(self.origin) / denom;
        (t >= 0.0).then_some(t)
    }

    /// Clip the ray against a convex volume given as outward-facing planes
    /// (inside is `distance_to_point <= 0`).
    ///
    /// Returns `None` when the ray misses, or starts inside the volume.
    pub fn clip_convex(&self, planes: &[Plane]) -> Option<ConvexHit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut enter = None;
        let mut t_exit = f32::INFINITY;
        let mut exit = None;

        for (i, plane) in planes.iter().enumerate() {
            let denom = plane.normal.dot(self.direction);
            let dist = plane.distance_to_point(self.origin);
            if denom.abs() < PARALLEL_EPSILON {
                if dist > 0.0 {
                    return None;
                }
                continue;
            }
            let t = -dist / denom;
            if denom < 0.0 {
                if t > t_enter {
                    t_enter = t;
                    enter = Some(i);
                }
            } else if t < t_exit {
                t_exit = t;
                exit = Some(i);
            }
        }

        let (enter, exit) = (enter?, exit?);
        if t_enter > t_exit || t_enter < 0.0 {
            return None;
        }
        Some(ConvexHit { t_enter, enter, t_exit, exit })
    }

    /// The same ray expressed in a frame placed at `origin` with
    /// orientation `rotation`
    pub fn to_local(&self, origin: Vec3, rotation: Quat) -> Ray {
        let inv = rotation.inverse();
        Ray::new(inv * (self.origin - origin), inv * self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;

    fn unit_cube_planes() -> [Plane; 6] {
        Aabb::new(Vec3::ZERO, Vec3::ONE).planes()
    }

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_intersects_plane_front() {
        let ground = Plane::new(Vec3::Y, 0.0);
        let down = Ray::new(Vec3::new(1.0, 4.0, 2.0), Vec3::NEG_Y);
        assert_eq!(down.intersects_plane_front(&ground), Some(4.0));

        // From below
        let up = Ray::new(Vec3::new(1.0, -4.0, 2.0), Vec3::Y);
        assert!(up.intersects_plane_front(&ground).is_none());

        // Pointing away
        let away = Ray::new(Vec3::new(0.0, 4.0, 0.0), Vec3::Y);
        assert!(away.intersects_plane_front(&ground).is_none());
    }

    #[test]
    fn test_clip_convex_faces() {
        let ray = Ray::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::X);
        let hit = ray.clip_convex(&unit_cube_planes()).unwrap();
        assert!((hit.t_enter - 2.0).abs() < 1e-5);
        assert!((hit.t_exit - 3.0).abs() < 1e-5);
        // Enters through -X, leaves through +X
        assert_eq!(hit.enter, 1);
        assert_eq!(hit.exit, 0);
    }

    #[test]
    fn test_clip_convex_miss_and_inside() {
        let miss = Ray::new(Vec3::new(-2.0, 3.0, 0.5), Vec3::X);
        assert!(miss.clip_convex(&unit_cube_planes()).is_none());

        let inside = Ray::new(Vec3::splat(0.5), Vec3::X);
        assert!(inside.clip_convex(&unit_cube_planes()).is_none());

        let behind = Ray::new(Vec3::new(3.0, 0.5, 0.5), Vec3::X);
        assert!(behind.clip_convex(&unit_cube_planes()).is_none());
    }

    #[test]
    fn test_to_local() {
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X);
        let local = ray.to_local(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!((local.origin - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((local.direction - Vec3::Z).length() < 1e-5);
    }
}
