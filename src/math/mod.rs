//! Mathematical utilities and data structures

pub mod aabb;
pub mod plane;
pub mod ray;

pub use aabb::Aabb;
pub use plane::Plane;
pub use ray::{ConvexHit, Ray};
