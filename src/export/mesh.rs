//! World-space triangulation of blocks.
//!
//! Cubes emit two triangles per face. A drilled face becomes a square ring
//! around a circular opening, fanned over [`RING_SEGMENTS`] segments. Prisms
//! emit their two triangular caps and three rectangular sides. All
//! triangles wind counter-clockwise seen from outside.

use std::f32::consts::TAU;

use crate::core::types::{Quat, Vec3};
use crate::math::Aabb;
use crate::voxel::block::{Block, BlockKind, Face};

/// Segments around a drilled opening
pub const RING_SEGMENTS: usize = 16;

/// One output triangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Unit normal from the winding, `None` for degenerate triangles
    pub fn normal(&self) -> Option<Vec3> {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).try_normalize()
    }
}

/// Triangulate every block
pub fn triangulate(blocks: &[Block], hole_radius: f32) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(blocks.len() * 12);
    for block in blocks {
        block_triangles(block, hole_radius, &mut out);
    }
    out
}

/// World-space bounds of a triangle soup
pub fn bounds(triangles: &[Triangle]) -> Option<Aabb> {
    Aabb::from_points(triangles.iter().flat_map(|t| t.vertices))
}

/// Append the triangles of one block to `out`
pub fn block_triangles(block: &Block, hole_radius: f32, out: &mut Vec<Triangle>) {
    match block.kind {
        BlockKind::Cube => {
            for face in Face::ALL {
                if block.holes.contains(face) {
                    holed_face(block.center(), face, hole_radius, out);
                } else {
                    solid_face(block.center(), face, out);
                }
            }
        }
        BlockKind::Prism => prism(block.center(), block.rotation.quat(), out),
    }
}

/// In-plane axes of a face, with `u × v` along the outward normal
fn face_frame(face: Face) -> (Vec3, Vec3) {
    match face {
        Face::PosX => (Vec3::Y, Vec3::Z),
        Face::NegX => (Vec3::Z, Vec3::Y),
        Face::PosY => (Vec3::Z, Vec3::X),
        Face::NegY => (Vec3::X, Vec3::Z),
        Face::PosZ => (Vec3::X, Vec3::Y),
        Face::NegZ => (Vec3::Y, Vec3::X),
    }
}

fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3, out: &mut Vec<Triangle>) {
    out.push(Triangle::new(a, b, c));
    out.push(Triangle::new(a, c, d));
}

fn solid_face(center: Vec3, face: Face, out: &mut Vec<Triangle>) {
    let c = center + face.normal() * 0.5;
    let (u, v) = face_frame(face);
    let (u, v) = (u * 0.5, v * 0.5);
    quad(c - u - v, c + u - v, c + u + v, c - u + v, out);
}

fn holed_face(center: Vec3, face: Face, radius: f32, out: &mut Vec<Triangle>) {
    let c = center + face.normal() * 0.5;
    let (u, v) = face_frame(face);

    // Outer points walk the square boundary at the same angles as the
    // opening, so every segment is a convex quad.
    let ring = |k: usize| {
        let angle = TAU * k as f32 / RING_SEGMENTS as f32;
        let (sin, cos) = angle.sin_cos();
        let dir = u * cos + v * sin;
        let to_edge = 0.5 / cos.abs().max(sin.abs());
        (c + dir * to_edge, c + dir * radius)
    };

    for k in 0..RING_SEGMENTS {
        let (outer0, inner0) = ring(k);
        let (outer1, inner1) = ring(k + 1);
        quad(outer0, outer1, inner1, inner0, out);
    }
}

fn prism(center: Vec3, rotation: Quat, out: &mut Vec<Triangle>) {
    let at = |x: f32, y: f32, z: f32| center + rotation * Vec3::new(x, y, z);
    // Right angle at A, slope from B to C
    let (a0, b0, c0) = (at(-0.5, -0.5, -0.5), at(0.5, -0.5, -0.5), at(-0.5, 0.5, -0.5));
    let (a1, b1, c1) = (at(-0.5, -0.5, 0.5), at(0.5, -0.5, 0.5), at(-0.5, 0.5, 0.5));

    out.push(Triangle::new(a1, b1, c1));
    out.push(Triangle::new(a0, c0, b0));
    quad(a0, b0, b1, a1, out);
    quad(a0, a1, c1, c0, out);
    quad(b0, c0, c1, b1, out);
}
