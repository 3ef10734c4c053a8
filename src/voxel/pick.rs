//! Ray picking against the block model and the ground plane.
//!
//! Cubes are clipped against their cell box. A ray entering through an
//! open hole continues inside the cube and reports the inner side of the
//! face it leaves through; if that face is drilled too the ray passes
//! through untouched. Prisms are clipped against their five planes in
//! model space.

use crate::core::config::EditorSettings;
use crate::core::types::Vec3;
use crate::math::{Aabb, ConvexHit, Plane, Ray};
use super::block::{Block, BlockId, BlockKind, Face};

/// What a ray struck
#[derive(Clone, Debug, PartialEq)]
pub enum HitTarget {
    Ground,
    Block { id: BlockId, face: Face },
}

/// A resolved ray intersection
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// World-space intersection point
    pub point: Vec3,
    /// Outward surface normal at the point
    pub normal: Vec3,
    pub target: HitTarget,
}

impl Hit {
    pub fn ground(point: Vec3) -> Self {
        Self {
            point,
            normal: Vec3::Y,
            target: HitTarget::Ground,
        }
    }

    pub fn block(id: BlockId, face: Face, point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal,
            target: HitTarget::Block { id, face },
        }
    }

    pub fn block_id(&self) -> Option<&BlockId> {
        match &self.target {
            HitTarget::Block { id, .. } => Some(id),
            HitTarget::Ground => None,
        }
    }

    pub fn face(&self) -> Option<Face> {
        match self.target {
            HitTarget::Block { face, .. } => Some(face),
            HitTarget::Ground => None,
        }
    }
}

/// Nearest hit along `ray`, blocks and ground together.
pub fn pick(ray: &Ray, blocks: &[Block], settings: &EditorSettings) -> Option<Hit> {
    let mut best: Option<(f32, Hit)> = None;
    let mut consider = |t: f32, hit: Hit| {
        if best.as_ref().is_none_or(|(best_t, _)| t < *best_t) {
            best = Some((t, hit));
        }
    };

    for block in blocks {
        let hit = match block.kind {
            BlockKind::Cube => pick_cube(ray, block, settings.hole_radius),
            BlockKind::Prism => pick_prism(ray, block),
        };
        if let Some((t, hit)) = hit {
            consider(t, hit);
        }
    }

    if let Some((t, hit)) = pick_ground(ray, settings.ground_half_extent) {
        consider(t, hit);
    }

    best.map(|(_, hit)| hit)
}

/// Ground plane `y = 0`, bounded to a square of `half_extent`, hit from above
pub fn pick_ground(ray: &Ray, half_extent: f32) -> Option<(f32, Hit)> {
    let t = ray.intersects_plane_front(&Plane::new(Vec3::Y, 0.0))?;
    let mut point = ray.at(t);
    if point.x.abs() > half_extent || point.z.abs() > half_extent {
        return None;
    }
    point.y = 0.0;
    Some((t, Hit::ground(point)))
}

fn pick_cube(ray: &Ray, block: &Block, hole_radius: f32) -> Option<(f32, Hit)> {
    let aabb = Aabb::cell(block.cell);
    let ConvexHit { t_enter, enter, t_exit, exit } = ray.clip_convex(&aabb.planes())?;

    let center = aabb.center();
    let entry_face = Face::ALL[enter];
    let entry = ray.at(t_enter);
    if !(block.holes.contains(entry_face) && in_hole(entry, entry_face, center, hole_radius)) {
        return Some((t_enter, Hit::block(block.id.clone(), entry_face, entry, entry_face.normal())));
    }

    let exit_face = Face::ALL[exit];
    let exit_point = ray.at(t_exit);
    if block.holes.contains(exit_face) && in_hole(exit_point, exit_face, center, hole_radius) {
        log::trace!("Ray passed through drilled block {}", block.id);
        return None;
    }
    Some((t_exit, Hit::block(block.id.clone(), exit_face, exit_point, exit_face.normal())))
}

/// Whether `point` on `face` of the cube at `center` lies in the hole disc
fn in_hole(point: Vec3, face: Face, center: Vec3, radius: f32) -> bool {
    let normal = face.normal();
    let offset = point - (center + normal * 0.5);
    let in_plane = offset - normal * offset.dot(normal);
    in_plane.length() < radius
}

/// Planes of the prism in model space, centered on the cell. The triangular
/// cross-section `(-.5,-.5), (.5,-.5), (-.5,.5)` lies in X/Y and is extruded
/// along Z; the sloped face has normal `(1, 1, 0) / sqrt(2)`.
fn prism_planes() -> [Plane; 5] {
    [
        Plane::new(Vec3::NEG_X, -0.5),
        Plane::new(Vec3::NEG_Y, -0.5),
        Plane::new(Vec3::Z, -0.5),
        Plane::new(Vec3::NEG_Z, -0.5),
        Plane::new(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.0),
    ]
}

fn pick_prism(ray: &Ray, block: &Block) -> Option<(f32, Hit)> {
    let rotation = block.rotation.quat();
    let local = ray.to_local(block.center(), rotation);
    let planes = prism_planes();
    let hit = local.clip_convex(&planes)?;

    let normal = (rotation * planes[hit.enter].normal).normalize();
    let face = Face::from_normal(normal);
    let point = ray.at(hit.t_enter);
    Some((hit.t_enter, Hit::block(block.id.clone(), face, point, normal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec3;
    use crate::voxel::block::{DrillAxis, Rotation};

    fn settings() -> EditorSettings {
        EditorSettings::default()
    }

    fn cube(cell: IVec3) -> Block {
        Block::new(cell, BlockKind::Cube, Rotation::R0, "#fff")
    }

    #[test]
    fn test_ground_hit() {
        let ray = Ray::new(Vec3::new(2.3, 5.0, -1.2), Vec3::NEG_Y);
        let hit = pick(&ray, &[], &settings()).unwrap();
        assert_eq!(hit.target, HitTarget::Ground);
        assert_eq!(hit.normal, Vec3::Y);
        assert!((hit.point - Vec3::new(2.3, 0.0, -1.2)).length() < 1e-5);
    }

    #[test]
    fn test_ground_bounds_and_underside() {
        let far = Ray::new(Vec3::new(5000.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(pick(&far, &[], &settings()).is_none());

        let below = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y);
        assert!(pick(&below, &[], &settings()).is_none());
    }

    #[test]
    fn test_cube_top_face() {
        let block = cube(IVec3::ZERO);
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.5), Vec3::NEG_Y);
        let hit = pick(&ray, std::slice::from_ref(&block), &settings()).unwrap();
        assert_eq!(hit.target, HitTarget::Block { id: block.id.clone(), face: Face::PosY });
        assert!((hit.point.y - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_nearest_block_wins() {
        let near = cube(IVec3::new(0, 0, 0));
        let far = cube(IVec3::new(3, 0, 0));
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X);
        let hit = pick(&ray, &[far, near.clone()], &settings()).unwrap();
        assert_eq!(hit.block_id(), Some(&near.id));
        assert_eq!(hit.face(), Some(Face::NegX));
    }

    #[test]
    fn test_hole_reports_inner_exit_face() {
        let mut block = cube(IVec3::ZERO);
        block.holes.insert(Face::NegX);
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X);
        let hit = pick(&ray, std::slice::from_ref(&block), &settings()).unwrap();
        assert_eq!(hit.face(), Some(Face::PosX));
        assert_eq!(hit.normal, Vec3::X);
        assert!((hit.point.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hole_rim_is_solid() {
        let mut block = cube(IVec3::ZERO);
        block.holes.insert(Face::NegX);
        // 0.45 from the face center: outside the 0.35 opening
        let ray = Ray::new(Vec3::new(-5.0, 0.95, 0.5), Vec3::X);
        let hit = pick(&ray, std::slice::from_ref(&block), &settings()).unwrap();
        assert_eq!(hit.face(), Some(Face::NegX));
    }

    #[test]
    fn test_through_hole_passes() {
        let mut drilled = cube(IVec3::ZERO);
        drilled.drill(DrillAxis::X);
        let behind = cube(IVec3::new(2, 0, 0));
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X);
        let hit = pick(&ray, &[drilled, behind.clone()], &settings()).unwrap();
        assert_eq!(hit.block_id(), Some(&behind.id));
    }

    #[test]
    fn test_prism_slope() {
        // R0 slope faces (+x, +y)
        let prism = Block::new(IVec3::ZERO, BlockKind::Prism, Rotation::R0, "#fff");
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.5), Vec3::NEG_Y);
        let hit = pick(&ray, std::slice::from_ref(&prism), &settings()).unwrap();
        assert!((hit.normal - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-5);
        // Slope passes through the cell center
        assert!((hit.point.y - 0.5).abs() < 1e-5);
        assert_eq!(hit.face(), Some(Face::PosX));

        // Near the slope's foot the prism is only a sliver above the ground
        let ray = Ray::new(Vec3::new(0.95, 5.0, 0.5), Vec3::NEG_Y);
        let hit = pick(&ray, std::slice::from_ref(&prism), &settings()).unwrap();
        assert_eq!(hit.block_id(), Some(&prism.id));
        assert!(hit.point.y < 0.1);
    }

    #[test]
    fn test_prism_rotation() {
        // R2 turns the slope to face -x
        let prism = Block::new(IVec3::ZERO, BlockKind::Prism, Rotation::R2, "#fff");
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.5), Vec3::NEG_Y);
        let hit = pick(&ray, std::slice::from_ref(&prism), &settings()).unwrap();
        assert!((hit.normal - Vec3::new(-1.0, 1.0, 0.0).normalize()).length() < 1e-5);
        assert!((hit.point.y - 0.5).abs() < 1e-5);
    }
}
