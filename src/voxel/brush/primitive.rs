use crate::core::config::{EditorSettings, Fill};
use crate::core::types::IVec3;
use super::{cuboid, disc, polygon, Candidate, DiscPlane, RampThresholds};

/// A fully-defined shape gesture, ready to expand into blocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushPrimitive {
    Cuboid { a: IVec3, b: IVec3, fill: Fill },
    Disc { center: IVec3, plane: DiscPlane, radius: i32, fill: Fill },
    Polygon { points: [IVec3; 3] },
}

impl RampThresholds {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            min: settings.ramp_min,
            max: settings.ramp_max,
        }
    }
}

impl BrushPrimitive {
    /// Candidate blocks for this shape, before occupancy filtering
    pub fn candidates(&self, settings: &EditorSettings) -> Vec<Candidate> {
        match *self {
            BrushPrimitive::Cuboid { a, b, fill } => cuboid(a, b, fill),
            BrushPrimitive::Disc { center, plane, radius, fill } => disc(center, plane, radius, fill),
            BrushPrimitive::Polygon { points } => {
                polygon(points, RampThresholds::from_settings(settings))
            }
        }
    }

    /// Inclusive cell bounds of the shape, used for preview outlines
    pub fn bounds(&self) -> (IVec3, IVec3) {
        match *self {
            BrushPrimitive::Cuboid { a, b, .. } => (a.min(b), a.max(b)),
            BrushPrimitive::Disc { center, plane, radius, .. } => {
                let r = radius.max(0);
                let spread = match plane {
                    DiscPlane::XZ => IVec3::new(r, 0, r),
                    DiscPlane::YZ => IVec3::new(0, r, r),
                    DiscPlane::XY => IVec3::new(r, r, 0),
                };
                (center - spread, center + spread)
            }
            BrushPrimitive::Polygon { points } => (
                points[0].min(points[1]).min(points[2]),
                points[0].max(points[1]).max(points[2]),
            ),
        }
    }
}
