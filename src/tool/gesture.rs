//! Multi-click shape gestures.
//!
//! A gesture buffers the anchor cells of a box, disc or polygon until the
//! shape is fully defined, then yields a [`BrushPrimitive`].

use crate::core::config::Fill;
use crate::core::types::{IVec3, Vec3};
use crate::voxel::brush::{disc_radius, BrushPrimitive, DiscPlane};
use super::Tool;

/// In-progress gesture state
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// First box corner placed
    Box { start: IVec3 },
    /// Disc center placed; the plane comes from the struck surface
    Disc { center: IVec3, plane: DiscPlane },
    /// One or two polygon points placed
    Polygon { points: Vec<IVec3> },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Cells placed so far
    pub fn anchors(&self) -> Vec<IVec3> {
        match self {
            Gesture::Idle => Vec::new(),
            Gesture::Box { start } => vec![*start],
            Gesture::Disc { center, .. } => vec![*center],
            Gesture::Polygon { points } => points.clone(),
        }
    }

    /// Feed one confirming click at `cell` (with the struck surface
    /// `normal`). Returns the finished shape once the gesture completes,
    /// resetting to idle.
    pub fn advance(&mut self, tool: Tool, cell: IVec3, normal: Vec3, fill: Fill) -> Option<BrushPrimitive> {
        let state = std::mem::take(self);
        match (tool, state) {
            (Tool::Box, Gesture::Box { start }) => {
                Some(BrushPrimitive::Cuboid { a: start, b: cell, fill })
            }
            (Tool::Box, _) => {
                *self = Gesture::Box { start: cell };
                None
            }
            (Tool::Disc, Gesture::Disc { center, plane }) => Some(BrushPrimitive::Disc {
                center,
                plane,
                radius: disc_radius(center, cell),
                fill,
            }),
            (Tool::Disc, _) => {
                *self = Gesture::Disc {
                    center: cell,
                    plane: DiscPlane::from_normal(normal),
                };
                None
            }
            (Tool::Polygon, Gesture::Polygon { mut points }) if points.len() >= 2 => {
                points.truncate(2);
                Some(BrushPrimitive::Polygon { points: [points[0], points[1], cell] })
            }
            (Tool::Polygon, Gesture::Polygon { mut points }) => {
                points.push(cell);
                *self = Gesture::Polygon { points };
                None
            }
            (Tool::Polygon, _) => {
                *self = Gesture::Polygon { points: vec![cell] };
                None
            }
            (Tool::Build | Tool::Delete | Tool::Paint | Tool::Drill | Tool::Select, _) => None,
        }
    }

    /// The shape the gesture would produce if the next click landed on
    /// `hover`, once enough anchors are placed to define one.
    pub fn shape_with(&self, hover: IVec3, fill: Fill) -> Option<BrushPrimitive> {
        match self {
            Gesture::Idle => None,
            Gesture::Box { start } => Some(BrushPrimitive::Cuboid { a: *start, b: hover, fill }),
            Gesture::Disc { center, plane } => Some(BrushPrimitive::Disc {
                center: *center,
                plane: *plane,
                radius: disc_radius(*center, hover),
                fill,
            }),
            Gesture::Polygon { points } if points.len() == 2 => {
                Some(BrushPrimitive::Polygon { points: [points[0], points[1], hover] })
            }
            Gesture::Polygon { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_takes_two_clicks() {
        let mut gesture = Gesture::default();
        assert!(gesture.advance(Tool::Box, IVec3::ZERO, Vec3::Y, Fill::Solid).is_none());
        assert_eq!(gesture.anchors(), vec![IVec3::ZERO]);

        let shape = gesture.advance(Tool::Box, IVec3::new(2, 0, 0), Vec3::Y, Fill::Hollow);
        assert_eq!(
            shape,
            Some(BrushPrimitive::Cuboid { a: IVec3::ZERO, b: IVec3::new(2, 0, 0), fill: Fill::Hollow })
        );
        assert!(gesture.is_idle());
    }

    #[test]
    fn test_disc_plane_from_first_click() {
        let mut gesture = Gesture::default();
        gesture.advance(Tool::Disc, IVec3::new(0, 2, 0), Vec3::X, Fill::Solid);
        assert_eq!(gesture, Gesture::Disc { center: IVec3::new(0, 2, 0), plane: DiscPlane::YZ });

        let shape = gesture.advance(Tool::Disc, IVec3::new(0, 2, 3), Vec3::Y, Fill::Solid);
        assert_eq!(
            shape,
            Some(BrushPrimitive::Disc {
                center: IVec3::new(0, 2, 0),
                plane: DiscPlane::YZ,
                radius: 3,
                fill: Fill::Solid,
            })
        );
    }

    #[test]
    fn test_polygon_takes_three_clicks() {
        let mut gesture = Gesture::default();
        let p = [IVec3::ZERO, IVec3::new(4, 0, 0), IVec3::new(0, 0, 4)];
        assert!(gesture.advance(Tool::Polygon, p[0], Vec3::Y, Fill::Solid).is_none());
        assert!(gesture.shape_with(p[1], Fill::Solid).is_none());
        assert!(gesture.advance(Tool::Polygon, p[1], Vec3::Y, Fill::Solid).is_none());
        assert_eq!(gesture.anchors(), vec![p[0], p[1]]);
        assert_eq!(gesture.shape_with(p[2], Fill::Solid), Some(BrushPrimitive::Polygon { points: p }));

        let shape = gesture.advance(Tool::Polygon, p[2], Vec3::Y, Fill::Solid);
        assert_eq!(shape, Some(BrushPrimitive::Polygon { points: p }));
        assert!(gesture.is_idle());
    }

    #[test]
    fn test_stale_state_restarts_for_new_tool() {
        let mut gesture = Gesture::Box { start: IVec3::ONE };
        assert!(gesture.advance(Tool::Disc, IVec3::ZERO, Vec3::Z, Fill::Solid).is_none());
        assert_eq!(gesture, Gesture::Disc { center: IVec3::ZERO, plane: DiscPlane::XY });

        assert!(gesture.advance(Tool::Build, IVec3::ZERO, Vec3::Y, Fill::Solid).is_none());
        assert!(gesture.is_idle());
    }
}
