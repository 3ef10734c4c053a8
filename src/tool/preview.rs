//! Hover feedback shown before anything is committed.

use crate::core::types::IVec3;
use crate::voxel::block::{BlockId, BlockKind, Face, Rotation};
use crate::voxel::brush::Candidate;
use super::selection::DragRect;

/// What the renderer should draw under the pointer
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Preview {
    #[default]
    None,
    /// Translucent block where a build click would place one
    Ghost { cell: IVec3, kind: BlockKind, rotation: Rotation },
    /// Outline of the block a click would act on; drill also marks the face
    Highlight { id: BlockId, face: Option<Face> },
    /// Cell a shape gesture would anchor on
    Marker { cell: IVec3 },
    /// In-progress shape gesture
    Shape {
        anchors: Vec<IVec3>,
        /// Inclusive cell bounds (box tool only)
        outline: Option<(IVec3, IVec3)>,
        /// Blocks the next click would add
        candidates: Vec<Candidate>,
    },
    /// Drag-select rectangle
    Rect(DragRect),
}

impl Preview {
    pub fn is_none(&self) -> bool {
        matches!(self, Preview::None)
    }
}
