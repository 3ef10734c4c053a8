//! Block selection: click toggling and screen-space drag selection.
//!
//! Dragging left-to-right is a *window* selection (only blocks whose
//! projected center is inside the rectangle). Dragging right-to-left is a
//! *crossing* selection, which also takes blocks whose center lands within
//! a touch distance of the rectangle.

use std::collections::HashSet;

use crate::core::camera::ScreenProjector;
use crate::core::types::Vec2;
use crate::voxel::block::{Block, BlockId};

/// Ordered set of selected block ids. Ids of deleted blocks may linger;
/// they match nothing and are harmless.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<BlockId>,
    index: HashSet<BlockId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> &[BlockId] {
        &self.ids
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.index.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add `id` if absent, remove it if present
    pub fn toggle(&mut self, id: &BlockId) {
        if self.index.remove(id) {
            self.ids.retain(|s| s != id);
        } else {
            self.index.insert(id.clone());
            self.ids.push(id.clone());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.index.clear();
    }

    /// Replace the selection
    pub fn set(&mut self, ids: impl IntoIterator<Item = BlockId>) {
        self.clear();
        for id in ids {
            if self.index.insert(id.clone()) {
                self.ids.push(id);
            }
        }
    }

    /// Select every block. Returns `false` (leaving the selection alone)
    /// when there are none.
    pub fn select_all(&mut self, blocks: &[Block]) -> bool {
        if blocks.is_empty() {
            return false;
        }
        self.set(blocks.iter().map(|b| b.id.clone()));
        true
    }
}

/// Drag-select flavor, decided by drag direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Window,
    Crossing,
}

/// Screen rectangle between the press point and the current pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRect {
    pub start: Vec2,
    pub end: Vec2,
}

impl DragRect {
    pub fn new(start: Vec2) -> Self {
        Self { start, end: start }
    }

    pub fn mode(&self) -> DragMode {
        if self.end.x < self.start.x {
            DragMode::Crossing
        } else {
            DragMode::Window
        }
    }

    pub fn min(&self) -> Vec2 {
        self.start.min(self.end)
    }

    pub fn max(&self) -> Vec2 {
        self.start.max(self.end)
    }

    /// Straight-line drag distance
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Inclusive containment
    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Distance from `p` to the nearest point of the rectangle (0 inside)
    pub fn distance_to(&self, p: Vec2) -> f32 {
        p.distance(p.clamp(self.min(), self.max()))
    }
}

/// Ids of the blocks a finished drag selects
pub fn drag_select(
    blocks: &[Block],
    rect: &DragRect,
    projector: &impl ScreenProjector,
    touch_threshold: f32,
) -> Vec<BlockId> {
    let mode = rect.mode();
    blocks
        .iter()
        .filter(|block| {
            let Some(screen) = projector.project_to_screen(block.center()) else {
                return false;
            };
            match mode {
                DragMode::Window => rect.contains(screen),
                DragMode::Crossing => rect.contains(screen) || rect.distance_to(screen) < touch_threshold,
            }
        })
        .map(|b| b.id.clone())
        .collect()
}
