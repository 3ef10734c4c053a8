//! Editor state machine.
//!
//! The editor owns the model store and interprets pointer and key events
//! for the active tool. Every call receives the current [`EditContext`];
//! the editor keeps no color/kind/rotation state of its own.

use crate::core::camera::ScreenProjector;
use crate::core::config::{EditContext, EditorSettings};
use crate::core::input::{KeyCommand, PointerButton, PointerEvent};
use crate::core::types::{IVec3, Result, Vec2};
use crate::voxel::block::{Block, BlockId, BlockKind};
use crate::voxel::brush::{skip_occupied, BrushPrimitive};
use crate::voxel::edit::{EditOp, ModelStore, Snapshot};
use crate::voxel::occupancy::{can_place, occupied_cells};
use crate::voxel::pick::Hit;
use crate::voxel::project::{self, ImportError};
use crate::voxel::snap::snap_cell;
use super::gesture::Gesture;
use super::preview::Preview;
use super::selection::{drag_select, DragRect, Selection};
use super::Tool;

/// Result of feeding one event to the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The model changed; one history entry was added
    Committed,
    /// Undo or redo moved the history cursor
    HistoryMoved,
    /// A multi-click gesture took another anchor (or finished empty)
    GestureAdvanced,
    SelectionChanged,
    /// Tool or camera-lock state changed
    StateChanged,
    /// Nothing happened
    Ignored,
}

/// Interactive block editor
#[derive(Debug)]
pub struct Editor {
    settings: EditorSettings,
    store: ModelStore,
    tool: Tool,
    gesture: Gesture,
    preview: Preview,
    selection: Selection,
    /// Screen position of the last pointer-down
    pointer_down: Option<Vec2>,
    /// Drag-select in progress
    drag: Option<DragRect>,
    camera_locked: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        let store = ModelStore::new(settings.history_limit);
        Self {
            settings,
            store,
            tool: Tool::Build,
            gesture: Gesture::Idle,
            preview: Preview::None,
            selection: Selection::new(),
            pointer_down: None,
            drag: None,
            camera_locked: false,
        }
    }

    /// Start from an existing model (one history entry)
    pub fn with_blocks(settings: EditorSettings, blocks: Vec<Block>) -> Self {
        let mut editor = Self::new(settings);
        if !blocks.is_empty() {
            editor.store.commit(blocks);
        }
        editor
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn blocks(&self) -> &[Block] {
        self.store.blocks()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn camera_locked(&self) -> bool {
        self.camera_locked
    }

    /// Whether the orbit camera may respond to drags
    pub fn orbit_enabled(&self) -> bool {
        !self.camera_locked && self.drag.is_none()
    }

    /// Switch tools, dropping any gesture, hover or drag state
    pub fn set_tool(&mut self, tool: Tool) -> EditOutcome {
        if tool == self.tool {
            return EditOutcome::Ignored;
        }
        log::debug!("Tool: {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        self.reset_transient();
        EditOutcome::StateChanged
    }

    fn reset_transient(&mut self) {
        self.gesture = Gesture::Idle;
        self.preview = Preview::None;
        self.drag = None;
    }

    // -----------------------------------------------------------------
    // Pointer events
    // -----------------------------------------------------------------

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        self.pointer_down = Some(event.screen);

        let on_block = event.hit.as_ref().is_some_and(|h| h.block_id().is_some());
        if self.tool == Tool::Select && event.button == PointerButton::Primary && !on_block {
            self.drag = Some(DragRect::new(event.screen));
            log::trace!("Drag-select started at {}", event.screen);
        }
    }

    /// Update hover feedback. Never touches the model.
    pub fn pointer_move(&mut self, event: &PointerEvent, ctx: &EditContext) {
        if let Some(drag) = self.drag.as_mut() {
            drag.end = event.screen;
            self.preview = Preview::Rect(*drag);
            return;
        }
        if event.buttons_held {
            self.preview = Preview::None;
            return;
        }
        self.preview = self.hover_preview(event.hit.as_ref(), ctx);
        log::trace!("Hover: {:?}", self.preview);
    }

    /// Finish a drag-select, if one is running
    pub fn pointer_up(&mut self, event: &PointerEvent, projector: &impl ScreenProjector) -> EditOutcome {
        let Some(mut drag) = self.drag.take() else {
            return EditOutcome::Ignored;
        };
        drag.end = event.screen;
        self.preview = Preview::None;

        if drag.length() < self.settings.click_threshold_px {
            self.selection.clear();
        } else {
            let ids = drag_select(self.blocks(), &drag, projector, self.settings.touch_threshold_px);
            log::debug!("Drag-select ({:?}): {} blocks", drag.mode(), ids.len());
            self.selection.set(ids);
        }
        EditOutcome::SelectionChanged
    }

    /// A completed click. Ignored unless it is a primary-button click whose
    /// travel since pointer-down stays within the click threshold.
    pub fn click(&mut self, event: &PointerEvent, ctx: &EditContext) -> EditOutcome {
        if event.button != PointerButton::Primary {
            return EditOutcome::Ignored;
        }
        let Some(down) = self.pointer_down else {
            return EditOutcome::Ignored;
        };
        if down.distance(event.screen) > self.settings.click_threshold_px {
            return EditOutcome::Ignored;
        }

        let hit = event.hit.as_ref();
        match self.tool {
            Tool::Build => self.place_block(hit, ctx),
            Tool::Delete => match hit.and_then(Hit::block_id) {
                Some(id) => {
                    let outcome = self.commit(EditOp::Remove(id.clone()));
                    self.preview = Preview::None;
                    outcome
                }
                None => EditOutcome::Ignored,
            },
            Tool::Paint => match hit.and_then(Hit::block_id) {
                Some(id) => self.commit(EditOp::Paint {
                    id: id.clone(),
                    color: ctx.color.clone(),
                }),
                None => EditOutcome::Ignored,
            },
            Tool::Drill => match hit.and_then(Hit::block_id) {
                Some(id) => self.commit(EditOp::Drill {
                    id: id.clone(),
                    axis: ctx.drill_axis,
                }),
                None => EditOutcome::Ignored,
            },
            Tool::Box | Tool::Disc | Tool::Polygon => self.advance_gesture(hit, ctx),
            Tool::Select => {
                match hit.and_then(Hit::block_id) {
                    Some(id) => self.selection.toggle(id),
                    None => self.selection.clear(),
                }
                EditOutcome::SelectionChanged
            }
        }
    }

    /// Pointer down, up and click at the same spot
    pub fn tap(&mut self, event: &PointerEvent, ctx: &EditContext, projector: &impl ScreenProjector) -> EditOutcome {
        self.pointer_down(event);
        let up = self.pointer_up(event, projector);
        match self.click(event, ctx) {
            EditOutcome::Ignored => up,
            outcome => outcome,
        }
    }

    fn place_block(&mut self, hit: Option<&Hit>, ctx: &EditContext) -> EditOutcome {
        let Some(cell) = hit.and_then(snap_cell) else {
            return EditOutcome::Ignored;
        };
        if !can_place(self.blocks(), cell, ctx.kind, ctx.rotation) {
            log::trace!("Placement at {} rejected: cell occupied", cell);
            return EditOutcome::Ignored;
        }
        let block = Block::new(cell, ctx.kind, ctx.rotation, ctx.color.clone());
        let outcome = self.commit(EditOp::Add(vec![block]));
        self.preview = Preview::None;
        outcome
    }

    fn advance_gesture(&mut self, hit: Option<&Hit>, ctx: &EditContext) -> EditOutcome {
        let Some(hit) = hit else {
            return EditOutcome::Ignored;
        };
        let Some(cell) = snap_cell(hit) else {
            return EditOutcome::Ignored;
        };

        let Some(shape) = self.gesture.advance(self.tool, cell, hit.normal, ctx.fill) else {
            log::debug!("{} gesture: {} anchor(s)", self.tool.name(), self.gesture.anchors().len());
            self.preview = Preview::Marker { cell };
            return EditOutcome::GestureAdvanced;
        };

        self.preview = Preview::None;
        let blocks = self.shape_blocks(&shape, &ctx.color);
        if blocks.is_empty() {
            log::debug!("{} gesture produced no new blocks", self.tool.name());
            return EditOutcome::GestureAdvanced;
        }
        log::debug!("{} gesture: placing {} blocks", self.tool.name(), blocks.len());
        self.commit(EditOp::Add(blocks))
    }

    fn shape_blocks(&self, shape: &BrushPrimitive, color: &str) -> Vec<Block> {
        skip_occupied(shape.candidates(&self.settings), self.blocks())
            .into_iter()
            .map(|c| c.to_block(color))
            .collect()
    }

    fn hover_preview(&self, hit: Option<&Hit>, ctx: &EditContext) -> Preview {
        let Some(hit) = hit else {
            return Preview::None;
        };

        if !self.tool.targets_cells() {
            return match hit.block_id() {
                Some(id) => Preview::Highlight {
                    id: id.clone(),
                    face: (self.tool == Tool::Drill).then(|| hit.face()).flatten(),
                },
                None => Preview::None,
            };
        }

        let Some(cell) = snap_cell(hit) else {
            return Preview::None;
        };

        match self.tool {
            Tool::Build => {
                if can_place(self.blocks(), cell, ctx.kind, ctx.rotation) {
                    Preview::Ghost { cell, kind: ctx.kind, rotation: ctx.rotation }
                } else {
                    Preview::None
                }
            }
            _ => match self.gesture.shape_with(cell, ctx.fill) {
                Some(shape) => {
                    let outline = matches!(shape, BrushPrimitive::Cuboid { .. }).then(|| shape.bounds());
                    Preview::Shape {
                        anchors: self.gesture.anchors(),
                        outline,
                        candidates: skip_occupied(shape.candidates(&self.settings), self.blocks()),
                    }
                }
                None if self.gesture.is_idle() => Preview::Marker { cell },
                None => Preview::Shape {
                    anchors: self.gesture.anchors(),
                    outline: None,
                    candidates: Vec::new(),
                },
            },
        }
    }

    // -----------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------

    pub fn key_command(&mut self, command: KeyCommand, ctx: &EditContext) -> EditOutcome {
        match command {
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
            KeyCommand::SelectAll => self.select_all(),
            KeyCommand::ShiftUp => self.shift_selection(1),
            KeyCommand::ShiftDown => self.shift_selection(-1),
            KeyCommand::Escape => self.escape(),
            KeyCommand::ToggleCameraLock => self.toggle_camera_lock(),
            KeyCommand::ExtendPattern => self.extend_pattern(ctx),
            KeyCommand::ClearAll => self.clear_all(),
        }
    }

    pub fn undo(&mut self) -> EditOutcome {
        if self.store.undo() {
            EditOutcome::HistoryMoved
        } else {
            EditOutcome::Ignored
        }
    }

    pub fn redo(&mut self) -> EditOutcome {
        if self.store.redo() {
            EditOutcome::HistoryMoved
        } else {
            EditOutcome::Ignored
        }
    }

    pub fn select_all(&mut self) -> EditOutcome {
        if self.selection.select_all(self.store.blocks()) {
            EditOutcome::SelectionChanged
        } else {
            EditOutcome::Ignored
        }
    }

    /// Move the selected blocks up or down by `dy` cells. Rejected as a
    /// whole if any block would end up below the ground.
    pub fn shift_selection(&mut self, dy: i32) -> EditOutcome {
        if self.selection.is_empty() {
            return EditOutcome::Ignored;
        }
        let op = EditOp::Shift {
            ids: self.selection.ids().to_vec(),
            dy,
        };
        let outcome = self.commit(op);
        if outcome == EditOutcome::Ignored && dy < 0 {
            log::warn!("Shift rejected: selection would go below the ground");
        }
        outcome
    }

    fn escape(&mut self) -> EditOutcome {
        if !self.selection.is_empty() {
            self.selection.clear();
            return EditOutcome::SelectionChanged;
        }
        self.set_tool(Tool::Build)
    }

    pub fn toggle_camera_lock(&mut self) -> EditOutcome {
        self.camera_locked = !self.camera_locked;
        log::debug!("Camera lock: {}", self.camera_locked);
        EditOutcome::StateChanged
    }

    /// Repeat the step between the last two blocks (build tool only).
    pub fn extend_pattern(&mut self, ctx: &EditContext) -> EditOutcome {
        if self.tool != Tool::Build {
            return EditOutcome::Ignored;
        }
        let blocks = self.blocks();
        let [.., prev, last] = blocks else {
            return EditOutcome::Ignored;
        };
        let Some(cell) = repeat_step(prev.cell, last.cell) else {
            return EditOutcome::Ignored;
        };
        if cell.y < 0 || occupied_cells(blocks).contains(&cell) {
            return EditOutcome::Ignored;
        }
        let block = Block::new(cell, ctx.kind, ctx.rotation, ctx.color.clone());
        self.commit(EditOp::Add(vec![block]))
    }

    /// Empty the model as one history entry and drop the selection
    pub fn clear_all(&mut self) -> EditOutcome {
        let outcome = self.commit(EditOp::Clear);
        if outcome == EditOutcome::Committed {
            log::info!("Cleared model");
            self.selection.clear();
        }
        outcome
    }

    /// Replace the model with a project payload. On error nothing changes.
    pub fn import_json(&mut self, text: &str) -> std::result::Result<usize, ImportError> {
        match project::import_json(text, &self.settings.default_color) {
            Ok(blocks) => {
                let count = blocks.len();
                self.store.apply(&EditOp::Replace(blocks));
                self.selection.clear();
                self.reset_transient();
                log::info!("Imported {} blocks", count);
                Ok(count)
            }
            Err(e) => {
                log::warn!("Import rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn export_json(&self) -> Result<String> {
        project::export_json(self.blocks())
    }

    /// Selected blocks that still exist
    pub fn selected_blocks(&self) -> Vec<&Block> {
        self.blocks().iter().filter(|b| self.selection.contains(&b.id)).collect()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.store.get(id)
    }

    /// Number of blocks of `kind`, for status displays
    pub fn count_kind(&self, kind: BlockKind) -> usize {
        self.blocks().iter().filter(|b| b.kind == kind).count()
    }

    fn commit(&mut self, op: EditOp) -> EditOutcome {
        if self.store.apply(&op) {
            EditOutcome::Committed
        } else {
            EditOutcome::Ignored
        }
    }
}

/// `last + (last - prev)`, or `None` when a component overflows
fn repeat_step(prev: IVec3, last: IVec3) -> Option<IVec3> {
    let next = |p: i32, l: i32| l.checked_sub(p).and_then(|step| l.checked_add(step));
    Some(IVec3::new(
        next(prev.x, last.x)?,
        next(prev.y, last.y)?,
        next(prev.z, last.z)?,
    ))
}
