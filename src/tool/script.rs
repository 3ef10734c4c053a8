//! Scripted editor sessions.
//!
//! A script is a JSON document listing tool switches, context changes,
//! clicks and key commands. Replaying it against an [`Editor`] exercises the
//! same event path as interactive use, which makes sessions reproducible
//! from the command line and in tests.
//!
//! ```json
//! {
//!   "camera": { ... },
//!   "steps": [
//!     { "tool": "box" },
//!     { "ray": { "origin": [0.5, 5.0, 0.5], "direction": [0.0, -1.0, 0.0] } },
//!     { "click": [640.0, 360.0] },
//!     { "key": "undo" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::config::EditContext;
use crate::core::input::{KeyChord, KeyCommand, PointerEvent};
use crate::core::types::{Vec2, Vec3};
use crate::math::Ray;
use crate::voxel::pick::pick;
use super::editor::{EditOutcome, Editor};
use super::Tool;

/// One scripted event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Tool(Tool),
    /// Replace the edit context
    Context(EditContext),
    /// Advance the context rotation a quarter turn
    Rotate,
    /// Click at a screen position, picking through the script camera
    Click(Vec2),
    /// Click along an explicit world-space ray
    Ray { origin: Vec3, direction: Vec3 },
    /// Press at `from`, drag with the button held, release at `to`
    Drag { from: Vec2, to: Vec2 },
    Key(KeyCommand),
    /// Raw key chord, mapped through the shortcut table
    Chord(KeyChord),
}

/// A replayable session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Camera used for screen-space steps; the default view when absent
    #[serde(default)]
    pub camera: Option<Camera>,
    /// Starting edit context
    #[serde(default)]
    pub context: EditContext,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(text: &str) -> crate::core::types::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Feed every step to `editor`. Returns one outcome per step and the
    /// edit context as it stood after the last step.
    pub fn run(&self, editor: &mut Editor) -> (Vec<EditOutcome>, EditContext) {
        let camera = self.camera.clone().unwrap_or_default();
        let mut ctx = self.context.clone();
        let mut outcomes = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            let outcome = match step {
                Step::Tool(tool) => editor.set_tool(*tool),
                Step::Context(next) => {
                    ctx = next.clone();
                    EditOutcome::StateChanged
                }
                Step::Rotate => {
                    ctx = ctx.rotated();
                    EditOutcome::StateChanged
                }
                Step::Click(screen) => {
                    let event = pointer_at(editor, &camera, *screen);
                    editor.pointer_move(&event, &ctx);
                    editor.tap(&event, &ctx, &camera)
                }
                Step::Ray { origin, direction } => {
                    let ray = Ray::new(*origin, *direction);
                    let hit = pick(&ray, editor.blocks(), editor.settings());
                    let event = PointerEvent::new(Vec2::ZERO, hit);
                    editor.pointer_move(&event, &ctx);
                    editor.tap(&event, &ctx, &camera)
                }
                Step::Drag { from, to } => {
                    let down = pointer_at(editor, &camera, *from);
                    editor.pointer_down(&down);
                    let moved = pointer_at(editor, &camera, *to).held();
                    editor.pointer_move(&moved, &ctx);
                    let up = pointer_at(editor, &camera, *to);
                    match editor.pointer_up(&up, &camera) {
                        EditOutcome::Ignored => editor.click(&up, &ctx),
                        outcome => outcome,
                    }
                }
                Step::Key(command) => editor.key_command(*command, &ctx),
                Step::Chord(chord) => match chord.command() {
                    Some(command) => editor.key_command(command, &ctx),
                    None => EditOutcome::Ignored,
                },
            };
            log::debug!("Step {}: {:?} -> {:?}", index, step, outcome);
            outcomes.push(outcome);
        }

        (outcomes, ctx)
    }
}

fn pointer_at(editor: &Editor, camera: &Camera, screen: Vec2) -> PointerEvent {
    let ray = camera.screen_ray(screen);
    PointerEvent::new(screen, pick(&ray, editor.blocks(), editor.settings()))
}
