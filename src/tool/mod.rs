//! Editing tools and the editor state machine that drives them.

pub mod gesture;
pub mod preview;
pub mod selection;
pub mod editor;
pub mod script;

use serde::{Deserialize, Serialize};

pub use editor::{EditOutcome, Editor};
pub use gesture::Gesture;
pub use preview::Preview;
pub use selection::{drag_select, DragMode, DragRect, Selection};
pub use script::{Script, Step};

/// The active editing tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Place single blocks
    #[default]
    Build,
    Delete,
    Paint,
    /// Toggle through-holes on cubes
    Drill,
    /// Two-corner cuboid
    #[serde(alias = "rectangle")]
    Box,
    /// Center then radius
    #[serde(alias = "circle")]
    Disc,
    /// Three-point triangle
    #[serde(alias = "triangle_poly")]
    Polygon,
    Select,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Build,
        Tool::Delete,
        Tool::Paint,
        Tool::Drill,
        Tool::Box,
        Tool::Disc,
        Tool::Polygon,
        Tool::Select,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Build => "build",
            Tool::Delete => "delete",
            Tool::Paint => "paint",
            Tool::Drill => "drill",
            Tool::Box => "box",
            Tool::Disc => "disc",
            Tool::Polygon => "polygon",
            Tool::Select => "select",
        }
    }

    /// Whether the tool works on lattice cells next to the struck surface
    /// (as opposed to the struck block itself)
    pub fn targets_cells(self) -> bool {
        match self {
            Tool::Build | Tool::Box | Tool::Disc | Tool::Polygon => true,
            Tool::Delete | Tool::Paint | Tool::Drill | Tool::Select => false,
        }
    }
}
