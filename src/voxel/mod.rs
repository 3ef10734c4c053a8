//! Block model data structures and operations

pub mod block;
pub mod occupancy;
pub mod brush;
pub mod edit;
pub mod pick;
pub mod snap;
pub mod project;

pub use block::{Block, BlockId, BlockKind, DrillAxis, Face, Holes, Rotation};
pub use occupancy::{can_place, CellState};
pub use edit::{EditOp, ModelStore};
pub use pick::{pick, Hit, HitTarget};
pub use snap::snap_cell;
pub use project::{export_json, import_json, load_project, save_project, ImportError};
