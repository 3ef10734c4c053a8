//! Block model edits with linear undo/redo.
//!
//! Each edit produces a full new snapshot; the history keeps every
//! snapshot behind a cursor so undo and redo are just cursor moves.

pub mod delta;
pub mod history;
pub mod store;

pub use delta::EditOp;
pub use history::{History, Snapshot};
pub use store::ModelStore;
