//! Model export: triangulation and STL serialization.

pub mod mesh;
pub mod stl;

pub use mesh::{bounds, triangulate, Triangle};
pub use stl::{export_stl, to_stl_string, write_stl};
