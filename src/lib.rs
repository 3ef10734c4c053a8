//! Voxsmith - a grid-aligned voxel sculpting engine

pub mod core;
pub mod math;
pub mod voxel;
pub mod tool;
pub mod export;
