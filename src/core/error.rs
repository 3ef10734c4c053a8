//! Error types for the voxsmith editor

use thiserror::Error;

use crate::voxel::project::ImportError;

/// Main error type for the editor
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import rejected: {0}")]
    Import(#[from] ImportError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Nothing solid to export")]
    EmptyExport,
}
