//! Project files: the block list as a JSON array.
//!
//! Each record is `{ id, position: [x, y, z], color, type, rotation, holes? }`
//! where `position` is the cell center. Import is strict about the fields
//! the editor depends on and reports the first offending element.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::types::{IVec3, Result, Vec3};
use super::block::{Block, BlockId, BlockKind, Holes, Rotation};

/// Largest accepted coordinate magnitude. Keeps every cell exactly
/// representable in `f32` and far from `i32` overflow in edits.
const MAX_COORD: f64 = 16_777_216.0;

/// Why a project payload was rejected
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to parse project: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid file format: expected an array of blocks")]
    NotAnArray,

    #[error("Block {index}: invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

impl ImportError {
    fn field(index: usize, field: &'static str, reason: impl Into<String>) -> Self {
        ImportError::InvalidField {
            index,
            field,
            reason: reason.into(),
        }
    }
}

/// On-disk form of a block
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: BlockId,
    pub position: [f32; 3],
    pub color: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub rotation: Rotation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<u8>,
}

impl From<&Block> for BlockRecord {
    fn from(block: &Block) -> Self {
        Self {
            id: block.id.clone(),
            position: block.center().to_array(),
            color: block.color.clone(),
            kind: block.kind,
            rotation: block.rotation,
            holes: block.holes.indices(),
        }
    }
}

/// Serialize blocks to the project format
pub fn export_json(blocks: &[Block]) -> Result<String> {
    let records: Vec<BlockRecord> = blocks.iter().map(BlockRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Parse and validate a project payload.
///
/// Positions are snapped to the nearest cell center. Missing `color` falls
/// back to `default_color`, missing `rotation` to 0.
pub fn import_json(text: &str, default_color: &str) -> std::result::Result<Vec<Block>, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_block(index, item, default_color))
        .collect()
}

fn parse_block(index: usize, item: &Value, default_color: &str) -> std::result::Result<Block, ImportError> {
    let Value::Object(fields) = item else {
        return Err(ImportError::field(index, "block", "expected an object"));
    };

    let id = match fields.get("id") {
        Some(Value::String(s)) if !s.is_empty() => BlockId::from(s.as_str()),
        _ => return Err(ImportError::field(index, "id", "missing or empty")),
    };

    let position = match fields.get("position") {
        Some(Value::Array(coords)) if coords.len() == 3 => {
            let mut p = [0.0f32; 3];
            for (slot, coord) in p.iter_mut().zip(coords) {
                let v = coord
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ImportError::field(index, "position", "coordinates must be numbers"))?;
                if v.abs() > MAX_COORD {
                    return Err(ImportError::field(index, "position", "coordinate out of range"));
                }
                *slot = v as f32;
            }
            Vec3::from_array(p)
        }
        _ => return Err(ImportError::field(index, "position", "expected [x, y, z]")),
    };
    let cell = snap_center(position);
    if cell.y < 0 {
        return Err(ImportError::field(index, "position", "below the ground"));
    }

    let kind = match fields.get("type") {
        Some(v @ Value::String(_)) => BlockKind::deserialize(v)
            .map_err(|e| ImportError::field(index, "type", e.to_string()))?,
        _ => return Err(ImportError::field(index, "type", "missing")),
    };

    let rotation = match fields.get("rotation") {
        None | Some(Value::Null) => Rotation::R0,
        Some(v) => v
            .as_u64()
            .and_then(|r| u8::try_from(r).ok())
            .and_then(Rotation::from_index)
            .ok_or_else(|| ImportError::field(index, "rotation", "must be 0-3"))?,
    };

    let color = match fields.get("color") {
        None | Some(Value::Null) => default_color.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ImportError::field(index, "color", "expected a string")),
    };

    let holes = match fields.get("holes") {
        None | Some(Value::Null) => Holes::NONE,
        Some(Value::Array(faces)) => faces
            .iter()
            .map(|f| f.as_u64().and_then(|f| u8::try_from(f).ok()))
            .collect::<Option<Vec<u8>>>()
            .and_then(Holes::from_indices)
            .ok_or_else(|| ImportError::field(index, "holes", "face indices must be 0-5"))?,
        Some(_) => return Err(ImportError::field(index, "holes", "expected an array")),
    };

    let mut block = Block::with_id(id, cell, kind, rotation, color);
    block.holes = holes;
    Ok(block)
}

/// Cell whose center is nearest to `center`
fn snap_center(center: Vec3) -> IVec3 {
    (center - Vec3::splat(0.5)).round().as_ivec3()
}

/// Write blocks to a project file
pub fn save_project(path: &Path, blocks: &[Block]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, export_json(blocks)?)?;
    log::info!("Saved {} blocks to {}", blocks.len(), path.display());
    Ok(())
}

/// Read and validate a project file
pub fn load_project(path: &Path, default_color: &str) -> Result<Vec<Block>> {
    let text = std::fs::read_to_string(path)?;
    let blocks = import_json(&text, default_color)?;
    log::info!("Loaded {} blocks from {}", blocks.len(), path.display());
    Ok(blocks)
}
