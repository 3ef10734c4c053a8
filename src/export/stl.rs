//! ASCII STL writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::voxel::block::Block;
use super::mesh::{bounds, triangulate, Triangle};

const SOLID_NAME: &str = "voxel_model";

/// Write `triangles` as an ASCII STL solid. Degenerate triangles are
/// skipped; returns the number of facets written.
///
/// Fails with [`Error::EmptyExport`] before writing anything when no facet
/// would remain.
pub fn write_stl<W: Write>(writer: &mut W, triangles: &[Triangle]) -> Result<usize> {
    let facets: Vec<(Vec3, &Triangle)> = triangles
        .iter()
        .filter_map(|t| t.normal().map(|n| (n, t)))
        .collect();
    if facets.is_empty() {
        return Err(Error::EmptyExport);
    }

    writeln!(writer, "solid {SOLID_NAME}")?;
    for (n, t) in &facets {
        writeln!(writer, "facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(writer, "  outer loop")?;
        for v in t.vertices {
            writeln!(writer, "    vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "  endloop")?;
        writeln!(writer, "endfacet")?;
    }
    write!(writer, "endsolid {SOLID_NAME}")?;

    let skipped = triangles.len() - facets.len();
    if skipped > 0 {
        log::debug!("Skipped {} degenerate triangles", skipped);
    }
    Ok(facets.len())
}

/// STL text for `triangles`
pub fn to_stl_string(triangles: &[Triangle]) -> Result<String> {
    let mut buf = Vec::new();
    write_stl(&mut buf, triangles)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Triangulate `blocks` and write them to an STL file
pub fn export_stl(path: &Path, blocks: &[Block], hole_radius: f32) -> Result<usize> {
    let triangles = triangulate(blocks, hole_radius);
    // Check before creating the file so a failed export leaves nothing behind
    if triangles.iter().all(|t| t.normal().is_none()) {
        return Err(Error::EmptyExport);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let facets = write_stl(&mut writer, &triangles)?;
    writer.flush()?;
    if let Some(aabb) = bounds(&triangles) {
        let size = aabb.size();
        log::info!(
            "Exported {} blocks ({} facets, {}x{}x{}) to {:?}",
            blocks.len(),
            facets,
            size.x,
            size.y,
            size.z,
            path
        );
    }
    Ok(facets)
}
