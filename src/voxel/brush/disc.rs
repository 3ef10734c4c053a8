//! Disc brush: filled disc or ring in an axis-aligned plane.

use crate::core::config::Fill;
use crate::core::types::{IVec3, Vec3};
use super::Candidate;

/// Filled discs include offsets up to this far past the radius
const FILL_SLACK: f32 = 0.5;
/// Rings include offsets within this distance of the radius
const RING_WIDTH: f32 = 0.6;

/// Plane a disc lies in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscPlane {
    /// Horizontal (Y fixed)
    XZ,
    /// X fixed
    YZ,
    /// Z fixed
    XY,
}

impl DiscPlane {
    /// Plane perpendicular to the strictly dominant axis of `normal`.
    /// Anything without one (prism slopes are exact 45° ties) stands the
    /// disc up in the XY plane.
    pub fn from_normal(normal: Vec3) -> Self {
        let a = normal.abs();
        if a.y > a.x && a.y > a.z {
            DiscPlane::XZ
        } else if a.x > a.y && a.x > a.z {
            DiscPlane::YZ
        } else {
            DiscPlane::XY
        }
    }

    /// Map an in-plane offset `(i, j)` onto the lattice around `center`
    fn offset(self, center: IVec3, i: i32, j: i32) -> IVec3 {
        match self {
            DiscPlane::XZ => center + IVec3::new(i, 0, j),
            DiscPlane::YZ => center + IVec3::new(0, i, j),
            DiscPlane::XY => center + IVec3::new(i, j, 0),
        }
    }
}

/// Radius picked by a second cell: rounded lattice distance from the center
pub fn disc_radius(center: IVec3, edge: IVec3) -> i32 {
    (edge - center).as_vec3().length().round() as i32
}

/// Cubes of a disc (`Fill::Solid`) or ring (`Fill::Hollow`) of `radius`
/// around `center`. Cells below the ground are dropped.
pub fn disc(center: IVec3, plane: DiscPlane, radius: i32, fill: Fill) -> Vec<Candidate> {
    let r = radius.max(0);
    let rf = r as f32;

    let mut out = Vec::new();
    for i in -r..=r {
        for j in -r..=r {
            let d = ((i * i + j * j) as f32).sqrt();
            let keep = match fill {
                Fill::Solid => d <= rf + FILL_SLACK,
                Fill::Hollow => (d - rf).abs() < RING_WIDTH,
            };
            if !keep {
                continue;
            }
            let cell = plane.offset(center, i, j);
            if cell.y >= 0 {
                out.push(Candidate::cube(cell));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(cells: &[Candidate]) -> Vec<(i32, i32)> {
        cells.iter().map(|c| (c.cell.x, c.cell.z)).collect()
    }

    #[test]
    fn test_plane_from_normal() {
        assert_eq!(DiscPlane::from_normal(Vec3::Y), DiscPlane::XZ);
        assert_eq!(DiscPlane::from_normal(Vec3::NEG_X), DiscPlane::YZ);
        assert_eq!(DiscPlane::from_normal(Vec3::new(0.2, 0.1, -0.9)), DiscPlane::XY);

        // Slope normals of prisms
        let slope = std::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(DiscPlane::from_normal(Vec3::new(slope, slope, 0.0)), DiscPlane::XY);
        assert_eq!(DiscPlane::from_normal(Vec3::new(0.0, slope, -slope)), DiscPlane::XY);
    }

    #[test]
    fn test_radius_rounding() {
        assert_eq!(disc_radius(IVec3::ZERO, IVec3::new(2, 0, 0)), 2);
        // sqrt(5) = 2.24
        assert_eq!(disc_radius(IVec3::ZERO, IVec3::new(2, 0, 1)), 2);
        // sqrt(8) = 2.83, measured in 3D
        assert_eq!(disc_radius(IVec3::ZERO, IVec3::new(2, 2, 0)), 3);
    }

    #[test]
    fn test_filled_radius_two() {
        let cells = disc(IVec3::ZERO, DiscPlane::XZ, 2, Fill::Solid);
        let got = offsets(&cells);

        let mut expected = Vec::new();
        for i in -2..=2 {
            for j in -2..=2 {
                if ((i * i + j * j) as f32).sqrt() <= 2.5 {
                    expected.push((i, j));
                }
            }
        }
        assert_eq!(got, expected);
        // Everything but the four corners
        assert_eq!(got.len(), 21);
        assert!(cells.iter().all(|c| c.cell.y == 0));
    }

    #[test]
    fn test_ring_radius_two() {
        let cells = disc(IVec3::ZERO, DiscPlane::XZ, 2, Fill::Hollow);
        let got = offsets(&cells);
        for (i, j) in &got {
            let d = ((i * i + j * j) as f32).sqrt();
            assert!((d - 2.0).abs() < 0.6, "({i}, {j}) is off the ring");
        }
        // d = sqrt(2) (4 cells), d = 2 (4 cells) and d = sqrt(5) (8 cells)
        assert_eq!(got.len(), 16);
        assert!(got.contains(&(1, 1)));
        assert!(!got.contains(&(0, 0)));
        assert!(!got.contains(&(1, 0)));
        assert!(!got.contains(&(2, 2)));
    }

    #[test]
    fn test_zero_radius_is_single_cell() {
        let center = IVec3::new(3, 2, 1);
        assert_eq!(disc(center, DiscPlane::XY, 0, Fill::Solid), vec![Candidate::cube(center)]);
        assert_eq!(disc(center, DiscPlane::XY, 0, Fill::Hollow), vec![Candidate::cube(center)]);
    }

    #[test]
    fn test_vertical_disc_clipped_at_ground() {
        // YZ disc centered on the ground layer: rows with y < 0 are dropped
        let cells = disc(IVec3::ZERO, DiscPlane::YZ, 2, Fill::Solid);
        assert!(cells.iter().all(|c| c.cell.y >= 0 && c.cell.x == 0));
        // y = 0: 5 cells, y = 1: 5 cells, y = 2: 3 cells
        assert_eq!(cells.len(), 13);
    }
}
