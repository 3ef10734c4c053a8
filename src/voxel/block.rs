//! Block data type: the atomic placed element of a model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Quat, Vec3};

/// Unique block identifier.
///
/// Freshly placed blocks get a UUID v4; imported blocks keep whatever
/// non-empty string their file carried.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a new random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block geometry variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Axis-aligned unit cube
    #[default]
    #[serde(rename = "cube")]
    Cube,
    /// Unit right-triangular prism (half a cube split along a vertical diagonal)
    #[serde(rename = "triangle", alias = "triangular_prism", alias = "prism")]
    Prism,
}

/// Quarter-turn orientation about the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rotation {
    #[default]
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Next quarter turn (3 wraps to 0)
    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % 4]
    }

    /// The half turn: the rotation of the complementary prism
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() as usize + 2) % 4]
    }

    /// Model-to-world rotation: `-index * 90°` about +Y.
    pub fn quat(self) -> Quat {
        Quat::from_rotation_y(-(self.index() as f32) * std::f32::consts::FRAC_PI_2)
    }
}

impl TryFrom<u8> for Rotation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("rotation must be 0-3, got {}", value))
    }
}

impl From<Rotation> for u8 {
    fn from(r: Rotation) -> u8 {
        r.index()
    }
}

/// One of the six faces of a cell. Discriminants are the canonical face
/// indices used by the hole set and by picking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX, Face::NegX,
        Face::PosY, Face::NegY,
        Face::PosZ, Face::NegZ,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Outward unit normal
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosX => Vec3::X,
            Face::NegX => Vec3::NEG_X,
            Face::PosY => Vec3::Y,
            Face::NegY => Vec3::NEG_Y,
            Face::PosZ => Vec3::Z,
            Face::NegZ => Vec3::NEG_Z,
        }
    }

    /// Face whose normal is closest to `normal` (dominant component wins,
    /// ties resolve X before Y before Z).
    pub fn from_normal(normal: Vec3) -> Self {
        let a = normal.abs();
        if a.x >= a.y && a.x >= a.z {
            if normal.x >= 0.0 { Face::PosX } else { Face::NegX }
        } else if a.y >= a.z {
            if normal.y >= 0.0 { Face::PosY } else { Face::NegY }
        } else if normal.z >= 0.0 {
            Face::PosZ
        } else {
            Face::NegZ
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    pub fn axis(self) -> DrillAxis {
        match self {
            Face::PosX | Face::NegX => DrillAxis::X,
            Face::PosY | Face::NegY => DrillAxis::Y,
            Face::PosZ | Face::NegZ => DrillAxis::Z,
        }
    }
}

/// Through-hole axis for the drill tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillAxis {
    #[default]
    X,
    Y,
    Z,
}

impl DrillAxis {
    /// The pair of opposite faces a hole along this axis opens
    pub fn faces(self) -> [Face; 2] {
        match self {
            DrillAxis::X => [Face::PosX, Face::NegX],
            DrillAxis::Y => [Face::PosY, Face::NegY],
            DrillAxis::Z => [Face::PosZ, Face::NegZ],
        }
    }
}

/// Set of drilled faces, one bit per face index.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Holes(u8);

impl Holes {
    pub const NONE: Holes = Holes(0);

    /// Build from face indices; `None` if any index is outside 0..=5.
    pub fn from_indices(indices: impl IntoIterator<Item = u8>) -> Option<Self> {
        let mut holes = Holes::NONE;
        for index in indices {
            holes.insert(Face::from_index(index)?);
        }
        Some(holes)
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & (1 << face.index()) != 0
    }

    pub fn insert(&mut self, face: Face) {
        self.0 |= 1 << face.index();
    }

    pub fn remove(&mut self, face: Face) {
        self.0 &= !(1 << face.index());
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Face indices in ascending order
    pub fn indices(self) -> Vec<u8> {
        self.iter().map(Face::index).collect()
    }

    /// Toggle a through-hole: if both faces of the axis are open, close
    /// them; otherwise open whichever are missing.
    pub fn toggle_axis(&mut self, axis: DrillAxis) {
        let [a, b] = axis.faces();
        if self.contains(a) && self.contains(b) {
            self.remove(a);
            self.remove(b);
        } else {
            self.insert(a);
            self.insert(b);
        }
    }
}

impl fmt::Debug for Holes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.indices()).finish()
    }
}

/// A placed block
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Lattice cell index; the world center is `cell + 0.5`
    pub cell: IVec3,
    pub kind: BlockKind,
    pub rotation: Rotation,
    pub color: String,
    /// Drilled faces (cubes only)
    pub holes: Holes,
}

impl Block {
    /// Create a block with a fresh id and no holes
    pub fn new(cell: IVec3, kind: BlockKind, rotation: Rotation, color: impl Into<String>) -> Self {
        Self::with_id(BlockId::generate(), cell, kind, rotation, color)
    }

    pub fn with_id(
        id: BlockId,
        cell: IVec3,
        kind: BlockKind,
        rotation: Rotation,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            cell,
            kind,
            rotation,
            color: color.into(),
            holes: Holes::NONE,
        }
    }

    /// World-space center
    pub fn center(&self) -> Vec3 {
        cell_center(self.cell)
    }

    /// Toggle a through-hole. Returns `false` (and changes nothing) for prisms.
    pub fn drill(&mut self, axis: DrillAxis) -> bool {
        match self.kind {
            BlockKind::Cube => {
                self.holes.toggle_axis(axis);
                true
            }
            BlockKind::Prism => false,
        }
    }
}

/// World-space center of a lattice cell
pub fn cell_center(cell: IVec3) -> Vec3 {
    cell.as_vec3() + Vec3::splat(0.5)
}

/// Lattice cell containing a world-space point
pub fn cell_containing(point: Vec3) -> IVec3 {
    point.floor().as_ivec3()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drill_x_twice() {
        let mut block = Block::new(IVec3::ZERO, BlockKind::Cube, Rotation::R0, "#fff");
        assert!(block.drill(DrillAxis::X));
        assert_eq!(block.holes.indices(), vec![0, 1]);
        assert!(block.drill(DrillAxis::X));
        assert!(block.holes.is_empty());
    }

    #[test]
    fn test_drill_axes_combine() {
        let mut block = Block::new(IVec3::ZERO, BlockKind::Cube, Rotation::R0, "#fff");
        block.drill(DrillAxis::X);
        block.drill(DrillAxis::Z);
        assert_eq!(block.holes.indices(), vec![0, 1, 4, 5]);

        block.drill(DrillAxis::X);
        assert_eq!(block.holes.indices(), vec![4, 5]);
    }

    #[test]
    fn test_drill_completes_half_open_pair() {
        let mut holes = Holes::from_indices([2]).unwrap();
        holes.toggle_axis(DrillAxis::Y);
        assert_eq!(holes.indices(), vec![2, 3]);
    }

    #[test]
    fn test_drill_prism_is_noop() {
        let mut block = Block::new(IVec3::ZERO, BlockKind::Prism, Rotation::R1, "#fff");
        assert!(!block.drill(DrillAxis::Y));
        assert!(block.holes.is_empty());
    }

    #[test]
    fn test_holes_from_indices_rejects_out_of_range() {
        assert!(Holes::from_indices([0, 6]).is_none());
        assert_eq!(Holes::from_indices([5, 0]).unwrap().indices(), vec![0, 5]);
    }

    #[test]
    fn test_rotation_cycle() {
        assert_eq!(Rotation::R3.next(), Rotation::R0);
        assert_eq!(Rotation::R1.opposite(), Rotation::R3);
        assert!(Rotation::try_from(4).is_err());
    }

    #[test]
    fn test_rotation_quat_turns_clockwise() {
        // Quarter turn maps +X onto +Z
        let v = Rotation::R1.quat() * Vec3::X;
        assert!((v - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_face_from_normal() {
        assert_eq!(Face::from_normal(Vec3::new(0.1, -0.9, 0.2)), Face::NegY);
        assert_eq!(Face::from_normal(Vec3::new(0.0, 0.0, 1.0)), Face::PosZ);
        assert_eq!(Face::PosX.opposite(), Face::NegX);
        assert_eq!(Face::NegZ.axis(), DrillAxis::Z);
    }

    #[test]
    fn test_cell_center_and_containing() {
        assert_eq!(cell_center(IVec3::new(0, 0, -1)), Vec3::new(0.5, 0.5, -0.5));
        assert_eq!(cell_containing(Vec3::new(-0.2, 1.7, 2.0)), IVec3::new(-1, 1, 2));
    }
}
