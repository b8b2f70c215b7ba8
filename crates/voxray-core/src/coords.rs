//! Voxel cell coordinates and faces.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

/// One of the six axis-aligned faces of a voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// -X
    West,
    /// +X
    East,
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
}

impl Face {
    /// All faces, in axis order
    pub const ALL: [Face; 6] = [
        Face::West,
        Face::East,
        Face::Down,
        Face::Up,
        Face::North,
        Face::South,
    ];

    /// Outward integer normal of this face
    #[inline]
    pub const fn normal_i(self) -> IVec3 {
        match self {
            Face::West => IVec3::NEG_X,
            Face::East => IVec3::X,
            Face::Down => IVec3::NEG_Y,
            Face::Up => IVec3::Y,
            Face::North => IVec3::NEG_Z,
            Face::South => IVec3::Z,
        }
    }

    /// Outward normal of this face
    #[inline]
    pub fn normal(self) -> DVec3 {
        self.normal_i().as_dvec3()
    }

    /// The face on the other side of the voxel
    #[inline]
    pub const fn opposite(self) -> Face {
        match self {
            Face::West => Face::East,
            Face::East => Face::West,
            Face::Down => Face::Up,
            Face::Up => Face::Down,
            Face::North => Face::South,
            Face::South => Face::North,
        }
    }

    /// Face whose normal is exactly `normal`, if any.
    pub fn from_normal(normal: DVec3) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }
}

/// Largest absolute world coordinate a raycast endpoint may have.
///
/// Keeps cell indices and the cell distance between two endpoints well
/// inside `i32`.
pub const MAX_COORDINATE: f64 = (1 << 29) as f64;

/// Voxel cell containing a world-space point.
///
/// Only meaningful for points within [`MAX_COORDINATE`]; further out the
/// result saturates.
#[inline]
pub fn cell_of(point: DVec3) -> IVec3 {
    point.floor().as_ivec3()
}
