//! Voxel occupancy shapes.
//!
//! A [`VoxelShape`] describes what part of a single voxel is occupied, as a
//! set of boxes in cell-local coordinates where the voxel spans `[0, 1]` on
//! every axis. Boxes are clipped to the unit cell on construction, so a hit
//! against a shape always lies inside the voxel that produced it.

use std::sync::Arc;

use glam::DVec3;

use crate::error::{Error, Result};
use crate::math::{Aabb, SegmentClip};

const UNIT_CELL: Aabb = Aabb::new(DVec3::ZERO, DVec3::ONE);
const UNIT_BOXES: &[Aabb] = &[UNIT_CELL];

/// Occupied part of a voxel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum VoxelShape {
    /// Nothing occupied
    #[default]
    Empty,
    /// The whole voxel
    Cube,
    /// A union of boxes inside the voxel
    Boxes(Arc<[Aabb]>),
}

impl VoxelShape {
    /// Build a shape from cell-local boxes.
    ///
    /// Boxes are clipped to the unit cell and boxes without volume are
    /// dropped. A single box covering the whole cell becomes [`VoxelShape::Cube`].
    pub fn from_boxes(boxes: impl IntoIterator<Item = Aabb>) -> Result<Self> {
        let mut clipped = Vec::new();
        for aabb in boxes {
            if !aabb.min.is_finite() || !aabb.max.is_finite() {
                return Err(Error::InvalidShape(format!(
                    "non-finite box {:?}..{:?}",
                    aabb.min, aabb.max
                )));
            }
            if aabb.min.cmpgt(aabb.max).any() {
                return Err(Error::InvalidShape(format!(
                    "inverted box {:?}..{:?}",
                    aabb.min, aabb.max
                )));
            }
            let aabb = aabb.clamp_to(&UNIT_CELL);
            if !aabb.is_flat() {
                clipped.push(aabb);
            }
        }

        if clipped.is_empty() {
            return Ok(Self::Empty);
        }
        if clipped.len() == 1 && clipped[0] == UNIT_CELL {
            return Ok(Self::Cube);
        }
        Ok(Self::Boxes(clipped.into()))
    }

    /// Bottom-aligned slab of the given height, e.g. a half block or a fluid level.
    pub fn slab(height: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&height) {
            return Err(Error::InvalidShape(format!(
                "slab height {height} outside [0, 1]"
            )));
        }
        Self::from_boxes([Aabb::new(DVec3::ZERO, DVec3::new(1.0, height, 1.0))])
    }

    /// Returns true if nothing is occupied
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The boxes making up this shape
    #[inline]
    pub fn boxes(&self) -> &[Aabb] {
        match self {
            Self::Empty => &[],
            Self::Cube => UNIT_BOXES,
            Self::Boxes(boxes) => boxes,
        }
    }

    /// Bounding box of all boxes in this shape
    pub fn bounds(&self) -> Option<Aabb> {
        self.boxes()
            .iter()
            .copied()
            .reduce(|acc, aabb| acc.merge(&aabb))
    }

    /// Nearest entry of the cell-local segment `start + delta * t` into any box.
    ///
    /// Ties between boxes keep the first box in declaration order.
    pub fn clip_segment(&self, start: DVec3, delta: DVec3) -> Option<SegmentClip> {
        self.boxes()
            .iter()
            .filter_map(|aabb| aabb.clip_segment(start, delta))
            .fold(None, |best: Option<SegmentClip>, clip| match best {
                Some(b) if b.entry <= clip.entry => Some(b),
                _ => Some(clip),
            })
    }
}
