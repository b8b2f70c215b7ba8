//! Raycast results.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};
use voxray_core::Face;

/// What kind of obstruction a cast found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitType {
    /// Nothing before the end of the segment
    #[default]
    None,
    Block,
    Fluid,
    Entity,
}

/// A block or fluid hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelHit {
    /// Fraction along the segment, 0 to 1
    pub fraction: f64,
    /// World-space hit point
    pub position: DVec3,
    /// Outward normal of the face that was hit
    pub normal: DVec3,
    /// The voxel that was hit
    pub block_pos: IVec3,
}

/// An entity hit.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityHit<E> {
    /// Fraction along the segment, 0 to 1
    pub fraction: f64,
    /// World-space hit point
    pub position: DVec3,
    /// Outward normal of the box face that was hit
    pub normal: DVec3,
    /// The entity that was hit
    pub entity: E,
}

/// Outcome of a cast.
///
/// For [`RaycastHit::Miss`] the numeric accessors report zero, so a reset
/// result reads the same as a fresh one.
#[derive(Clone, Debug, PartialEq)]
pub enum RaycastHit<E> {
    Miss,
    Block(VoxelHit),
    Fluid(VoxelHit),
    Entity(EntityHit<E>),
}

impl<E> Default for RaycastHit<E> {
    fn default() -> Self {
        Self::Miss
    }
}

impl<E> RaycastHit<E> {
    /// Kind of hit
    #[inline]
    pub const fn hit_type(&self) -> HitType {
        match self {
            Self::Miss => HitType::None,
            Self::Block(_) => HitType::Block,
            Self::Fluid(_) => HitType::Fluid,
            Self::Entity(_) => HitType::Entity,
        }
    }

    /// Returns true if nothing was hit
    #[inline]
    pub const fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }

    /// Fraction along the segment where the hit happened
    #[inline]
    pub fn fraction(&self) -> f64 {
        match self {
            Self::Miss => 0.0,
            Self::Block(hit) | Self::Fluid(hit) => hit.fraction,
            Self::Entity(hit) => hit.fraction,
        }
    }

    /// World-space hit point
    #[inline]
    pub fn position(&self) -> DVec3 {
        match self {
            Self::Miss => DVec3::ZERO,
            Self::Block(hit) | Self::Fluid(hit) => hit.position,
            Self::Entity(hit) => hit.position,
        }
    }

    /// Outward normal of the surface that was hit
    ///
    /// Zero when nothing was hit, and when the segment started inside the
    /// thing it hit.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        match self {
            Self::Miss => DVec3::ZERO,
            Self::Block(hit) | Self::Fluid(hit) => hit.normal,
            Self::Entity(hit) => hit.normal,
        }
    }

    /// The face that was hit, if the normal names one
    #[inline]
    pub fn face(&self) -> Option<Face> {
        Face::from_normal(self.normal())
    }

    /// The voxel that was hit, for block and fluid hits
    #[inline]
    pub fn block_pos(&self) -> Option<IVec3> {
        match self {
            Self::Block(hit) | Self::Fluid(hit) => Some(hit.block_pos),
            _ => None,
        }
    }

    /// The entity that was hit, for entity hits
    #[inline]
    pub fn entity(&self) -> Option<&E> {
        match self {
            Self::Entity(hit) => Some(&hit.entity),
            _ => None,
        }
    }

    /// Distance from the segment start, given the segment's length
    #[inline]
    pub fn distance(&self, segment_length: f64) -> f64 {
        self.fraction() * segment_length
    }
}
