//! The world query surface consumed by the raycaster.

use glam::IVec3;
use voxray_core::{Aabb, BlockMode, FluidMode, VoxelShape};

/// Read-only voxel and entity queries.
///
/// The selection mode is passed into the shape queries so implementations
/// can answer from whatever precomputed shape tables they keep. Returning
/// [`VoxelShape::Empty`] means the voxel is transparent in that mode.
pub trait RaycastWorld {
    /// Handle identifying an entity.
    type Entity: Clone;
    /// Failure reported by the world itself.
    type Error: std::error::Error + 'static;

    /// Block occupancy of a voxel under `mode`.
    fn block_shape(&self, pos: IVec3, mode: BlockMode) -> Result<VoxelShape, Self::Error>;

    /// Fluid occupancy of a voxel under `mode`.
    fn fluid_shape(&self, pos: IVec3, mode: FluidMode) -> Result<VoxelShape, Self::Error>;

    /// Append every entity whose box intersects `region`, with that box, to `out`.
    fn entities_in(
        &self,
        region: &Aabb,
        out: &mut Vec<(Self::Entity, Aabb)>,
    ) -> Result<(), Self::Error>;
}

impl<W: RaycastWorld + ?Sized> RaycastWorld for &W {
    type Entity = W::Entity;
    type Error = W::Error;

    #[inline]
    fn block_shape(&self, pos: IVec3, mode: BlockMode) -> Result<VoxelShape, Self::Error> {
        (**self).block_shape(pos, mode)
    }

    #[inline]
    fn fluid_shape(&self, pos: IVec3, mode: FluidMode) -> Result<VoxelShape, Self::Error> {
        (**self).fluid_shape(pos, mode)
    }

    #[inline]
    fn entities_in(
        &self,
        region: &Aabb,
        out: &mut Vec<(Self::Entity, Aabb)>,
    ) -> Result<(), Self::Error> {
        (**self).entities_in(region, out)
    }
}
