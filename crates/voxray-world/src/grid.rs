//! In-memory voxel world.

use std::convert::Infallible;

use glam::{DVec3, IVec3};
use hashbrown::HashMap;
use voxray_core::{Aabb, BlockMode, FluidMode, Result, VoxelShape};
use voxray_entity::{Entity, EntityKind, EntityStore};

use crate::query::RaycastWorld;

/// Highest fluid level; source cells are always at this level.
pub const MAX_FLUID_LEVEL: u8 = 8;

/// A placed block with its two shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockState {
    /// Shape entities collide with
    pub collision: VoxelShape,
    /// Outline/selection shape
    pub visual: VoxelShape,
}

impl BlockState {
    /// Full cube in both modes
    pub fn solid() -> Self {
        Self {
            collision: VoxelShape::Cube,
            visual: VoxelShape::Cube,
        }
    }

    /// Bottom slab of the given height in both modes
    pub fn slab(height: f64) -> Result<Self> {
        let shape = VoxelShape::slab(height)?;
        Ok(Self {
            collision: shape.clone(),
            visual: shape,
        })
    }

    /// Visible but not collidable, like tall grass or flowers
    pub fn ghost(visual: VoxelShape) -> Self {
        Self {
            collision: VoxelShape::Empty,
            visual,
        }
    }

    /// Collidable but without an outline
    pub fn barrier() -> Self {
        Self {
            collision: VoxelShape::Cube,
            visual: VoxelShape::Empty,
        }
    }

    /// Shape selected by `mode`
    pub fn shape(&self, mode: BlockMode) -> &VoxelShape {
        const EMPTY: &VoxelShape = &VoxelShape::Empty;
        match mode {
            BlockMode::None => EMPTY,
            BlockMode::Collision => &self.collision,
            BlockMode::Visual => &self.visual,
        }
    }
}

/// Fluid occupying a voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FluidState {
    /// True for source cells
    pub source: bool,
    /// Fill level, 1 to [`MAX_FLUID_LEVEL`]
    pub level: u8,
}

impl FluidState {
    /// A source cell
    pub const fn source() -> Self {
        Self {
            source: true,
            level: MAX_FLUID_LEVEL,
        }
    }

    /// A flowing cell; the level is clamped to `1..=MAX_FLUID_LEVEL`
    pub fn flowing(level: u8) -> Self {
        Self {
            source: false,
            level: level.clamp(1, MAX_FLUID_LEVEL),
        }
    }

    /// Surface height within the voxel
    #[inline]
    pub fn height(&self) -> f64 {
        f64::from(self.level) / f64::from(MAX_FLUID_LEVEL + 1)
    }

    /// Occupied part of the voxel
    ///
    /// Allocates; [`GridWorld`] keeps one shared shape per level instead.
    pub fn shape(&self) -> VoxelShape {
        let level = self.level.clamp(1, MAX_FLUID_LEVEL);
        let height = f64::from(level) / f64::from(MAX_FLUID_LEVEL + 1);
        VoxelShape::Boxes(vec![Aabb::new(DVec3::ZERO, DVec3::new(1.0, height, 1.0))].into())
    }
}

/// Fluid shapes indexed by `level - 1`.
type FluidShapes = [VoxelShape; MAX_FLUID_LEVEL as usize];

/// Sparse voxel world with blocks, fluids and entities.
pub struct GridWorld {
    blocks: HashMap<IVec3, BlockState>,
    fluids: HashMap<IVec3, FluidState>,
    fluid_shapes: FluidShapes,
    entities: EntityStore,
}

impl Default for GridWorld {
    fn default() -> Self {
        Self {
            blocks: HashMap::new(),
            fluids: HashMap::new(),
            fluid_shapes: std::array::from_fn(|i| FluidState::flowing(i as u8 + 1).shape()),
            entities: EntityStore::default(),
        }
    }
}

impl GridWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block, returning the one it replaced.
    pub fn set_block(&mut self, pos: IVec3, state: BlockState) -> Option<BlockState> {
        self.blocks.insert(pos, state)
    }

    /// Fill the inclusive box `min..=max` with copies of `state`.
    pub fn fill_blocks(&mut self, min: IVec3, max: IVec3, state: &BlockState) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    self.blocks.insert(IVec3::new(x, y, z), state.clone());
                }
            }
        }
    }

    /// Remove a block.
    pub fn remove_block(&mut self, pos: IVec3) -> Option<BlockState> {
        self.blocks.remove(&pos)
    }

    /// Block at `pos`.
    pub fn block(&self, pos: IVec3) -> Option<&BlockState> {
        self.blocks.get(&pos)
    }

    /// Number of placed blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Place a fluid, returning the one it replaced.
    pub fn set_fluid(&mut self, pos: IVec3, state: FluidState) -> Option<FluidState> {
        self.fluids.insert(pos, state)
    }

    /// Remove a fluid.
    pub fn remove_fluid(&mut self, pos: IVec3) -> Option<FluidState> {
        self.fluids.remove(&pos)
    }

    /// Fluid at `pos`.
    pub fn fluid(&self, pos: IVec3) -> Option<FluidState> {
        self.fluids.get(&pos).copied()
    }

    /// Number of fluid cells.
    pub fn fluid_count(&self) -> usize {
        self.fluids.len()
    }

    /// Spawn an entity centered at `position`.
    pub fn spawn_entity(
        &mut self,
        position: DVec3,
        half_extents: DVec3,
        kind: EntityKind,
    ) -> Entity {
        self.entities.spawn(position, half_extents, kind)
    }

    /// Entity storage.
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Mutable entity storage.
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }
}

impl RaycastWorld for GridWorld {
    type Entity = Entity;
    type Error = Infallible;

    fn block_shape(
        &self,
        pos: IVec3,
        mode: BlockMode,
    ) -> std::result::Result<VoxelShape, Infallible> {
        if mode.is_none() {
            return Ok(VoxelShape::Empty);
        }
        Ok(self
            .blocks
            .get(&pos)
            .map(|state| state.shape(mode).clone())
            .unwrap_or_default())
    }

    fn fluid_shape(
        &self,
        pos: IVec3,
        mode: FluidMode,
    ) -> std::result::Result<VoxelShape, Infallible> {
        Ok(match self.fluids.get(&pos) {
            Some(fluid) if mode.accepts(fluid.source) => {
                let level = fluid.level.clamp(1, MAX_FLUID_LEVEL);
                self.fluid_shapes[usize::from(level - 1)].clone()
            }
            _ => VoxelShape::Empty,
        })
    }

    fn entities_in(
        &self,
        region: &Aabb,
        out: &mut Vec<(Entity, Aabb)>,
    ) -> std::result::Result<(), Infallible> {
        self.entities.query_region(region, out);
        Ok(())
    }
}
