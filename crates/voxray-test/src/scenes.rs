//! Prebuilt worlds for scenario tests.

use glam::{DVec3, IVec2, IVec3};
use voxray_entity::{Entity, EntityKind};
use voxray_world::{BlockState, FluidState, GridWorld, TerrainGenerator, TerrainStats};

use crate::Result;

/// Start of the vertical probe ray used by most scenes.
pub const DOWN_START: DVec3 = DVec3::new(0.5, 10.0, 0.5);
/// End of the vertical probe ray used by most scenes.
pub const DOWN_END: DVec3 = DVec3::new(0.5, -10.0, 0.5);

/// A world containing one solid block.
pub fn single_block(pos: IVec3) -> GridWorld {
    let mut world = GridWorld::new();
    world.set_block(pos, BlockState::solid());
    world
}

/// A world with one entity whose box spans y 7..8 above the origin column.
pub fn hovering_entity(kind: EntityKind) -> (GridWorld, Entity) {
    let mut world = GridWorld::new();
    let entity = world.spawn_entity(DVec3::new(0.5, 7.5, 0.5), DVec3::splat(0.5), kind);
    (world, entity)
}

/// A block at (0,5,0) with an entity filling the same cell.
///
/// The entity's top face is the block's top face, so the probe ray reaches
/// both at the same fraction.
pub fn entity_in_block() -> (GridWorld, Entity) {
    let mut world = single_block(IVec3::new(0, 5, 0));
    let entity = world.spawn_entity(DVec3::new(0.5, 5.5, 0.5), DVec3::splat(0.5), EntityKind::Mob);
    (world, entity)
}

/// A two deep pool in the origin column: stone at y 0, a water source at
/// y 1 and shallow flowing water at y 2.
pub fn pool() -> GridWorld {
    let mut world = single_block(IVec3::ZERO);
    world.set_fluid(IVec3::new(0, 1, 0), FluidState::source());
    world.set_fluid(IVec3::new(0, 2, 0), FluidState::flowing(3));
    world
}

/// A half slab in the same cell as a water source.
pub fn waterlogged_slab(pos: IVec3) -> Result<GridWorld> {
    let mut world = GridWorld::new();
    world.set_block(pos, BlockState::slab(0.5)?);
    world.set_fluid(pos, FluidState::source());
    Ok(world)
}

/// Procedural terrain over the square `-extent..=extent`.
pub fn terrain(seed: u64, extent: i32) -> Result<(GridWorld, TerrainStats)> {
    let generator = TerrainGenerator::with_seed(seed)?;
    let mut world = GridWorld::new();
    let stats = generator.fill(&mut world, IVec2::splat(-extent), IVec2::splat(extent));
    tracing::debug!(seed, extent, solid = stats.solid, "Built terrain scene");
    Ok((world, stats))
}
