//! World access for the voxray raycasting engine.
//!
//! [`RaycastWorld`] is the only thing the raycaster knows about a world.
//! [`GridWorld`] is an in-memory implementation backed by hash maps and an
//! ECS entity store, and [`TerrainGenerator`] fills one with procedural terrain.

pub mod generation;
pub mod grid;
pub mod query;

pub use generation::{TerrainConfig, TerrainGenerator, TerrainStats};
pub use grid::{BlockState, FluidState, GridWorld, MAX_FLUID_LEVEL};
pub use query::RaycastWorld;

/// World seed for procedural generation.
pub type WorldSeed = u64;
