//! Voxel, fluid and entity raycasting for the voxray engine.
//!
//! A [`Raycaster`] walks the voxels a segment passes through, in order,
//! and reports the first block, fluid or entity in the way:
//!
//! ```no_run
//! use glam::DVec3;
//! use voxray_core::{BlockMode, FluidMode};
//! use voxray_raycast::{HitType, Raycaster};
//! use voxray_world::GridWorld;
//!
//! let world = GridWorld::new();
//! let mut raycaster = Raycaster::new();
//! let hit = raycaster
//!     .cast(
//!         &world,
//!         BlockMode::Visual,
//!         FluidMode::Source,
//!         None,
//!         DVec3::new(0.5, 10.0, 0.5),
//!         DVec3::new(0.5, -10.0, 0.5),
//!     )
//!     .unwrap();
//! if hit.hit_type() == HitType::Block {
//!     println!("looking at {:?}", hit.block_pos());
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod hit;
pub mod raycaster;
pub mod traversal;

pub use batch::{cast_many, SharedEntityFilter};
pub use config::RaycastConfig;
pub use error::RaycastError;
pub use hit::{EntityHit, HitType, RaycastHit, VoxelHit};
pub use raycaster::{EntityFilter, Raycaster};
pub use traversal::{VoxelStep, VoxelWalk};
