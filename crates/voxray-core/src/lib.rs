//! Core types, math, and traits for the voxray raycasting engine.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Segments and axis-aligned boxes in world space
//! - Voxel faces and cell coordinate helpers
//! - Voxel occupancy shapes and the block/fluid selection modes
//! - Common error types

pub mod coords;
pub mod error;
pub mod math;
pub mod shape;
pub mod types;

pub use coords::{cell_of, Face, MAX_COORDINATE};
pub use error::{Error, Result};
pub use math::{Aabb, Segment, SegmentClip};
pub use shape::VoxelShape;
pub use types::{BlockMode, FluidMode};
