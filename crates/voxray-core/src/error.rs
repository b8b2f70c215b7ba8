//! Error types for the engine.

use glam::DVec3;
use thiserror::Error;

/// Engine-wide error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A coordinate was NaN or infinite
    #[error("Non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: DVec3 },

    /// A coordinate too far from the origin to address a voxel
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: DVec3 },

    /// Shape boxes that cannot describe voxel occupancy
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
