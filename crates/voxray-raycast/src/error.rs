//! Raycast error type.

use thiserror::Error;

/// Failure of a single cast.
///
/// `E` is the error type of the world being queried.
#[derive(Error, Debug)]
pub enum RaycastError<E> {
    /// Bad input, such as a non-finite endpoint
    #[error(transparent)]
    Precondition(#[from] voxray_core::Error),

    /// The world failed a query; the error is passed through untouched
    #[error("World query failed: {0}")]
    World(#[source] E),
}

impl<E> RaycastError<E> {
    /// Returns true if the cast was rejected before touching the world
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
