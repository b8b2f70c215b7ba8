//! Test fixtures for the voxray engine.
//!
//! Provides prebuilt scenes and hit assertions for raycast scenario tests.

pub mod scenes;

pub use scenes::{DOWN_END, DOWN_START};

use glam::{DVec3, IVec3};
use thiserror::Error;
use voxray_raycast::{HitType, RaycastHit};

#[derive(Error, Debug)]
pub enum TestError {
    #[error("Scene setup failed: {0}")]
    Setup(#[from] voxray_core::Error),
    #[error("Raycast failed: {0}")]
    Raycast(String),
    #[error("Hit mismatch: {0}")]
    Mismatch(String),
}

pub type Result<T> = std::result::Result<T, TestError>;

/// Hit comparison tolerances.
#[derive(Debug, Clone)]
pub struct HitTolerance {
    /// Maximum allowed difference in hit fraction.
    pub fraction: f64,
    /// Maximum allowed per-axis difference in hit position.
    pub position: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            fraction: 1e-9,
            position: 1e-7,
        }
    }
}

/// What a voxel hit is expected to look like.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedVoxelHit {
    pub hit_type: HitType,
    pub block_pos: IVec3,
    pub normal: DVec3,
    pub fraction: f64,
}

/// Install a tracing subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Compare a block or fluid hit against expectations.
pub fn check_voxel_hit<E>(
    hit: &RaycastHit<E>,
    expected: &ExpectedVoxelHit,
    tolerance: &HitTolerance,
) -> Result<()> {
    if hit.hit_type() != expected.hit_type {
        return Err(TestError::Mismatch(format!(
            "hit type {:?}, expected {:?}",
            hit.hit_type(),
            expected.hit_type
        )));
    }
    if hit.block_pos() != Some(expected.block_pos) {
        return Err(TestError::Mismatch(format!(
            "block {:?}, expected {}",
            hit.block_pos(),
            expected.block_pos
        )));
    }
    if hit.normal() != expected.normal {
        return Err(TestError::Mismatch(format!(
            "normal {}, expected {}",
            hit.normal(),
            expected.normal
        )));
    }
    check_fraction(hit, expected.fraction, tolerance)
}

/// Compare a hit's fraction.
pub fn check_fraction<E>(
    hit: &RaycastHit<E>,
    fraction: f64,
    tolerance: &HitTolerance,
) -> Result<()> {
    let diff = (hit.fraction() - fraction).abs();
    if diff > tolerance.fraction {
        return Err(TestError::Mismatch(format!(
            "fraction {:.12}, expected {:.12} (diff {:.3e})",
            hit.fraction(),
            fraction,
            diff
        )));
    }
    Ok(())
}

/// Check that a hit's position lies on the segment at its fraction.
pub fn check_position_on_segment<E>(
    hit: &RaycastHit<E>,
    start: DVec3,
    end: DVec3,
    tolerance: &HitTolerance,
) -> Result<()> {
    let expected = start + (end - start) * hit.fraction();
    if !hit.position().abs_diff_eq(expected, tolerance.position) {
        return Err(TestError::Mismatch(format!(
            "position {}, expected {} for fraction {}",
            hit.position(),
            expected,
            hit.fraction()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxray_raycast::VoxelHit;

    fn block_hit(fraction: f64, position: DVec3) -> RaycastHit<u32> {
        RaycastHit::Block(VoxelHit {
            fraction,
            position,
            normal: DVec3::Y,
            block_pos: IVec3::new(0, 5, 0),
        })
    }

    #[test]
    fn fraction_check_ignores_position() {
        let tolerance = HitTolerance::default();
        let misplaced = block_hit(0.2, DVec3::new(9.0, 9.0, 9.0));
        assert!(check_fraction(&misplaced, 0.2, &tolerance).is_ok());
        assert!(matches!(
            check_fraction(&misplaced, 0.25, &tolerance),
            Err(TestError::Mismatch(_))
        ));
        assert!(check_position_on_segment(&misplaced, DOWN_START, DOWN_END, &tolerance).is_err());

        let placed = block_hit(0.2, DVec3::new(0.5, 6.0, 0.5));
        assert!(check_position_on_segment(&placed, DOWN_START, DOWN_END, &tolerance).is_ok());
    }
}
