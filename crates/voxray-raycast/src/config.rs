//! Raycaster configuration.

use serde::{Deserialize, Serialize};
use voxray_core::{Error, Result};

/// Raycaster configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Distance every entity box is grown by before testing, making thin
    /// entities easier to target.
    pub entity_margin: f64,
    /// Maximum number of voxels visited per cast. Voxels past the cap are
    /// treated as empty.
    pub max_cells: Option<u32>,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            entity_margin: 0.0,
            max_cells: None,
        }
    }
}

impl RaycastConfig {
    /// Set the entity margin.
    #[must_use]
    pub const fn with_entity_margin(mut self, margin: f64) -> Self {
        self.entity_margin = margin;
        self
    }

    /// Set the voxel cap.
    #[must_use]
    pub const fn with_max_cells(mut self, max_cells: u32) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.entity_margin.is_finite() || self.entity_margin < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "entity_margin must be finite and non-negative, got {}",
                self.entity_margin
            )));
        }
        if self.max_cells == Some(0) {
            return Err(Error::InvalidConfig(
                "max_cells must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
