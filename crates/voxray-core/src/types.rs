//! Block and fluid selection modes.

use serde::{Deserialize, Serialize};

/// Which shape of a block counts as solid for a raycast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockMode {
    /// Blocks are ignored
    None,
    /// The shape entities collide with
    #[default]
    Collision,
    /// The outline/selection shape, which includes blocks with no collision
    Visual,
}

impl BlockMode {
    /// Returns true if blocks are ignored in this mode
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Which fluid cells count as solid for a raycast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluidMode {
    /// Fluids are ignored
    #[default]
    None,
    /// Only source cells
    Source,
    /// Source and flowing cells
    Any,
}

impl FluidMode {
    /// Returns true if fluids are ignored in this mode
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true if a fluid cell with the given source flag is selected
    #[inline]
    pub const fn accepts(self, is_source: bool) -> bool {
        match self {
            Self::None => false,
            Self::Source => is_source,
            Self::Any => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluid_mode_accepts() {
        assert!(!FluidMode::None.accepts(true));
        assert!(FluidMode::Source.accepts(true));
        assert!(!FluidMode::Source.accepts(false));
        assert!(FluidMode::Any.accepts(false));
    }

    #[test]
    fn defaults() {
        assert_eq!(BlockMode::default(), BlockMode::Collision);
        assert!(FluidMode::default().is_none());
    }
}
