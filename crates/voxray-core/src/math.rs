//! Math utilities and helpers.

use glam::{DVec3, IVec3};

use crate::coords::MAX_COORDINATE;
use crate::error::{Error, Result};

/// Line segment for raycasting operations.
///
/// Points along the segment are addressed by a fraction in `[0, 1]`, where
/// `0` is `start` and `1` is `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Segment start
    pub start: DVec3,
    /// Segment end
    pub end: DVec3,
}

impl Segment {
    /// Create a new segment
    #[inline]
    pub const fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// Create a segment from a start point, a direction and a length
    #[inline]
    pub fn from_direction(start: DVec3, direction: DVec3, length: f64) -> Self {
        Self::new(start, start + direction.normalize_or_zero() * length)
    }

    /// Vector from `start` to `end`
    #[inline]
    pub fn delta(&self) -> DVec3 {
        self.end - self.start
    }

    /// Euclidean length of the segment
    #[inline]
    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Returns true if start and end coincide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Get the point at the given fraction along the segment
    #[inline]
    pub fn at(&self, fraction: f64) -> DVec3 {
        self.start + self.delta() * fraction
    }

    /// Per-axis direction of travel: -1, 0 or 1
    #[inline]
    pub fn step(&self) -> IVec3 {
        let d = self.delta();
        IVec3::new(step_sign(d.x), step_sign(d.y), step_sign(d.z))
    }

    /// Smallest box enclosing both endpoints
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.start.min(self.end), self.start.max(self.end))
    }

    /// The same segment cut off at `fraction`
    #[inline]
    pub fn truncated(&self, fraction: f64) -> Self {
        Self::new(self.start, self.at(fraction))
    }

    /// Fails if either endpoint is NaN or infinite.
    pub fn check_finite(&self) -> Result<()> {
        if !self.start.is_finite() {
            return Err(Error::NonFinite {
                what: "segment start",
                value: self.start,
            });
        }
        if !self.end.is_finite() {
            return Err(Error::NonFinite {
                what: "segment end",
                value: self.end,
            });
        }
        Ok(())
    }

    /// Fails unless both endpoints are finite and within [`MAX_COORDINATE`]
    /// on every axis.
    pub fn validate(&self) -> Result<()> {
        self.check_finite()?;
        for (what, value) in [("segment start", self.start), ("segment end", self.end)] {
            if value.abs().max_element() > MAX_COORDINATE {
                return Err(Error::OutOfRange { what, value });
            }
        }
        Ok(())
    }
}

#[inline]
fn step_sign(d: f64) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Where a segment enters and leaves an [`Aabb`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentClip {
    /// Fraction at which the segment enters the box (0 if it starts inside)
    pub entry: f64,
    /// Fraction at which the segment leaves the box (may exceed 1)
    pub exit: f64,
    /// Outward normal of the entered face, zero if the segment starts inside
    pub normal: DVec3,
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB around `center` with given half-extents
    #[inline]
    pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create an AABB for a unit cube at the given position
    #[inline]
    pub fn unit_cube(pos: DVec3) -> Self {
        Self {
            min: pos,
            max: pos + DVec3::ONE,
        }
    }

    /// Get the center of the AABB
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the AABB
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// True if the box has no volume
    #[inline]
    pub fn is_flat(&self) -> bool {
        let size = self.size();
        size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0
    }

    /// Translate the box
    #[inline]
    pub fn offset(&self, by: DVec3) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Grow the box by `margin` on every side
    #[inline]
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }

    /// Clamp the box to lie within `bounds`
    #[inline]
    pub fn clamp_to(&self, bounds: &Aabb) -> Self {
        Self {
            min: self.min.clamp(bounds.min, bounds.max),
            max: self.max.clamp(bounds.min, bounds.max),
        }
    }

    /// Check if a point is inside the AABB
    #[inline]
    pub fn contains_point(&self, point: DVec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Merge two AABBs
    #[inline]
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Slab test of the segment `start + delta * t` for `t` in `[0, 1]`.
    ///
    /// Returns `None` when the segment misses the box, when the box lies
    /// entirely behind `start`, or when the entry lies beyond `t = 1`.
    /// Touching a face or edge counts as a hit; leaving a box the segment
    /// starts on the surface of does not.
    pub fn clip_segment(&self, start: DVec3, delta: DVec3) -> Option<SegmentClip> {
        let mut entry = f64::NEG_INFINITY;
        let mut exit = f64::INFINITY;
        let mut normal = DVec3::ZERO;

        for axis in 0..3 {
            let (s, d) = (start[axis], delta[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d == 0.0 {
                if s < lo || s > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (near, far) = if d > 0.0 {
                ((lo - s) * inv, (hi - s) * inv)
            } else {
                ((hi - s) * inv, (lo - s) * inv)
            };

            if near > entry {
                entry = near;
                normal = DVec3::ZERO;
                normal[axis] = -d.signum();
            }
            exit = exit.min(far);
        }

        if entry > exit || exit <= 0.0 || entry > 1.0 {
            return None;
        }

        if entry < 0.0 {
            return Some(SegmentClip {
                entry: 0.0,
                exit,
                normal: DVec3::ZERO,
            });
        }

        Some(SegmentClip {
            entry,
            exit,
            normal,
        })
    }
}
