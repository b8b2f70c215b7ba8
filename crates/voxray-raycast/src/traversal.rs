//! Voxel traversal along a segment.
//!
//! Amanatides & Woo grid stepping, parameterized by the fraction along the
//! segment rather than by distance. The number of boundary crossings per
//! axis is fixed up front from the endpoint cells, so floating point drift
//! can reorder near-simultaneous crossings but can never skip the end cell
//! or walk past it.

use glam::{DVec3, IVec3};
use voxray_core::{cell_of, Segment};

/// One voxel visited by a [`VoxelWalk`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelStep {
    /// The voxel
    pub cell: IVec3,
    /// Fraction along the segment where it enters this voxel
    pub entry: f64,
    /// Outward normal of the face it entered through, zero for the first voxel
    pub normal: IVec3,
}

/// Iterator over the voxels a segment passes through, nearest first.
#[derive(Clone, Debug)]
pub struct VoxelWalk {
    cell: IVec3,
    step: IVec3,
    t_max: DVec3,
    t_delta: DVec3,
    crossings_left: IVec3,
    entry: f64,
    normal: IVec3,
    done: bool,
}

impl VoxelWalk {
    /// Start a walk at the voxel containing `segment.start`.
    ///
    /// A segment ending exactly on a voxel face also visits the voxel behind
    /// that face, entered at fraction 1, in either direction.
    ///
    /// Endpoints must lie within [`MAX_COORDINATE`](voxray_core::MAX_COORDINATE),
    /// see [`Segment::validate`].
    pub fn new(segment: &Segment) -> Self {
        let start_cell = cell_of(segment.start);
        let mut end_cell = cell_of(segment.end);
        let delta = segment.delta();
        let step = segment.step();

        // Flooring puts an end lying on a face in the cell being left on negative axes
        for axis in 0..3 {
            if step[axis] < 0 && segment.end[axis] == segment.end[axis].floor() {
                end_cell[axis] -= 1;
            }
        }

        let mut t_max = DVec3::splat(f64::INFINITY);
        let mut t_delta = DVec3::splat(f64::INFINITY);
        for axis in 0..3 {
            if step[axis] == 0 {
                continue;
            }
            let boundary = if step[axis] > 0 {
                f64::from(start_cell[axis] + 1)
            } else {
                f64::from(start_cell[axis])
            };
            t_max[axis] = (boundary - segment.start[axis]) / delta[axis];
            t_delta[axis] = 1.0 / delta[axis].abs();
        }

        Self {
            cell: start_cell,
            step,
            t_max,
            t_delta,
            crossings_left: (end_cell - start_cell).abs(),
            entry: 0.0,
            normal: IVec3::ZERO,
            done: false,
        }
    }

    /// Voxels left to visit, including the next one.
    pub fn remaining(&self) -> usize {
        if self.done {
            0
        } else {
            self.crossings_left
                .to_array()
                .iter()
                .map(|&crossings| crossings as usize)
                .sum::<usize>()
                + 1
        }
    }

    /// Axis of the nearest boundary that still has to be crossed.
    fn next_axis(&self) -> Option<usize> {
        (0..3)
            .filter(|&axis| self.crossings_left[axis] > 0)
            .min_by(|&a, &b| self.t_max[a].total_cmp(&self.t_max[b]))
    }
}

impl Iterator for VoxelWalk {
    type Item = VoxelStep;

    fn next(&mut self) -> Option<VoxelStep> {
        if self.done {
            return None;
        }

        let current = VoxelStep {
            cell: self.cell,
            entry: self.entry,
            normal: self.normal,
        };

        match self.next_axis() {
            Some(axis) => {
                self.entry = self.t_max[axis].max(self.entry);
                self.cell[axis] += self.step[axis];
                self.t_max[axis] += self.t_delta[axis];
                self.crossings_left[axis] -= 1;
                self.normal = IVec3::ZERO;
                self.normal[axis] = -self.step[axis];
            }
            None => self.done = true,
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VoxelWalk {}
