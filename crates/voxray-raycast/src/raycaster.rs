//! The raycaster.

use glam::DVec3;
use voxray_core::{Aabb, BlockMode, FluidMode, Segment, SegmentClip};
use voxray_world::RaycastWorld;

use crate::config::RaycastConfig;
use crate::error::RaycastError;
use crate::hit::{EntityHit, HitType, RaycastHit, VoxelHit};
use crate::traversal::VoxelWalk;

/// Predicate choosing which entities a cast can hit. Rejected entities are
/// transparent.
pub type EntityFilter<'a, E> = &'a dyn Fn(&E) -> bool;

/// Reusable raycaster.
///
/// Holds the result of the last cast along with scratch space for entity
/// candidates, so repeated casts do not allocate once warmed up. Casting
/// needs `&mut self`; give each thread its own raycaster.
///
/// State transitions:
/// ```text
/// reset ─cast()─> populated ─cast()─> populated
///   ^                 │
///   └──reset()/take()─┘
/// ```
#[derive(Debug)]
pub struct Raycaster<E> {
    config: RaycastConfig,
    result: RaycastHit<E>,
    is_reset: bool,
    candidates: Vec<(E, Aabb)>,
}

impl<E> Default for Raycaster<E> {
    fn default() -> Self {
        Self::from_validated(RaycastConfig::default())
    }
}

impl<E> Raycaster<E> {
    /// Create a raycaster with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a raycaster with a custom configuration.
    pub fn with_config(config: RaycastConfig) -> voxray_core::Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Cast from `start` to `end`.
    ///
    /// Finds the nearest block, fluid or entity along the segment. Blocks and
    /// fluids win ties against entities; within one voxel, blocks win ties
    /// against fluids. A zero-length segment hits nothing.
    ///
    /// The result is kept until the next cast or [`reset`](Self::reset) and a
    /// reference to it is returned.
    #[cfg_attr(
        feature = "profiling",
        tracing::instrument(level = "trace", skip_all)
    )]
    pub fn cast<W>(
        &mut self,
        world: &W,
        block_mode: BlockMode,
        fluid_mode: FluidMode,
        entity_filter: Option<EntityFilter<'_, E>>,
        start: DVec3,
        end: DVec3,
    ) -> Result<&RaycastHit<E>, RaycastError<W::Error>>
    where
        W: RaycastWorld<Entity = E> + ?Sized,
    {
        self.run(
            world,
            block_mode,
            fluid_mode,
            Some(entity_filter),
            Segment::new(start, end),
        )
    }

    /// [`cast`](Self::cast) with scalar coordinates.
    #[allow(clippy::too_many_arguments)]
    pub fn cast_coords<W>(
        &mut self,
        world: &W,
        block_mode: BlockMode,
        fluid_mode: FluidMode,
        entity_filter: Option<EntityFilter<'_, E>>,
        (x0, y0, z0): (f64, f64, f64),
        (x1, y1, z1): (f64, f64, f64),
    ) -> Result<&RaycastHit<E>, RaycastError<W::Error>>
    where
        W: RaycastWorld<Entity = E> + ?Sized,
    {
        self.cast(
            world,
            block_mode,
            fluid_mode,
            entity_filter,
            DVec3::new(x0, y0, z0),
            DVec3::new(x1, y1, z1),
        )
    }

    /// Cast against blocks only, ignoring fluids and entities.
    pub fn cast_blocks<W>(
        &mut self,
        world: &W,
        block_mode: BlockMode,
        start: DVec3,
        end: DVec3,
    ) -> Result<&RaycastHit<E>, RaycastError<W::Error>>
    where
        W: RaycastWorld<Entity = E> + ?Sized,
    {
        self.run(
            world,
            block_mode,
            FluidMode::None,
            None,
            Segment::new(start, end),
        )
    }

    /// Shared cast; `entities` is `None` when entities are skipped entirely.
    fn run<W>(
        &mut self,
        world: &W,
        block_mode: BlockMode,
        fluid_mode: FluidMode,
        entities: Option<Option<EntityFilter<'_, E>>>,
        segment: Segment,
    ) -> Result<&RaycastHit<E>, RaycastError<W::Error>>
    where
        W: RaycastWorld<Entity = E> + ?Sized,
    {
        segment.validate()?;

        self.result = RaycastHit::Miss;
        self.is_reset = false;

        if segment.is_degenerate() {
            tracing::debug!("Zero-length raycast at {}, reporting no hit", segment.start);
            return Ok(&self.result);
        }

        let voxel_hit = self
            .cast_voxels(world, &segment, block_mode, fluid_mode)
            .map_err(RaycastError::World)?;
        let limit = (!voxel_hit.is_miss()).then(|| voxel_hit.fraction());
        let entity_hit = match entities {
            Some(filter) => self
                .cast_entities(world, &segment, limit, filter)
                .map_err(RaycastError::World)?,
            None => None,
        };

        self.result = match entity_hit {
            Some(hit) => RaycastHit::Entity(hit),
            None => voxel_hit,
        };

        tracing::trace!(
            hit = ?self.result.hit_type(),
            fraction = self.result.fraction(),
            "Raycast finished"
        );
        Ok(&self.result)
    }

    /// First voxel along the segment whose block or fluid shape is hit.
    fn cast_voxels<W>(
        &self,
        world: &W,
        segment: &Segment,
        block_mode: BlockMode,
        fluid_mode: FluidMode,
    ) -> Result<RaycastHit<E>, W::Error>
    where
        W: RaycastWorld<Entity = E> + ?Sized,
    {
        if block_mode.is_none() && fluid_mode.is_none() {
            return Ok(RaycastHit::Miss);
        }

        let delta = segment.delta();
        let cap = self.config.max_cells.map_or(usize::MAX, |cells| cells as usize);

        for step in VoxelWalk::new(segment).take(cap) {
            // Shapes are cell-local; test in the cell's frame
            let local_start = segment.start - step.cell.as_dvec3();

            let block = if block_mode.is_none() {
                None
            } else {
                world
                    .block_shape(step.cell, block_mode)?
                    .clip_segment(local_start, delta)
            };
            let fluid = if fluid_mode.is_none() {
                None
            } else {
                world
                    .fluid_shape(step.cell, fluid_mode)?
                    .clip_segment(local_start, delta)
            };

            let (hit_type, clip) = match (block, fluid) {
                (Some(b), Some(f)) if f.entry < b.entry => (HitType::Fluid, f),
                (Some(b), _) => (HitType::Block, b),
                (None, Some(f)) => (HitType::Fluid, f),
                (None, None) => continue,
            };

            let hit = VoxelHit {
                fraction: clip.entry,
                position: segment.at(clip.entry),
                normal: clip.normal,
                block_pos: step.cell,
            };
            return Ok(match hit_type {
                HitType::Fluid => RaycastHit::Fluid(hit),
                _ => RaycastHit::Block(hit),
            });
        }

        Ok(RaycastHit::Miss)
    }

    /// Nearest eligible entity strictly before `limit`, if any.
    fn cast_entities<W>(
        &mut self,
        world: &W,
        segment: &Segment,
        limit: Option<f64>,
        filter: Option<EntityFilter<'_, E>>,
    ) -> Result<Option<EntityHit<E>>, W::Error>
    where
        W: RaycastWorld<Entity = E> + ?Sized,
    {
        let margin = self.config.entity_margin;
        let reach = limit.map_or(*segment, |fraction| segment.truncated(fraction));

        self.candidates.clear();
        world.entities_in(&reach.bounds().inflate(margin), &mut self.candidates)?;
        tracing::trace!(candidates = self.candidates.len(), "Entity candidates");

        let delta = segment.delta();
        let mut best: Option<(SegmentClip, E)> = None;
        for (entity, aabb) in self.candidates.drain(..) {
            if filter.is_some_and(|accept| !accept(&entity)) {
                continue;
            }
            let Some(clip) = aabb.inflate(margin).clip_segment(segment.start, delta) else {
                continue;
            };
            if limit.is_some_and(|limit| clip.entry >= limit) {
                continue;
            }
            if best.as_ref().is_some_and(|(nearest, _)| nearest.entry <= clip.entry) {
                continue;
            }
            best = Some((clip, entity));
        }

        Ok(best.map(|(clip, entity)| EntityHit {
            fraction: clip.entry,
            position: segment.at(clip.entry),
            normal: clip.normal,
            entity,
        }))
    }
}

impl<E> Raycaster<E> {
    pub(crate) fn from_validated(config: RaycastConfig) -> Self {
        Self {
            config,
            result: RaycastHit::Miss,
            is_reset: true,
            candidates: Vec::new(),
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &RaycastConfig {
        &self.config
    }

    /// Result of the last cast
    pub fn hit(&self) -> &RaycastHit<E> {
        &self.result
    }

    /// Kind of the last hit
    pub fn hit_type(&self) -> HitType {
        self.result.hit_type()
    }

    /// Fraction along the segment of the last hit
    pub fn fraction(&self) -> f64 {
        self.result.fraction()
    }

    /// World-space point of the last hit
    pub fn hit_position(&self) -> DVec3 {
        self.result.position()
    }

    /// Surface normal of the last hit
    pub fn normal(&self) -> DVec3 {
        self.result.normal()
    }

    /// Voxel of the last block or fluid hit
    pub fn block_pos(&self) -> Option<glam::IVec3> {
        self.result.block_pos()
    }

    /// Entity of the last entity hit
    pub fn entity(&self) -> Option<&E> {
        self.result.entity()
    }

    /// Returns true if no cast happened since construction or the last reset.
    pub fn is_reset(&self) -> bool {
        self.is_reset
    }

    /// Forget the last result.
    pub fn reset(&mut self) {
        self.result = RaycastHit::Miss;
        self.is_reset = true;
        self.candidates.clear();
    }

    /// Move the last result out, leaving the raycaster reset.
    pub fn take(&mut self) -> RaycastHit<E> {
        self.is_reset = true;
        self.candidates.clear();
        std::mem::take(&mut self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::IVec3;
    use voxray_core::VoxelShape;
    use voxray_entity::{Entity, EntityKind};
    use voxray_world::{BlockState, FluidState, GridWorld};

    const EPS: f64 = 1e-9;

    fn down_ray() -> (DVec3, DVec3) {
        (DVec3::new(0.5, 10.0, 0.5), DVec3::new(0.5, -10.0, 0.5))
    }

    fn cast_down(
        raycaster: &mut Raycaster<Entity>,
        world: &GridWorld,
        filter: Option<EntityFilter<'_, Entity>>,
    ) -> RaycastHit<Entity> {
        let (start, end) = down_ray();
        raycaster
            .cast(
                world,
                BlockMode::Collision,
                FluidMode::Source,
                filter,
                start,
                end,
            )
            .unwrap()
            .clone()
    }

    #[test]
    fn block_below() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        let mut raycaster = Raycaster::new();

        let hit = cast_down(&mut raycaster, &world, None);
        assert_eq!(hit.hit_type(), HitType::Block);
        assert_eq!(hit.block_pos(), Some(IVec3::new(0, 5, 0)));
        assert_eq!(hit.normal(), DVec3::Y);
        assert_relative_eq!(hit.fraction(), 0.2, epsilon = EPS);
        assert!(hit
            .position()
            .abs_diff_eq(DVec3::new(0.5, 6.0, 0.5), EPS));
    }

    #[test]
    fn empty_world_misses() {
        let world = GridWorld::new();
        let mut raycaster = Raycaster::new();
        assert!(cast_down(&mut raycaster, &world, None).is_miss());
        assert!(!raycaster.is_reset());
    }

    #[test]
    fn zero_length_misses_even_inside_block() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::ZERO, BlockState::solid());
        let mut raycaster = Raycaster::new();
        let hit = raycaster
            .cast(
                &world,
                BlockMode::Collision,
                FluidMode::Any,
                None,
                DVec3::splat(0.5),
                DVec3::splat(0.5),
            )
            .unwrap();
        assert!(hit.is_miss());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let world = GridWorld::new();
        let mut raycaster = Raycaster::new();
        let err = raycaster
            .cast(
                &world,
                BlockMode::Collision,
                FluidMode::None,
                None,
                DVec3::new(0.0, f64::NAN, 0.0),
                DVec3::ONE,
            )
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn far_coordinates_are_rejected() {
        let world = GridWorld::new();
        let config = RaycastConfig::default().with_max_cells(4);
        let mut raycaster = Raycaster::<Entity>::with_config(config).unwrap();
        let err = raycaster
            .cast_blocks(
                &world,
                BlockMode::Collision,
                DVec3::new(0.5, 1e10, 0.5),
                DVec3::new(0.5, -1e10, 0.5),
            )
            .unwrap_err();
        assert!(err.is_precondition());
        assert!(raycaster.is_reset());

        // Long but addressable segments walk normally
        let hit = raycaster
            .cast_blocks(
                &world,
                BlockMode::Collision,
                DVec3::new(0.5, 5e8, 0.5),
                DVec3::new(0.5, -5e8, 0.5),
            )
            .unwrap();
        assert!(hit.is_miss());
    }

    #[test]
    fn segment_ending_on_a_face_hits_in_both_directions() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        world.set_block(IVec3::new(6, 0, 0), BlockState::solid());
        let mut raycaster = Raycaster::<Entity>::new();

        // Down onto the top face of (0,5,0)
        let hit = raycaster
            .cast_blocks(
                &world,
                BlockMode::Collision,
                DVec3::new(0.5, 10.0, 0.5),
                DVec3::new(0.5, 6.0, 0.5),
            )
            .unwrap();
        assert_eq!(hit.block_pos(), Some(IVec3::new(0, 5, 0)));
        assert_eq!(hit.normal(), DVec3::Y);
        assert_relative_eq!(hit.fraction(), 1.0, epsilon = EPS);

        // Along +X onto the west face of (6,0,0)
        let hit = raycaster
            .cast_blocks(
                &world,
                BlockMode::Collision,
                DVec3::new(2.5, 0.5, 0.5),
                DVec3::new(6.0, 0.5, 0.5),
            )
            .unwrap();
        assert_eq!(hit.block_pos(), Some(IVec3::new(6, 0, 0)));
        assert_eq!(hit.normal(), DVec3::NEG_X);
        assert_relative_eq!(hit.fraction(), 1.0, epsilon = EPS);

        // Along -X onto the east face of (6,0,0)
        let hit = raycaster
            .cast_blocks(
                &world,
                BlockMode::Collision,
                DVec3::new(9.5, 0.5, 0.5),
                DVec3::new(7.0, 0.5, 0.5),
            )
            .unwrap();
        assert_eq!(hit.block_pos(), Some(IVec3::new(6, 0, 0)));
        assert_eq!(hit.normal(), DVec3::X);
    }

    #[test]
    fn start_inside_block() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::ZERO, BlockState::solid());
        let mut raycaster = Raycaster::new();
        let hit = raycaster
            .cast(
                &world,
                BlockMode::Collision,
                FluidMode::None,
                None,
                DVec3::splat(0.5),
                DVec3::new(0.5, 5.0, 0.5),
            )
            .unwrap();
        assert_eq!(hit.block_pos(), Some(IVec3::ZERO));
        assert_eq!(hit.fraction(), 0.0);
        assert_eq!(hit.normal(), DVec3::ZERO);
    }

    #[test]
    fn slab_hit_at_surface() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::slab(0.5).unwrap());
        let mut raycaster = Raycaster::new();
        let hit = cast_down(&mut raycaster, &world, None);
        // Surface at y=5.5, 4.5 units into a 20 unit segment
        assert_relative_eq!(hit.fraction(), 0.225, epsilon = EPS);
        assert_eq!(hit.normal(), DVec3::Y);
    }

    #[test]
    fn ray_passes_beside_partial_shape() {
        let mut world = GridWorld::new();
        let post = VoxelShape::from_boxes([Aabb::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.25, 1.0, 0.25),
        )])
        .unwrap();
        world.set_block(IVec3::new(0, 5, 0), BlockState::ghost(post));
        world.set_block(IVec3::new(0, 2, 0), BlockState::solid());
        let mut raycaster = Raycaster::new();
        let (start, end) = down_ray();
        let hit = raycaster
            .cast(&world, BlockMode::Visual, FluidMode::None, None, start, end)
            .unwrap();
        assert_eq!(hit.block_pos(), Some(IVec3::new(0, 2, 0)));
    }

    #[test]
    fn visual_and_collision_modes() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 7, 0), BlockState::ghost(VoxelShape::Cube));
        world.set_block(IVec3::new(0, 5, 0), BlockState::barrier());
        let mut raycaster = Raycaster::new();
        let (start, end) = down_ray();

        let visual = raycaster
            .cast_blocks(&world, BlockMode::Visual, start, end)
            .unwrap();
        assert_eq!(visual.block_pos(), Some(IVec3::new(0, 7, 0)));

        let collision = raycaster
            .cast_blocks(&world, BlockMode::Collision, start, end)
            .unwrap();
        assert_eq!(collision.block_pos(), Some(IVec3::new(0, 5, 0)));

        assert!(raycaster
            .cast_blocks(&world, BlockMode::None, start, end)
            .unwrap()
            .is_miss());
    }

    #[test]
    fn fluid_modes() {
        let mut world = GridWorld::new();
        world.set_fluid(IVec3::new(0, 8, 0), FluidState::flowing(MAX_LEVEL));
        world.set_fluid(IVec3::new(0, 6, 0), FluidState::source());
        let mut raycaster = Raycaster::<Entity>::new();
        let (start, end) = down_ray();

        let source_only = raycaster
            .cast(&world, BlockMode::Collision, FluidMode::Source, None, start, end)
            .unwrap();
        assert_eq!(source_only.hit_type(), HitType::Fluid);
        assert_eq!(source_only.block_pos(), Some(IVec3::new(0, 6, 0)));
        // Source surface sits at 8/9 of the voxel
        assert_relative_eq!(
            source_only.fraction(),
            (10.0 - (6.0 + 8.0 / 9.0)) / 20.0,
            epsilon = EPS
        );

        let any = raycaster
            .cast(&world, BlockMode::Collision, FluidMode::Any, None, start, end)
            .unwrap();
        assert_eq!(any.block_pos(), Some(IVec3::new(0, 8, 0)));

        assert!(raycaster
            .cast(&world, BlockMode::Collision, FluidMode::None, None, start, end)
            .unwrap()
            .is_miss());
    }

    const MAX_LEVEL: u8 = voxray_world::MAX_FLUID_LEVEL;

    #[test]
    fn block_beats_fluid_in_same_voxel() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::slab(8.0 / 9.0).unwrap());
        world.set_fluid(IVec3::new(0, 5, 0), FluidState::source());
        let mut raycaster = Raycaster::new();
        let hit = cast_down(&mut raycaster, &world, None);
        assert_eq!(hit.hit_type(), HitType::Block);

        world.set_block(IVec3::new(0, 5, 0), BlockState::slab(0.5).unwrap());
        let hit = cast_down(&mut raycaster, &world, None);
        assert_eq!(hit.hit_type(), HitType::Fluid);
    }

    #[test]
    fn entity_hit_and_filter() {
        let mut world = GridWorld::new();
        let target = world.spawn_entity(
            DVec3::new(0.5, 7.5, 0.5),
            DVec3::splat(0.5),
            EntityKind::Mob,
        );
        let mut raycaster = Raycaster::new();

        let hit = cast_down(&mut raycaster, &world, None);
        assert_eq!(hit.hit_type(), HitType::Entity);
        assert_eq!(hit.entity(), Some(&target));
        assert_relative_eq!(hit.fraction(), 0.1, epsilon = EPS);
        assert_eq!(hit.normal(), DVec3::Y);

        let reject_all: EntityFilter<'_, Entity> = &|_| false;
        assert!(cast_down(&mut raycaster, &world, Some(reject_all)).is_miss());

        let accept_target: EntityFilter<'_, Entity> = &|e| *e == target;
        assert_eq!(
            cast_down(&mut raycaster, &world, Some(accept_target)).entity(),
            Some(&target)
        );
    }

    #[test]
    fn nearest_candidate_wins() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        let entity = world.spawn_entity(
            DVec3::new(0.5, 3.0, 0.5),
            DVec3::splat(0.5),
            EntityKind::Mob,
        );
        let mut raycaster = Raycaster::new();

        // Entity behind the block
        assert_eq!(
            cast_down(&mut raycaster, &world, None).hit_type(),
            HitType::Block
        );

        // Entity in front of the block
        world
            .entities_mut()
            .set_position(entity, DVec3::new(0.5, 8.0, 0.5));
        assert_eq!(
            cast_down(&mut raycaster, &world, None).entity(),
            Some(&entity)
        );
    }

    #[test]
    fn block_wins_tie_with_entity() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        // Top face at y=6, same as the block's
        world.spawn_entity(
            DVec3::new(0.5, 5.5, 0.5),
            DVec3::splat(0.5),
            EntityKind::Mob,
        );
        let mut raycaster = Raycaster::new();
        let hit = cast_down(&mut raycaster, &world, None);
        assert_eq!(hit.hit_type(), HitType::Block);
        assert_relative_eq!(hit.fraction(), 0.2, epsilon = EPS);
    }

    #[test]
    fn nearer_of_two_entities() {
        let mut world = GridWorld::new();
        let low = world.spawn_entity(
            DVec3::new(0.5, 2.0, 0.5),
            DVec3::splat(0.5),
            EntityKind::Mob,
        );
        let high = world.spawn_entity(
            DVec3::new(0.5, 4.0, 0.5),
            DVec3::splat(0.5),
            EntityKind::Player,
        );
        let mut raycaster = Raycaster::new();
        assert_eq!(cast_down(&mut raycaster, &world, None).entity(), Some(&high));

        let skip_high: EntityFilter<'_, Entity> = &|e| *e != high;
        assert_eq!(
            cast_down(&mut raycaster, &world, Some(skip_high)).entity(),
            Some(&low)
        );
    }

    #[test]
    fn entity_margin_widens_target() {
        let mut world = GridWorld::new();
        // Box spans x in [1.0, 1.2]; the ray runs at x=0.5
        world.spawn_entity(
            DVec3::new(1.1, 5.0, 0.5),
            DVec3::new(0.1, 0.5, 0.1),
            EntityKind::Projectile,
        );
        let mut plain = Raycaster::new();
        assert!(cast_down(&mut plain, &world, None).is_miss());

        let config = RaycastConfig::default().with_entity_margin(0.6);
        let mut wide = Raycaster::with_config(config).unwrap();
        let hit = cast_down(&mut wide, &world, None);
        assert_eq!(hit.hit_type(), HitType::Entity);
        // Inflated top at y=6.1
        assert_relative_eq!(hit.fraction(), (10.0 - 6.1) / 20.0, epsilon = EPS);
    }

    #[test]
    fn max_cells_cap() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        let config = RaycastConfig::default().with_max_cells(3);
        let mut raycaster = Raycaster::with_config(config).unwrap();
        assert!(cast_down(&mut raycaster, &world, None).is_miss());

        let config = RaycastConfig::default().with_max_cells(6);
        let mut raycaster = Raycaster::with_config(config).unwrap();
        assert_eq!(
            cast_down(&mut raycaster, &world, None).hit_type(),
            HitType::Block
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        let mut raycaster = Raycaster::new();
        assert!(raycaster.is_reset());

        cast_down(&mut raycaster, &world, None);
        assert_eq!(raycaster.hit_type(), HitType::Block);
        assert!(!raycaster.is_reset());

        raycaster.reset();
        assert!(raycaster.is_reset());
        assert_eq!(raycaster.hit_type(), HitType::None);
        assert_eq!(raycaster.fraction(), 0.0);
        assert_eq!(raycaster.hit_position(), DVec3::ZERO);
        assert_eq!(raycaster.normal(), DVec3::ZERO);
        assert_eq!(raycaster.block_pos(), None);
        assert_eq!(raycaster.entity(), None);
    }

    #[test]
    fn take_moves_result_out() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        let mut raycaster = Raycaster::new();
        cast_down(&mut raycaster, &world, None);

        let taken = raycaster.take();
        assert_eq!(taken.hit_type(), HitType::Block);
        assert!(raycaster.is_reset());
        assert!(raycaster.hit().is_miss());
    }

    #[test]
    fn repeated_casts_are_identical() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        world.spawn_entity(DVec3::new(0.5, 8.0, 0.5), DVec3::splat(0.3), EntityKind::Item);
        let mut raycaster = Raycaster::new();
        let first = cast_down(&mut raycaster, &world, None);
        let second = cast_down(&mut raycaster, &world, None);
        assert_eq!(first, second);
    }

    #[test]
    fn scalar_coordinates() {
        let mut world = GridWorld::new();
        world.set_block(IVec3::new(0, 5, 0), BlockState::solid());
        let mut raycaster = Raycaster::<Entity>::new();
        let hit = raycaster
            .cast_coords(
                &world,
                BlockMode::Visual,
                FluidMode::None,
                None,
                (0.5, 10.0, 0.5),
                (0.5, -10.0, 0.5),
            )
            .unwrap();
        assert_eq!(hit.block_pos(), Some(IVec3::new(0, 5, 0)));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("chunk {0} not loaded")]
    struct Unloaded(IVec3);

    struct HalfLoaded;

    impl RaycastWorld for HalfLoaded {
        type Entity = u32;
        type Error = Unloaded;

        fn block_shape(&self, pos: IVec3, _: BlockMode) -> Result<VoxelShape, Unloaded> {
            if pos.y < 0 {
                Err(Unloaded(pos))
            } else {
                Ok(VoxelShape::Empty)
            }
        }

        fn fluid_shape(&self, _: IVec3, _: FluidMode) -> Result<VoxelShape, Unloaded> {
            Ok(VoxelShape::Empty)
        }

        fn entities_in(&self, _: &Aabb, _: &mut Vec<(u32, Aabb)>) -> Result<(), Unloaded> {
            Ok(())
        }
    }

    #[test]
    fn world_errors_pass_through() {
        let mut raycaster = Raycaster::<u32>::new();
        let (start, end) = down_ray();
        let err = raycaster
            .cast_blocks(&HalfLoaded, BlockMode::Collision, start, end)
            .unwrap_err();
        match err {
            RaycastError::World(Unloaded(pos)) => assert_eq!(pos, IVec3::new(0, -1, 0)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
