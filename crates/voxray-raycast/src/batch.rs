//! Parallel casting of many segments against one world.

use rayon::prelude::*;
use voxray_core::{BlockMode, FluidMode, Segment};
use voxray_world::RaycastWorld;

use crate::config::RaycastConfig;
use crate::error::RaycastError;
use crate::hit::RaycastHit;
use crate::raycaster::Raycaster;

/// Entity predicate that can be shared between worker threads.
pub type SharedEntityFilter<'a, E> = &'a (dyn Fn(&E) -> bool + Sync);

/// Cast every segment, in parallel, returning results in input order.
///
/// Each rayon worker gets its own [`Raycaster`]; the world is only read.
/// The first failing cast aborts the batch.
pub fn cast_many<W>(
    world: &W,
    config: RaycastConfig,
    block_mode: BlockMode,
    fluid_mode: FluidMode,
    entity_filter: Option<SharedEntityFilter<'_, W::Entity>>,
    segments: &[Segment],
) -> Result<Vec<RaycastHit<W::Entity>>, RaycastError<W::Error>>
where
    W: RaycastWorld + Sync + ?Sized,
    W::Entity: Send,
    W::Error: Send,
{
    config.validate()?;

    let hits = segments
        .par_iter()
        .map_init(
            || Raycaster::<W::Entity>::from_validated(config),
            |raycaster, segment| -> Result<_, RaycastError<W::Error>> {
                let filter = entity_filter.map(|f| f as &dyn Fn(&W::Entity) -> bool);
                raycaster.cast(
                    world,
                    block_mode,
                    fluid_mode,
                    filter,
                    segment.start,
                    segment.end,
                )?;
                Ok(raycaster.take())
            },
        )
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        rays = segments.len(),
        hits = hits.iter().filter(|hit| !hit.is_miss()).count(),
        "Batch raycast finished"
    );
    Ok(hits)
}
