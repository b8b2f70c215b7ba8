//! Entity storage for raycast targets.
//!
//! Uses hecs as the ECS backend. Every raycastable entity carries a
//! [`Transform`] and [`Bounds`]; the world-space box is the bounds centered
//! on the transform's position.

use glam::DVec3;
pub use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use voxray_core::Aabb;

/// Transform component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
}

/// Collision box component, centered on the entity's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_extents: DVec3,
}

impl Bounds {
    /// World-space box for an entity at `position`
    #[inline]
    pub fn at(&self, position: DVec3) -> Aabb {
        Aabb::from_center_half_extents(position, self.half_extents)
    }
}

/// Coarse entity category, handy for raycast filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Mob,
    Item,
    Projectile,
}

/// ECS-backed set of entities with boxes.
#[derive(Default)]
pub struct EntityStore {
    world: World,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity centered at `position`.
    pub fn spawn(&mut self, position: DVec3, half_extents: DVec3, kind: EntityKind) -> Entity {
        self.world.spawn((
            Transform { position },
            Bounds {
                half_extents: half_extents.abs(),
            },
            kind,
        ))
    }

    /// Remove an entity. Returns false if it did not exist.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    /// Move an entity. Returns false if it does not exist.
    pub fn set_position(&mut self, entity: Entity, position: DVec3) -> bool {
        match self.world.query_one_mut::<&mut Transform>(entity) {
            Ok(transform) => {
                transform.position = position;
                true
            }
            Err(_) => false,
        }
    }

    /// World-space box of an entity.
    pub fn bounds_of(&self, entity: Entity) -> Option<Aabb> {
        let transform = self.world.get::<&Transform>(entity).ok()?;
        let bounds = self.world.get::<&Bounds>(entity).ok()?;
        Some(bounds.at(transform.position))
    }

    /// Category of an entity.
    pub fn kind_of(&self, entity: Entity) -> Option<EntityKind> {
        self.world.get::<&EntityKind>(entity).ok().map(|kind| *kind)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    /// Returns true if the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Append every entity whose box intersects `region` to `out`.
    pub fn query_region(&self, region: &Aabb, out: &mut Vec<(Entity, Aabb)>) {
        let mut query = self.world.query::<(&Transform, &Bounds)>();
        out.extend(query.iter().filter_map(|(entity, (transform, bounds))| {
            let aabb = bounds.at(transform.position);
            aabb.intersects(region).then_some((entity, aabb))
        }));
    }
}
