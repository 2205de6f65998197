//! World/entity registry boundary: spatial components and weak-reference
//! transform resolution.
//!
//! Camera controllers hold [`Entity`] ids, never component references.
//! An id is resolved freshly each tick through [`resolve_transform`],
//! which returns `None` once the entity is despawned, so the id is a
//! weak, non-owning reference by construction.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

/// An entity's transform in world space.
///
/// This is the source of truth for where an object exists; camera poses
/// and render transforms are derived from it, never the other way round.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldTransform {
    /// Position in world units.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl WorldTransform {
    /// Creates a transform at `position` with identity rotation.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Resolve an entity reference to its current transform.
///
/// Returns `None` if the entity was despawned or never had a
/// [`WorldTransform`]. Callers must treat absence as "hold the last
/// known state", never as an error.
#[must_use]
pub fn resolve_transform(world: &World, entity: Entity) -> Option<WorldTransform> {
    world.get::<WorldTransform>(entity).copied()
}

/// Spawn an object at `position` with identity rotation.
pub fn spawn_object(world: &mut World, position: Vec3) -> Entity {
    world.spawn(WorldTransform::from_position(position)).id()
}
