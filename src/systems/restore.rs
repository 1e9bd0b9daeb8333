//! Return to the map after an overlay is dismissed.
//!
//! [`restore_position`] runs on the world directly, outside the schedule, so
//! it can be called at any point between frames, including while an entry
//! transition is still in flight.
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};

use crate::components::actor::{Actor, ActorSprite};
use crate::components::background::Background;
use crate::components::collider::{EntryId, EntryVisual};
use crate::components::direction::Direction;
use crate::components::mapposition::MapPosition;
use crate::components::tween::{TweenOpacity, WalkForward};
use crate::resources::colliderregistry::ColliderRegistry;
use crate::resources::gamestate::GameState;
use crate::resources::transition::{TransitionSequence, TriggerLatch};

/// Distance the actor is pushed after a restore so it does not sit on the
/// entry it came from.
pub const RETURN_NUDGE: f32 = 5.0;
/// Direction of the post-restore push.
pub const RETURN_NUDGE_DIRECTION: Direction = Direction::Down;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Entry that opened the overlay.
    pub entry: EntryId,
    /// The snapshot and the live registry disagreed on list lengths; the
    /// extra positions were left untouched.
    pub length_mismatch: bool,
}

fn write_back(world: &mut World, entities: &[Entity], positions: &[Vec3]) -> bool {
    for (entity, pos) in entities.iter().zip(positions) {
        if let Some(mut mp) = world.get_mut::<MapPosition>(*entity) {
            mp.pos = *pos;
        }
    }
    entities.len() != positions.len()
}

/// Put the world back where it was when the entry triggered.
///
/// Returns `None` and changes nothing when there is no saved snapshot.
pub fn restore_position(world: &mut World) -> Option<RestoreOutcome> {
    let saved = world.resource_scope(|world, mut state: Mut<GameState>| {
        state.return_to_exploring(world)
    })?;
    world.resource_mut::<TransitionSequence>().finish();

    let registry = world.resource::<ColliderRegistry>().clone();
    let boundary_mismatch = write_back(world, registry.boundaries(), &saved.boundaries);
    let entry_mismatch = write_back(world, registry.entries(), &saved.entries);

    let backgrounds: Vec<Entity> = world
        .query_filtered::<Entity, With<Background>>()
        .iter(world)
        .collect();
    for entity in backgrounds {
        if let Some(mut mp) = world.get_mut::<MapPosition>(entity) {
            mp.pos = saved.background;
        }
    }

    for &entity in registry.entries() {
        if let Ok(mut e) = world.get_entity_mut(entity) {
            e.remove::<TweenOpacity>();
            if let Some(mut visual) = e.get_mut::<EntryVisual>() {
                visual.reset();
            }
        }
    }

    let actors: Vec<Entity> = world
        .query_filtered::<Entity, With<Actor>>()
        .iter(world)
        .collect();
    for entity in actors {
        let mut e = world.entity_mut(entity);
        e.remove::<WalkForward>();
        if let Some(mut mp) = e.get_mut::<MapPosition>() {
            mp.pos = saved.actor + RETURN_NUDGE_DIRECTION.unit3() * RETURN_NUDGE;
        }
        if let Some(mut sprite) = e.get_mut::<ActorSprite>() {
            sprite.reset_to_default_facing();
        }
    }

    world.resource_mut::<TriggerLatch>().last_triggered = None;

    let length_mismatch = boundary_mismatch || entry_mismatch;
    if length_mismatch {
        warn!(
            "Snapshot does not match the collider registry: {}/{} boundaries, {}/{} entries",
            saved.boundaries.len(),
            registry.boundaries().len(),
            saved.entries.len(),
            registry.entries().len()
        );
    }
    info!("Returned to the map from entry {:?}", saved.entry);

    Some(RestoreOutcome {
        entry: saved.entry,
        length_mismatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::collider::EntryCategory;
    use crate::resources::gamestate::SavedPosition;

    fn world() -> (World, Entity, Entity, Entity) {
        let mut world = World::new();
        world.insert_resource(GameState::new());
        world.insert_resource(TransitionSequence::default());
        world.insert_resource(TriggerLatch::default());
        let actor = world
            .spawn((Actor, MapPosition::new(0.0, 0.0), ActorSprite::new(4, 1)))
            .id();
        let boundary = world.spawn(MapPosition::new(100.0, 100.0)).id();
        let entry = world
            .spawn((MapPosition::new(200.0, 200.0), EntryVisual::new(4.0)))
            .id();
        world.insert_resource(ColliderRegistry::from_entities(vec![boundary], vec![entry]));
        (world, actor, boundary, entry)
    }

    #[test]
    fn test_restore_without_snapshot_is_noop() {
        let (mut world, actor, _, _) = world();
        world.resource_mut::<TriggerLatch>().last_triggered = Some(EntryId(0));
        assert_eq!(restore_position(&mut world), None);
        assert_eq!(world.get::<MapPosition>(actor).unwrap().pos, Vec3::ZERO);
        assert_eq!(
            world.resource::<TriggerLatch>().last_triggered,
            Some(EntryId(0))
        );
    }

    #[test]
    fn test_restore_writes_back_and_nudges() {
        let (mut world, actor, boundary, entry) = world();
        world.resource_scope(|world, mut state: Mut<GameState>| {
            state.save_snapshot(SavedPosition {
                actor: Vec3::new(1.0, 2.0, 1.0),
                background: Vec3::ZERO,
                boundaries: vec![Vec3::new(10.0, 20.0, 0.0)],
                entries: vec![Vec3::new(30.0, 40.0, 0.0)],
                entry: EntryId(0),
            });
            state.enter_overlay(EntryCategory::Work, world).unwrap();
        });
        world.get_mut::<EntryVisual>(entry).unwrap().opacity = 1.0;

        let outcome = restore_position(&mut world).unwrap();
        assert!(!outcome.length_mismatch);
        assert!(world.resource::<GameState>().is_exploring());
        assert_eq!(
            world.get::<MapPosition>(actor).unwrap().pos,
            Vec3::new(1.0, 2.0 - RETURN_NUDGE, 1.0)
        );
        assert_eq!(
            world.get::<MapPosition>(boundary).unwrap().pos,
            Vec3::new(10.0, 20.0, 0.0)
        );
        assert_eq!(
            world.get::<MapPosition>(entry).unwrap().pos,
            Vec3::new(30.0, 40.0, 0.0)
        );
        assert_eq!(world.get::<EntryVisual>(entry).unwrap().opacity, 0.0);
        assert_eq!(
            world.get::<ActorSprite>(actor).unwrap().facing,
            Direction::Down
        );
        assert!(restore_position(&mut world).is_none());
    }

    #[test]
    fn test_restore_flags_length_mismatch() {
        let (mut world, _, boundary, _) = world();
        world.resource_mut::<GameState>().save_snapshot(SavedPosition {
            actor: Vec3::ZERO,
            background: Vec3::ZERO,
            boundaries: vec![Vec3::new(10.0, 20.0, 0.0), Vec3::new(1.0, 1.0, 0.0)],
            entries: Vec::new(),
            entry: EntryId(0),
        });

        let outcome = restore_position(&mut world).unwrap();
        assert!(outcome.length_mismatch);
        assert_eq!(
            world.get::<MapPosition>(boundary).unwrap().pos,
            Vec3::new(10.0, 20.0, 0.0)
        );
    }
}
