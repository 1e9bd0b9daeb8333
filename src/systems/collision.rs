//! Collision queries and entry detection.
//!
//! - [`check_boundary_collision`] answers "would a step in this direction
//!   hit a boundary" by probing each boundary shifted toward the actor.
//! - [`check_entry_overlap`] finds the first entry the actor stands on.
//! - [`entry_trigger_system`] turns entry overlap into an edge-triggered
//!   [`EntryTriggeredEvent`].
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::actor::Actor;
use crate::components::boxcollider::actor_overlaps_tile;
use crate::components::collider::{Entry, EntryId};
use crate::components::direction::Direction;
use crate::components::mapposition::MapPosition;
use crate::events::entry::EntryTriggeredEvent;
use crate::resources::colliderregistry::ColliderRegistry;
use crate::resources::transition::TriggerLatch;

/// True if the actor at `actor` would overlap any boundary once the world
/// scrolls one probe step for a move in `direction`. Stops at the first hit.
pub fn check_boundary_collision<I>(actor: Vec2, direction: Direction, boundaries: I) -> bool
where
    I: IntoIterator<Item = Vec2>,
{
    let offset = direction.collision_offset();
    boundaries
        .into_iter()
        .any(|boundary| actor_overlaps_tile(actor, boundary + offset))
}

/// First entry, in registry order, that the actor overlaps.
pub fn check_entry_overlap<I>(actor: Vec2, entries: I) -> Option<EntryId>
where
    I: IntoIterator<Item = (EntryId, Vec2)>,
{
    entries
        .into_iter()
        .find(|(_, position)| actor_overlaps_tile(actor, *position))
        .map(|(id, _)| id)
}

/// Fire [`EntryTriggeredEvent`] the first frame the actor overlaps an entry.
///
/// Staying on the same entry does not fire again; leaving every entry
/// clears the latch.
pub fn entry_trigger_system(
    mut commands: Commands,
    mut latch: ResMut<TriggerLatch>,
    registry: Res<ColliderRegistry>,
    actor: Query<&MapPosition, With<Actor>>,
    entries: Query<(&MapPosition, &Entry)>,
) {
    let Ok(actor_pos) = actor.single() else {
        return;
    };

    let hit = check_entry_overlap(
        actor_pos.xy(),
        registry
            .entries()
            .iter()
            .filter_map(|e| entries.get(*e).ok())
            .map(|(pos, entry)| (entry.id, pos.xy())),
    );

    match hit {
        Some(id) if latch.last_triggered != Some(id) => {
            let Some(entry) = registry
                .entry(id)
                .and_then(|e| entries.get(e).ok())
                .map(|(_, entry)| *entry)
            else {
                return;
            };
            debug!("Actor overlaps entry {:?} ({})", id, entry.category);
            latch.last_triggered = Some(id);
            commands.trigger(EntryTriggeredEvent {
                entry: id,
                category: entry.category,
            });
        }
        Some(_) => {}
        None => latch.last_triggered = None,
    }
}
