//! Entry transition sequence.
//!
//! When the actor first overlaps an entry, [`begin_transition_observer`]
//! saves a [`SavedPosition`] snapshot, starts the entry fade-in and suspends
//! the simulation. [`advance_transition_system`] then walks the
//! [`TransitionSequence`] forward one step per frame:
//!
//! 1. `OpeningEntry`: wait for the entry's [`TweenOpacity`] to finish, turn
//!    the actor toward the entry and start a [`WalkForward`].
//! 2. `WalkingForward`: wait for the walk to finish, rest the actor and enter
//!    the overlay for the entry's category.
//!
//! Any failure along the way is logged and cleaned up; the sequence always
//! returns to idle so the simulation cannot stay suspended.
use bevy_ecs::prelude::*;
use log::{error, info, warn};
use thiserror::Error;

use crate::components::actor::{Actor, ActorSprite};
use crate::components::background::Background;
use crate::components::collider::{Entry, EntryId, EntryVisual};
use crate::components::direction::Direction;
use crate::components::mapposition::MapPosition;
use crate::components::tween::{TweenOpacity, WalkForward};
use crate::events::entry::EntryTriggeredEvent;
use crate::resources::colliderregistry::ColliderRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, SavedPosition, SceneError};
use crate::resources::transition::{TransitionPhase, TransitionSequence};
use crate::resources::worldtime::WorldTime;

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("the actor entity is missing")]
    MissingActor,
    #[error("entry {0:?} has no live entity")]
    MissingEntry(EntryId),
    #[error("the {0} tween was removed before it finished")]
    MissingTween(&'static str),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

enum Step {
    Running,
    Completed,
}

/// Observer that starts the transition sequence for a triggered entry.
#[allow(clippy::too_many_arguments)]
pub fn begin_transition_observer(
    trigger: On<EntryTriggeredEvent>,
    mut commands: Commands,
    mut game_state: ResMut<GameState>,
    mut sequence: ResMut<TransitionSequence>,
    registry: Res<ColliderRegistry>,
    actor: Query<Entity, With<Actor>>,
    background: Query<Entity, With<Background>>,
    positions: Query<&MapPosition>,
) {
    let event = *trigger.event();
    if sequence.is_suspended() || !game_state.is_exploring() {
        warn!(
            "Ignoring trigger of entry {:?}: a transition is already running",
            event.entry
        );
        return;
    }

    let Some(actor_pos) = actor.single().ok().and_then(|e| positions.get(e).ok()) else {
        error!("Cannot start transition: {}", TransitionError::MissingActor);
        return;
    };
    let Some(entry_entity) = registry
        .entry(event.entry)
        .filter(|e| positions.contains(*e))
    else {
        error!(
            "Cannot start transition: {}",
            TransitionError::MissingEntry(event.entry)
        );
        return;
    };

    let background_pos = background
        .single()
        .ok()
        .and_then(|e| positions.get(e).ok())
        .map(|p| p.pos)
        .unwrap_or_default();

    let snapshot = SavedPosition {
        actor: actor_pos.pos,
        background: background_pos,
        boundaries: registry
            .boundaries()
            .iter()
            .filter_map(|e| positions.get(*e).ok())
            .map(|p| p.pos)
            .collect(),
        entries: registry
            .entries()
            .iter()
            .filter_map(|e| positions.get(*e).ok())
            .map(|p| p.pos)
            .collect(),
        entry: event.entry,
    };
    game_state.save_snapshot(snapshot);

    info!(
        "Entry {:?} ({}) triggered, opening",
        event.entry, event.category
    );
    commands.entity(entry_entity).insert(TweenOpacity::open());
    sequence.begin(event.entry);
}

/// Drive the in-flight transition one step.
#[allow(clippy::too_many_arguments)]
pub fn advance_transition_system(
    mut commands: Commands,
    mut sequence: ResMut<TransitionSequence>,
    mut game_state: ResMut<GameState>,
    registry: Res<ColliderRegistry>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut actor: Query<(Entity, &MapPosition, &mut ActorSprite, Option<&WalkForward>), With<Actor>>,
    mut entries: Query<
        (&MapPosition, &Entry, &mut EntryVisual, Option<&TweenOpacity>),
        Without<Actor>,
    >,
) {
    let phase = sequence.phase();
    let result = match phase {
        TransitionPhase::Idle => return,
        TransitionPhase::OpeningEntry { entry } => {
            open_entry_step(&mut commands, entry, &registry, &config, &time, &mut actor, &entries)
                .map(|step| {
                    if matches!(step, Step::Completed) {
                        sequence.walk(entry);
                    }
                    Step::Running
                })
        }
        TransitionPhase::WalkingForward { entry } => walk_step(
            &mut commands,
            entry,
            &registry,
            &mut game_state,
            &mut actor,
            &entries,
        ),
    };

    match result {
        Ok(Step::Running) => {}
        Ok(Step::Completed) => sequence.finish(),
        Err(err) => {
            error!("Entry transition aborted: {}", err);
            if let Some(entity) = sequence.entry().and_then(|id| registry.entry(id))
                && let Ok((_, _, mut visual, _)) = entries.get_mut(entity)
            {
                visual.reset();
                commands.entity(entity).remove::<TweenOpacity>();
            }
            if let Ok((entity, ..)) = actor.single() {
                commands.entity(entity).remove::<WalkForward>();
            }
            game_state.discard_snapshot();
            sequence.finish();
        }
    }
}

/// Returns `Completed` once the opacity tween is done and the walk started.
fn open_entry_step(
    commands: &mut Commands,
    entry: EntryId,
    registry: &ColliderRegistry,
    config: &GameConfig,
    time: &WorldTime,
    actor: &mut Query<(Entity, &MapPosition, &mut ActorSprite, Option<&WalkForward>), With<Actor>>,
    entries: &Query<
        (&MapPosition, &Entry, &mut EntryVisual, Option<&TweenOpacity>),
        Without<Actor>,
    >,
) -> Result<Step, TransitionError> {
    let entity = registry
        .entry(entry)
        .ok_or(TransitionError::MissingEntry(entry))?;
    let (entry_pos, _, _, tween) = entries
        .get(entity)
        .map_err(|_| TransitionError::MissingEntry(entry))?;
    let tween = tween.ok_or(TransitionError::MissingTween("entry opacity"))?;
    if !tween.finished() {
        return Ok(Step::Running);
    }

    let (actor_entity, actor_pos, mut sprite, _) =
        actor.single_mut().map_err(|_| TransitionError::MissingActor)?;
    let direction = Direction::toward(actor_pos.xy(), entry_pos.xy());
    sprite.apply_facing(direction, time.elapsed);

    commands.entity(entity).remove::<TweenOpacity>();
    commands
        .entity(actor_entity)
        .insert(WalkForward::new(actor_pos.pos, direction, config.walk_distance));
    info!("Walking {} into entry {:?}", direction.name(), entry);
    Ok(Step::Completed)
}

/// Returns `Completed` once the walk is done and the overlay is entered.
fn walk_step(
    commands: &mut Commands,
    entry: EntryId,
    registry: &ColliderRegistry,
    game_state: &mut GameState,
    actor: &mut Query<(Entity, &MapPosition, &mut ActorSprite, Option<&WalkForward>), With<Actor>>,
    entries: &Query<
        (&MapPosition, &Entry, &mut EntryVisual, Option<&TweenOpacity>),
        Without<Actor>,
    >,
) -> Result<Step, TransitionError> {
    let (actor_entity, _, mut sprite, walk) =
        actor.single_mut().map_err(|_| TransitionError::MissingActor)?;
    let walk = walk.ok_or(TransitionError::MissingTween("walk-forward"))?;
    if !walk.finished() {
        return Ok(Step::Running);
    }
    commands.entity(actor_entity).remove::<WalkForward>();
    sprite.rest();

    let category = registry
        .entry(entry)
        .and_then(|e| entries.get(e).ok())
        .map(|(_, entry, _, _)| entry.category)
        .ok_or(TransitionError::MissingEntry(entry))?;
    game_state.enter_overlay(category, commands)?;
    Ok(Step::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::{ACTOR_FOOTPRINT, TILE_FOOTPRINT};
    use crate::components::collider::EntryCategory;
    use crate::resources::gamestate::GameStates;
    use crate::systems::tween::{tween_opacity_system, tween_walk_forward_system};

    struct Fixture {
        world: World,
        schedule: Schedule,
        actor: Entity,
        entry: Entity,
    }

    fn fixture() -> Fixture {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(GameState::new());
        world.insert_resource(TransitionSequence::default());
        world.insert_resource(WorldTime {
            delta: 0.1,
            ..Default::default()
        });

        let actor = world
            .spawn((
                Actor,
                MapPosition::new(0.0, 0.0).with_z(1.0),
                ACTOR_FOOTPRINT,
                ActorSprite::new(4, 1),
            ))
            .id();
        world.spawn((Background, MapPosition::new(-10.0, -10.0)));
        let entry = world
            .spawn((
                MapPosition::new(0.0, 20.0),
                TILE_FOOTPRINT,
                Entry {
                    id: EntryId(0),
                    category: EntryCategory::Hobbies,
                },
                EntryVisual::new(4.0),
            ))
            .id();
        world.insert_resource(ColliderRegistry::from_entities(Vec::new(), vec![entry]));
        world.spawn(Observer::new(begin_transition_observer));

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                (tween_walk_forward_system, tween_opacity_system),
                advance_transition_system,
            )
                .chain(),
        );
        Fixture {
            world,
            schedule,
            actor,
            entry,
        }
    }

    fn trigger(world: &mut World) {
        world.trigger(EntryTriggeredEvent {
            entry: EntryId(0),
            category: EntryCategory::Hobbies,
        });
        world.flush();
    }

    #[test]
    fn test_sequence_runs_to_overlay() {
        let mut f = fixture();
        trigger(&mut f.world);

        let seq = f.world.resource::<TransitionSequence>();
        assert_eq!(seq.phase(), TransitionPhase::OpeningEntry { entry: EntryId(0) });
        assert!(f.world.resource::<GameState>().saved_position().is_some());

        for _ in 0..20 {
            f.schedule.run(&mut f.world);
        }

        assert!(!f.world.resource::<TransitionSequence>().is_suspended());
        assert_eq!(
            f.world.resource::<GameState>().get(),
            &GameStates::InOverlay(EntryCategory::Hobbies)
        );
        // Entry is above the actor: walk up by the configured distance.
        let actor_pos = f.world.get::<MapPosition>(f.actor).unwrap().pos;
        assert_eq!(actor_pos.y, 8.0);
        assert_eq!(
            f.world.get::<ActorSprite>(f.actor).unwrap().facing,
            Direction::Up
        );
        assert!(f.world.get::<WalkForward>(f.actor).is_none());
        assert!(f.world.get::<TweenOpacity>(f.entry).is_none());
        assert_eq!(f.world.get::<EntryVisual>(f.entry).unwrap().opacity, 1.0);
    }

    #[test]
    fn test_second_trigger_is_ignored_while_suspended() {
        let mut f = fixture();
        trigger(&mut f.world);
        f.schedule.run(&mut f.world);
        let saved = f.world.resource::<GameState>().saved_position().cloned();

        // Moving the actor would change a fresh snapshot.
        f.world.get_mut::<MapPosition>(f.actor).unwrap().pos.x = 99.0;
        trigger(&mut f.world);
        assert_eq!(
            f.world.resource::<GameState>().saved_position().cloned(),
            saved
        );
    }

    #[test]
    fn test_removed_tween_aborts_and_clears_suspension() {
        let mut f = fixture();
        trigger(&mut f.world);
        f.schedule.run(&mut f.world);
        f.world.entity_mut(f.entry).remove::<TweenOpacity>();

        f.schedule.run(&mut f.world);

        assert!(!f.world.resource::<TransitionSequence>().is_suspended());
        assert!(f.world.resource::<GameState>().saved_position().is_none());
        assert!(f.world.resource::<GameState>().is_exploring());
        assert_eq!(f.world.get::<EntryVisual>(f.entry).unwrap().opacity, 0.0);
    }

    #[test]
    fn test_missing_entry_does_not_suspend() {
        let mut f = fixture();
        f.world.despawn(f.entry);
        trigger(&mut f.world);
        assert!(!f.world.resource::<TransitionSequence>().is_suspended());
        assert!(f.world.resource::<GameState>().saved_position().is_none());
    }
}
