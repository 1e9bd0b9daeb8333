//! Scene state change event and observer.
//!
//! [`GameState`](crate::resources::gamestate::GameState) triggers a
//! [`GameStateChangedEvent`] through a [`StateNotifier`] in the same call
//! that changes the state. The observer in this module forwards it to the
//! UI subscriber registered in [`SceneBridge`], so the state machine never
//! needs to know who is listening.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::resources::gamestate::GameStates;
use crate::resources::scenebridge::{SceneBridge, SceneNotification};

/// Event carrying the state that was just entered.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GameStateChangedEvent {
    pub state: GameStates,
    /// Saved position of the entry that opened the overlay, if any.
    pub entry_position: Option<Vec3>,
}

/// Anything that can deliver a [`GameStateChangedEvent`] to observers.
///
/// Systems pass their [`Commands`]; world-level operations pass the
/// [`World`], which runs the observers immediately.
pub trait StateNotifier {
    fn notify_state(&mut self, event: GameStateChangedEvent);
}

impl StateNotifier for Commands<'_, '_> {
    fn notify_state(&mut self, event: GameStateChangedEvent) {
        self.trigger(event);
    }
}

impl StateNotifier for World {
    fn notify_state(&mut self, event: GameStateChangedEvent) {
        self.trigger(event);
        self.flush();
    }
}

/// Observer that forwards state changes to the registered subscriber.
pub fn observe_gamestate_change_event(
    trigger: On<GameStateChangedEvent>,
    bridge: Option<ResMut<SceneBridge>>,
) {
    let event = *trigger.event();
    info!("Scene state is now {:?}", event.state);

    let Some(mut bridge) = bridge else {
        debug!("No SceneBridge resource; state change not forwarded");
        return;
    };
    bridge.notify(SceneNotification {
        state: event.state,
        entry_position: event.entry_position,
    });
}
