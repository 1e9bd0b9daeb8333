//! Channels between the simulation and the overlay UI.
//!
//! The simulation owns all world state. The UI learns about scene changes
//! through a single [`SceneNotification`] subscription and asks for a return
//! to the map by sending [`SceneCommand`]s, which the owner drains once per
//! frame. Registering a new subscriber replaces the previous one.
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TrySendError, unbounded};
use glam::Vec3;
use log::debug;

use crate::resources::gamestate::GameStates;

/// Emitted whenever the scene state changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNotification {
    pub state: GameStates,
    /// World position of the entry that opened the overlay, when known.
    pub entry_position: Option<Vec3>,
}

/// Requests from the UI to the simulation owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// The overlay was dismissed; restore the saved position.
    ReturnToMap,
}

#[derive(Resource)]
pub struct SceneBridge {
    subscriber: Option<Sender<SceneNotification>>,
    /// Sender cloned out to UI code.
    pub tx_cmd: Sender<SceneCommand>,
    /// Receiver drained by the simulation owner.
    pub rx_cmd: Receiver<SceneCommand>,
}

impl Default for SceneBridge {
    fn default() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<SceneCommand>();
        Self {
            subscriber: None,
            tx_cmd,
            rx_cmd,
        }
    }
}

impl SceneBridge {
    /// Register the single subscriber, replacing any previous one.
    pub fn subscribe(&mut self) -> Receiver<SceneNotification> {
        let (tx, rx) = unbounded::<SceneNotification>();
        self.subscriber = Some(tx);
        rx
    }

    pub fn has_subscriber(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Deliver a notification to the subscriber, dropping it if the
    /// receiving side has gone away.
    pub fn notify(&mut self, notification: SceneNotification) {
        let Some(tx) = &self.subscriber else {
            return;
        };
        if let Err(TrySendError::Disconnected(_)) = tx.try_send(notification) {
            debug!("Scene subscriber disconnected; dropping subscription");
            self.subscriber = None;
        }
    }
}
