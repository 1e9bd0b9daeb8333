//! Scene state machine resource.
//!
//! The scene is either live ([`GameStates::Exploring`]) or suspended inside
//! one category overlay ([`GameStates::InOverlay`]). The only transitions are
//! Exploring → InOverlay and InOverlay → Exploring.
//!
//! [`GameState`] also owns the single [`SavedPosition`] slot: written when an
//! entry triggers, handed back and cleared when the player returns to the
//! map. Every state change notifies observers through the
//! [`StateNotifier`] passed to it.

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use thiserror::Error;

use crate::components::collider::{EntryCategory, EntryId};
use crate::events::gamestate::{GameStateChangedEvent, StateNotifier};

/// Discrete scene states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    Exploring,
    InOverlay(EntryCategory),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("cannot open the {requested} overlay while the {current} overlay is open")]
    AlreadyInOverlay {
        current: EntryCategory,
        requested: EntryCategory,
    },
}

/// Point-in-time copy of every mutable world position.
///
/// Boundary and entry positions are ordered exactly like the
/// [`ColliderRegistry`](crate::resources::colliderregistry::ColliderRegistry)
/// lists at save time.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPosition {
    pub actor: Vec3,
    pub background: Vec3,
    pub boundaries: Vec<Vec3>,
    pub entries: Vec<Vec3>,
    pub entry: EntryId,
}

impl SavedPosition {
    /// Position of the triggering entry at save time.
    pub fn entry_position(&self) -> Option<Vec3> {
        self.entries.get(self.entry.0).copied()
    }
}

/// Authoritative scene state plus the saved-position slot.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameState {
    current: GameStates,
    saved: Option<SavedPosition>,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::Exploring`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the current state.
    pub fn get(&self) -> &GameStates {
        &self.current
    }

    pub fn is_exploring(&self) -> bool {
        self.current == GameStates::Exploring
    }

    /// Switch into the overlay for `category` and notify observers.
    ///
    /// Only allowed from [`GameStates::Exploring`]. The notification carries
    /// the saved position of the triggering entry when a snapshot exists.
    pub fn enter_overlay(
        &mut self,
        category: EntryCategory,
        notifier: &mut impl StateNotifier,
    ) -> Result<(), SceneError> {
        if let GameStates::InOverlay(current) = self.current {
            return Err(SceneError::AlreadyInOverlay {
                current,
                requested: category,
            });
        }
        self.current = GameStates::InOverlay(category);
        notifier.notify_state(GameStateChangedEvent {
            state: self.current,
            entry_position: self.saved.as_ref().and_then(SavedPosition::entry_position),
        });
        Ok(())
    }

    /// Return to exploring, notify observers and hand back the saved snapshot.
    ///
    /// Without a snapshot this is a no-op returning `None`, and nobody is
    /// notified.
    pub fn return_to_exploring(
        &mut self,
        notifier: &mut impl StateNotifier,
    ) -> Option<SavedPosition> {
        let saved = self.saved.take()?;
        self.current = GameStates::Exploring;
        notifier.notify_state(GameStateChangedEvent {
            state: self.current,
            entry_position: None,
        });
        Some(saved)
    }

    /// Store a snapshot, replacing any previous one.
    pub fn save_snapshot(&mut self, snapshot: SavedPosition) {
        self.saved = Some(snapshot);
    }

    /// Drop the snapshot without changing state.
    pub fn discard_snapshot(&mut self) -> Option<SavedPosition> {
        self.saved.take()
    }

    pub fn saved_position(&self) -> Option<&SavedPosition> {
        self.saved.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorded(Vec<GameStateChangedEvent>);

    impl StateNotifier for Recorded {
        fn notify_state(&mut self, event: GameStateChangedEvent) {
            self.0.push(event);
        }
    }

    fn snapshot(entry: usize) -> SavedPosition {
        SavedPosition {
            actor: Vec3::new(1.0, 2.0, 3.0),
            background: Vec3::ZERO,
            boundaries: vec![Vec3::new(10.0, 10.0, 0.0)],
            entries: vec![Vec3::new(5.0, 6.0, 0.0), Vec3::new(7.0, 8.0, 0.0)],
            entry: EntryId(entry),
        }
    }

    #[test]
    fn test_initial_state_is_exploring() {
        let state = GameState::new();
        assert_eq!(state.get(), &GameStates::Exploring);
        assert!(state.saved_position().is_none());
    }

    #[test]
    fn test_exploring_to_overlay_and_back() {
        let mut state = GameState::new();
        let mut notes = Recorded::default();
        state.save_snapshot(snapshot(0));
        state.enter_overlay(EntryCategory::Hobbies, &mut notes).unwrap();
        assert_eq!(state.get(), &GameStates::InOverlay(EntryCategory::Hobbies));

        let saved = state.return_to_exploring(&mut notes).unwrap();
        assert_eq!(saved, snapshot(0));
        assert_eq!(state.get(), &GameStates::Exploring);
        assert!(state.saved_position().is_none());

        assert_eq!(
            notes.0,
            vec![
                GameStateChangedEvent {
                    state: GameStates::InOverlay(EntryCategory::Hobbies),
                    entry_position: Some(Vec3::new(5.0, 6.0, 0.0)),
                },
                GameStateChangedEvent {
                    state: GameStates::Exploring,
                    entry_position: None,
                },
            ]
        );
    }

    #[test]
    fn test_overlay_to_overlay_is_rejected() {
        let mut state = GameState::new();
        let mut notes = Recorded::default();
        state.enter_overlay(EntryCategory::Work, &mut notes).unwrap();
        let err = state
            .enter_overlay(EntryCategory::Random, &mut notes)
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::AlreadyInOverlay {
                current: EntryCategory::Work,
                requested: EntryCategory::Random,
            }
        );
        assert_eq!(state.get(), &GameStates::InOverlay(EntryCategory::Work));
        assert_eq!(notes.0.len(), 1, "a rejected change notifies nobody");
    }

    #[test]
    fn test_return_without_snapshot_is_noop() {
        let mut state = GameState::new();
        let mut notes = Recorded::default();
        assert!(state.return_to_exploring(&mut notes).is_none());
        assert_eq!(state.get(), &GameStates::Exploring);
        assert!(notes.0.is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let mut state = GameState::new();
        state.save_snapshot(snapshot(0));
        state.save_snapshot(snapshot(1));
        let saved = state.saved_position().unwrap();
        assert_eq!(saved.entry, EntryId(1));
        assert_eq!(saved.entry_position(), Some(Vec3::new(7.0, 8.0, 0.0)));
    }
}
