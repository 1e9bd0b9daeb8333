//! Entry transition resources.
//!
//! [`TransitionSequence`] is the explicit state machine behind the
//! "open entry → walk in → show overlay" sequence. While it is not idle the
//! simulation is suspended: movement and entry detection are skipped.
//! [`TriggerLatch`] makes entry detection edge-triggered.
use bevy_ecs::prelude::Resource;

use crate::components::collider::EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    /// The entry visual is fading in.
    OpeningEntry { entry: EntryId },
    /// The actor is walking into the entry.
    WalkingForward { entry: EntryId },
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TransitionSequence {
    phase: TransitionPhase,
}

impl TransitionSequence {
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// True while a sequence is in flight.
    pub fn is_suspended(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// Entry of the in-flight sequence, if any.
    pub fn entry(&self) -> Option<EntryId> {
        match self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::OpeningEntry { entry } | TransitionPhase::WalkingForward { entry } => {
                Some(entry)
            }
        }
    }

    pub fn begin(&mut self, entry: EntryId) {
        self.phase = TransitionPhase::OpeningEntry { entry };
    }

    pub fn walk(&mut self, entry: EntryId) {
        self.phase = TransitionPhase::WalkingForward { entry };
    }

    /// Return to idle. Safe to call at any time and more than once.
    pub fn finish(&mut self) {
        self.phase = TransitionPhase::Idle;
    }
}

/// Last entry that fired a transition while the actor kept overlapping it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerLatch {
    pub last_triggered: Option<EntryId>,
}
