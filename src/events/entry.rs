//! Entry trigger event.
//!
//! Emitted by [`entry_trigger_system`](crate::systems::collision::entry_trigger_system)
//! on the first frame the actor overlaps an entry. The observer
//! [`begin_transition_observer`](crate::systems::transition::begin_transition_observer)
//! saves the world snapshot and starts the transition sequence.
use bevy_ecs::prelude::*;

use crate::components::collider::{EntryCategory, EntryId};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTriggeredEvent {
    pub entry: EntryId,
    pub category: EntryCategory,
}
