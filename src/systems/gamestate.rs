//! Run conditions derived from the scene state and the transition sequence.
use bevy_ecs::prelude::*;

use crate::resources::gamestate::GameState;
use crate::resources::transition::TransitionSequence;

/// Exploring and not suspended by an entry transition.
pub fn simulation_is_live(state: Res<GameState>, sequence: Res<TransitionSequence>) -> bool {
    state.is_exploring() && !sequence.is_suspended()
}

pub fn transition_in_flight(sequence: Res<TransitionSequence>) -> bool {
    sequence.is_suspended()
}
