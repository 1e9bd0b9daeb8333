//! Overworld library.
//!
//! This module exposes the exploration scene's ECS components, resources,
//! systems, and events, plus the [`game::Simulation`] facade, for use in
//! integration tests and by the binary hosts.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod scripted_input;
pub mod systems;
