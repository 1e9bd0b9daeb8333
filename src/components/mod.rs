//! ECS components for entities.
//!
//! Submodules overview:
//! - [`actor`] – the controllable actor and its directional sprite state
//! - [`background`] – marker for the scrolling world background
//! - [`boxcollider`] – fixed rectangle footprints and the overlap test
//! - [`collider`] – boundary and entry colliders built from the tile layout
//! - [`direction`] – cardinal directions and collision probe offsets
//! - [`mapposition`] – world-space position of an entity
//! - [`tween`] – walk-forward and opacity animations used by the entry transition

pub mod actor;
pub mod background;
pub mod boxcollider;
pub mod collider;
pub mod direction;
pub mod mapposition;
pub mod tween;
