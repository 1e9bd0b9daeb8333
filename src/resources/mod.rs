//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `colliderregistry` – boundary and entry entities in scan order
//! - `frameview` – per-frame snapshot handed to the renderer
//! - `gameconfig` – tuning values loaded from an INI file
//! - `gamestate` – scene state machine and the saved-position slot
//! - `input` – held state of the four directional keys
//! - `scenebridge` – notification and command channels to the overlay UI
//! - `tilemap` – static tile layout and grid-to-world transform
//! - `transition` – entry transition state machine and trigger latch
//! - `worldtime` – simulation time and delta
pub mod colliderregistry;
pub mod frameview;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod scenebridge;
pub mod tilemap;
pub mod transition;
pub mod worldtime;
