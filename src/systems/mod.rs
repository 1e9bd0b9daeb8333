//! Simulation systems.
//!
//! This module groups all ECS systems that advance the exploration scene,
//! plus the few world-level operations that run outside the schedule.
//!
//! Submodules overview
//! - [`collision`] – boundary probes, entry overlap and edge-triggered entry events
//! - [`gamestate`] – run conditions derived from the scene state
//! - [`movement`] – resolve input into world scrolling and actor facing
//! - [`render`] – collect the per-frame view and hand it to a renderer
//! - [`restore`] – write a saved snapshot back when an overlay is dismissed
//! - [`time`] – update simulation time and delta
//! - [`transition`] – the entry transition sequence
//! - [`tween`] – walk-forward and opacity tweens

pub mod collision;
pub mod gamestate;
pub mod movement;
pub mod render;
pub mod restore;
pub mod time;
pub mod transition;
pub mod tween;
