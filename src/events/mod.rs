//! Event types and observers used by the simulation.
//!
//! Submodules:
//! - [`entry`] – fired when the actor first steps onto an entry
//! - [`gamestate`] – scene state changes forwarded to the overlay UI
pub mod entry;
pub mod gamestate;
