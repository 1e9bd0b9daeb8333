//! Tween components for the entry transition.
//!
//! - [`WalkForward`] – moves the actor a short distance over time
//! - [`TweenOpacity`] – fades an entry's visual in
//!
//! Both play once and stop. See [`crate::systems::tween`] for the update
//! systems and [`crate::systems::transition`] for how they are chained.
use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::components::direction::Direction;

/// Duration of the walk through an entry, in seconds.
pub const WALK_FORWARD_DURATION: f32 = 0.6;
/// Duration of the entry fade-in, in seconds.
pub const ENTRY_OPEN_DURATION: f32 = 0.3;

/// Linear interpolation of the actor position from `from` to `to`.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct WalkForward {
    pub from: Vec3,
    pub to: Vec3,
    pub direction: Direction,
    pub duration: f32,
    pub time: f32,
    pub playing: bool,
}

impl WalkForward {
    pub fn new(from: Vec3, direction: Direction, distance: f32) -> Self {
        WalkForward {
            from,
            to: from + direction.unit3() * distance,
            direction,
            duration: WALK_FORWARD_DURATION,
            time: 0.0,
            playing: true,
        }
    }

    pub fn finished(&self) -> bool {
        !self.playing
    }
}

/// Linear interpolation of an [`EntryVisual`](super::collider::EntryVisual) opacity.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct TweenOpacity {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub time: f32,
    pub playing: bool,
}

impl TweenOpacity {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        TweenOpacity {
            from,
            to,
            duration,
            time: 0.0,
            playing: true,
        }
    }

    /// Fade from fully transparent to opaque over the entry open duration.
    pub fn open() -> Self {
        Self::new(0.0, 1.0, ENTRY_OPEN_DURATION)
    }

    pub fn finished(&self) -> bool {
        !self.playing
    }
}
