//! Tween animation systems.
//!
//! These systems update entity properties over time based on tween components:
//! - [`tween_walk_forward_system`] – moves the actor along a [`WalkForward`]
//! - [`tween_opacity_system`] – fades an [`EntryVisual`] along a [`TweenOpacity`]
//!
//! Tweens play once, linearly, and stop on their end value. The systems read
//! delta time from [`WorldTime`](crate::resources::worldtime::WorldTime).
//! Finished tweens stay attached until the transition sequence removes them.

use crate::components::collider::EntryVisual;
use crate::components::mapposition::MapPosition;
use crate::components::tween::{TweenOpacity, WalkForward};
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;
use glam::Vec3;

/// Linearly interpolate between two floats.
pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Advance tween time and stop playing once `duration` is reached.
///
/// Returns the normalized progress in [0.0, 1.0]. A zero duration completes
/// immediately.
pub(crate) fn advance(time: &mut f32, duration: f32, playing: &mut bool, dt: f32) -> f32 {
    *time += dt;
    if duration <= 0.0 || *time >= duration {
        *time = duration.max(0.0);
        *playing = false;
        return 1.0;
    }
    (*time / duration).clamp(0.0, 1.0)
}

/// Animate the actor position based on [`WalkForward`] components.
pub fn tween_walk_forward_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut MapPosition, &mut WalkForward)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut mp, mut tw) in query.iter_mut() {
        if !tw.playing {
            continue;
        }
        let duration = tw.duration;
        let mut t = tw.time;
        let mut playing = tw.playing;
        let k = advance(&mut t, duration, &mut playing, dt);
        tw.time = t;
        tw.playing = playing;
        mp.pos = Vec3::lerp(tw.from, tw.to, k);
    }
}

/// Animate entry opacity based on [`TweenOpacity`] components.
pub fn tween_opacity_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut EntryVisual, &mut TweenOpacity)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut visual, mut tw) in query.iter_mut() {
        if !tw.playing {
            continue;
        }
        let duration = tw.duration;
        let mut t = tw.time;
        let mut playing = tw.playing;
        let k = advance(&mut t, duration, &mut playing, dt);
        tw.time = t;
        tw.playing = playing;
        visual.opacity = lerp_f32(tw.from, tw.to, k);
    }
}
