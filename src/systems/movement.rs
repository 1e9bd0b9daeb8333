//! Exploration movement.
//!
//! The actor never moves while exploring: input scrolls every other world
//! object by the opposite of the requested actor motion. Diagonal motion is
//! normalized so it is no faster than axial motion, and travel is scaled by
//! the frame delta so speed does not depend on the host frame rate.
//!
//! A frame's travel is applied in sub-steps no longer than the collision
//! probe, each one probed against the boundaries. Movement stops early on
//! the sub-step that lands on a new entry.
use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::actor::{Actor, ActorSprite};
use crate::components::collider::EntryId;
use crate::components::direction::{COLLISION_PROBE, Direction};
use crate::components::mapposition::MapPosition;
use crate::resources::colliderregistry::ColliderRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputState, KeySnapshot, LogicalKey};
use crate::resources::transition::TriggerLatch;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{check_boundary_collision, check_entry_overlap};

/// Movement requested this frame: at most one direction per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementIntent {
    /// Vertical direction when present, otherwise horizontal.
    pub primary: Option<Direction>,
    /// Horizontal direction, only when a vertical primary exists.
    pub secondary: Option<Direction>,
}

impl MovementIntent {
    pub fn from_snapshot(keys: &KeySnapshot) -> Self {
        let vertical = match keys.net_y() {
            1 => Some(Direction::Up),
            -1 => Some(Direction::Down),
            _ => None,
        };
        let horizontal = match keys.net_x() {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        };
        match vertical {
            Some(_) => MovementIntent {
                primary: vertical,
                secondary: horizontal,
            },
            None => MovementIntent {
                primary: horizontal,
                secondary: None,
            },
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.secondary.is_some()
    }

    pub fn candidates(&self) -> ArrayVec<Direction, 2> {
        self.primary.into_iter().chain(self.secondary).collect()
    }

    /// Direction the actor should face.
    ///
    /// When both axes move, the most recently pressed key wins as long as it
    /// is still held and points along one of the active directions.
    pub fn facing(&self, keys: &KeySnapshot, last_pressed: Option<LogicalKey>) -> Option<Direction> {
        let primary = self.primary?;
        let Some(secondary) = self.secondary else {
            return Some(primary);
        };
        let preferred = last_pressed
            .filter(|key| keys.is_held(*key))
            .map(LogicalKey::direction)
            .filter(|d| *d == primary || *d == secondary);
        Some(preferred.unwrap_or(primary))
    }
}

/// Per-frame world displacement for the permitted directions.
///
/// `step` is the axial distance; with two permitted directions each axis
/// travels `step / √2`.
pub fn world_delta(permitted: &[Direction], step: f32) -> Vec2 {
    let step = if permitted.len() == 2 {
        step * std::f32::consts::FRAC_1_SQRT_2
    } else {
        step
    };
    let actor_delta = permitted
        .iter()
        .fold(Vec2::ZERO, |acc, d| acc + d.unit() * step);
    -actor_delta
}

/// Split `step` into equal sub-steps no longer than [`COLLISION_PROBE`].
///
/// Returns the sub-step count and length. A non-positive step yields a
/// single empty sub-step.
pub fn sub_steps(step: f32) -> (u32, f32) {
    if step <= COLLISION_PROBE {
        return (1, step.max(0.0));
    }
    let count = (step / COLLISION_PROBE).ceil() as u32;
    (count, step / count as f32)
}

/// Resolve input into movement, apply it subject to collision, and update
/// the actor's facing.
pub fn exploration_movement(
    input: Res<InputState>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    registry: Res<ColliderRegistry>,
    latch: Res<TriggerLatch>,
    mut actor: Query<(&MapPosition, &mut ActorSprite), With<Actor>>,
    mut world_positions: Query<&mut MapPosition, Without<Actor>>,
) {
    let Ok((actor_pos, mut sprite)) = actor.single_mut() else {
        return;
    };

    if !input.any_pressed() {
        sprite.rest();
        return;
    }

    let keys = input.snapshot();
    let intent = MovementIntent::from_snapshot(&keys);
    if intent.primary.is_none() {
        return;
    }

    let actor_xy = actor_pos.xy();
    let boundaries: Vec<Vec2> = registry
        .boundaries()
        .iter()
        .filter_map(|e| world_positions.get(*e).ok())
        .map(|p| p.xy())
        .collect();
    let entries: Vec<(EntryId, Vec2)> = registry
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(i, e)| world_positions.get(*e).ok().map(|p| (EntryId(i), p.xy())))
        .collect();

    let (count, step) = sub_steps(config.speed * time.frame_factor());
    let mut travelled = Vec2::ZERO;
    for _ in 0..count {
        let permitted: ArrayVec<Direction, 2> = intent
            .candidates()
            .into_iter()
            .filter(|d| {
                !check_boundary_collision(
                    actor_xy,
                    *d,
                    boundaries.iter().map(|b| *b + travelled),
                )
            })
            .collect();
        let delta = world_delta(&permitted, step);
        if delta == Vec2::ZERO {
            break;
        }
        travelled += delta;

        let landed = check_entry_overlap(
            actor_xy,
            entries.iter().map(|(id, p)| (*id, *p + travelled)),
        );
        if landed.is_some() && landed != latch.last_triggered {
            trace!("Sub-step landed on entry {:?}; stopping early", landed);
            break;
        }
    }

    if travelled != Vec2::ZERO {
        trace!("Scrolling world by {:?} in up to {} sub-steps", travelled, count);
        for mut position in world_positions.iter_mut() {
            position.translate(travelled);
        }
    }

    if let Some(facing) = intent.facing(&keys, input.last_pressed()) {
        sprite.apply_facing(facing, time.elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(up: bool, left: bool, down: bool, right: bool) -> KeySnapshot {
        KeySnapshot {
            up,
            left,
            down,
            right,
        }
    }

    #[test]
    fn test_vertical_is_primary() {
        let intent = MovementIntent::from_snapshot(&keys(true, false, false, true));
        assert_eq!(intent.primary, Some(Direction::Up));
        assert_eq!(intent.secondary, Some(Direction::Right));
        assert!(intent.is_diagonal());
    }

    #[test]
    fn test_horizontal_only_has_no_secondary() {
        let intent = MovementIntent::from_snapshot(&keys(false, true, false, false));
        assert_eq!(intent.primary, Some(Direction::Left));
        assert_eq!(intent.secondary, None);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let intent = MovementIntent::from_snapshot(&keys(true, false, true, false));
        assert_eq!(intent, MovementIntent::default());

        let intent = MovementIntent::from_snapshot(&keys(true, true, true, false));
        assert_eq!(intent.primary, Some(Direction::Left));
        assert_eq!(intent.secondary, None);
    }

    #[test]
    fn test_facing_uses_last_pressed_when_diagonal() {
        let k = keys(true, false, false, true);
        let intent = MovementIntent::from_snapshot(&k);
        assert_eq!(
            intent.facing(&k, Some(LogicalKey::Right)),
            Some(Direction::Right)
        );
        assert_eq!(intent.facing(&k, Some(LogicalKey::Up)), Some(Direction::Up));
        // Last pressed key no longer held: fall back to primary.
        assert_eq!(intent.facing(&k, Some(LogicalKey::Left)), Some(Direction::Up));
        assert_eq!(intent.facing(&k, None), Some(Direction::Up));
    }

    #[test]
    fn test_facing_single_axis_ignores_last_pressed() {
        let k = keys(false, false, true, false);
        let intent = MovementIntent::from_snapshot(&k);
        assert_eq!(
            intent.facing(&k, Some(LogicalKey::Right)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_world_delta_axial() {
        assert_eq!(world_delta(&[Direction::Right], 3.0), Vec2::new(-3.0, 0.0));
        assert_eq!(world_delta(&[Direction::Up], 3.0), Vec2::new(0.0, -3.0));
        assert_eq!(world_delta(&[], 3.0), Vec2::ZERO);
    }

    #[test]
    fn test_world_delta_diagonal_is_normalized() {
        let delta = world_delta(&[Direction::Up, Direction::Right], 3.0);
        let expected = 3.0 * 0.70711;
        assert!((delta.x + expected).abs() < 1e-4);
        assert!((delta.y + expected).abs() < 1e-4);
        assert!((delta.length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_sub_steps_never_exceed_probe() {
        assert_eq!(sub_steps(3.0), (1, 3.0));
        assert_eq!(sub_steps(1.5), (1, 1.5));
        assert_eq!(sub_steps(-2.0), (1, 0.0));

        let (count, step) = sub_steps(9.0);
        assert_eq!(count, 3);
        assert!((step - 3.0).abs() < 1e-6);

        let (count, step) = sub_steps(10.0);
        assert_eq!(count, 4);
        assert!(step <= COLLISION_PROBE);
        assert!((step * count as f32 - 10.0).abs() < 1e-4);
    }
}
