//! Cardinal directions used for movement, facing and collision probes.
use glam::{Vec2, Vec3};

/// Magnitude of the probe offset applied to boundaries when testing whether
/// a step in a direction would collide.
pub const COLLISION_PROBE: f32 = 3.0;

/// One of the four cardinal directions. World Y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector of actor travel in world space.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Same as [`Direction::unit`] with a zero z component.
    pub fn unit3(self) -> Vec3 {
        self.unit().extend(0.0)
    }

    /// Offset applied to a boundary position to simulate the world
    /// scrolling one probe step toward the actor.
    pub fn collision_offset(self) -> Vec2 {
        -self.unit() * COLLISION_PROBE
    }

    /// Cardinal direction pointing from `from` to `to`.
    ///
    /// The axis with the larger absolute delta wins; on a tie the vertical
    /// axis is chosen.
    pub fn toward(from: Vec2, to: Vec2) -> Direction {
        let delta = to - from;
        if delta.y.abs() >= delta.x.abs() {
            if delta.y > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_offsets_match_probe_table() {
        assert_eq!(Direction::Up.collision_offset(), Vec2::new(0.0, -3.0));
        assert_eq!(Direction::Down.collision_offset(), Vec2::new(0.0, 3.0));
        assert_eq!(Direction::Left.collision_offset(), Vec2::new(3.0, 0.0));
        assert_eq!(Direction::Right.collision_offset(), Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_toward_prefers_larger_axis() {
        let origin = Vec2::ZERO;
        assert_eq!(Direction::toward(origin, Vec2::new(10.0, 2.0)), Direction::Right);
        assert_eq!(Direction::toward(origin, Vec2::new(-10.0, 2.0)), Direction::Left);
        assert_eq!(Direction::toward(origin, Vec2::new(1.0, 5.0)), Direction::Up);
        assert_eq!(Direction::toward(origin, Vec2::new(1.0, -5.0)), Direction::Down);
    }

    #[test]
    fn test_toward_tie_is_vertical() {
        assert_eq!(
            Direction::toward(Vec2::ZERO, Vec2::new(4.0, 4.0)),
            Direction::Up
        );
        assert_eq!(
            Direction::toward(Vec2::ZERO, Vec2::new(-4.0, -4.0)),
            Direction::Down
        );
    }
}
