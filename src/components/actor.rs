//! The controllable actor and its directional sprite animation.
//!
//! The actor stays visually fixed while the world scrolls around it. Its
//! [`ActorSprite`] decides which directional sheet is shown and which frame
//! of that sheet is current.
use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::direction::Direction;

/// Seconds between two animation frames while walking.
pub const FRAME_INTERVAL: f32 = 0.1;

/// Marker for the single controllable actor.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Actor;

/// Directional sprite state of the actor.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ActorSprite {
    /// Sheet currently shown.
    pub facing: Direction,
    /// Frame index within the sheet, in `0..frame_count()`.
    pub frame: usize,
    /// Sheet to fall back to when the actor stops moving.
    pub rest_facing: Option<Direction>,
    /// World time (seconds) of the last frame change.
    pub last_frame_change: f32,
    pub columns: usize,
    pub rows: usize,
    pub frame_interval: f32,
}

impl ActorSprite {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            facing: Direction::Down,
            frame: 0,
            rest_facing: None,
            last_frame_change: 0.0,
            columns: columns.max(1),
            rows: rows.max(1),
            frame_interval: FRAME_INTERVAL,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Show the sheet for `direction` and advance the walk cycle if at least
    /// one frame interval elapsed since the last change.
    pub fn apply_facing(&mut self, direction: Direction, now: f32) {
        self.facing = direction;
        if now - self.last_frame_change >= self.frame_interval {
            self.frame = (self.frame + 1) % self.frame_count();
            self.last_frame_change = now;
        }
        self.rest_facing = Some(direction);
    }

    /// Freeze on the first frame of the last walking sheet.
    pub fn rest(&mut self) {
        if let Some(direction) = self.rest_facing {
            self.facing = direction;
            self.frame = 0;
        }
    }

    /// Face down on the first frame, as after returning from an overlay.
    pub fn reset_to_default_facing(&mut self) {
        self.facing = Direction::Down;
        self.rest_facing = Some(Direction::Down);
        self.frame = 0;
    }

    /// Texture offset of the current frame in a sheet laid out
    /// left-to-right, top-to-bottom, with v growing upward.
    pub fn frame_uv(&self) -> Vec2 {
        let frame_w = 1.0 / self.columns as f32;
        let frame_h = 1.0 / self.rows as f32;
        let column = self.frame % self.columns;
        let row = self.frame / self.columns;
        Vec2::new(
            column as f32 * frame_w,
            1.0 - (row as f32 + 1.0) * frame_h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_facing_waits_for_frame_interval() {
        let mut sprite = ActorSprite::new(4, 1);
        sprite.apply_facing(Direction::Left, 0.05);
        assert_eq!(sprite.facing, Direction::Left);
        assert_eq!(sprite.frame, 0);

        sprite.apply_facing(Direction::Left, 0.1);
        assert_eq!(sprite.frame, 1);

        sprite.apply_facing(Direction::Left, 0.15);
        assert_eq!(sprite.frame, 1);
    }

    #[test]
    fn test_apply_facing_wraps_frames() {
        let mut sprite = ActorSprite::new(2, 1);
        sprite.apply_facing(Direction::Up, 0.1);
        sprite.apply_facing(Direction::Up, 0.2);
        assert_eq!(sprite.frame, 0);
    }

    #[test]
    fn test_rest_freezes_last_walking_sheet() {
        let mut sprite = ActorSprite::new(4, 1);
        sprite.apply_facing(Direction::Right, 0.1);
        assert_eq!(sprite.frame, 1);
        sprite.rest();
        assert_eq!(sprite.facing, Direction::Right);
        assert_eq!(sprite.frame, 0);
    }

    #[test]
    fn test_rest_without_history_keeps_pose() {
        let mut sprite = ActorSprite::new(4, 1);
        sprite.frame = 2;
        sprite.rest();
        assert_eq!(sprite.frame, 2);
        assert_eq!(sprite.facing, Direction::Down);
    }

    #[test]
    fn test_reset_to_default_facing() {
        let mut sprite = ActorSprite::new(4, 1);
        sprite.apply_facing(Direction::Up, 0.3);
        sprite.reset_to_default_facing();
        assert_eq!(sprite.facing, Direction::Down);
        assert_eq!(sprite.rest_facing, Some(Direction::Down));
        assert_eq!(sprite.frame, 0);
    }

    #[test]
    fn test_frame_uv_grid() {
        let mut sprite = ActorSprite::new(2, 2);
        assert_eq!(sprite.frame_uv(), Vec2::new(0.0, 0.5));
        sprite.frame = 3;
        assert_eq!(sprite.frame_uv(), Vec2::new(0.5, 0.0));
    }
}
