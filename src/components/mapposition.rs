use bevy_ecs::prelude::Component;
use glam::{Vec2, Vec3};

/// World-space position of an entity. Only x/y take part in collision;
/// z is kept so snapshots restore the full position.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec3,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, 0.0),
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.pos.z = z;
        self
    }

    pub fn xy(&self) -> Vec2 {
        self.pos.truncate()
    }

    /// Shift x/y by `delta`, leaving z untouched.
    pub fn translate(&mut self, delta: Vec2) {
        self.pos.x += delta.x;
        self.pos.y += delta.y;
    }
}
