use bevy_ecs::prelude::Resource;

/// Nominal host frame interval the movement speed is tuned against.
pub const REFERENCE_FRAME_SECONDS: f32 = 1.0 / 60.0;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Ratio of this frame's delta to the reference frame interval.
    pub fn frame_factor(&self) -> f32 {
        self.delta / REFERENCE_FRAME_SECONDS
    }
}
