use bevy_ecs::prelude::Component;

/// Marker for the scrolling world background. Its drawable is owned by the
/// host; the simulation only moves its [`MapPosition`](super::mapposition::MapPosition).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Background;
