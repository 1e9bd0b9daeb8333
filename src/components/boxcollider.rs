use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Logical footprint of the actor.
pub const ACTOR_FOOTPRINT: BoxCollider = BoxCollider::new(40.0, 40.0);
/// Logical footprint of every boundary and entry tile.
///
/// Wider and taller than the actor on purpose; these are tuning values and
/// must stay exactly as they are.
pub const TILE_FOOTPRINT: BoxCollider = BoxCollider::new(48.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Inclusive overlap test of this box at `position` against `other` at
    /// `other_position`. Both boxes extend from their position toward +x/+y.
    ///
    /// Not symmetric when the two sizes differ: swapping the operands
    /// changes which extents are used.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        position.x + self.size.x >= other_position.x
            && position.x <= other_position.x + other.size.x
            && position.y <= other_position.y + other.size.y
            && position.y + self.size.y >= other_position.y
    }
}

/// Actor-against-tile overlap using the fixed footprints.
pub fn actor_overlaps_tile(actor: Vec2, tile: Vec2) -> bool {
    ACTOR_FOOTPRINT.overlaps(actor, &TILE_FOOTPRINT, tile)
}
