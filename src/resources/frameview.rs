//! Per-frame snapshot handed to the renderer.
//!
//! Rebuilt every frame by [`collect_frame_view`](crate::systems::render::collect_frame_view),
//! whether or not the simulation is suspended.
use bevy_ecs::prelude::Resource;
use glam::{Vec2, Vec3};

use crate::components::collider::{EntryCategory, EntryId};
use crate::components::direction::Direction;
use crate::resources::gamestate::GameStates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub position: Vec3,
    pub facing: Direction,
    pub frame: usize,
    pub frame_uv: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryView {
    pub id: EntryId,
    pub category: EntryCategory,
    pub position: Vec3,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FrameView {
    pub frame: u64,
    pub state: GameStates,
    pub suspended: bool,
    pub actor: Option<ActorView>,
    pub background: Option<Vec3>,
    pub boundaries: Vec<Vec3>,
    pub entries: Vec<EntryView>,
}
