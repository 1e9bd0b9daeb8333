//! Rendering handoff.
//!
//! The simulation never draws. [`collect_frame_view`] copies everything a
//! renderer needs into the [`FrameView`] resource at the end of every frame,
//! suspended or not, and the host passes it to a [`Renderer`].
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::actor::{Actor, ActorSprite};
use crate::components::background::Background;
use crate::components::collider::{Entry, EntryVisual};
use crate::components::mapposition::MapPosition;
use crate::resources::colliderregistry::ColliderRegistry;
use crate::resources::frameview::{ActorView, EntryView, FrameView};
use crate::resources::gamestate::GameState;
use crate::resources::transition::TransitionSequence;
use crate::resources::worldtime::WorldTime;

/// Consumer of per-frame world state. Called once per frame; must not block.
pub trait Renderer {
    fn render(&mut self, view: &FrameView);
}

/// Renderer that only traces each frame through `log`.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, view: &FrameView) {
        if let Some(actor) = &view.actor {
            trace!(
                "frame {} {:?} suspended={} actor={:?} facing={} frame={} background={:?}",
                view.frame,
                view.state,
                view.suspended,
                actor.position,
                actor.facing.name(),
                actor.frame,
                view.background
            );
        }
    }
}

impl<F: FnMut(&FrameView)> Renderer for F {
    fn render(&mut self, view: &FrameView) {
        self(view)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn collect_frame_view(
    mut view: ResMut<FrameView>,
    time: Res<WorldTime>,
    game_state: Res<GameState>,
    sequence: Res<TransitionSequence>,
    registry: Res<ColliderRegistry>,
    actor: Query<(&MapPosition, &ActorSprite), With<Actor>>,
    background: Query<&MapPosition, With<Background>>,
    positions: Query<&MapPosition>,
    entries: Query<(&MapPosition, &Entry, &EntryVisual)>,
) {
    view.frame = time.frame_count;
    view.state = *game_state.get();
    view.suspended = sequence.is_suspended();
    view.actor = actor.single().ok().map(|(pos, sprite)| ActorView {
        position: pos.pos,
        facing: sprite.facing,
        frame: sprite.frame,
        frame_uv: sprite.frame_uv(),
    });
    view.background = background.single().ok().map(|p| p.pos);

    view.boundaries.clear();
    view.boundaries.extend(
        registry
            .boundaries()
            .iter()
            .filter_map(|e| positions.get(*e).ok())
            .map(|p| p.pos),
    );

    view.entries.clear();
    view.entries.extend(
        registry
            .entries()
            .iter()
            .filter_map(|e| entries.get(*e).ok())
            .map(|(pos, entry, visual)| EntryView {
                id: entry.id,
                category: entry.category,
                position: pos.pos,
                opacity: visual.opacity,
                scale: visual.scale,
            }),
    );
}
