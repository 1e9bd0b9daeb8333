//! Simulation setup and the per-frame driver.
//!
//! [`Simulation`] owns the ECS [`World`] and the frame [`Schedule`]. Hosts
//! feed it key transitions, call [`Simulation::frame`] once per rendered
//! frame and hand the resulting [`FrameView`] to a [`Renderer`]. The overlay
//! UI talks to it only through the [`SceneBridge`] channels.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use glam::Vec3;
use log::info;
use thiserror::Error;

use crate::components::actor::{Actor, ActorSprite};
use crate::components::background::Background;
use crate::components::boxcollider::ACTOR_FOOTPRINT;
use crate::components::mapposition::MapPosition;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::resources::colliderregistry::ColliderRegistry;
use crate::resources::frameview::FrameView;
use crate::resources::gameconfig::{ConfigError, GameConfig};
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::input::{InputState, LogicalKey};
use crate::resources::scenebridge::{SceneBridge, SceneCommand, SceneNotification};
use crate::resources::tilemap::{LayoutError, TileLayout};
use crate::resources::transition::{TransitionSequence, TriggerLatch};
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::entry_trigger_system;
use crate::systems::gamestate::{simulation_is_live, transition_in_flight};
use crate::systems::movement::exploration_movement;
use crate::systems::render::{Renderer, collect_frame_view};
use crate::systems::restore::{RestoreOutcome, restore_position};
use crate::systems::time::update_world_time;
use crate::systems::transition::{advance_transition_system, begin_transition_observer};
use crate::systems::tween::{tween_opacity_system, tween_walk_forward_system};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Build the world from a configuration and a tile layout.
    pub fn new(config: GameConfig, layout: &TileLayout) -> Result<Self, SetupError> {
        layout.validate()?;
        if config.categories.is_empty() {
            return Err(ConfigError::NoCategories.into());
        }

        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(InputState::default());
        world.insert_resource(GameState::new());
        world.insert_resource(TransitionSequence::default());
        world.insert_resource(TriggerLatch::default());
        world.insert_resource(SceneBridge::default());
        world.insert_resource(FrameView::default());

        let registry = ColliderRegistry::build(&mut world, layout, &config);
        world.insert_resource(registry);

        world.spawn((Background, MapPosition::new(0.0, 0.0)));
        let start = config.player_start;
        world.spawn((
            Actor,
            MapPosition::new(start.x, start.y).with_z(start.z),
            ACTOR_FOOTPRINT,
            ActorSprite::new(config.frame_columns, config.frame_rows),
        ));
        world.insert_resource(config);

        world.spawn(Observer::new(observe_gamestate_change_event));
        world.spawn(Observer::new(begin_transition_observer));
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                (tween_walk_forward_system, tween_opacity_system),
                advance_transition_system.run_if(transition_in_flight),
                exploration_movement.run_if(simulation_is_live),
                entry_trigger_system.run_if(simulation_is_live),
                collect_frame_view,
            )
                .chain(),
        );

        info!("Simulation ready");
        Ok(Simulation { world, schedule })
    }

    /// Build the world from a configuration, loading the layout it points to.
    pub fn from_config(config: GameConfig) -> Result<Self, SetupError> {
        let layout = TileLayout::load_from_file(&config.layout_path)?;
        Self::new(config, &layout)
    }

    /// Advance one host frame of `dt` seconds and hand the result to `renderer`.
    ///
    /// Pending UI commands are applied first, so a dismissal sent between
    /// frames is visible in this frame's view.
    pub fn frame(&mut self, dt: f32, renderer: &mut impl Renderer) {
        let pending: Vec<SceneCommand> = self
            .world
            .resource::<SceneBridge>()
            .rx_cmd
            .try_iter()
            .collect();
        for command in pending {
            match command {
                SceneCommand::ReturnToMap => {
                    self.restore_position();
                }
            }
        }

        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
        renderer.render(self.world.resource::<FrameView>());
    }

    pub fn press(&mut self, key: LogicalKey) {
        self.world.resource_mut::<InputState>().set_pressed(key, true);
    }

    pub fn release(&mut self, key: LogicalKey) {
        self.world.resource_mut::<InputState>().set_pressed(key, false);
    }

    /// Forward a raw host key transition; unknown key names are ignored.
    pub fn handle_raw_key(&mut self, name: &str, pressed: bool) {
        self.world
            .resource_mut::<InputState>()
            .handle_raw_key(name, pressed);
    }

    /// Restore the map after an overlay is dismissed. No-op without a
    /// saved snapshot.
    pub fn restore_position(&mut self) -> Option<RestoreOutcome> {
        restore_position(&mut self.world)
    }

    /// Register the single scene-change subscriber, replacing any previous one.
    pub fn subscribe(&mut self) -> Receiver<SceneNotification> {
        self.world.resource_mut::<SceneBridge>().subscribe()
    }

    /// Sender the overlay UI uses to ask for a return to the map.
    pub fn command_sender(&self) -> Sender<SceneCommand> {
        self.world.resource::<SceneBridge>().tx_cmd.clone()
    }

    pub fn input(&self) -> &InputState {
        self.world.resource::<InputState>()
    }

    pub fn state(&self) -> GameStates {
        *self.world.resource::<GameState>().get()
    }

    pub fn is_suspended(&self) -> bool {
        self.world.resource::<TransitionSequence>().is_suspended()
    }

    pub fn frame_view(&self) -> &FrameView {
        self.world.resource::<FrameView>()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn registry(&self) -> &ColliderRegistry {
        self.world.resource::<ColliderRegistry>()
    }

    pub fn actor_position(&mut self) -> Option<Vec3> {
        self.world
            .query_filtered::<&MapPosition, With<Actor>>()
            .single(&self.world)
            .ok()
            .map(|p| p.pos)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilemap::ENTRY;

    #[test]
    fn test_new_rejects_ragged_layout() {
        let mut layout = TileLayout::new(4);
        layout.boundaries = vec![0; 6];
        assert!(matches!(
            Simulation::new(GameConfig::new(), &layout),
            Err(SetupError::Layout(LayoutError::RaggedLayer { .. }))
        ));
    }

    #[test]
    fn test_new_rejects_empty_rotation() {
        let mut config = GameConfig::new();
        config.categories.clear();
        assert!(matches!(
            Simulation::new(config, &TileLayout::new(4)),
            Err(SetupError::Config(ConfigError::NoCategories))
        ));
    }

    #[test]
    fn test_new_spawns_actor_and_colliders() {
        let mut layout = TileLayout::new(4);
        layout.entries = vec![0, ENTRY, 0, ENTRY];
        let mut sim = Simulation::new(GameConfig::new(), &layout).unwrap();
        assert_eq!(sim.registry().entries().len(), 2);
        assert_eq!(sim.actor_position(), Some(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(sim.state(), GameStates::Exploring);
        assert!(!sim.is_suspended());
    }
}
