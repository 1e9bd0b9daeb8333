//! Index of every static collider in scan order.
//!
//! The registry is built once from the [`TileLayout`] and never grows or
//! shrinks. A collider's position in these lists is its identity; snapshots
//! store positions in the same order so they can be written back by index.
use bevy_ecs::prelude::*;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::TILE_FOOTPRINT;
use crate::components::collider::{Boundary, Entry, EntryCategory, EntryId, EntryVisual};
use crate::components::mapposition::MapPosition;
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilemap::TileLayout;

#[derive(Resource, Debug, Clone, Default)]
pub struct ColliderRegistry {
    boundaries: Vec<Entity>,
    entries: Vec<Entity>,
}

impl ColliderRegistry {
    /// Spawn one entity per meaningful tile and index them.
    ///
    /// Entry categories are assigned round-robin in scan order.
    pub fn build(world: &mut World, layout: &TileLayout, config: &GameConfig) -> Self {
        let mut registry = ColliderRegistry::default();

        for (index, cell) in layout.barrier_cells().into_iter().enumerate() {
            let pos = cell.world_position(config.cell_size, config.grid_origin);
            let entity = world
                .spawn((MapPosition::new(pos.x, pos.y), TILE_FOOTPRINT, Boundary { index }))
                .id();
            registry.boundaries.push(entity);
        }

        let mut per_category: FxHashMap<EntryCategory, usize> = FxHashMap::default();
        for (index, cell) in layout.entry_cells().into_iter().enumerate() {
            let pos = cell.world_position(config.cell_size, config.grid_origin);
            let category = config.category_for(index);
            *per_category.entry(category).or_default() += 1;
            let entity = world
                .spawn((
                    MapPosition::new(pos.x, pos.y),
                    TILE_FOOTPRINT,
                    Entry {
                        id: EntryId(index),
                        category,
                    },
                    EntryVisual::new(config.tile_scale),
                ))
                .id();
            registry.entries.push(entity);
        }

        info!(
            "Built collider registry: {} boundaries, {} entries {:?}",
            registry.boundaries.len(),
            registry.entries.len(),
            per_category
        );
        registry
    }

    /// Index already spawned colliders, in the given order.
    pub fn from_entities(boundaries: Vec<Entity>, entries: Vec<Entity>) -> Self {
        ColliderRegistry {
            boundaries,
            entries,
        }
    }

    pub fn boundaries(&self) -> &[Entity] {
        &self.boundaries
    }

    pub fn entries(&self) -> &[Entity] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<Entity> {
        self.entries.get(id.0).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilemap::{BARRIER, ENTRY};

    #[test]
    fn test_build_assigns_categories_round_robin() {
        let mut world = World::new();
        let mut layout = TileLayout::new(5);
        layout.boundaries = vec![BARRIER, 0, 0, 0, BARRIER];
        layout.entries = vec![ENTRY, ENTRY, ENTRY, ENTRY, ENTRY];
        let registry = ColliderRegistry::build(&mut world, &layout, &GameConfig::new());

        assert_eq!(registry.boundaries().len(), 2);
        assert_eq!(registry.entries().len(), 5);

        let categories: Vec<EntryCategory> = registry
            .entries()
            .iter()
            .map(|e| world.get::<Entry>(*e).unwrap().category)
            .collect();
        assert_eq!(
            categories,
            vec![
                EntryCategory::Work,
                EntryCategory::Personal,
                EntryCategory::Hobbies,
                EntryCategory::Random,
                EntryCategory::Work,
            ]
        );
    }

    #[test]
    fn test_build_places_colliders_on_grid() {
        let mut world = World::new();
        let mut layout = TileLayout::new(50);
        layout.boundaries = vec![0; 50];
        layout.boundaries[10] = BARRIER;
        let registry = ColliderRegistry::build(&mut world, &layout, &GameConfig::new());

        let pos = world.get::<MapPosition>(registry.boundaries()[0]).unwrap();
        assert_eq!(pos.pos.x, 10.0 * 64.0 - 1526.0);
        assert_eq!(pos.pos.y, 760.0);
        assert_eq!(pos.pos.z, 0.0);
    }
}
