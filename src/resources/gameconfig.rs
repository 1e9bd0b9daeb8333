//! Game configuration resource.
//!
//! Manages tuning values loaded from an INI configuration file. Provides
//! defaults matching the reference layout so the simulation runs without a
//! file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [player]
//! speed = 3.0
//! walk_distance = 8.0
//! start_x = 0.0
//! start_y = 0.0
//! start_z = 1.0
//! frame_columns = 4
//! frame_rows = 1
//!
//! [world]
//! layout = ./assets/maps/overworld.json
//! cell_size = 64
//! origin_x = -1526
//! origin_y = 760
//! tile_scale = 4
//! categories = work, personal, hobbies, random
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::{Vec2, Vec3};
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::collider::{EntryCategory, UnknownCategory};

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SPEED: f32 = 3.0;
const DEFAULT_WALK_DISTANCE: f32 = 8.0;
const DEFAULT_PLAYER_START: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const DEFAULT_FRAME_COLUMNS: usize = 4;
const DEFAULT_FRAME_ROWS: usize = 1;
const DEFAULT_CELL_SIZE: f32 = 64.0;
const DEFAULT_GRID_ORIGIN: Vec2 = Vec2::new(-1526.0, 760.0);
const DEFAULT_TILE_SCALE: f32 = 4.0;
const DEFAULT_LAYOUT_PATH: &str = "./assets/maps/overworld.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),
    #[error("failed to save config file: {0}")]
    Save(#[from] std::io::Error),
    #[error("invalid [world] categories: {0}")]
    Category(#[from] UnknownCategory),
    #[error("[world] categories must name at least one category")]
    NoCategories,
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second of the windowed host.
    pub target_fps: u32,
    /// Distance the world scrolls per reference frame.
    pub speed: f32,
    /// Distance the actor walks into an entry before the overlay opens.
    pub walk_distance: f32,
    /// Initial actor position.
    pub player_start: Vec3,
    pub frame_columns: usize,
    pub frame_rows: usize,
    /// Side of one layout cell in world units.
    pub cell_size: f32,
    /// World position of the top-left layout cell.
    pub grid_origin: Vec2,
    /// Visual scale applied to collider drawables.
    pub tile_scale: f32,
    /// Round-robin order in which entry categories are assigned.
    pub categories: Vec<EntryCategory>,
    /// Path to the tile layout JSON.
    pub layout_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            speed: DEFAULT_SPEED,
            walk_distance: DEFAULT_WALK_DISTANCE,
            player_start: DEFAULT_PLAYER_START,
            frame_columns: DEFAULT_FRAME_COLUMNS,
            frame_rows: DEFAULT_FRAME_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            grid_origin: DEFAULT_GRID_ORIGIN,
            tile_scale: DEFAULT_TILE_SCALE,
            categories: EntryCategory::ROTATION.to_vec(),
            layout_path: PathBuf::from(DEFAULT_LAYOUT_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or unreadable numeric values retain their current values.
    /// An unknown category name is an error.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(ConfigError::Load)?;
        self.apply(&config)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(ConfigError::Load)?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }

        // [player] section
        if let Some(speed) = float("player", "speed") {
            self.speed = speed;
        }
        if let Some(distance) = float("player", "walk_distance") {
            self.walk_distance = distance;
        }
        if let Some(x) = float("player", "start_x") {
            self.player_start.x = x;
        }
        if let Some(y) = float("player", "start_y") {
            self.player_start.y = y;
        }
        if let Some(z) = float("player", "start_z") {
            self.player_start.z = z;
        }
        if let Some(columns) = uint("player", "frame_columns") {
            self.frame_columns = columns as usize;
        }
        if let Some(rows) = uint("player", "frame_rows") {
            self.frame_rows = rows as usize;
        }

        // [world] section
        if let Some(path) = config.get("world", "layout") {
            self.layout_path = PathBuf::from(path);
        }
        if let Some(cell) = float("world", "cell_size") {
            self.cell_size = cell;
        }
        if let Some(x) = float("world", "origin_x") {
            self.grid_origin.x = x;
        }
        if let Some(y) = float("world", "origin_y") {
            self.grid_origin.y = y;
        }
        if let Some(scale) = float("world", "tile_scale") {
            self.tile_scale = scale;
        }
        if let Some(list) = config.get("world", "categories") {
            self.categories = parse_categories(&list)?;
        }

        info!(
            "Config: speed={}, walk_distance={}, start={:?}, grid origin={:?}, cell={}, categories={:?}",
            self.speed,
            self.walk_distance,
            self.player_start,
            self.grid_origin,
            self.cell_size,
            self.categories
        );
        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set("player", "speed", Some(self.speed.to_string()));
        config.set("player", "walk_distance", Some(self.walk_distance.to_string()));
        config.set("player", "start_x", Some(self.player_start.x.to_string()));
        config.set("player", "start_y", Some(self.player_start.y.to_string()));
        config.set("player", "start_z", Some(self.player_start.z.to_string()));
        config.set("player", "frame_columns", Some(self.frame_columns.to_string()));
        config.set("player", "frame_rows", Some(self.frame_rows.to_string()));

        config.set(
            "world",
            "layout",
            Some(self.layout_path.display().to_string()),
        );
        config.set("world", "cell_size", Some(self.cell_size.to_string()));
        config.set("world", "origin_x", Some(self.grid_origin.x.to_string()));
        config.set("world", "origin_y", Some(self.grid_origin.y.to_string()));
        config.set("world", "tile_scale", Some(self.tile_scale.to_string()));
        let categories: Vec<&str> = self.categories.iter().map(|c| c.as_str()).collect();
        config.set("world", "categories", Some(categories.join(", ")));

        config.write(&self.config_path)?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Category for the `n`-th entry found in scan order.
    ///
    /// Falls back to the default rotation when none is configured.
    pub fn category_for(&self, n: usize) -> EntryCategory {
        match self.categories.len() {
            0 => EntryCategory::ROTATION[n % EntryCategory::ROTATION.len()],
            len => self.categories[n % len],
        }
    }
}

fn parse_categories(list: &str) -> Result<Vec<EntryCategory>, ConfigError> {
    let categories = list
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<EntryCategory>, _>>()?;
    if categories.is_empty() {
        return Err(ConfigError::NoCategories);
    }
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_layout() {
        let config = GameConfig::new();
        assert_eq!(config.cell_size, 64.0);
        assert_eq!(config.grid_origin, Vec2::new(-1526.0, 760.0));
        assert_eq!(config.categories, EntryCategory::ROTATION.to_vec());
        assert_eq!(config.category_for(0), EntryCategory::Work);
        assert_eq!(config.category_for(5), EntryCategory::Personal);
    }

    #[test]
    fn test_load_from_str_overrides_and_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[player]\nspeed = 4.5\n\n[world]\norigin_x = -100\n")
            .unwrap();
        assert_eq!(config.speed, 4.5);
        assert_eq!(config.grid_origin, Vec2::new(-100.0, 760.0));
        assert_eq!(config.walk_distance, 8.0);
    }

    #[test]
    fn test_custom_category_rotation() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[world]\ncategories = random, work\n")
            .unwrap();
        assert_eq!(
            config.categories,
            vec![EntryCategory::Random, EntryCategory::Work]
        );
        assert_eq!(config.category_for(3), EntryCategory::Work);
    }

    #[test]
    fn test_unknown_category_is_a_startup_error() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[world]\ncategories = work, blog\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Category(_)));
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let path = std::env::temp_dir().join(format!("overworld-config-{}.ini", std::process::id()));
        let mut config = GameConfig::with_path(&path);
        config.speed = 5.0;
        config.player_start = Vec3::new(12.0, -4.0, 1.0);
        config.categories = vec![EntryCategory::Hobbies];
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.speed, 5.0);
        assert_eq!(loaded.player_start, Vec3::new(12.0, -4.0, 1.0));
        assert_eq!(loaded.categories, vec![EntryCategory::Hobbies]);
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let mut config = GameConfig::with_path("./does/not/exist.ini");
        assert!(matches!(config.load_from_file(), Err(ConfigError::Load(_))));
        assert_eq!(config.speed, 3.0);
    }

    #[test]
    fn test_empty_category_list_is_rejected() {
        let mut config = GameConfig::new();
        let err = config.load_from_str("[world]\ncategories = ,\n").unwrap_err();
        assert!(matches!(err, ConfigError::NoCategories));
    }
}
