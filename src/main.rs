//! Overworld main entry point.
//!
//! A top-down exploration scene written in Rust using:
//! - **bevy_ecs** for the entity-component-system simulation
//! - **raylib** (optional `raylib` feature) for the windowed host
//!
//! The actor stays fixed while the world scrolls around it. Boundaries block
//! movement; stepping onto an entry plays a short transition and opens the
//! overlay for that entry's category until it is dismissed.
//!
//! # Running
//!
//! ```sh
//! # headless, driven by a script
//! cargo run --release -- --headless --script assets/scripts/tour.txt
//! # windowed
//! cargo run --release --features raylib
//! ```

// Do not create console on Windows
#![cfg_attr(
    all(target_os = "windows", feature = "raylib"),
    windows_subsystem = "windows"
)]

#[cfg(feature = "raylib")]
mod window;

use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::Receiver;
use log::{info, warn};
use thiserror::Error;

use overworld::game::{SetupError, Simulation};
use overworld::resources::gameconfig::{ConfigError, GameConfig};
use overworld::resources::scenebridge::SceneNotification;
use overworld::scripted_input::{ScriptError, ScriptedInput};
use overworld::systems::render::LogRenderer;

/// Frames run headless when neither a script nor a frame count is given.
const DEFAULT_HEADLESS_FRAMES: u64 = 600;

/// Overworld exploration scene
#[derive(Parser)]
#[command(version, about = "Top-down tile exploration scene with category overlays")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Tile layout JSON; overrides the layout named in the configuration.
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,

    /// Input script for headless runs.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Run without a window.
    #[arg(long)]
    headless: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = GameConfig::with_path(&cli.config);
    match config.load_from_file() {
        Ok(()) => {}
        // A missing file just means defaults; bad values are still fatal.
        Err(ConfigError::Load(e)) => warn!("Using default configuration: {}", e),
        Err(e) => return Err(e),
    }
    if let Some(layout) = &cli.layout {
        config.layout_path = layout.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(&cli)?;
    let target_fps = config.target_fps.max(1);
    let mut sim = Simulation::from_config(config)?;

    if cli.headless || cli.script.is_some() {
        return run_headless(&mut sim, &cli, target_fps);
    }

    #[cfg(feature = "raylib")]
    {
        window::run(&mut sim);
        return Ok(());
    }
    #[cfg(not(feature = "raylib"))]
    {
        warn!("Built without the raylib feature; running headless");
        run_headless(&mut sim, &cli, target_fps)
    }
}

fn log_notifications(rx: &Receiver<SceneNotification>) {
    for notification in rx.try_iter() {
        info!(
            "Overlay UI received {:?} (entry at {:?})",
            notification.state, notification.entry_position
        );
    }
}

fn run_headless(sim: &mut Simulation, cli: &Cli, target_fps: u32) -> Result<(), AppError> {
    let mut script = cli
        .script
        .as_ref()
        .map(ScriptedInput::from_file)
        .transpose()?;
    let limit = match (&script, cli.frames) {
        (_, Some(n)) => Some(n),
        (Some(_), None) => None,
        (None, None) => Some(DEFAULT_HEADLESS_FRAMES),
    };

    let notifications = sim.subscribe();
    let dt = 1.0 / target_fps as f32;
    let mut renderer = LogRenderer;
    let mut frames: u64 = 0;

    loop {
        if limit.is_some_and(|n| frames >= n) {
            break;
        }
        if let Some(script) = script.as_mut()
            && !script.drive(sim)
        {
            break;
        }
        sim.frame(dt, &mut renderer);
        log_notifications(&notifications);
        frames += 1;
    }

    info!(
        "Headless run finished after {} frames: state {:?}, actor at {:?}, background at {:?}",
        frames,
        sim.state(),
        sim.actor_position(),
        sim.frame_view().background
    );
    Ok(())
}
