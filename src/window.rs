//! Windowed host built on raylib.
//!
//! Polls WASD and the arrow keys into the simulation, draws the
//! [`FrameView`] with primitive shapes centred on the actor, and shows the
//! open overlay as a banner. Enter or Escape dismisses it.
use log::{info, warn};
use raylib::ffi::KeyboardKey;
use raylib::prelude::*;

use overworld::components::boxcollider::{ACTOR_FOOTPRINT, TILE_FOOTPRINT};
use overworld::game::Simulation;
use overworld::resources::frameview::FrameView;
use overworld::resources::gamestate::GameStates;
use overworld::resources::input::LogicalKey;
use overworld::resources::scenebridge::SceneCommand;

const KEY_BINDINGS: [(KeyboardKey, KeyboardKey, LogicalKey); 4] = [
    (KeyboardKey::KEY_W, KeyboardKey::KEY_UP, LogicalKey::Up),
    (KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT, LogicalKey::Left),
    (KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN, LogicalKey::Down),
    (KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT, LogicalKey::Right),
];

pub fn run(sim: &mut Simulation) {
    let (width, height, fps) = {
        let config = sim.config();
        (config.window_width as i32, config.window_height as i32, config.target_fps)
    };

    let (mut rl, thread) = raylib::init()
        .size(width, height)
        .resizable()
        .title("Overworld")
        .build();
    rl.set_target_fps(fps);
    // Escape dismisses overlays instead of closing the window
    rl.set_exit_key(None);

    let notifications = sim.subscribe();
    let commands = sim.command_sender();

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        for (primary, alternate, key) in KEY_BINDINGS {
            let down = rl.is_key_down(primary) || rl.is_key_down(alternate);
            if down != sim.input().is_pressed(key) {
                if down {
                    sim.press(key);
                } else {
                    sim.release(key);
                }
            }
        }

        let dismiss =
            rl.is_key_pressed(KeyboardKey::KEY_ENTER) || rl.is_key_pressed(KeyboardKey::KEY_ESCAPE);
        if dismiss
            && matches!(sim.state(), GameStates::InOverlay(_))
            && commands.send(SceneCommand::ReturnToMap).is_err()
        {
            warn!("Scene command channel closed; dismissal dropped");
        }

        let screen = (rl.get_screen_width(), rl.get_screen_height());
        let mut d = rl.begin_drawing(&thread);
        sim.frame(dt, &mut |view: &FrameView| draw_view(&mut d, view, screen));

        for notification in notifications.try_iter() {
            info!("Overlay UI received {:?}", notification.state);
        }
    }
}

fn draw_view(d: &mut RaylibDrawHandle, view: &FrameView, (w, h): (i32, i32)) {
    d.clear_background(Color::new(58, 110, 64, 255));

    let Some(actor) = view.actor else {
        return;
    };
    let centre = (w / 2, h / 2);
    // World Y grows upward, screen Y grows downward.
    let to_screen = |x: f32, y: f32, height: f32| {
        (
            centre.0 + (x - actor.position.x) as i32,
            centre.1 - (y - actor.position.y + height) as i32,
        )
    };

    if let Some(bg) = view.background {
        let (x, y) = to_screen(bg.x, bg.y, 0.0);
        d.draw_line(x - 8, y, x + 8, y, Color::DARKGREEN);
        d.draw_line(x, y - 8, x, y + 8, Color::DARKGREEN);
    }

    let tile = TILE_FOOTPRINT.size;
    for b in &view.boundaries {
        let (x, y) = to_screen(b.x, b.y, tile.y);
        d.draw_rectangle(x, y, tile.x as i32, tile.y as i32, Color::DARKGRAY);
    }
    for e in &view.entries {
        let (x, y) = to_screen(e.position.x, e.position.y, tile.y);
        d.draw_rectangle_lines(x, y, tile.x as i32, tile.y as i32, Color::GOLD);
        let alpha = (e.opacity.clamp(0.0, 1.0) * 255.0) as u8;
        d.draw_rectangle(x, y, tile.x as i32, tile.y as i32, Color::new(255, 203, 0, alpha));
        d.draw_text(e.category.as_str(), x + 2, y + 2, 10, Color::BLACK);
    }

    let size = ACTOR_FOOTPRINT.size;
    let (x, y) = to_screen(actor.position.x, actor.position.y, size.y);
    d.draw_rectangle(x, y, size.x as i32, size.y as i32, Color::MAROON);
    d.draw_text(
        &format!("{} {}", actor.facing.name(), actor.frame),
        x,
        y - 12,
        10,
        Color::WHITE,
    );

    if let GameStates::InOverlay(category) = view.state {
        d.draw_rectangle(0, h - 60, w, 60, Color::new(0, 0, 0, 200));
        d.draw_text(
            &format!("{category} - press Enter to return"),
            20,
            h - 40,
            20,
            Color::RAYWHITE,
        );
    }
}
