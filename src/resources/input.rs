//! Per-frame directional input resource.
//!
//! Captures the four logical movement keys and exposes them to systems via
//! the [`InputState`] resource. Hosts feed raw key transitions through
//! [`InputState::set_pressed`] or [`InputState::handle_raw_key`]; the
//! simulation polls the state once per frame.
use bevy_ecs::prelude::*;

use crate::components::direction::Direction;

/// The four logical keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up,
    Left,
    Down,
    Right,
}

impl LogicalKey {
    /// Map a raw host key name to a logical key. Unknown names yield `None`.
    ///
    /// Accepts DOM-style codes (`KeyW`, `ArrowUp`) and bare letters.
    pub fn from_key_name(name: &str) -> Option<LogicalKey> {
        match name {
            "KeyW" | "w" | "W" | "ArrowUp" | "Up" => Some(LogicalKey::Up),
            "KeyA" | "a" | "A" | "ArrowLeft" | "Left" => Some(LogicalKey::Left),
            "KeyS" | "s" | "S" | "ArrowDown" | "Down" => Some(LogicalKey::Down),
            "KeyD" | "d" | "D" | "ArrowRight" | "Right" => Some(LogicalKey::Right),
            _ => None,
        }
    }

    /// Direction of travel this key requests.
    pub fn direction(self) -> Direction {
        match self {
            LogicalKey::Up => Direction::Up,
            LogicalKey::Left => Direction::Left,
            LogicalKey::Down => Direction::Down,
            LogicalKey::Right => Direction::Right,
        }
    }
}

/// Held state of the four logical keys at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub up: bool,
    pub left: bool,
    pub down: bool,
    pub right: bool,
}

impl KeySnapshot {
    /// Net vertical intent: up is +1, down is -1.
    pub fn net_y(&self) -> i8 {
        self.up as i8 - self.down as i8
    }

    /// Net horizontal intent: right is +1, left is -1.
    pub fn net_x(&self) -> i8 {
        self.right as i8 - self.left as i8
    }

    pub fn is_held(&self, key: LogicalKey) -> bool {
        match key {
            LogicalKey::Up => self.up,
            LogicalKey::Left => self.left,
            LogicalKey::Down => self.down,
            LogicalKey::Right => self.right,
        }
    }
}

/// Resource capturing the directional keys relevant to exploration.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    keys: KeySnapshot,
    last_pressed: Option<LogicalKey>,
}

impl InputState {
    fn held_mut(&mut self, key: LogicalKey) -> &mut bool {
        match key {
            LogicalKey::Up => &mut self.keys.up,
            LogicalKey::Left => &mut self.keys.left,
            LogicalKey::Down => &mut self.keys.down,
            LogicalKey::Right => &mut self.keys.right,
        }
    }

    /// Record a raw key transition. Key-down events, including host
    /// auto-repeat, also update [`InputState::last_pressed`]; releases never do.
    pub fn set_pressed(&mut self, key: LogicalKey, pressed: bool) {
        *self.held_mut(key) = pressed;
        if pressed {
            self.last_pressed = Some(key);
        }
    }

    /// Record a transition for a raw host key name; unknown keys are ignored.
    pub fn handle_raw_key(&mut self, name: &str, pressed: bool) {
        if let Some(key) = LogicalKey::from_key_name(name) {
            self.set_pressed(key, pressed);
        }
    }

    pub fn is_pressed(&self, key: LogicalKey) -> bool {
        self.keys.is_held(key)
    }

    pub fn any_pressed(&self) -> bool {
        self.keys != KeySnapshot::default()
    }

    pub fn snapshot(&self) -> KeySnapshot {
        self.keys
    }

    /// Most recent key to go down, used to break facing ties.
    pub fn last_pressed(&self) -> Option<LogicalKey> {
        self.last_pressed
    }
}
