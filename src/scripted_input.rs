//! Scripted input for headless runs.
//!
//! A script is a text file with one command per line:
//!
//! ```text
//! # walk up-right for half a second, then wait
//! wd 30
//! . 10
//! !
//! ```
//!
//! - letters `w`, `a`, `s`, `d` name the keys held for the step
//! - an optional trailing number repeats the step for that many frames
//!   (default 1)
//! - `.` holds nothing
//! - `!` dismisses the open overlay and takes no frame of its own
//! - blank lines and lines starting with `#` are skipped
use std::fs;
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::game::Simulation;
use crate::resources::input::{KeySnapshot, LogicalKey};
use crate::resources::scenebridge::SceneCommand;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("line {line}: invalid frame count {text:?}")]
    FrameCount { line: usize, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Hold { keys: KeySnapshot, frames: u32 },
    Dismiss,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    current: usize,
    frames_done: u32,
}

fn char_to_key(c: char) -> Option<LogicalKey> {
    match c {
        'w' | 'W' => Some(LogicalKey::Up),
        'a' | 'A' => Some(LogicalKey::Left),
        's' | 'S' => Some(LogicalKey::Down),
        'd' | 'D' => Some(LogicalKey::Right),
        _ => None,
    }
}

fn hold(keys: &mut KeySnapshot, key: LogicalKey) {
    match key {
        LogicalKey::Up => keys.up = true,
        LogicalKey::Left => keys.left = true,
        LogicalKey::Down => keys.down = true,
        LogicalKey::Right => keys.right = true,
    }
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if trimmed == "!" {
                steps.push(ScriptStep::Dismiss);
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let keys_part = parts.next().unwrap_or_default();
            let frames = match parts.next() {
                Some(count) => count.parse::<u32>().map_err(|_| ScriptError::FrameCount {
                    line: index + 1,
                    text: count.to_string(),
                })?,
                None => 1,
            };

            let mut keys = KeySnapshot::default();
            for c in keys_part.chars().filter(|c| *c != '.') {
                match char_to_key(c) {
                    Some(key) => hold(&mut keys, key),
                    None => warn!("Unknown key {:?} in script line {}", c, index + 1),
                }
            }
            steps.push(ScriptStep::Hold { keys, frames });
        }

        Ok(Self {
            steps,
            current: 0,
            frames_done: 0,
        })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.steps.len()
    }

    /// Keys to hold for the next frame, applying any dismissals first.
    ///
    /// Returns `None` once the script is exhausted.
    pub fn next_frame(&mut self, on_dismiss: &mut impl FnMut()) -> Option<KeySnapshot> {
        loop {
            match self.steps.get(self.current).copied()? {
                ScriptStep::Dismiss => {
                    on_dismiss();
                    self.current += 1;
                }
                ScriptStep::Hold { frames, .. } if self.frames_done >= frames => {
                    self.current += 1;
                    self.frames_done = 0;
                }
                ScriptStep::Hold { keys, .. } => {
                    self.frames_done += 1;
                    return Some(keys);
                }
            }
        }
    }

    /// Feed the next frame of the script into `sim` as key transitions.
    ///
    /// Returns `false` once the script is exhausted.
    pub fn drive(&mut self, sim: &mut Simulation) -> bool {
        let sender = sim.command_sender();
        let mut dismiss = || {
            if sender.send(SceneCommand::ReturnToMap).is_err() {
                warn!("Scene command channel closed; dismissal dropped");
            }
        };
        let Some(keys) = self.next_frame(&mut dismiss) else {
            return false;
        };

        for key in [
            LogicalKey::Up,
            LogicalKey::Left,
            LogicalKey::Down,
            LogicalKey::Right,
        ] {
            let wanted = keys.is_held(key);
            if wanted != sim.input().is_pressed(key) {
                if wanted {
                    sim.press(key);
                } else {
                    sim.release(key);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let script = ScriptedInput::parse("# tour\nwd 3\n\n. 2\n!\ns\n").unwrap();
        assert_eq!(
            script.steps(),
            &[
                ScriptStep::Hold {
                    keys: KeySnapshot {
                        up: true,
                        right: true,
                        ..Default::default()
                    },
                    frames: 3,
                },
                ScriptStep::Hold {
                    keys: KeySnapshot::default(),
                    frames: 2,
                },
                ScriptStep::Dismiss,
                ScriptStep::Hold {
                    keys: KeySnapshot {
                        down: true,
                        ..Default::default()
                    },
                    frames: 1,
                },
            ]
        );
    }

    #[test]
    fn test_bad_frame_count_is_an_error() {
        let err = ScriptedInput::parse("w\nd lots\n").unwrap_err();
        assert!(matches!(err, ScriptError::FrameCount { line: 2, .. }));
    }

    #[test]
    fn test_next_frame_expands_counts_and_dismissals() {
        let mut script = ScriptedInput::parse("w 2\n!\n.\n").unwrap();
        let mut dismissals = 0;
        let mut frames = Vec::new();
        while let Some(keys) = script.next_frame(&mut || dismissals += 1) {
            frames.push(keys.up);
        }
        assert_eq!(frames, vec![true, true, false]);
        assert_eq!(dismissals, 1);
        assert!(script.is_finished());
    }
}
