//! Static world colliders.
//!
//! Colliders are spawned once from the tile layout and never despawned.
//! Their index in [`ColliderRegistry`](crate::resources::colliderregistry::ColliderRegistry)
//! is their identity for the lifetime of the process.
use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Component;
use thiserror::Error;

/// Content category an entry opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryCategory {
    Work,
    Personal,
    Hobbies,
    Random,
}

impl EntryCategory {
    /// Default round-robin order in which categories are assigned.
    pub const ROTATION: [EntryCategory; 4] = [
        EntryCategory::Work,
        EntryCategory::Personal,
        EntryCategory::Hobbies,
        EntryCategory::Random,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryCategory::Work => "work",
            EntryCategory::Personal => "personal",
            EntryCategory::Hobbies => "hobbies",
            EntryCategory::Random => "random",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entry category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for EntryCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(EntryCategory::Work),
            "personal" => Ok(EntryCategory::Personal),
            "hobbies" => Ok(EntryCategory::Hobbies),
            "random" => Ok(EntryCategory::Random),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Stable identifier of an entry: its index in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

/// Immovable obstacle that blocks actor movement.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub index: usize,
}

/// Zone that opens a content overlay when the actor steps on it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub category: EntryCategory,
}

/// Visual feedback handle of an entry. Only the opacity is animated.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EntryVisual {
    pub opacity: f32,
    pub scale: f32,
}

impl EntryVisual {
    pub fn new(scale: f32) -> Self {
        Self {
            opacity: 0.0,
            scale,
        }
    }

    pub fn reset(&mut self) {
        self.opacity = 0.0;
    }
}
