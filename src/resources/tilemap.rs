//! Static world layout.
//!
//! The layout is two flat, row-major layers of integer tile codes sharing a
//! fixed column count: one for boundaries and one for entries. Only the
//! barrier and entry codes are meaningful; every other code is empty.
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tile code that yields a boundary collider.
pub const BARRIER: i64 = 1025;
/// Tile code that yields an entry collider.
pub const ENTRY: i64 = 1026;
/// Column count of the reference layout.
pub const REFERENCE_COLUMNS: usize = 50;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse layout: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("layout column count must be positive")]
    ZeroColumns,
    #[error("{layer} layer has {len} tiles, not a multiple of {columns} columns")]
    RaggedLayer {
        layer: &'static str,
        len: usize,
        columns: usize,
    },
}

fn default_columns() -> usize {
    REFERENCE_COLUMNS
}

fn default_barrier() -> i64 {
    BARRIER
}

fn default_entry() -> i64 {
    ENTRY
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileLayout {
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_barrier")]
    pub barrier_code: i64,
    #[serde(default = "default_entry")]
    pub entry_code: i64,
    #[serde(default)]
    pub boundaries: Vec<i64>,
    #[serde(default)]
    pub entries: Vec<i64>,
}

/// Grid cell coordinates of a meaningful tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell {
    pub row: usize,
    pub column: usize,
}

impl TileCell {
    /// World position of the cell: columns grow to the right, rows grow
    /// downward while world Y grows upward.
    pub fn world_position(&self, cell_size: f32, origin: Vec2) -> Vec2 {
        Vec2::new(
            self.column as f32 * cell_size + origin.x,
            -(self.row as f32) * cell_size + origin.y,
        )
    }
}

impl TileLayout {
    /// Empty layout with the given column count.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            barrier_code: BARRIER,
            entry_code: ENTRY,
            boundaries: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let layout: TileLayout = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 {
            return Err(LayoutError::ZeroColumns);
        }
        for (layer, tiles) in [("boundaries", &self.boundaries), ("entries", &self.entries)] {
            if tiles.len() % self.columns != 0 {
                return Err(LayoutError::RaggedLayer {
                    layer,
                    len: tiles.len(),
                    columns: self.columns,
                });
            }
        }
        Ok(())
    }

    /// Boundary cells in scan order.
    pub fn barrier_cells(&self) -> Vec<TileCell> {
        scan(&self.boundaries, self.columns, self.barrier_code)
    }

    /// Entry cells in scan order.
    pub fn entry_cells(&self) -> Vec<TileCell> {
        scan(&self.entries, self.columns, self.entry_code)
    }
}

/// Scan `tiles` row by row in chunks of `columns`, keeping cells equal to `code`.
fn scan(tiles: &[i64], columns: usize, code: i64) -> Vec<TileCell> {
    if columns == 0 {
        return Vec::new();
    }
    tiles
        .chunks(columns)
        .enumerate()
        .flat_map(|(row, chunk)| {
            chunk
                .iter()
                .enumerate()
                .filter(move |(_, tile)| **tile == code)
                .map(move |(column, _)| TileCell { row, column })
        })
        .collect()
}
