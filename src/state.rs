use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::common::{
    ColorRGB, DEFAULT_OUTPUT_PATH, DEFAULT_PALETTE, GRID_SIZE, MAX_CANVAS_EDGE, TILE_SIZE,
};

/// Everything the generator needs to know. Any field missing from a config
/// file falls back to its default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TilesetConfig {
    pub tile_size: u32,
    pub grid_size: u32,
    pub output_path: PathBuf,
    pub palette: Vec<ColorRGB>,
    pub labels: bool,
    pub write_descriptor: bool,
}

impl Default for TilesetConfig {
    fn default() -> Self {
        TilesetConfig {
            tile_size: TILE_SIZE,
            grid_size: GRID_SIZE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            palette: DEFAULT_PALETTE.to_vec(),
            labels: true,
            write_descriptor: false,
        }
    }
}

impl TilesetConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tile_size > 0, "tile size must be positive");
        ensure!(self.grid_size > 0, "grid size must be positive");
        ensure!(!self.palette.is_empty(), "palette must not be empty");
        let edge = self.edge_len()?;
        ensure!(
            edge <= MAX_CANVAS_EDGE,
            "tileset would be {}x{} pixels, limit is {}",
            edge,
            edge,
            MAX_CANVAS_EDGE
        );
        Ok(())
    }

    /// Width (and height) of the whole tileset in pixels.
    pub fn edge_len(&self) -> Result<u32> {
        self.tile_size
            .checked_mul(self.grid_size)
            .context("tileset dimensions overflow")
    }

    pub fn tile_count(&self) -> u32 {
        self.grid_size * self.grid_size
    }

    /// Path of the JSON descriptor written next to the image.
    pub fn descriptor_path(&self) -> PathBuf {
        self.output_path.with_extension("json")
    }
}
