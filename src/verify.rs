// Checks a generated tileset image against the layout it was supposed to have.
use std::{fmt::Display, path::Path};

use anyhow::{ensure, Result};
use log::info;

use crate::{
    canvas::Canvas,
    common::{ColorRGBA, PixelCoord, TileCoord, BORDER_COLOR},
    helpers::opaque,
    persist::load_png,
    state::TilesetConfig,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    Border {
        tile_id: u32,
        x: PixelCoord,
        y: PixelCoord,
        found: ColorRGBA,
    },
    Fill {
        tile_id: u32,
        expected: ColorRGBA,
        found: ColorRGBA,
    },
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mismatch::Border { tile_id, x, y, found } => write!(
                f,
                "tile {}: border pixel ({}, {}) is {:?}, expected {:?}",
                tile_id, x, y, found, BORDER_COLOR
            ),
            Mismatch::Fill {
                tile_id,
                expected,
                found,
            } => write!(f, "tile {}: fill is {:?}, expected {:?}", tile_id, found, expected),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerifyReport {
    pub width: u32,
    pub height: u32,
    pub tiles_checked: u32,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

pub fn verify(path: &Path, config: &TilesetConfig) -> Result<VerifyReport> {
    info!("Verifying {}", path.display());
    let canvas = load_png(path)?;
    verify_canvas(&canvas, config)
}

pub fn verify_canvas(canvas: &Canvas, config: &TilesetConfig) -> Result<VerifyReport> {
    config.validate()?;
    let edge = config.edge_len()?;
    ensure!(
        canvas.width() == edge && canvas.height() == edge,
        "image is {}x{}, expected {}x{}",
        canvas.width(),
        canvas.height(),
        edge,
        edge
    );

    let tile_size = config.tile_size;
    let mut mismatches = vec![];
    for tile_id in 0..config.tile_count() {
        let coord = TileCoord::from_id(tile_id, config.grid_size);
        let (x0, y0) = coord.origin(tile_size);
        let (x1, y1) = (x0 + tile_size - 1, y0 + tile_size - 1);

        // Report at most one bad border pixel per tile.
        let border = (x0..=x1)
            .flat_map(|x| [(x, y0), (x, y1)])
            .chain((y0..=y1).flat_map(|y| [(x0, y), (x1, y)]));
        for (x, y) in border {
            let found = pixel(canvas, x, y);
            if found != BORDER_COLOR {
                mismatches.push(Mismatch::Border {
                    tile_id,
                    x,
                    y,
                    found,
                });
                break;
            }
        }

        if tile_size >= 3 {
            let expected = opaque(config.palette[coord.palette_index(config.palette.len())]);
            let found = pixel(canvas, x0 + 1, y0 + 1);
            if found != expected {
                mismatches.push(Mismatch::Fill {
                    tile_id,
                    expected,
                    found,
                });
            }
        }
    }

    Ok(VerifyReport {
        width: canvas.width(),
        height: canvas.height(),
        tiles_checked: config.tile_count(),
        mismatches,
    })
}

fn pixel(canvas: &Canvas, x: PixelCoord, y: PixelCoord) -> ColorRGBA {
    canvas.get_pixel(x, y).unwrap_or([0, 0, 0, 0])
}
