// Procedural generation of placeholder tileset images.
use std::path::PathBuf;

use anyhow::Result;
use log::{debug, info};

use crate::{
    canvas::{Canvas, Rect},
    common::{TileCoord, BORDER_COLOR, LABEL_COLOR, LABEL_SHADOW_COLOR},
    helpers::opaque,
    persist::{save_descriptor, save_png},
    state::TilesetConfig,
    text::{BitmapFont, TextRasterizer},
};

/// Summary of a tileset that was written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTileset {
    pub path: PathBuf,
    pub descriptor_path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub tile_count: u32,
}

pub struct TilesetGenerator<'a, R: TextRasterizer> {
    config: &'a TilesetConfig,
    font: R,
}

impl<'a> TilesetGenerator<'a, BitmapFont> {
    /// Renders the tileset described by `config` with the built-in font and
    /// writes it out.
    pub fn generate(config: &'a TilesetConfig) -> Result<GeneratedTileset> {
        Self::with_font(config, BitmapFont).write()
    }
}

impl<'a, R: TextRasterizer> TilesetGenerator<'a, R> {
    pub fn with_font(config: &'a TilesetConfig, font: R) -> Self {
        Self { config, font }
    }

    pub fn write(&self) -> Result<GeneratedTileset> {
        let canvas = self.render()?;
        let path = self.config.output_path.clone();
        save_png(&path, &canvas)?;
        let descriptor_path = if self.config.write_descriptor {
            let descriptor_path = self.config.descriptor_path();
            save_descriptor(&descriptor_path, self.config)?;
            Some(descriptor_path)
        } else {
            None
        };
        Ok(GeneratedTileset {
            path,
            descriptor_path,
            width: canvas.width(),
            height: canvas.height(),
            tile_size: self.config.tile_size,
            tile_count: self.config.tile_count(),
        })
    }

    /// Draws every tile onto a fresh canvas without touching the filesystem.
    pub fn render(&self) -> Result<Canvas> {
        self.config.validate()?;
        let edge = self.config.edge_len()?;
        info!(
            "Rendering {}x{} tileset ({} tiles of {}x{})",
            edge,
            edge,
            self.config.tile_count(),
            self.config.tile_size,
            self.config.tile_size
        );
        let mut canvas = Canvas::new(edge, edge);
        for row in 0..self.config.grid_size {
            for col in 0..self.config.grid_size {
                self.draw_tile(&mut canvas, TileCoord::new(row, col));
            }
        }
        Ok(canvas)
    }

    fn draw_tile(&self, canvas: &mut Canvas, coord: TileCoord) {
        let tile_size = self.config.tile_size;
        let (x, y) = coord.origin(tile_size);
        let (x1, y1) = (x + tile_size - 1, y + tile_size - 1);

        let color = self.config.palette[coord.palette_index(self.config.palette.len())];
        canvas.fill_rect(x, y, x1, y1, opaque(color));
        canvas.stroke_rect(x, y, x1, y1, BORDER_COLOR);

        if self.config.labels {
            self.draw_label(canvas, coord);
        }
    }

    fn draw_label(&self, canvas: &mut Canvas, coord: TileCoord) {
        let (x0, y0) = coord.origin(self.config.tile_size);
        let tile_size = self.config.tile_size as i64;
        let (x, y) = (x0 as i64, y0 as i64);
        let text = coord.tile_id(self.config.grid_size).to_string();

        // Rough centering that assumes glyphs about 4 pixels wide.
        let text_x = x + tile_size / 2 - 2 * text.len() as i64;
        let text_y = y + tile_size / 2 - 3;

        // Labels never reach the first interior row, and their rows (shadow
        // included) must fit above the bottom border. Wide labels are clipped
        // at the side borders.
        let bottom = text_y + self.font.glyph_height() as i64;
        if tile_size < 3 || text_y < y + 2 || bottom > y + tile_size - 2 {
            debug!("Label {} does not fit in its tile, skipping", text);
            return;
        }

        canvas.set_clip(Some(Rect {
            x0: x0 + 1,
            y0: y0 + 1,
            x1: x0 + self.config.tile_size - 2,
            y1: y0 + self.config.tile_size - 2,
        }));
        self.font
            .draw_text(canvas, text_x + 1, text_y + 1, &text, LABEL_SHADOW_COLOR);
        self.font.draw_text(canvas, text_x, text_y, &text, LABEL_COLOR);
        canvas.set_clip(None);
    }
}
