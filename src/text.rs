use crate::{canvas::Canvas, common::ColorRGBA};

/// Something that can draw short labels onto a canvas.
///
/// Coordinates are signed so that callers can position text partially
/// outside the canvas; pixels that fall outside are dropped.
pub trait TextRasterizer {
    /// Horizontal pen advance per character, in pixels.
    fn glyph_advance(&self) -> u32;

    fn glyph_height(&self) -> u32;

    fn draw_text(&self, canvas: &mut Canvas, x: i64, y: i64, text: &str, color: ColorRGBA);

    /// Width of the inked area of `text`, without trailing spacing.
    fn text_width(&self, text: &str) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 {
            0
        } else {
            n * self.glyph_advance() - 1
        }
    }
}

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

// Each row is 3 bits wide, most significant bit on the left.
const DIGIT_GLYPHS: [[u8; GLYPH_HEIGHT as usize]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Built-in 3x5 fixed-width font covering the decimal digits.
///
/// With a 4 pixel advance, a label of `n` digits is `4n - 1` pixels wide, so
/// offsetting by `2n` from the tile center centers it horizontally.
#[derive(Copy, Clone, Debug, Default)]
pub struct BitmapFont;

impl BitmapFont {
    fn glyph(c: char) -> Option<&'static [u8; GLYPH_HEIGHT as usize]> {
        let digit = c.to_digit(10)?;
        Some(&DIGIT_GLYPHS[digit as usize])
    }
}

impl TextRasterizer for BitmapFont {
    fn glyph_advance(&self) -> u32 {
        GLYPH_WIDTH + 1
    }

    fn glyph_height(&self) -> u32 {
        GLYPH_HEIGHT
    }

    fn draw_text(&self, canvas: &mut Canvas, x: i64, y: i64, text: &str, color: ColorRGBA) {
        let mut pen_x = x;
        for c in text.chars() {
            // Unknown characters still take up space.
            if let Some(rows) = Self::glyph(c) {
                for (dy, bits) in rows.iter().enumerate() {
                    for dx in 0..GLYPH_WIDTH {
                        if (*bits >> (GLYPH_WIDTH - 1 - dx)) & 1 == 0 {
                            continue;
                        }
                        let px = pen_x + dx as i64;
                        let py = y + dy as i64;
                        if px < 0 || py < 0 || px > u32::MAX as i64 || py > u32::MAX as i64 {
                            continue;
                        }
                        canvas.blend_pixel(px as u32, py as u32, color);
                    }
                }
            }
            pen_x += self.glyph_advance() as i64;
        }
    }
}

/// Rasterizer that draws nothing, for rendering unlabeled tiles.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoText;

impl TextRasterizer for NoText {
    fn glyph_advance(&self) -> u32 {
        0
    }

    fn glyph_height(&self) -> u32 {
        0
    }

    fn draw_text(&self, _canvas: &mut Canvas, _x: i64, _y: i64, _text: &str, _color: ColorRGBA) {}

    fn text_width(&self, _text: &str) -> u32 {
        0
    }
}
