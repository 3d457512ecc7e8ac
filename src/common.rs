pub type ColorValue = u8; // Color channel value (0-255)
pub type ColorRGB = [ColorValue; 3];
pub type ColorRGBA = [ColorValue; 4];
pub type PixelCoord = u32;

pub const TILE_SIZE: u32 = 16;
pub const GRID_SIZE: u32 = 16;
pub const DEFAULT_OUTPUT_PATH: &str = "crates/eryndor-editor/assets/tilesets/test_tileset.png";

// Largest accepted canvas edge, in pixels.
pub const MAX_CANVAS_EDGE: u32 = 16384;

pub const TRANSPARENT: ColorRGBA = [0, 0, 0, 0];
pub const BORDER_COLOR: ColorRGBA = [64, 64, 64, 255];
pub const LABEL_COLOR: ColorRGBA = [255, 255, 255, 255];
pub const LABEL_SHADOW_COLOR: ColorRGBA = [0, 0, 0, 128];

pub const DEFAULT_PALETTE: [ColorRGB; 16] = [
    [0, 0, 0],       // Black
    [255, 255, 255], // White
    [255, 0, 0],     // Red
    [0, 255, 0],     // Green
    [0, 0, 255],     // Blue
    [255, 255, 0],   // Yellow
    [255, 0, 255],   // Magenta
    [0, 255, 255],   // Cyan
    [128, 0, 0],     // Dark Red
    [0, 128, 0],     // Dark Green
    [0, 0, 128],     // Dark Blue
    [128, 128, 0],   // Olive
    [128, 0, 128],   // Purple
    [0, 128, 128],   // Teal
    [192, 192, 192], // Silver
    [128, 128, 128], // Gray
];

/// Position of a tile in the grid. Tiles are numbered row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileCoord {
    pub row: u32,
    pub col: u32,
}

impl TileCoord {
    pub fn new(row: u32, col: u32) -> Self {
        TileCoord { row, col }
    }

    pub fn from_id(tile_id: u32, grid_size: u32) -> Self {
        TileCoord {
            row: tile_id / grid_size,
            col: tile_id % grid_size,
        }
    }

    pub fn tile_id(&self, grid_size: u32) -> u32 {
        self.row * grid_size + self.col
    }

    /// Top-left pixel of the tile.
    pub fn origin(&self, tile_size: u32) -> (PixelCoord, PixelCoord) {
        (self.col * tile_size, self.row * tile_size)
    }

    pub fn palette_index(&self, palette_len: usize) -> usize {
        (self.row as usize + self.col as usize) % palette_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_id_is_row_major() {
        let coord = TileCoord::new(3, 5);
        assert_eq!(coord.tile_id(GRID_SIZE), 53);
        assert_eq!(TileCoord::from_id(53, GRID_SIZE), coord);
        assert_eq!(coord.origin(TILE_SIZE), (80, 48));
    }

    #[test]
    fn palette_index_cycles_on_diagonal() {
        assert_eq!(TileCoord::new(0, 0).palette_index(16), 0);
        assert_eq!(TileCoord::new(15, 15).palette_index(16), 14);
        assert_eq!(TileCoord::new(7, 9).palette_index(16), 0);
        assert_eq!(DEFAULT_PALETTE[14], [192, 192, 192]);
    }
}
