use crate::{
    common::{ColorRGBA, PixelCoord, TRANSPARENT},
    helpers::alpha_blend,
};

/// Inclusive pixel rectangle `[x0, x1] × [y0, y1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: PixelCoord,
    pub y0: PixelCoord,
    pub x1: PixelCoord,
    pub y1: PixelCoord,
}

impl Rect {
    pub fn contains(&self, x: PixelCoord, y: PixelCoord) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Row-major RGBA8 pixel buffer.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
    clip: Option<Rect>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut data: Vec<u8> = vec![];
        data.reserve_exact(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend(TRANSPARENT);
        }
        Canvas {
            width,
            height,
            data,
            clip: None,
        }
    }

    /// Wraps existing RGBA8 data, or returns `None` if its length doesn't
    /// match the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Canvas {
            width,
            height,
            data,
            clip: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Restricts all following writes to `clip`, or lifts the restriction.
    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    fn offset(&self, x: PixelCoord, y: PixelCoord) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }

    pub fn get_pixel(&self, x: PixelCoord, y: PixelCoord) -> Option<ColorRGBA> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrites a pixel. Writes outside the canvas or the clip rectangle
    /// are ignored.
    pub fn set_pixel(&mut self, x: PixelCoord, y: PixelCoord, color: ColorRGBA) {
        if let Some(clip) = self.clip {
            if !clip.contains(x, y) {
                return;
            }
        }
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&color);
        }
    }

    /// Composites `color` over the existing pixel. Out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: PixelCoord, y: PixelCoord, color: ColorRGBA) {
        if color[3] == 255 {
            self.set_pixel(x, y, color);
        } else if let Some(bg) = self.get_pixel(x, y) {
            self.set_pixel(x, y, alpha_blend(bg, color));
        }
    }

    /// Fills the inclusive rectangle `[x0, x1] × [y0, y1]`.
    pub fn fill_rect(
        &mut self,
        x0: PixelCoord,
        y0: PixelCoord,
        x1: PixelCoord,
        y1: PixelCoord,
        color: ColorRGBA,
    ) {
        for y in y0..=y1.min(self.height.saturating_sub(1)) {
            for x in x0..=x1.min(self.width.saturating_sub(1)) {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Draws the 1-pixel outline of the inclusive rectangle `[x0, x1] × [y0, y1]`.
    pub fn stroke_rect(
        &mut self,
        x0: PixelCoord,
        y0: PixelCoord,
        x1: PixelCoord,
        y1: PixelCoord,
        color: ColorRGBA,
    ) {
        for x in x0..=x1 {
            self.set_pixel(x, y0, color);
            self.set_pixel(x, y1, color);
        }
        for y in y0..=y1 {
            self.set_pixel(x0, y, color);
            self.set_pixel(x1, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.as_bytes().len(), 4 * 3 * 4);
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(canvas.get_pixel(4, 0), None);
    }

    #[test]
    fn clip_limits_writes() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_clip(Some(Rect {
            x0: 1,
            y0: 1,
            x1: 2,
            y1: 2,
        }));
        canvas.fill_rect(0, 0, 3, 3, [5, 5, 5, 255]);
        canvas.blend_pixel(0, 3, [0, 0, 0, 128]);
        assert_eq!(canvas.get_pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(canvas.get_pixel(0, 3), Some(TRANSPARENT));
        assert_eq!(canvas.get_pixel(1, 1), Some([5, 5, 5, 255]));
        assert_eq!(canvas.get_pixel(2, 2), Some([5, 5, 5, 255]));
        assert_eq!(canvas.get_pixel(3, 2), Some(TRANSPARENT));

        canvas.set_clip(None);
        canvas.set_pixel(0, 0, [5, 5, 5, 255]);
        assert_eq!(canvas.get_pixel(0, 0), Some([5, 5, 5, 255]));
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(Canvas::from_raw(2, 2, vec![0; 16]).is_some());
        assert!(Canvas::from_raw(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn stroke_leaves_interior_alone() {
        let mut canvas = Canvas::new(5, 5);
        canvas.fill_rect(0, 0, 4, 4, [1, 2, 3, 255]);
        canvas.stroke_rect(0, 0, 4, 4, [9, 9, 9, 255]);
        for i in 0..5 {
            assert_eq!(canvas.get_pixel(i, 0), Some([9, 9, 9, 255]));
            assert_eq!(canvas.get_pixel(i, 4), Some([9, 9, 9, 255]));
            assert_eq!(canvas.get_pixel(0, i), Some([9, 9, 9, 255]));
            assert_eq!(canvas.get_pixel(4, i), Some([9, 9, 9, 255]));
        }
        assert_eq!(canvas.get_pixel(2, 2), Some([1, 2, 3, 255]));
    }

    #[test]
    fn single_pixel_rect_is_border_only() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill_rect(1, 1, 1, 1, [1, 2, 3, 255]);
        canvas.stroke_rect(1, 1, 1, 1, [9, 9, 9, 255]);
        assert_eq!(canvas.get_pixel(1, 1), Some([9, 9, 9, 255]));
        assert_eq!(canvas.get_pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn blend_pixel_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(1, 1);
        canvas.blend_pixel(5, 5, [0, 0, 0, 128]);
        canvas.blend_pixel(0, 0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(0, 0), Some([255, 0, 0, 255]));
    }
}
