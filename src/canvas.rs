// The RGBA pixel buffer every generator draws into, plus its PNG encoder.
// Texture convention: (0,0) is the bottom-left pixel, y grows upwards.

use crate::error::Error;
use crate::types::Color;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>, // row-major, row 0 = bottom
}

impl Canvas {
    /// Every pixel starts out as `fill`; nothing is ever left unset.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self { width, height, pixels: vec![fill; width as usize * height as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Overwrite the pixel at (x,y). Writes outside the canvas are dropped.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// How many pixels currently hold exactly `color`.
    pub fn count(&self, color: Color) -> usize {
        self.pixels().iter().filter(|p| **p == color).count()
    }

    /// Copy into an `image` buffer, flipping rows so the bottom row ends up last.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let h = self.height;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let src = (h - 1 - y) as usize * self.width as usize + x as usize;
            Rgba(self.pixels[src].to_array())
        })
    }
}

/// Final pipeline stage: consumes the canvas and returns PNG bytes.
pub fn encode_png(canvas: Canvas) -> Result<Vec<u8>, Error> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(Error::Encode(format!(
            "canvas is {}x{}; PNG needs at least one pixel",
            canvas.width, canvas.height
        )));
    }
    let img = canvas.to_rgba_image();
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_fully_filled() {
        let red = Color::rgba(255, 0, 0, 255);
        let c = Canvas::new(7, 3, red);
        assert_eq!(c.pixels().len(), 21);
        assert_eq!(c.count(red), 21);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut c = Canvas::new(4, 4, Color::TRANSPARENT);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            c.put_pixel(x, y, Color::WHITE);
        }
        assert_eq!(c.count(Color::TRANSPARENT), 16);
        assert_eq!(c.get_pixel(4, 0), None);

        c.put_pixel(3, 3, Color::WHITE);
        assert_eq!(c.get_pixel(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn png_has_bottom_row_last() {
        let mut c = Canvas::new(2, 3, Color::TRANSPARENT);
        c.put_pixel(0, 0, Color::WHITE); // bottom-left in texture space
        let bytes = encode_png(c).unwrap();

        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.get_pixel(0, 2).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn empty_canvas_cannot_be_encoded() {
        assert!(matches!(encode_png(Canvas::new(0, 5, Color::WHITE)), Err(Error::Encode(_))));
    }
}
