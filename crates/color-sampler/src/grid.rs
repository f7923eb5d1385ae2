//! Per-pixel lookup for interactive picking.
//!
//! A [`PixelGrid`] is built once per picking session and never mutated. Any
//! coordinate outside the image resolves to [`Pixel::SENTINEL`], so callers
//! can sample a neighbourhood around the image edge without bounds checks.

use crate::buffer::PixelBuffer;
use crate::color::Pixel;

/// Immutable row-major grid of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Decode RGBA bytes into `width * height` pixels, dropping alpha.
    ///
    /// Pixels missing from a short buffer are filled with the sentinel so the
    /// grid always holds exactly `width * height` entries. Extra bytes are
    /// ignored.
    pub fn build<B>(buffer: &B, width: u32, height: u32) -> Self
    where
        B: AsRef<[u8]> + ?Sized,
    {
        let len = width as usize * height as usize;
        let mut pixels: Vec<Pixel> = buffer
            .as_ref()
            .chunks(4)
            .take(len)
            .map(|sample| Pixel::from_rgba(sample).unwrap_or(Pixel::SENTINEL))
            .collect();
        pixels.resize(len, Pixel::SENTINEL);

        Self {
            pixels,
            width,
            height,
        }
    }

    /// Build a grid covering a whole [`PixelBuffer`].
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self::build(buffer, buffer.width(), buffer.height())
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` addresses a stored pixel.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Pixel at `(x, y)`, or [`Pixel::SENTINEL`] outside the grid.
    ///
    /// # Example
    ///
    /// ```
    /// use color_sampler::{Pixel, PixelGrid};
    ///
    /// let grid = PixelGrid::build(&[10u8, 20, 30, 255][..], 1, 1);
    /// assert_eq!(grid.query(0, 0), Pixel::new(10, 20, 30));
    /// assert_eq!(grid.query(-1, 0), Pixel::SENTINEL);
    /// assert_eq!(grid.query(1, 0), Pixel::SENTINEL);
    /// ```
    #[inline]
    pub fn query(&self, x: i64, y: i64) -> Pixel {
        if !self.contains(x, y) {
            return Pixel::SENTINEL;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x3() -> PixelGrid {
        let data: Vec<u8> = (0..9u8).flat_map(|i| [i * 10, i * 10 + 1, i * 10 + 2, 255]).collect();
        PixelGrid::build(&data, 3, 3)
    }

    #[test]
    fn test_build_drops_alpha_row_major() {
        let grid = grid_3x3();
        assert_eq!(grid.pixels().len(), 9);
        assert_eq!(grid.query(0, 0), Pixel::new(0, 1, 2));
        assert_eq!(grid.query(2, 0), Pixel::new(20, 21, 22));
        assert_eq!(grid.query(0, 1), Pixel::new(30, 31, 32));
        assert_eq!(grid.query(2, 2), Pixel::new(80, 81, 82));
    }

    #[test]
    fn test_center_and_far_out_of_bounds() {
        let grid = grid_3x3();
        assert_eq!(grid.query(1, 1), Pixel::new(40, 41, 42));
        assert_eq!(grid.query(5, 5), Pixel::SENTINEL);
    }

    #[test]
    fn test_every_edge_falls_back_to_sentinel() {
        let grid = grid_3x3();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (-1, -1), (3, 3), (i64::MIN, 0)] {
            assert_eq!(grid.query(x, y), Pixel::SENTINEL, "({x}, {y})");
        }
    }

    #[test]
    fn test_short_buffer_is_padded() {
        let grid = PixelGrid::build(&[1u8, 2, 3, 255, 4, 5][..], 2, 2);
        assert_eq!(grid.pixels().len(), 4);
        assert_eq!(grid.query(0, 0), Pixel::new(1, 2, 3));
        assert_eq!(grid.query(1, 0), Pixel::SENTINEL);
        assert_eq!(grid.query(1, 1), Pixel::SENTINEL);
    }

    #[test]
    fn test_from_buffer() {
        let buffer = PixelBuffer::new(2, 1, vec![1, 1, 1, 0, 2, 2, 2, 9]).unwrap();
        let grid = PixelGrid::from_buffer(&buffer);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.query(1, 0), Pixel::new(2, 2, 2));
    }

    #[test]
    fn test_empty_grid_is_all_sentinel() {
        let empty: [u8; 0] = [];
        let grid = PixelGrid::build(&empty, 0, 0);
        assert_eq!(grid.query(0, 0), Pixel::SENTINEL);
    }
}
