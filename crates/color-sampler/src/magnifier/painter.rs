//! Drawing-surface collaborators driven by the magnifier.
//!
//! The magnifier never draws pixels itself. It asks a [`Canvas`] for a
//! [`Painter`] surface and issues rectangle commands against it, the same
//! subset a 2D canvas context exposes.

use crate::color::Pixel;

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Rect {
    /// Create a rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `size` x `size` square with its top-left corner at `(x, y)`.
    #[inline]
    pub const fn square(x: u32, y: u32, size: u32) -> Self {
        Self::new(x, y, size, size)
    }
}

/// A displayable 2D surface.
pub trait Painter {
    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Pixel);

    /// Set the color and line width used by subsequent strokes.
    fn set_stroke(&mut self, color: Pixel, width: f32);

    /// Outline `rect` with the current stroke.
    fn stroke_rect(&mut self, rect: Rect);

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool);

    /// Move the surface's top-left corner to `(x, y)` in screen space.
    fn move_to(&mut self, x: f64, y: f64);
}

/// Allocates and releases [`Painter`] surfaces.
pub trait Canvas {
    /// Surface type handed out by this canvas
    type Surface: Painter;

    /// Allocate a hidden `width` x `height` surface.
    ///
    /// Returns `None` if the surface cannot be created.
    fn allocate(&mut self, width: u32, height: u32) -> Option<Self::Surface>;

    /// Release a surface previously returned by [`allocate`](Self::allocate).
    fn release(&mut self, surface: Self::Surface) {
        drop(surface);
    }
}
