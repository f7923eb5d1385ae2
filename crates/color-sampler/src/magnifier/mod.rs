//! Pixel magnifier overlay.
//!
//! The magnifier paints a `rect_num` x `rect_num` block of cells, each
//! `rect_size` surface pixels wide, centred on an image coordinate. Cells that
//! fall outside the image show the sentinel gray.
//!
//! # Lifecycle
//!
//! ```text
//! new ──create()──> Created (hidden) ──show()──> Visible
//!                        ^                          │
//!                        └────────hidden()──────────┘
//! any ──destroy()──> Destroyed (create() starts over)
//! ```
//!
//! Both [`Magnifier::create`] and [`Magnifier::destroy`] are idempotent.

mod error;
mod painter;

pub use error::MagnifierError;
pub use painter::{Canvas, Painter, Rect};

use crate::color::Pixel;
use crate::grid::PixelGrid;

/// Default cells per side.
pub const DEFAULT_RECT_NUM: u32 = 11;
/// Default cell size in surface pixels.
pub const DEFAULT_RECT_SIZE: u32 = 10;
/// Default distance between the cursor and the overlay's top-left corner.
pub const DEFAULT_OFFSET: f64 = 25.0;
/// Largest surface edge a configuration may request.
pub const MAX_SURFACE_SIZE: u32 = 32767;

/// Line width of the per-cell border.
const CELL_STROKE_WIDTH: f32 = 0.1;
/// Line width of the center-cell marker.
const CENTER_STROKE_WIDTH: f32 = 2.0;

/// Magnifier geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnifierConfig {
    rect_num: u32,
    rect_size: u32,
    offset: f64,
}

impl MagnifierConfig {
    /// Create a configuration.
    ///
    /// `rect_num` must be odd so a true center cell exists, and `rect_size`
    /// must be non-zero. The surface edge `rect_num * rect_size` may not
    /// exceed [`MAX_SURFACE_SIZE`].
    pub fn new(rect_num: u32, rect_size: u32) -> Result<Self, MagnifierError> {
        let fits = rect_num
            .checked_mul(rect_size)
            .is_some_and(|size| size <= MAX_SURFACE_SIZE);
        if rect_num % 2 == 0 || rect_size == 0 || !fits {
            return Err(MagnifierError::InvalidGeometry {
                rect_num,
                rect_size,
            });
        }
        Ok(Self {
            rect_num,
            rect_size,
            offset: DEFAULT_OFFSET,
        })
    }

    /// Set the cursor-to-overlay offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Cells per side.
    #[inline]
    pub fn rect_num(&self) -> u32 {
        self.rect_num
    }

    /// Cell size in surface pixels.
    #[inline]
    pub fn rect_size(&self) -> u32 {
        self.rect_size
    }

    /// Cursor-to-overlay offset.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Edge length of the painted surface.
    #[inline]
    pub fn surface_size(&self) -> u32 {
        self.rect_num * self.rect_size
    }

    /// Cells between the center cell and the edge.
    #[inline]
    pub fn half(&self) -> u32 {
        (self.rect_num - 1) / 2
    }

    /// Surface rectangle of the center cell.
    #[inline]
    pub fn center_cell(&self) -> Rect {
        let origin = self.half() * self.rect_size;
        Rect::square(origin, origin, self.rect_size)
    }
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            rect_num: DEFAULT_RECT_NUM,
            rect_size: DEFAULT_RECT_SIZE,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Observable magnifier state while created.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MagnifierState {
    /// Whether the overlay is displayed
    pub visible: bool,
    /// Image x coordinate under the center cell
    pub center_image_x: i64,
    /// Image y coordinate under the center cell
    pub center_image_y: i64,
    /// Cursor x position of the last show
    pub screen_x: f64,
    /// Cursor y position of the last show
    pub screen_y: f64,
}

/// Zoomed pixel view that follows the cursor.
pub struct Magnifier<C: Canvas> {
    grid: PixelGrid,
    config: MagnifierConfig,
    canvas: C,
    surface: Option<C::Surface>,
    state: MagnifierState,
}

impl<C: Canvas> Magnifier<C> {
    /// Create an uninitialized magnifier over a pixel grid.
    ///
    /// Nothing is allocated until [`create`](Self::create) is called.
    pub fn new(grid: PixelGrid, config: MagnifierConfig, canvas: C) -> Self {
        Self {
            grid,
            config,
            canvas,
            surface: None,
            state: MagnifierState::default(),
        }
    }

    /// Allocate the hidden overlay surface. No-op if already created.
    pub fn create(&mut self) -> Result<(), MagnifierError> {
        if self.surface.is_some() {
            return Ok(());
        }

        let size = self.config.surface_size();
        let mut surface =
            self.canvas
                .allocate(size, size)
                .ok_or(MagnifierError::SurfaceAllocation {
                    width: size,
                    height: size,
                })?;
        surface.set_visible(false);

        self.surface = Some(surface);
        self.state = MagnifierState::default();
        Ok(())
    }

    /// Release the overlay surface. No-op if not created.
    pub fn destroy(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.canvas.release(surface);
            self.state = MagnifierState::default();
        }
    }

    /// Display the overlay next to the cursor and repaint it around
    /// `(image_x, image_y)`.
    ///
    /// Returns `false` without painting if the magnifier is not created.
    pub fn show(&mut self, screen_x: f64, screen_y: f64, image_x: i64, image_y: i64) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        surface.set_visible(true);
        surface.move_to(screen_x + self.config.offset, screen_y + self.config.offset);
        paint_cells(surface, &self.grid, &self.config, image_x, image_y);

        self.state = MagnifierState {
            visible: true,
            center_image_x: image_x,
            center_image_y: image_y,
            screen_x,
            screen_y,
        };
        true
    }

    /// Hide the overlay without repainting.
    pub fn hidden(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(false);
            self.state.visible = false;
        }
    }

    /// Whether the surface is allocated.
    #[inline]
    pub fn is_created(&self) -> bool {
        self.surface.is_some()
    }

    /// Current state, or `None` if not created.
    pub fn state(&self) -> Option<&MagnifierState> {
        self.surface.as_ref().map(|_| &self.state)
    }

    /// Pixel under the center cell while visible.
    pub fn center_color(&self) -> Option<Pixel> {
        self.state()
            .filter(|state| state.visible)
            .map(|state| self.grid.query(state.center_image_x, state.center_image_y))
    }

    /// The allocated surface, if any.
    pub fn surface(&self) -> Option<&C::Surface> {
        self.surface.as_ref()
    }

    /// Geometry in use.
    pub fn config(&self) -> &MagnifierConfig {
        &self.config
    }

    /// The grid being sampled.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }
}

impl<C: Canvas> Drop for Magnifier<C> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Fill every cell first, then outline the center cell so no neighbouring
/// stroke is drawn over the marker.
fn paint_cells<P: Painter>(
    surface: &mut P,
    grid: &PixelGrid,
    config: &MagnifierConfig,
    image_x: i64,
    image_y: i64,
) {
    let half = config.half() as i64;
    let size = config.rect_size();

    surface.set_stroke(Pixel::BLACK, CELL_STROKE_WIDTH);
    for cy in 0..config.rect_num() {
        for cx in 0..config.rect_num() {
            let x = image_x.saturating_sub(half).saturating_add(cx as i64);
            let y = image_y.saturating_sub(half).saturating_add(cy as i64);
            let color = grid.query(x, y);
            let rect = Rect::square(cx * size, cy * size, size);
            surface.fill_rect(rect, color);
            surface.stroke_rect(rect);
        }
    }

    surface.set_stroke(Pixel::BLACK, CENTER_STROKE_WIDTH);
    surface.stroke_rect(config.center_cell());
}


#[cfg(test)]
mod tests {
    use super::testing::{Op, RecordingCanvas};
    use super::*;

    fn grid_3x3() -> PixelGrid {
        let data: Vec<u8> = (0..9u8).flat_map(|i| [i, i, i, 255]).collect();
        PixelGrid::build(&data, 3, 3)
    }

    fn magnifier(rect_num: u32, rect_size: u32) -> (Magnifier<RecordingCanvas>, RecordingCanvas) {
        let canvas = RecordingCanvas::default();
        let config = MagnifierConfig::new(rect_num, rect_size).unwrap();
        (Magnifier::new(grid_3x3(), config, canvas.clone()), canvas)
    }

    fn fills(ops: &[Op]) -> Vec<Pixel> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Fill(_, color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_config_rejects_even_or_empty_geometry() {
        assert!(MagnifierConfig::new(10, 10).is_err());
        assert!(MagnifierConfig::new(0, 10).is_err());
        assert_eq!(
            MagnifierConfig::new(11, 0),
            Err(MagnifierError::InvalidGeometry {
                rect_num: 11,
                rect_size: 0,
            })
        );
    }

    #[test]
    fn test_config_rejects_oversized_surface() {
        assert_eq!(
            MagnifierConfig::new(65537, 65537),
            Err(MagnifierError::InvalidGeometry {
                rect_num: 65537,
                rect_size: 65537,
            })
        );
        assert!(MagnifierConfig::new(3, u32::MAX).is_err());
        assert!(MagnifierConfig::new(3, 10923).is_err());

        let largest = MagnifierConfig::new(3, 10922).unwrap();
        assert_eq!(largest.surface_size(), 32766);
    }

    #[test]
    fn test_default_config() {
        let config = MagnifierConfig::default();
        assert_eq!(config.rect_num(), 11);
        assert_eq!(config.rect_size(), 10);
        assert_eq!(config.offset(), 25.0);
        assert_eq!(config.surface_size(), 110);
        assert_eq!(config.half(), 5);
        assert_eq!(config.center_cell(), Rect::square(50, 50, 10));
    }

    #[test]
    fn test_create_allocates_hidden_surface_once() {
        let (mut magnifier, canvas) = magnifier(3, 4);
        assert!(magnifier.state().is_none());

        magnifier.create().unwrap();
        magnifier.create().unwrap();

        assert_eq!(canvas.take(), vec![Op::Allocate(12, 12), Op::Visible(false)]);
        assert_eq!(magnifier.state(), Some(&MagnifierState::default()));
    }

    #[test]
    fn test_create_reports_allocation_failure() {
        let canvas = RecordingCanvas {
            refuse: true,
            ..Default::default()
        };
        let mut magnifier = Magnifier::new(grid_3x3(), MagnifierConfig::default(), canvas);
        assert_eq!(
            magnifier.create(),
            Err(MagnifierError::SurfaceAllocation {
                width: 110,
                height: 110,
            })
        );
        assert!(!magnifier.is_created());
    }

    #[test]
    fn test_show_paints_grid_then_center_marker() {
        let (mut magnifier, canvas) = magnifier(3, 4);
        magnifier.create().unwrap();
        canvas.take();

        assert!(magnifier.show(100.0, 50.0, 1, 1));
        let ops = canvas.take();

        assert_eq!(ops[0], Op::Visible(true));
        assert_eq!(ops[1], Op::Move(125.0, 75.0));
        assert_eq!(ops[2], Op::Stroke(Pixel::BLACK, 0.1));
        assert_eq!(
            fills(&ops),
            (0..9u8).map(|i| Pixel::new(i, i, i)).collect::<Vec<_>>()
        );
        assert_eq!(ops[ops.len() - 2], Op::Stroke(Pixel::BLACK, 2.0));
        assert_eq!(ops[ops.len() - 1], Op::StrokeRect(Rect::square(4, 4, 4)));

        let state = magnifier.state().unwrap();
        assert!(state.visible);
        assert_eq!((state.center_image_x, state.center_image_y), (1, 1));
        assert_eq!(magnifier.center_color(), Some(Pixel::new(4, 4, 4)));
    }

    #[test]
    fn test_show_at_corner_uses_sentinel() {
        let (mut magnifier, canvas) = magnifier(3, 1);
        magnifier.create().unwrap();
        canvas.take();

        magnifier.show(0.0, 0.0, 0, 0);
        let colors = fills(&canvas.take());
        let s = Pixel::SENTINEL;
        assert_eq!(
            colors,
            vec![
                s,
                s,
                s,
                s,
                Pixel::new(0, 0, 0),
                Pixel::new(1, 1, 1),
                s,
                Pixel::new(3, 3, 3),
                Pixel::new(4, 4, 4),
            ]
        );
    }

    #[test]
    fn test_show_at_extreme_coordinates_uses_sentinel() {
        let (mut magnifier, canvas) = magnifier(3, 1);
        magnifier.create().unwrap();
        canvas.take();

        assert!(magnifier.show(0.0, 0.0, i64::MAX, i64::MIN));
        assert!(magnifier.show(0.0, 0.0, i64::MIN, i64::MAX));
        let colors = fills(&canvas.take());
        assert_eq!(colors, vec![Pixel::SENTINEL; 18]);
        assert_eq!(magnifier.center_color(), Some(Pixel::SENTINEL));
    }

    #[test]
    fn test_hidden_keeps_center_but_clears_visibility() {
        let (mut magnifier, canvas) = magnifier(3, 4);
        magnifier.create().unwrap();
        magnifier.show(1.0, 2.0, 2, 0);
        canvas.take();

        magnifier.hidden();

        assert_eq!(canvas.take(), vec![Op::Visible(false)]);
        let state = magnifier.state().unwrap();
        assert!(!state.visible);
        assert_eq!(state.center_image_x, 2);
        assert_eq!(magnifier.center_color(), None);
    }

    #[test]
    fn test_show_and_hidden_before_create_are_noops() {
        let (mut magnifier, canvas) = magnifier(3, 4);
        assert!(!magnifier.show(0.0, 0.0, 0, 0));
        magnifier.hidden();
        magnifier.destroy();
        assert!(canvas.take().is_empty());
    }

    #[test]
    fn test_create_destroy_create_matches_fresh_create() {
        let (mut fresh, _) = magnifier(3, 4);
        fresh.create().unwrap();

        let (mut cycled, canvas) = magnifier(3, 4);
        cycled.create().unwrap();
        cycled.show(5.0, 5.0, 1, 1);
        cycled.destroy();
        cycled.destroy();
        assert!(!cycled.is_created());
        cycled.create().unwrap();

        assert_eq!(cycled.state(), fresh.state());
        assert!(cycled.is_created());
        let ops = canvas.take();
        assert_eq!(ops.iter().filter(|op| **op == Op::Release).count(), 1);
        assert_eq!(ops.last(), Some(&Op::Visible(false)));
    }

    #[test]
    fn test_drop_releases_surface() {
        let (mut magnifier, canvas) = magnifier(3, 4);
        magnifier.create().unwrap();
        drop(magnifier);
        assert_eq!(canvas.take().last(), Some(&Op::Release));
    }
}
