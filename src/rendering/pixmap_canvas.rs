//! `tiny-skia` backed magnifier surface.

use color_sampler::{Canvas, Painter, Pixel, Rect};
use std::io::Cursor;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::RenderError;

/// Hands out offscreen [`PixmapSurface`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixmapCanvas;

impl Canvas for PixmapCanvas {
    type Surface = PixmapSurface;

    fn allocate(&mut self, width: u32, height: u32) -> Option<PixmapSurface> {
        let surface = Pixmap::new(width, height).map(PixmapSurface::new);
        if surface.is_none() {
            tracing::warn!(width, height, "Failed to allocate magnifier pixmap");
        }
        surface
    }
}

/// Offscreen magnifier frame plus its overlay placement.
pub struct PixmapSurface {
    pixmap: Pixmap,
    stroke_color: Pixel,
    stroke_width: f32,
    visible: bool,
    position: (f64, f64),
}

impl PixmapSurface {
    fn new(pixmap: Pixmap) -> Self {
        Self {
            pixmap,
            stroke_color: Pixel::BLACK,
            stroke_width: 1.0,
            visible: false,
            position: (0.0, 0.0),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Whether the overlay is currently displayed.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Screen position of the overlay's top-left corner.
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Painted color at `(x, y)`, alpha dropped.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Pixel::new(c.red(), c.green(), c.blue())
        })
    }

    /// Encode the current frame as an RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::Fast);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::PngEncode(e.to_string()))?;
            writer
                .write_image_data(&data)
                .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        }
        Ok(buf.into_inner())
    }

    fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        )
    }
}

fn paint_for(color: Pixel, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(color.r, color.g, color.b, 255));
    paint.anti_alias = anti_alias;
    paint
}

impl Painter for PixmapSurface {
    fn fill_rect(&mut self, rect: Rect, color: Pixel) {
        if let Some(rect) = Self::skia_rect(rect) {
            self.pixmap
                .fill_rect(rect, &paint_for(color, false), Transform::identity(), None);
        }
    }

    fn set_stroke(&mut self, color: Pixel, width: f32) {
        self.stroke_color = color;
        self.stroke_width = width;
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let Some(path) = Self::skia_rect(rect).map(PathBuilder::from_rect) else {
            return;
        };
        let stroke = Stroke {
            width: self.stroke_width,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(self.stroke_color, true),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }
}
