mod decode;
pub mod locator;
pub mod pixmap_canvas;
pub mod rasterizer;

pub use locator::{decode_data_uri, Locator, Payload};
pub use pixmap_canvas::{PixmapCanvas, PixmapSurface};
pub use rasterizer::{ImageRasterizer, RasterTarget, Rasterizer, MAX_DIMENSION};
