//! Decode image payloads into straight-alpha RGBA buffers.

use color_sampler::PixelBuffer;
use image::imageops::FilterType;
use resvg::usvg::{self, Transform};
use std::sync::Arc;
use tiny_skia::Pixmap;

use super::locator::Payload;
use super::rasterizer::RasterTarget;
use crate::error::LoadError;

/// Decode `payload` and resample it to the size `target` resolves to.
pub fn decode(
    payload: &Payload,
    target: RasterTarget,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> Result<PixelBuffer, LoadError> {
    if payload.is_svg() {
        render_svg(&payload.bytes, target, fontdb)
    } else {
        decode_raster(&payload.bytes, target)
    }
}

/// Decode PNG/JPEG/GIF/WebP/... with the `image` crate.
fn decode_raster(bytes: &[u8], target: RasterTarget) -> Result<PixelBuffer, LoadError> {
    let image = image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    let (natural_width, natural_height) = (image.width(), image.height());
    let (width, height) = target.resolve(natural_width as f64, natural_height as f64)?;

    tracing::debug!(
        natural_width,
        natural_height,
        width,
        height,
        "Decoded raster image"
    );

    let rgba = image.to_rgba8();
    let rgba = if (width, height) == (natural_width, natural_height) {
        rgba
    } else {
        image::imageops::resize(&rgba, width, height, FilterType::Triangle)
    };

    PixelBuffer::new(width, height, rgba.into_raw()).map_err(|e| LoadError::Decode(e.to_string()))
}

/// Render SVG stretched to the target size on a transparent background.
fn render_svg(
    bytes: &[u8],
    target: RasterTarget,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> Result<PixelBuffer, LoadError> {
    let options = usvg::Options {
        fontdb: fontdb.clone(),
        ..Default::default()
    };
    let tree =
        usvg::Tree::from_data(bytes, &options).map_err(|e| LoadError::SvgParse(e.to_string()))?;

    let svg_size = tree.size();
    let (width, height) = target.resolve(svg_size.width() as f64, svg_size.height() as f64)?;

    tracing::debug!(
        natural_width = svg_size.width(),
        natural_height = svg_size.height(),
        width,
        height,
        "Rendering SVG image"
    );

    let mut pixmap = Pixmap::new(width, height).ok_or(LoadError::PixmapAllocation)?;
    let transform = Transform::from_scale(
        width as f32 / svg_size.width(),
        height as f32 / svg_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied pixels; callers expect straight alpha
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    PixelBuffer::new(width, height, data).map_err(|e| LoadError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fontdb() -> Arc<usvg::fontdb::Database> {
        Arc::new(usvg::fontdb::Database::new())
    }

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut out = Cursor::new(Vec::new());
        image
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png_at_natural_size() {
        let payload = Payload::new(png_bytes(3, 2, [10, 20, 30, 255]), None);
        let buffer = decode(&payload, RasterTarget::natural(1.0), &fontdb()).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (3, 2));
        assert_eq!(&buffer.data()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_png_scaled_and_sized() {
        let payload = Payload::new(png_bytes(8, 4, [200, 0, 0, 255]), None);

        let half = decode(&payload, RasterTarget::natural(0.5), &fontdb()).unwrap();
        assert_eq!((half.width(), half.height()), (4, 2));
        assert_eq!(&half.data()[..4], &[200, 0, 0, 255]);

        let sized = decode(&payload, RasterTarget::sized(5, 5), &fontdb()).unwrap();
        assert_eq!((sized.width(), sized.height()), (5, 5));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let payload = Payload::new(b"not an image".to_vec(), None);
        assert!(matches!(
            decode(&payload, RasterTarget::natural(1.0), &fontdb()),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn test_render_svg_keeps_straight_alpha() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
            <rect x="0" y="0" width="2" height="4" fill="rgb(0,128,255)"/>
            <rect x="2" y="0" width="2" height="4" fill="rgb(255,0,0)" fill-opacity="0.5"/>
        </svg>"#;
        let payload = Payload::new(svg.to_vec(), None);
        let buffer = decode(&payload, RasterTarget::natural(1.0), &fontdb()).unwrap();

        assert_eq!((buffer.width(), buffer.height()), (4, 4));
        assert_eq!(&buffer.data()[..4], &[0, 128, 255, 255]);

        let right = &buffer.data()[3 * 4..4 * 4];
        assert_eq!(right[0], 255);
        assert!((120..=136).contains(&right[3]), "alpha {}", right[3]);
    }

    #[test]
    fn test_render_svg_stretches_to_size() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <rect width="10" height="10" fill="#00ff00"/>
        </svg>"##;
        let payload = Payload::new(svg.to_vec(), Some("image/svg+xml".to_string()));
        let buffer = decode(&payload, RasterTarget::sized(6, 3), &fontdb()).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (6, 3));
        assert!(buffer.data().chunks_exact(4).all(|p| p == [0, 255, 0, 255]));
    }

    #[test]
    fn test_invalid_svg_fails() {
        let payload = Payload::new(b"<svg".to_vec(), None);
        assert!(matches!(
            decode(&payload, RasterTarget::natural(1.0), &fontdb()),
            Err(LoadError::SvgParse(_))
        ));
    }
}
