//! Test images and helpers for turning them into locators.

use base64::Engine;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const HALF_GREEN: [u8; 4] = [0, 255, 0, 128];
pub const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// Encode an RGBA image whose pixels come from `pixel(x, y)` as PNG.
pub fn png_from_fn(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let image = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(pixel(x, y)));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode test PNG");
    out.into_inner()
}

/// 3x3 image: five red, two blue, one half-transparent green, one clear.
pub fn sample_png() -> Vec<u8> {
    const PIXELS: [[u8; 4]; 9] = [
        RED, RED, BLUE, //
        RED, HALF_GREEN, RED, //
        BLUE, RED, CLEAR,
    ];
    png_from_fn(3, 3, |x, y| PIXELS[(y * 3 + x) as usize])
}

/// Solid opaque image.
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    png_from_fn(width, height, |_, _| [rgb[0], rgb[1], rgb[2], 255])
}

/// Image where pixel `(x, y)` is `rgb(x*10, y*20, 0)`.
pub fn coordinate_png(width: u32, height: u32) -> Vec<u8> {
    png_from_fn(width, height, |x, y| [(x * 10) as u8, (y * 20) as u8, 0, 255])
}

/// Fully transparent image.
pub fn clear_png(width: u32, height: u32) -> Vec<u8> {
    png_from_fn(width, height, |_, _| CLEAR)
}

/// Solid square SVG document.
pub fn solid_svg(size: u32, fill: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}"><rect width="{size}" height="{size}" fill="{fill}"/></svg>"#
    )
}

/// `data:` URI carrying `bytes` base64-encoded.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Write `bytes` into a fresh temp dir; keep the dir alive while the path is used.
pub fn temp_image(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write temp image");
    (dir, path)
}
