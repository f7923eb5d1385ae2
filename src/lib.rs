//! img-color-pick
//!
//! Dominant color extraction and an interactive pixel magnifier for images.
//! The pure sampling logic lives in the `color-sampler` crate; this crate
//! adds image loading, a `tiny-skia` drawing surface, pointer subscriptions
//! and the picker controller that ties them together.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use color_sampler::{Color, ColorCount, MagnifierConfig, Pixel, PixelBuffer};
pub use error::{LoadError, PickError, RenderError};
pub use models::{ElementLayout, ImageElement, ImageSource, PaletteOptions};
pub use services::{PickerController, PointerEvents, PointerMove};
