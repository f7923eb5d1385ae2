//! color-sampler: dominant colors and pixel magnification for color pickers
//!
//! This crate holds the pure, synchronous half of an image color picker. It
//! never touches the network, an image decoder or a window system; callers
//! hand it decoded RGBA bytes and a drawing surface.
//!
//! # Palette extraction
//!
//! [`aggregate`] counts the distinct colors of an RGBA buffer and returns the
//! most frequent ones:
//!
//! ```
//! use color_sampler::{dominant_colors, AggregateOptions, Color};
//!
//! let buffer: Vec<u8> = vec![
//!     255, 0, 0, 255,
//!     255, 0, 0, 255,
//!     0, 0, 255, 128,
//!     0, 0, 0, 0, // fully transparent, never counted
//! ];
//!
//! let options = AggregateOptions::new().ignore(Color::opaque(255, 255, 255));
//! let colors = dominant_colors(&buffer, &options);
//! assert_eq!(colors, vec!["rgb(255,0,0)", "rgba(0,0,255,128)"]);
//! ```
//!
//! # Interactive picking
//!
//! A [`PixelGrid`] is built once per picking session. The [`Magnifier`] samples
//! it around the cursor and paints the result through the [`Canvas`] /
//! [`Painter`] traits, which callers implement for their drawing backend.
//!
//! # Color keys
//!
//! Colors are deduplicated by the structured [`Color`] key. Its string form,
//! `rgb(r,g,b)` for opaque samples and `rgba(r,g,b,a)` otherwise, is only
//! produced at the API boundary.

pub mod aggregate;
pub mod buffer;
pub mod color;
pub mod grid;
pub mod magnifier;


pub use aggregate::{
    aggregate, dominant_colors, AggregateOptions, ChannelRange, ColorCount, RangeError,
};
pub use buffer::{BufferError, PixelBuffer};
pub use color::{Color, ParseColorError, Pixel};
pub use grid::PixelGrid;
pub use magnifier::{
    Canvas, Magnifier, MagnifierConfig, MagnifierError, MagnifierState, Painter, Rect,
};
