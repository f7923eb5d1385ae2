//! Color value types and canonical color keys.

mod error;
mod rgb;

pub use error::ParseColorError;
pub use rgb::{Color, Pixel};
