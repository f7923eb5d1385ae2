pub mod config;
pub mod options;
pub mod source;

pub use config::{AppConfig, FetchConfig, MagnifierSettings};
pub use options::{parse_range_arg, PaletteOptions};
pub use source::{ElementLayout, ImageElement, ImageSource, LayoutProvider};
