use color_sampler::MagnifierError;
use thiserror::Error;

/// Image fetch or decode failure.
///
/// No partial result accompanies a `LoadError`: the whole palette or grid
/// request fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch image: {0}")]
    Fetch(String),

    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Invalid data URI: {0}")]
    DataUri(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: f64, height: f64 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("Decode task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure writing a magnifier frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}

/// Errors surfaced by the picker controller.
#[derive(Debug, Error)]
pub enum PickError {
    #[error("Image load error: {0}")]
    Load(#[from] LoadError),

    #[error("Interactive picking needs a bound image element, got URL: {0}")]
    InvalidTarget(String),

    #[error("Invalid options: {0}")]
    Options(String),

    #[error("Magnifier error: {0}")]
    Magnifier(#[from] MagnifierError),
}
