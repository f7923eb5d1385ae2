use color_sampler::{AggregateOptions, ChannelRange, Color};
use serde::Deserialize;

use crate::error::PickError;

fn default_length() -> usize {
    color_sampler::aggregate::DEFAULT_LENGTH
}

fn default_scale() -> f64 {
    1.0
}

fn full_range() -> [u8; 2] {
    [0, 255]
}

/// Options for palette extraction.
///
/// Mirrors [`AggregateOptions`] with string colors and a rasterization scale,
/// so it can be filled from YAML or command-line flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaletteOptions {
    /// Colors to drop before counting, as `rgb(...)` / `rgba(...)` strings
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Number of colors to return
    #[serde(default = "default_length")]
    pub length: usize,

    /// Rasterization scale relative to the image's natural size
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Allowed red values, inclusive
    #[serde(default = "full_range")]
    pub r: [u8; 2],

    /// Allowed green values, inclusive
    #[serde(default = "full_range")]
    pub g: [u8; 2],

    /// Allowed blue values, inclusive
    #[serde(default = "full_range")]
    pub b: [u8; 2],
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            length: default_length(),
            scale: default_scale(),
            r: full_range(),
            g: full_range(),
            b: full_range(),
        }
    }
}

impl PaletteOptions {
    /// Validate the scale and convert to counting options.
    pub fn to_aggregate(&self) -> Result<AggregateOptions, PickError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PickError::Options(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }

        let ignore = self
            .ignore
            .iter()
            .map(|text| {
                text.parse::<Color>()
                    .map_err(|e| PickError::Options(format!("ignore color '{text}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AggregateOptions {
            ignore,
            length: self.length,
            r: channel_range("r", self.r)?,
            g: channel_range("g", self.g)?,
            b: channel_range("b", self.b)?,
        })
    }
}

fn channel_range(name: &str, [min, max]: [u8; 2]) -> Result<ChannelRange, PickError> {
    ChannelRange::new(min, max).map_err(|e| PickError::Options(format!("{name}: {e}")))
}

/// Parse a `MIN-MAX` channel range flag such as `100-255`.
pub fn parse_range_arg(text: &str) -> Result<[u8; 2], String> {
    let (min, max) = text
        .split_once('-')
        .ok_or_else(|| format!("expected MIN-MAX, got '{text}'"))?;
    let min = min
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid minimum '{min}': {e}"))?;
    let max = max
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid maximum '{max}': {e}"))?;
    Ok([min, max])
}
