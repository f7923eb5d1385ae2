//! Aggregation options and channel ranges.

use std::fmt;

use crate::color::{Color, Pixel};

/// Default number of colors returned by [`aggregate`](super::aggregate).
pub const DEFAULT_LENGTH: usize = 8;

/// Error returned for a channel range whose bounds are reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    /// Requested lower bound
    pub min: u8,
    /// Requested upper bound
    pub max: u8,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid channel range [{}, {}]: min exceeds max",
            self.min, self.max
        )
    }
}

impl std::error::Error for RangeError {}

/// Inclusive `[min, max]` bound on a single color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    min: u8,
    max: u8,
}

impl ChannelRange {
    /// The full `[0, 255]` range.
    pub const FULL: ChannelRange = ChannelRange { min: 0, max: 255 };

    /// Create a range, rejecting `min > max`.
    pub fn new(min: u8, max: u8) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[inline]
    pub fn min(self) -> u8 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(self) -> u8 {
        self.max
    }

    /// Whether `value` lies inside the range (both ends inclusive).
    #[inline]
    pub fn contains(self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for ChannelRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Options for [`aggregate`](super::aggregate).
///
/// # Defaults
///
/// - `ignore`: empty
/// - `length`: 8
/// - `r`, `g`, `b`: `[0, 255]`
///
/// # Example
///
/// ```
/// use color_sampler::{AggregateOptions, ChannelRange, Color};
///
/// let options = AggregateOptions::new()
///     .length(3)
///     .ignore(Color::opaque(255, 255, 255))
///     .red(ChannelRange::new(100, 255).unwrap());
/// assert_eq!(options.length, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOptions {
    /// Colors dropped before counting
    pub ignore: Vec<Color>,
    /// Maximum number of colors returned
    pub length: usize,
    /// Allowed red channel values
    pub r: ChannelRange,
    /// Allowed green channel values
    pub g: ChannelRange,
    /// Allowed blue channel values
    pub b: ChannelRange,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            length: DEFAULT_LENGTH,
            r: ChannelRange::FULL,
            g: ChannelRange::FULL,
            b: ChannelRange::FULL,
        }
    }
}

impl AggregateOptions {
    /// Options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a color to the ignore list.
    pub fn ignore(mut self, color: Color) -> Self {
        self.ignore.push(color);
        self
    }

    /// Set the maximum number of colors returned.
    #[inline]
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the red channel range.
    #[inline]
    pub fn red(mut self, range: ChannelRange) -> Self {
        self.r = range;
        self
    }

    /// Set the green channel range.
    #[inline]
    pub fn green(mut self, range: ChannelRange) -> Self {
        self.g = range;
        self
    }

    /// Set the blue channel range.
    #[inline]
    pub fn blue(mut self, range: ChannelRange) -> Self {
        self.b = range;
        self
    }

    /// Whether all three channels of `pixel` fall in their ranges.
    ///
    /// Alpha is never inspected.
    #[inline]
    pub fn accepts(&self, pixel: Pixel) -> bool {
        self.r.contains(pixel.r) && self.g.contains(pixel.g) && self.b.contains(pixel.b)
    }
}
