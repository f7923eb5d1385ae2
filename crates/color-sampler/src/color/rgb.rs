//! Pixel and color key types
//!
//! [`Pixel`] is the alpha-free triple stored in a pixel grid. [`Color`] is the
//! structured identity used to deduplicate samples while counting; it only
//! becomes a string at the API boundary through its `Display` impl.

use std::fmt;
use std::str::FromStr;

use super::error::ParseColorError;

/// An opaque 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Pixel {
    /// Mid gray returned for every out-of-bounds grid query.
    pub const SENTINEL: Pixel = Pixel::new(127, 127, 127);

    /// Black, used for magnifier cell borders.
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);

    /// Create a pixel from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Take the first three bytes of an RGBA sample, dropping alpha.
    ///
    /// Returns `None` if fewer than three bytes are available.
    #[inline]
    pub fn from_rgba(sample: &[u8]) -> Option<Self> {
        match sample {
            [r, g, b, ..] => Some(Self::new(*r, *g, *b)),
            _ => None,
        }
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Canonical color key.
///
/// Two samples with the same channels always produce the same key: alpha is
/// `None` for fully opaque samples and `Some(a)` for partially transparent
/// ones, so `rgba(r,g,b,255)` and `rgb(r,g,b)` can never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel, `None` when opaque
    pub a: Option<u8>,
}

impl Color {
    /// Create a canonical color. An alpha of 255 is folded into `None`.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a = if a == 255 { None } else { Some(a) };
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Key for a 4-byte RGBA sample.
    ///
    /// Fully transparent samples and samples shorter than four bytes have no
    /// key and yield `None`.
    #[inline]
    pub fn from_sample(sample: &[u8]) -> Option<Self> {
        match sample {
            [_, _, _, 0, ..] => None,
            [r, g, b, a, ..] => Some(Self::new(*r, *g, *b, *a)),
            _ => None,
        }
    }

    /// The color without its alpha channel.
    #[inline]
    pub fn rgb(self) -> Pixel {
        Pixel::new(self.r, self.g, self.b)
    }

    /// Whether the color is fully opaque.
    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a.is_none()
    }
}

impl From<Pixel> for Color {
    fn from(pixel: Pixel) -> Self {
        Self::opaque(pixel.r, pixel.g, pixel.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            Some(a) => write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, a),
            None => write!(f, "rgb({},{},{})", self.r, self.g, self.b),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `rgb(r,g,b)` or `rgba(r,g,b,a)`.
    ///
    /// The function name is case-insensitive and whitespace around each
    /// component is ignored. `rgba(..., 255)` parses to the opaque key.
    ///
    /// # Examples
    ///
    /// ```
    /// use color_sampler::Color;
    ///
    /// let red: Color = "rgb(255, 0, 0)".parse().unwrap();
    /// assert_eq!(red, Color::opaque(255, 0, 0));
    ///
    /// let faded: Color = "RGBA(1,2,3,128)".parse().unwrap();
    /// assert_eq!(faded.a, Some(128));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let open = s.find('(').ok_or(ParseColorError::UnknownFormat)?;
        let body = s[open + 1..]
            .strip_suffix(')')
            .ok_or(ParseColorError::UnknownFormat)?;

        let expected = match s[..open].trim().to_ascii_lowercase().as_str() {
            "rgb" => 3,
            "rgba" => 4,
            _ => return Err(ParseColorError::UnknownFormat),
        };

        let components = body
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()?;

        match components.as_slice() {
            [r, g, b] if expected == 3 => Ok(Color::opaque(*r, *g, *b)),
            [r, g, b, a] if expected == 4 => Ok(Color::new(*r, *g, *b, *a)),
            _ => Err(ParseColorError::ComponentCount {
                expected,
                found: components.len(),
            }),
        }
    }
}
