//! Raw RGBA pixel buffers
//!
//! A [`PixelBuffer`] is what a rasterizer hands back: row-major RGBA bytes
//! with the origin at the top-left corner.

use std::fmt;

/// Error returned when buffer dimensions and data length disagree.
#[derive(Debug, Clone, PartialEq)]
pub enum BufferError {
    /// Data length is not `width * height * 4`
    LengthMismatch {
        /// Bytes required by the dimensions
        expected: usize,
        /// Bytes provided
        actual: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::LengthMismatch { expected, actual } => write!(
                f,
                "pixel buffer length mismatch: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for BufferError {}

/// Decoded RGBA pixels for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap RGBA bytes, checking that the length matches the dimensions.
    ///
    /// # Example
    ///
    /// ```
    /// use color_sampler::PixelBuffer;
    ///
    /// let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    /// assert_eq!(buffer.pixel_count(), 2);
    /// assert!(PixelBuffer::new(2, 2, vec![0; 4]).is_err());
    /// ```
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for PixelBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
