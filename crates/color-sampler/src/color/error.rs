//! Error types for color parsing

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing CSS-style `rgb(...)` / `rgba(...)` strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// String is neither `rgb(...)` nor `rgba(...)`
    UnknownFormat,
    /// Wrong number of components inside the parentheses
    ComponentCount {
        /// Components required by the function name
        expected: usize,
        /// Components actually present
        found: usize,
    },
    /// Component is not an integer in 0..=255
    InvalidComponent(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidComponent(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::UnknownFormat => {
                write!(f, "unknown color format (expected rgb(r,g,b) or rgba(r,g,b,a))")
            }
            ParseColorError::ComponentCount { expected, found } => {
                write!(f, "expected {} color components, found {}", expected, found)
            }
            ParseColorError::InvalidComponent(err) => {
                write!(f, "invalid color component: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidComponent(err) => Some(err),
            _ => None,
        }
    }
}
