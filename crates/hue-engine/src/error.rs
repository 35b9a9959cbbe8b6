//! Error types for color parsing, validation and quantization.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for malformed color input.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// A channel was non-finite or outside `0.0..=1.0`
    InvalidColor { r: f32, g: f32, b: f32 },
    /// Invalid hex color string
    ParseColor(ParseColorError),
}

impl From<ParseColorError> for ColorError {
    fn from(err: ParseColorError) -> Self {
        ColorError::ParseColor(err)
    }
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidColor { r, g, b } => {
                write!(f, "invalid color: ({}, {}, {}) is not a unit-range RGB value", r, g, b)
            }
            ColorError::ParseColor(err) => write!(f, "invalid color: {}", err),
        }
    }
}

impl std::error::Error for ColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ColorError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for quantizer input validation.
///
/// Any of these means the pixel grid of one image is unusable; callers skip
/// that image rather than aborting the board.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizeError {
    /// The grid has no pixels
    EmptyImage,
    /// Pixel buffer length does not match `width * height`
    DimensionMismatch {
        width: u32,
        height: u32,
        pixels: usize,
    },
    /// Palette size of zero was requested
    ZeroColors,
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::EmptyImage => write!(f, "image has no pixels"),
            QuantizeError::DimensionMismatch {
                width,
                height,
                pixels,
            } => write!(
                f,
                "pixel buffer holds {} pixels but image is {}x{}",
                pixels, width, height
            ),
            QuantizeError::ZeroColors => write!(f, "palette size must be at least 1"),
        }
    }
}

impl std::error::Error for QuantizeError {}
