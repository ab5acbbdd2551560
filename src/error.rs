//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Invalid construction options
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! No operation retries. A failed transfer is returned to the caller and the
//! driver keeps the orientation and window it last committed successfully.
//!
//! ## Example
//!
//! ```
//! use ili9341::{Builder, BuilderError};
//!
//! let result = Builder::new().spi_frequency_hz(0).build();
//! assert!(matches!(result, Err(BuilderError::InvalidSpiFrequency { hz: 0 })));
//! ```

use crate::config::MAX_SPI_FREQUENCY_HZ;
use crate::interface::DisplayInterface;
use crate::text::MissingGlyph;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// The font has no glyph for a character in the drawn string
    GlyphNotFound {
        /// Character that could not be resolved
        character: char,
    },
    /// A glyph bitmap is shorter than its declared size requires
    BufferTooSmall {
        /// Required bitmap size in bytes
        required: usize,
        /// Provided bitmap size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> From<MissingGlyph> for Error<I> {
    fn from(missing: MissingGlyph) -> Self {
        Self::GlyphNotFound {
            character: missing.0,
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::GlyphNotFound { character } => {
                write!(f, "No glyph for character {character:?}")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Glyph bitmap too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur before any hardware is touched; no driver is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// SPI clock frequency is zero or too fast for the controller
    InvalidSpiFrequency {
        /// Requested frequency in Hz
        hz: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSpiFrequency { hz } => write!(
                f,
                "Invalid SPI frequency {hz}Hz (must be 1..={MAX_SPI_FREQUENCY_HZ})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
