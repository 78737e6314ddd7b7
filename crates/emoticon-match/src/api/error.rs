//! Error types for the emoticon-match public API.
//!
//! [`MosaicError`] covers every fatal condition of a mosaic run.
//! Degenerate histograms and undefined hues are not errors: they are
//! absorbed by the fallback score and the `h = 0` convention.

use std::num::ParseIntError;
use thiserror::Error;

/// Unified error type for the emoticon-match public API.
///
/// # Example
///
/// ```
/// use emoticon_match::{Depth, MosaicError};
///
/// fn configured_depth(value: usize) -> Result<Depth, MosaicError> {
///     let depth = Depth::new(value)?;
///     Ok(depth)
/// }
///
/// assert!(configured_depth(16).is_ok());
/// assert!(matches!(configured_depth(1), Err(MosaicError::InvalidDepth(1))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MosaicError {
    /// Zero dimension, or pixel buffer length does not match `width * height`
    #[error("invalid image: {width}x{height} with {pixels} pixels")]
    InvalidImage {
        width: usize,
        height: usize,
        pixels: usize,
    },

    /// No emoticons, or none with a single visible pixel
    #[error("emoticon set is empty")]
    EmptyEmoticonSet,

    #[error("invalid color depth {0} (expected 2..=64)")]
    InvalidDepth(usize),

    #[error("invalid tile size {width}x{height}")]
    InvalidTileSize { width: usize, height: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The run was aborted through its cancel token
    #[error("mosaic run cancelled")]
    Cancelled,

    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}
