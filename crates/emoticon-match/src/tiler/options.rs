//! Tiler configuration and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::MosaicError;
use crate::matcher::peak::PeakOptions;
use crate::matcher::MatchAlgorithm;

/// How many threads process tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Workers {
    /// On the calling thread, in tile order
    Sequential,
    /// One worker per available processing unit
    #[default]
    Auto,
    /// Exactly this many workers (at least 1)
    Fixed(usize),
}

impl Workers {
    /// Thread count this setting resolves to on the current machine.
    pub fn count(self) -> usize {
        match self {
            Workers::Sequential => 1,
            Workers::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Workers::Fixed(n) => n.max(1),
        }
    }
}

impl From<Option<usize>> for Workers {
    /// `None` is [`Workers::Auto`], `Some(1)` runs sequentially.
    fn from(count: Option<usize>) -> Self {
        match count {
            None | Some(0) => Workers::Auto,
            Some(1) => Workers::Sequential,
            Some(n) => Workers::Fixed(n),
        }
    }
}

/// Configuration for [`Tiler`](super::Tiler).
///
/// # Example
///
/// ```
/// use emoticon_match::{MatchAlgorithm, TilerOptions, Workers};
///
/// let options = TilerOptions::new()
///     .tile_size(16, 16)
///     .algorithm(MatchAlgorithm::Peak)
///     .workers(Workers::Fixed(2));
/// assert_eq!(options.tile_width, Some(16));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TilerOptions {
    /// Tile width in pixels; `None` uses the emoticon width.
    pub tile_width: Option<usize>,
    /// Tile height in pixels; `None` uses the emoticon height.
    pub tile_height: Option<usize>,
    /// Default: correlation
    pub algorithm: MatchAlgorithm,
    /// Peak extraction and scoring parameters, used by the peak algorithm.
    pub peak: PeakOptions,
    /// Default: [`Workers::Auto`]
    pub workers: Workers,
}

impl TilerOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn tile_size(mut self, width: usize, height: usize) -> Self {
        self.tile_width = Some(width);
        self.tile_height = Some(height);
        self
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: MatchAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[inline]
    pub fn peak(mut self, peak: PeakOptions) -> Self {
        self.peak = peak;
        self
    }

    #[inline]
    pub fn workers(mut self, workers: Workers) -> Self {
        self.workers = workers;
        self
    }

    /// Resolve the tile size against the emoticon glyph size.
    ///
    /// # Errors
    ///
    /// [`MosaicError::InvalidTileSize`] if either side resolves to zero.
    pub fn resolve_tile_size(&self, glyph: (usize, usize)) -> Result<(usize, usize), MosaicError> {
        let width = self.tile_width.unwrap_or(glyph.0);
        let height = self.tile_height.unwrap_or(glyph.1);
        if width == 0 || height == 0 {
            return Err(MosaicError::InvalidTileSize { width, height });
        }
        Ok((width, height))
    }
}

/// Shared flag that aborts a running mosaic.
///
/// Clones share the same flag. Workers check it before each tile.
///
/// # Example
///
/// ```
/// use emoticon_match::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
