//! EmoticonMosaic builder, the primary entry point for the crate.
//!
//! [`EmoticonMosaic`] wraps the tiling pipeline with fluent configuration
//! on top of a prepared [`EmoticonSet`].

use std::sync::Arc;

use super::error::MosaicError;
use crate::emoticon::{Bitmap, EmoticonSet};
use crate::matcher::MatchAlgorithm;
use crate::output::MosaicGrid;
use crate::tiler::{CancelToken, Tiler, TilerOptions, Workers};

/// High-level mosaic builder.
///
/// # Design
///
/// - Constructor requires an [`EmoticonSet`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`render()`](Self::render) takes `&self` so the builder is reusable
///   across images
/// - Peak extraction settings come from the set; only the scoring
///   parameters can be changed here
///
/// # Example
///
/// ```
/// use emoticon_match::{
///     Bitmap, EmoticonAsset, EmoticonMosaic, EmoticonSet, HistogramOptions,
///     MatchAlgorithm, PeakOptions, Pixel,
/// };
///
/// let assets = vec![
///     EmoticonAsset::new("red", Bitmap::solid(2, 2, Pixel::rgb(255, 0, 0))),
///     EmoticonAsset::new("blue", Bitmap::solid(2, 2, Pixel::rgb(0, 0, 255))),
/// ];
/// let set = EmoticonSet::new(assets, HistogramOptions::default(), PeakOptions::default())
///     .unwrap();
///
/// let mosaic = EmoticonMosaic::new(set)
///     .algorithm(MatchAlgorithm::Peak)
///     .tile_size(2, 2);
///
/// let image = Bitmap::solid(4, 2, Pixel::rgb(0, 0, 250));
/// let grid = mosaic.render(&image).unwrap();
/// assert_eq!(grid.cells()[0].id.index(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EmoticonMosaic {
    set: Arc<EmoticonSet>,
    options: TilerOptions,
}

impl EmoticonMosaic {
    /// Create a mosaic builder over `set`.
    ///
    /// Defaults: correlation matching, tiles the size of the emoticons,
    /// one worker per processing unit.
    pub fn new(set: impl Into<Arc<EmoticonSet>>) -> Self {
        let set = set.into();
        let options = TilerOptions::new().peak(set.peak_options().clone());
        Self { set, options }
    }

    /// Replace all tiler options at once.
    ///
    /// The peak extraction settings must still agree with the set's, or
    /// rendering fails with [`MosaicError::InvalidOptions`].
    pub fn with_options(mut self, options: TilerOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: MatchAlgorithm) -> Self {
        self.options.algorithm = algorithm;
        self
    }

    /// Set the tile size in source pixels.
    #[inline]
    pub fn tile_size(mut self, width: usize, height: usize) -> Self {
        self.options = self.options.tile_size(width, height);
        self
    }

    #[inline]
    pub fn workers(mut self, workers: Workers) -> Self {
        self.options.workers = workers;
        self
    }

    /// Set the width of the peak similarity Gaussian.
    #[inline]
    pub fn similarity_sigma(mut self, sigma: f32) -> Self {
        self.options.peak.similarity_sigma = sigma;
        self
    }

    /// Set the `[hue, chroma, lightness]` weights of the peak distance.
    #[inline]
    pub fn distance_scale(mut self, scale: [f32; 3]) -> Self {
        self.options.peak.distance_scale = scale;
        self
    }

    #[inline]
    pub fn set(&self) -> &Arc<EmoticonSet> {
        &self.set
    }

    #[inline]
    pub fn options(&self) -> &TilerOptions {
        &self.options
    }

    /// Match every tile of `image`.
    pub fn render(&self, image: &Bitmap) -> Result<MosaicGrid, MosaicError> {
        self.render_cancellable(image, &CancelToken::new())
    }

    /// Match every tile of `image`, stopping early once `cancel` fires.
    pub fn render_cancellable(
        &self,
        image: &Bitmap,
        cancel: &CancelToken,
    ) -> Result<MosaicGrid, MosaicError> {
        Tiler::new(self.options.clone()).run(image, &self.set, cancel)
    }
}
