//! The emoticon histogram cache.

use rayon::prelude::*;
use tracing::{debug, warn};

use super::bitmap::Bitmap;
use crate::api::MosaicError;
use crate::histogram::{Histogram3D, HistogramOptions};
use crate::matcher::peak::{extract_peaks, Cluster, PeakOptions};

/// Dense index of an emoticon within its [`EmoticonSet`].
///
/// Ids follow insertion order, and on ties the lowest id wins, so asset
/// order is part of the matching contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EmoticonId(usize);

impl EmoticonId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EmoticonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An emoticon as supplied by the caller, before histograms are computed.
#[derive(Debug, Clone)]
pub struct EmoticonAsset {
    /// Stable name, usually the file stem (`1f600`)
    pub key: String,
    /// Text to print for this emoticon, if it has one
    pub glyph: Option<String>,
    pub bitmap: Bitmap,
}

impl EmoticonAsset {
    pub fn new(key: impl Into<String>, bitmap: Bitmap) -> Self {
        Self {
            key: key.into(),
            glyph: None,
            bitmap,
        }
    }

    #[inline]
    pub fn glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = Some(glyph.into());
        self
    }
}

/// An emoticon with its precomputed histogram and clusters.
#[derive(Debug, Clone)]
pub struct Emoticon {
    id: EmoticonId,
    key: String,
    glyph: Option<String>,
    bitmap: Bitmap,
    histogram: Histogram3D,
    peaks: Vec<Cluster>,
}

impl Emoticon {
    #[inline]
    pub fn id(&self) -> EmoticonId {
        self.id
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    /// Glyph text, or the key for emoticons without one.
    #[inline]
    pub fn label(&self) -> &str {
        self.glyph.as_deref().unwrap_or(&self.key)
    }

    #[inline]
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    #[inline]
    pub fn histogram(&self) -> &Histogram3D {
        &self.histogram
    }

    /// Clusters of the smoothed histogram, heaviest first.
    #[inline]
    pub fn peaks(&self) -> &[Cluster] {
        &self.peaks
    }
}

/// Immutable, ordered collection of emoticons with cached histograms.
///
/// Built once before any tile is processed, then shared read-only between
/// tile workers (`&EmoticonSet` or `Arc<EmoticonSet>`). Every histogram in
/// the set was built with [`histogram_options`](Self::histogram_options),
/// and every cluster list with [`peak_options`](Self::peak_options).
///
/// # Example
///
/// ```
/// use emoticon_match::{
///     Bitmap, EmoticonAsset, EmoticonSet, HistogramOptions, PeakOptions, Pixel,
/// };
///
/// let assets = vec![
///     EmoticonAsset::new("red", Bitmap::solid(4, 4, Pixel::rgb(255, 0, 0))),
///     EmoticonAsset::new("blue", Bitmap::solid(4, 4, Pixel::rgb(0, 0, 255))),
/// ];
/// let set = EmoticonSet::new(assets, HistogramOptions::default(), PeakOptions::default())
///     .unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.glyph_size(), (4, 4));
/// ```
#[derive(Debug, Clone)]
pub struct EmoticonSet {
    emoticons: Vec<Emoticon>,
    histogram_options: HistogramOptions,
    peak_options: PeakOptions,
}

impl EmoticonSet {
    /// Compute histograms and clusters for every asset.
    ///
    /// Assets without a single pixel above the alpha threshold carry no
    /// color information; they are dropped with a warning. Surviving
    /// emoticons receive dense ids in their original order.
    ///
    /// # Errors
    ///
    /// - [`MosaicError::InvalidOptions`] if `peak_options` fail validation
    /// - [`MosaicError::EmptyEmoticonSet`] if no asset survives
    pub fn new(
        assets: Vec<EmoticonAsset>,
        histogram_options: HistogramOptions,
        peak_options: PeakOptions,
    ) -> Result<Self, MosaicError> {
        peak_options.validate()?;
        let supplied = assets.len();

        let analyzed: Vec<(EmoticonAsset, Histogram3D, Vec<Cluster>)> = assets
            .into_par_iter()
            .map(|asset| {
                let histogram =
                    Histogram3D::from_pixels(asset.bitmap.pixels().iter().copied(), &histogram_options);
                let peaks = extract_peaks(&histogram, &peak_options);
                (asset, histogram, peaks)
            })
            .collect();

        let mut emoticons = Vec::with_capacity(analyzed.len());
        for (asset, histogram, peaks) in analyzed {
            if histogram.is_empty() {
                warn!(key = %asset.key, "Dropping emoticon without visible pixels");
                continue;
            }
            debug!(
                key = %asset.key,
                buckets = histogram.occupied_buckets().len(),
                peaks = peaks.len(),
                "Analyzed emoticon"
            );
            emoticons.push(Emoticon {
                id: EmoticonId::new(emoticons.len()),
                key: asset.key,
                glyph: asset.glyph,
                bitmap: asset.bitmap,
                histogram,
                peaks,
            });
        }

        if emoticons.is_empty() {
            return Err(MosaicError::EmptyEmoticonSet);
        }
        debug!(
            supplied,
            kept = emoticons.len(),
            depth = %histogram_options.depth,
            "Built emoticon set"
        );

        Ok(Self {
            emoticons,
            histogram_options,
            peak_options,
        })
    }

    /// Number of emoticons; never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.emoticons.len()
    }

    /// Always false; kept alongside [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.emoticons.is_empty()
    }

    #[inline]
    pub fn get(&self, id: EmoticonId) -> Option<&Emoticon> {
        self.emoticons.get(id.index())
    }

    /// Emoticons in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Emoticon> {
        self.emoticons.iter()
    }

    #[inline]
    pub fn histogram_options(&self) -> &HistogramOptions {
        &self.histogram_options
    }

    #[inline]
    pub fn peak_options(&self) -> &PeakOptions {
        &self.peak_options
    }

    /// Dimensions of the first emoticon's bitmap; the default tile size.
    pub fn glyph_size(&self) -> (usize, usize) {
        let bitmap = self.emoticons[0].bitmap();
        (bitmap.width(), bitmap.height())
    }
}

impl<'a> IntoIterator for &'a EmoticonSet {
    type Item = &'a Emoticon;
    type IntoIter = std::slice::Iter<'a, Emoticon>;

    fn into_iter(self) -> Self::IntoIter {
        self.emoticons.iter()
    }
}
