// Generated LUT tables and the histogram/histogram.rs layout trip these lints
#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::module_inception
)]

//! emoticon-match: color histogram matching of image tiles against emoticons
//!
//! This library picks, for every tile of an image, the emoticon whose color
//! distribution fits best. It is the engine behind the `emotim` mosaic tool.
//!
//! # Quick Start
//!
//! ```
//! use emoticon_match::{
//!     Bitmap, EmoticonAsset, EmoticonMosaic, EmoticonSet, HistogramOptions, PeakOptions, Pixel,
//! };
//!
//! let assets = vec![
//!     EmoticonAsset::new("1f534", Bitmap::solid(8, 8, Pixel::rgb(221, 46, 68))).glyph("🔴"),
//!     EmoticonAsset::new("1f535", Bitmap::solid(8, 8, Pixel::rgb(85, 172, 238))).glyph("🔵"),
//! ];
//! let set = EmoticonSet::new(assets, HistogramOptions::default(), PeakOptions::default())
//!     .unwrap();
//!
//! let image = Bitmap::solid(32, 16, Pixel::rgb(90, 170, 230));
//! let grid = EmoticonMosaic::new(set).render(&image).unwrap();
//!
//! assert_eq!((grid.columns(), grid.rows()), (4, 2));
//! assert!(grid.cells().iter().all(|cell| cell.id.index() == 1));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! EmoticonSet::new            (once: histogram + clusters per emoticon)
//!     |
//! Tiler::run                  (row-major tiles, rayon worker pool)
//!     |
//!     +-- per tile:
//!     |     Pixel -> Hcl       (color: sRGB -> linear -> XYZ -> Lab -> HCL)
//!     |     Hcl -> bucket      (quantize: depth per channel)
//!     |     Histogram3D        (count visible pixels, Gaussian smoothing)
//!     |     matcher            (correlation or peak clusters)
//!     v
//! MosaicGrid                  (one MatchResult per tile)
//! ```
//!
//! # Color Space
//!
//! Histograms are built in HCL, the polar form of CIELAB: hue in degrees,
//! chroma, and lightness. Each axis is quantized into `depth` buckets.
//! Hue is circular, so smoothing and peak distances wrap around it, while
//! chroma and lightness have hard edges that smoothing reflects off.
//!
//! Grey pixels have no meaningful hue. They are assigned `h = 0`, which
//! keeps the conversion total and puts every grey into hue bucket 0.
//!
//! # Matching
//!
//! - [`MatchAlgorithm::Correlation`] compares whole smoothed histograms
//!   with the Pearson coefficient. Negative correlation scores zero.
//! - [`MatchAlgorithm::Peak`] reduces each histogram to a handful of
//!   clusters (local maxima weighed by the mass around them) and pairs them
//!   up greedily by Gaussian similarity.
//!
//! Both pick the highest score with the lowest id winning ties. A tile on
//! which every emoticon scores zero gets the first emoticon and its
//! [`MatchResult::fallback`] flag set; this is never an error.

pub mod api;
pub mod color;
pub mod emoticon;
pub mod histogram;
pub mod matcher;
pub mod output;
pub mod quantize;
pub mod tiler;


pub use api::{EmoticonMosaic, MosaicError, ParseColorError};
pub use color::{to_hcl, to_rgb, Hcl, Lab, LinearRgb, Pixel, Srgb, Xyz};
pub use emoticon::{Bitmap, Emoticon, EmoticonAsset, EmoticonId, EmoticonSet};
pub use histogram::{GaussianKernel, Histogram3D, HistogramOptions};
pub use matcher::peak::{extract_peaks, Cluster, PeakOptions};
pub use matcher::{MatchAlgorithm, MatchOutcome, SCORE_TIE_EPSILON};
pub use output::{MatchResult, MosaicGrid};
pub use quantize::{reduce, Depth, ReducedColor};
pub use tiler::{
    partition, CancelToken, ImageTile, TileBounds, TilePosition, Tiler, TilerOptions, Workers,
};
