//! Splitting an image into tiles and matching each tile
//!
//! The image is cut into a `ceil(w / tw) × ceil(h / th)` grid in row-major
//! order. Tiles on the right and bottom edges are cropped to the image, never
//! padded. Each tile is histogrammed with the emoticon set's options and
//! handed to the configured matcher.
//!
//! Tiles are independent, so they run on a rayon pool. Results are collected
//! through an indexed parallel iterator: the grid slot of every result is its
//! tile index, and sequential and parallel runs produce identical grids.

mod options;
mod tile;

pub use options::{CancelToken, TilerOptions, Workers};
pub use tile::{ImageTile, TileBounds, TilePosition};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::api::MosaicError;
use crate::emoticon::{Bitmap, EmoticonSet};
use crate::histogram::Histogram3D;
use crate::matcher::peak::{self, extract_peaks};
use crate::matcher::{correlation, MatchAlgorithm, MatchOutcome};
use crate::output::{MatchResult, MosaicGrid};

/// Grid dimensions for an image and tile size.
pub fn grid_size(
    image_width: usize,
    image_height: usize,
    tile_width: usize,
    tile_height: usize,
) -> (usize, usize) {
    (image_width.div_ceil(tile_width), image_height.div_ceil(tile_height))
}

/// Cut `image` into tiles of at most `tile_width × tile_height`, row-major.
///
/// # Errors
///
/// [`MosaicError::InvalidTileSize`] if either side is zero.
///
/// # Example
///
/// ```
/// use emoticon_match::{partition, Bitmap, Pixel};
///
/// let image = Bitmap::solid(5, 3, Pixel::rgb(0, 0, 0));
/// let tiles = partition(&image, 2, 2).unwrap();
///
/// assert_eq!(tiles.len(), 6);
/// let corner = tiles[5].bounds();
/// assert_eq!((corner.x, corner.y, corner.width, corner.height), (4, 2, 1, 1));
/// ```
pub fn partition(
    image: &Bitmap,
    tile_width: usize,
    tile_height: usize,
) -> Result<Vec<ImageTile<'_>>, MosaicError> {
    if tile_width == 0 || tile_height == 0 {
        return Err(MosaicError::InvalidTileSize {
            width: tile_width,
            height: tile_height,
        });
    }

    let (columns, rows) = grid_size(image.width(), image.height(), tile_width, tile_height);
    let mut tiles = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            let x = column * tile_width;
            let y = row * tile_height;
            let bounds = TileBounds {
                x,
                y,
                width: tile_width.min(image.width() - x),
                height: tile_height.min(image.height() - y),
            };
            tiles.push(ImageTile::new(TilePosition { column, row }, bounds, image));
        }
    }
    Ok(tiles)
}

/// Drives the per-tile pipeline over a worker pool.
///
/// The tiler is reusable; [`run`](Self::run) takes `&self`.
#[derive(Debug, Clone, Default)]
pub struct Tiler {
    options: TilerOptions,
}

impl Tiler {
    pub fn new(options: TilerOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &TilerOptions {
        &self.options
    }

    /// Match every tile of `image` against `set`.
    ///
    /// `cancel` is checked before each tile; once it fires, no further tiles
    /// start and the run returns [`MosaicError::Cancelled`].
    ///
    /// # Errors
    ///
    /// - [`MosaicError::InvalidTileSize`] for a zero tile side
    /// - [`MosaicError::InvalidOptions`] if the peak options are invalid or
    ///   extract clusters differently from the set
    /// - [`MosaicError::ThreadPool`] if the worker pool cannot start
    /// - [`MosaicError::Cancelled`]
    pub fn run(
        &self,
        image: &Bitmap,
        set: &EmoticonSet,
        cancel: &CancelToken,
    ) -> Result<MosaicGrid, MosaicError> {
        let (tile_width, tile_height) = self.options.resolve_tile_size(set.glyph_size())?;
        if self.options.algorithm == MatchAlgorithm::Peak {
            self.options.peak.validate()?;
            if !self.options.peak.same_extraction(set.peak_options()) {
                return Err(MosaicError::InvalidOptions(
                    "peak extraction options differ from the emoticon set's".into(),
                ));
            }
        }

        let tiles = partition(image, tile_width, tile_height)?;
        let (columns, rows) = grid_size(image.width(), image.height(), tile_width, tile_height);
        let workers = self.options.workers.count().min(tiles.len()).max(1);
        debug!(
            columns,
            rows,
            tile_width,
            tile_height,
            workers,
            algorithm = %self.options.algorithm,
            "Tiling image"
        );

        let process = |tile: &ImageTile<'_>| -> Result<MatchResult, MosaicError> {
            if cancel.is_cancelled() {
                return Err(MosaicError::Cancelled);
            }
            Ok(self.match_tile(tile, set))
        };

        let cells: Vec<MatchResult> = match self.options.workers {
            Workers::Sequential => tiles.iter().map(process).collect::<Result<_, _>>()?,
            Workers::Auto | Workers::Fixed(_) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("mosaic-worker-{i}"))
                    .build()
                    .map_err(|e| MosaicError::ThreadPool(e.to_string()))?;
                pool.install(|| tiles.par_iter().map(process).collect::<Result<_, _>>())?
            }
        };

        // A cancel that lands after the last tile still discards the grid.
        if cancel.is_cancelled() {
            return Err(MosaicError::Cancelled);
        }

        let grid = MosaicGrid::new(
            columns,
            rows,
            (tile_width, tile_height),
            self.options.algorithm,
            cells,
        );
        info!(
            tiles = grid.len(),
            fallbacks = grid.fallback_count(),
            "Mosaic complete"
        );
        Ok(grid)
    }

    fn match_tile(&self, tile: &ImageTile<'_>, set: &EmoticonSet) -> MatchResult {
        let histogram = Histogram3D::from_pixels(tile.pixels(), set.histogram_options());
        let outcome: MatchOutcome = match self.options.algorithm {
            MatchAlgorithm::Correlation => correlation::best_match(&histogram, set),
            MatchAlgorithm::Peak => {
                let clusters = extract_peaks(&histogram, &self.options.peak);
                peak::best_match(&clusters, set, &self.options.peak)
            }
        };
        MatchResult {
            position: tile.position(),
            bounds: tile.bounds(),
            id: outcome.id,
            score: outcome.score,
            fallback: outcome.fallback,
        }
    }
}
