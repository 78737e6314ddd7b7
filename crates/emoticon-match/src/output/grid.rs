//! MosaicGrid: the per-tile emoticon choices of a finished run.

use crate::emoticon::EmoticonId;
use crate::matcher::MatchAlgorithm;
use crate::tiler::{TileBounds, TilePosition};

/// The emoticon chosen for one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub position: TilePosition,
    pub bounds: TileBounds,
    pub id: EmoticonId,
    /// Score of the chosen emoticon, in `[0, 1]`
    pub score: f32,
    /// True when no emoticon scored above zero and the lowest id was used
    pub fallback: bool,
}

/// The canonical output of a mosaic run.
///
/// Holds one [`MatchResult`] per tile in row-major order, so the cell at
/// `(column, row)` lives at index `row * columns + column`.
///
/// # Example
///
/// ```
/// use emoticon_match::{
///     Bitmap, EmoticonAsset, EmoticonSet, HistogramOptions, PeakOptions, Pixel,
///     Tiler, TilerOptions, CancelToken,
/// };
///
/// let assets = vec![EmoticonAsset::new("red", Bitmap::solid(2, 2, Pixel::rgb(255, 0, 0)))];
/// let set = EmoticonSet::new(assets, HistogramOptions::default(), PeakOptions::default())
///     .unwrap();
///
/// let image = Bitmap::solid(5, 3, Pixel::rgb(250, 10, 10));
/// let grid = Tiler::new(TilerOptions::new())
///     .run(&image, &set, &CancelToken::new())
///     .unwrap();
///
/// assert_eq!((grid.columns(), grid.rows()), (3, 2));
/// assert_eq!(grid.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicGrid {
    columns: usize,
    rows: usize,
    tile_width: usize,
    tile_height: usize,
    algorithm: MatchAlgorithm,
    cells: Vec<MatchResult>,
}

impl MosaicGrid {
    /// Assemble a grid from row-major results.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `cells.len() == columns * rows`.
    pub fn new(
        columns: usize,
        rows: usize,
        tile_size: (usize, usize),
        algorithm: MatchAlgorithm,
        cells: Vec<MatchResult>,
    ) -> Self {
        debug_assert_eq!(
            cells.len(),
            columns * rows,
            "cells length ({}) must match columns * rows ({}x{})",
            cells.len(),
            columns,
            rows,
        );
        Self {
            columns,
            rows,
            tile_width: tile_size.0,
            tile_height: tile_size.1,
            algorithm,
            cells,
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Nominal tile size; edge tiles may be smaller.
    #[inline]
    pub fn tile_size(&self) -> (usize, usize) {
        (self.tile_width, self.tile_height)
    }

    #[inline]
    pub fn algorithm(&self) -> MatchAlgorithm {
        self.algorithm
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[MatchResult] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<&MatchResult> {
        if column < self.columns && row < self.rows {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Cells grouped by row, top to bottom.
    pub fn iter_rows(&self) -> std::slice::Chunks<'_, MatchResult> {
        self.cells.chunks(self.columns.max(1))
    }

    /// Chosen ids, row-major.
    pub fn ids(&self) -> Vec<EmoticonId> {
        self.cells.iter().map(|cell| cell.id).collect()
    }

    /// Number of tiles that fell back to the lowest id.
    pub fn fallback_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.fallback).count()
    }
}
