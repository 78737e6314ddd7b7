//! Tile geometry and borrowed tile views.

use crate::color::Pixel;
use crate::emoticon::Bitmap;

/// Grid coordinates of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePosition {
    pub column: usize,
    pub row: usize,
}

/// Pixel rectangle a tile covers in the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileBounds {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl TileBounds {
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// A rectangular view into a source image.
#[derive(Debug, Clone, Copy)]
pub struct ImageTile<'a> {
    position: TilePosition,
    bounds: TileBounds,
    image: &'a Bitmap,
}

impl<'a> ImageTile<'a> {
    pub(crate) fn new(position: TilePosition, bounds: TileBounds, image: &'a Bitmap) -> Self {
        debug_assert!(bounds.x + bounds.width <= image.width());
        debug_assert!(bounds.y + bounds.height <= image.height());
        Self {
            position,
            bounds,
            image,
        }
    }

    #[inline]
    pub fn position(&self) -> TilePosition {
        self.position
    }

    #[inline]
    pub fn bounds(&self) -> TileBounds {
        self.bounds
    }

    /// Pixels of the tile, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + 'a {
        let TileBounds {
            x,
            y,
            width,
            height,
        } = self.bounds;
        let image = self.image;
        (y..y + height).flat_map(move |row| image.row(row)[x..x + width].iter().copied())
    }
}
