//! Owned RGBA raster used for source images and emoticon glyphs.

use crate::api::MosaicError;
use crate::color::Pixel;

/// A validated, row-major RGBA image.
///
/// Both dimensions are non-zero and `pixels.len() == width * height`; the
/// constructors refuse anything else, so every `Bitmap` in circulation can
/// be tiled without further checks.
///
/// # Example
///
/// ```
/// use emoticon_match::{Bitmap, Pixel};
///
/// let bitmap = Bitmap::solid(3, 2, Pixel::rgb(0, 0, 255));
/// assert_eq!(bitmap.width(), 3);
/// assert_eq!(bitmap.row(1).len(), 3);
/// assert!(Bitmap::new(2, 2, vec![Pixel::default(); 3]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// [`MosaicError::InvalidImage`] for a zero dimension or a buffer whose
    /// length is not `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, MosaicError> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(pixels.len()) {
            return Err(MosaicError::InvalidImage {
                width,
                height,
                pixels: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from interleaved `[R, G, B, A, ...]` bytes.
    pub fn from_rgba(width: usize, height: usize, bytes: &[u8]) -> Result<Self, MosaicError> {
        if bytes.len() % 4 != 0 {
            return Err(MosaicError::InvalidImage {
                width,
                height,
                pixels: bytes.len() / 4,
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Pixel::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A bitmap filled with one pixel value. Zero dimensions are bumped to 1.
    pub fn solid(width: usize, height: usize, pixel: Pixel) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the bitmap.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// One row of pixels. Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Interleaved `[R, G, B, A, ...]` bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgba()).collect()
    }
}
