//! Depth reduction: mapping continuous HCL colors onto a `depth³` grid.
//!
//! Each channel is scaled by its maximum and bucketed independently:
//!
//! ```text
//! bucket = clamp(floor(value / channel_max * depth), 0, depth - 1)
//! ```
//!
//! Chroma uses 135 as its maximum. The most saturated sRGB color (blue)
//! sits at about 133.8, so the whole display gamut lands inside the grid.

use crate::api::MosaicError;
use crate::color::Hcl;

/// Hue range in degrees.
pub const HUE_MAX: f32 = 360.0;
/// Chroma normalization bound; covers the sRGB gamut.
pub const CHROMA_MAX: f32 = 135.0;
/// Lightness range.
pub const LIGHTNESS_MAX: f32 = 100.0;

/// Validated quantization depth: the number of buckets per channel.
///
/// A histogram at depth `d` has `d³` cells, so the upper bound keeps dense
/// storage at 262 144 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Depth(usize);

impl Depth {
    pub const MIN: usize = 2;
    pub const MAX: usize = 64;
    pub const DEFAULT: usize = 16;

    /// Validate a depth.
    ///
    /// # Errors
    ///
    /// [`MosaicError::InvalidDepth`] outside `2..=64`.
    pub fn new(depth: usize) -> Result<Self, MosaicError> {
        if (Self::MIN..=Self::MAX).contains(&depth) {
            Ok(Self(depth))
        } else {
            Err(MosaicError::InvalidDepth(depth))
        }
    }

    /// Buckets per channel.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Total number of cells, `depth³`.
    #[inline]
    pub fn cells(self) -> usize {
        self.0 * self.0 * self.0
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for Depth {
    type Error = MosaicError;

    fn try_from(depth: usize) -> Result<Self, Self::Error> {
        Self::new(depth)
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A color reduced to bucket coordinates, each in `0..depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReducedColor {
    pub h: u8,
    pub c: u8,
    pub l: u8,
}

impl ReducedColor {
    #[inline]
    pub const fn new(h: u8, c: u8, l: u8) -> Self {
        Self { h, c, l }
    }

    /// Dense histogram index: `(h * depth + c) * depth + l`.
    #[inline]
    pub fn index(self, depth: Depth) -> usize {
        let d = depth.get();
        (self.h as usize * d + self.c as usize) * d + self.l as usize
    }

    /// Inverse of [`index`](Self::index).
    ///
    /// `index` must be below `depth.cells()`.
    #[inline]
    pub fn from_index(index: usize, depth: Depth) -> Self {
        let d = depth.get();
        debug_assert!(index < depth.cells(), "index {index} out of range for depth {d}");
        Self {
            h: (index / (d * d)) as u8,
            c: ((index / d) % d) as u8,
            l: (index % d) as u8,
        }
    }

    /// The color at the middle of this bucket.
    pub fn center(self, depth: Depth) -> Hcl {
        let d = depth.get() as f32;
        let mid = |bucket: u8, max: f32| (bucket as f32 + 0.5) / d * max;
        Hcl::new(
            mid(self.h, HUE_MAX),
            mid(self.c, CHROMA_MAX),
            mid(self.l, LIGHTNESS_MAX),
        )
    }
}

impl std::fmt::Display for ReducedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.h, self.c, self.l)
    }
}

#[inline]
fn bucket(value: f32, max: f32, depth: usize) -> u8 {
    let scaled = (value / max * depth as f32).floor();
    // NaN and negatives land in bucket 0
    if !(scaled > 0.0) {
        return 0;
    }
    (scaled as usize).min(depth - 1) as u8
}

/// Reduce an HCL color to its bucket at `depth`.
///
/// Deterministic and monotonic in every channel.
#[inline]
pub fn reduce(hcl: Hcl, depth: Depth) -> ReducedColor {
    let d = depth.get();
    ReducedColor {
        h: bucket(hcl.h, HUE_MAX, d),
        c: bucket(hcl.c, CHROMA_MAX, d),
        l: bucket(hcl.l, LIGHTNESS_MAX, d),
    }
}
