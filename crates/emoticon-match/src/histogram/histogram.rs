//! Dense 3-D color histogram over quantized HCL.

use super::kernel::GaussianKernel;
use crate::color::{to_hcl, Pixel};
use crate::quantize::{reduce, Depth, ReducedColor};

/// Pixels at or above this alpha are counted (more than 80 % opaque).
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 205;

/// Parameters shared by every histogram that will be compared.
///
/// Tile and emoticon histograms must be built with the same options to be
/// comparable; [`EmoticonSet`](crate::EmoticonSet) records the options it
/// was built with so the tiler can reuse them.
///
/// # Example
///
/// ```
/// use emoticon_match::{Depth, GaussianKernel, HistogramOptions};
///
/// let options = HistogramOptions::new()
///     .depth(Depth::new(8).unwrap())
///     .kernel(GaussianKernel::identity());
/// assert_eq!(options.depth.get(), 8);
/// assert_eq!(options.alpha_threshold, 205);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramOptions {
    /// Buckets per channel.
    ///
    /// Default: 16
    pub depth: Depth,

    /// Minimum alpha for a pixel to be counted.
    ///
    /// Default: 205
    pub alpha_threshold: u8,

    /// Smoothing kernel applied after counting.
    ///
    /// Default: radius 1, the binomial 1-2-1 kernel
    pub kernel: GaussianKernel,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            depth: Depth::default(),
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            kernel: GaussianKernel::default(),
        }
    }
}

impl HistogramOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    #[inline]
    pub fn alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    #[inline]
    pub fn kernel(mut self, kernel: GaussianKernel) -> Self {
        self.kernel = kernel;
        self
    }
}

/// Color distribution of an image region.
///
/// Holds `depth³` raw counts and a smoothed copy, both indexed by
/// [`ReducedColor::index`]. Raw counts only ever grow while building; the
/// smoothed copy starts equal to the raw counts and is replaced by
/// [`smooth`](Self::smooth).
///
/// # Example
///
/// ```
/// use emoticon_match::{Histogram3D, HistogramOptions, Pixel};
///
/// let pixels = vec![Pixel::rgb(255, 0, 0); 16];
/// let histogram = Histogram3D::from_pixels(pixels, &HistogramOptions::default());
///
/// assert_eq!(histogram.total(), 16);
/// assert!((histogram.smoothed_total() - 16.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram3D {
    depth: Depth,
    raw: Vec<u32>,
    smoothed: Vec<f32>,
    transparent: usize,
}

impl Histogram3D {
    /// An empty histogram at `depth`.
    pub fn empty(depth: Depth) -> Self {
        Self {
            depth,
            raw: vec![0; depth.cells()],
            smoothed: vec![0.0; depth.cells()],
            transparent: 0,
        }
    }

    /// Count pixels without smoothing.
    ///
    /// Pixels below `options.alpha_threshold` are skipped and tallied in
    /// [`transparent_pixels`](Self::transparent_pixels).
    pub fn build<I>(pixels: I, options: &HistogramOptions) -> Self
    where
        I: IntoIterator<Item = Pixel>,
    {
        let mut histogram = Self::empty(options.depth);
        for pixel in pixels {
            if pixel.a < options.alpha_threshold {
                histogram.transparent += 1;
                continue;
            }
            let index = reduce(to_hcl(pixel), options.depth).index(options.depth);
            histogram.raw[index] += 1;
        }
        for (s, &r) in histogram.smoothed.iter_mut().zip(&histogram.raw) {
            *s = r as f32;
        }
        histogram
    }

    /// Count pixels, then smooth with `options.kernel`.
    pub fn from_pixels<I>(pixels: I, options: &HistogramOptions) -> Self
    where
        I: IntoIterator<Item = Pixel>,
    {
        let mut histogram = Self::build(pixels, options);
        histogram.smooth(&options.kernel);
        histogram
    }

    /// Recompute the smoothed copy from the raw counts.
    ///
    /// The kernel is applied along hue, chroma and lightness in turn. Each
    /// cell scatters its value to its neighbors, so every unit of mass that
    /// leaves a cell arrives somewhere else in the cube. Hue neighbors wrap
    /// around; chroma and lightness neighbors past an edge are reflected
    /// back inside.
    pub fn smooth(&mut self, kernel: &GaussianKernel) {
        let mut current: Vec<f32> = self.raw.iter().map(|&r| r as f32).collect();
        if !kernel.is_identity() {
            let d = self.depth.get();
            let mut scratch = vec![0.0f32; current.len()];
            for (axis, stride) in [(Axis::Hue, d * d), (Axis::Chroma, d), (Axis::Lightness, 1)] {
                scatter_axis(&current, &mut scratch, d, stride, axis, kernel);
                std::mem::swap(&mut current, &mut scratch);
            }
        }
        self.smoothed = current;
    }

    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Raw counts in dense index order.
    #[inline]
    pub fn raw(&self) -> &[u32] {
        &self.raw
    }

    /// Smoothed values in dense index order.
    #[inline]
    pub fn smoothed(&self) -> &[f32] {
        &self.smoothed
    }

    #[inline]
    pub fn count(&self, color: ReducedColor) -> u32 {
        self.raw[color.index(self.depth)]
    }

    #[inline]
    pub fn smoothed_at(&self, color: ReducedColor) -> f32 {
        self.smoothed[color.index(self.depth)]
    }

    /// Number of counted (visible) pixels.
    pub fn total(&self) -> u64 {
        self.raw.iter().map(|&c| c as u64).sum()
    }

    pub fn smoothed_total(&self) -> f64 {
        self.smoothed.iter().map(|&v| v as f64).sum()
    }

    /// Number of pixels skipped for being below the alpha threshold.
    #[inline]
    pub fn transparent_pixels(&self) -> usize {
        self.transparent
    }

    /// True when no pixel was counted.
    pub fn is_empty(&self) -> bool {
        self.raw.iter().all(|&c| c == 0)
    }

    /// Buckets with at least one raw count, in index order.
    pub fn occupied_buckets(&self) -> Vec<(ReducedColor, u32)> {
        self.raw
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(index, &count)| (ReducedColor::from_index(index, self.depth), count))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Hue,
    Chroma,
    Lightness,
}

/// Map an out-of-range coordinate back into `0..d` by mirroring at the edges.
#[inline]
fn reflect(mut j: isize, d: isize) -> usize {
    loop {
        if j < 0 {
            j = -j - 1;
        } else if j >= d {
            j = 2 * d - j - 1;
        } else {
            return j as usize;
        }
    }
}

fn scatter_axis(
    src: &[f32],
    dst: &mut [f32],
    depth: usize,
    stride: usize,
    axis: Axis,
    kernel: &GaussianKernel,
) {
    dst.fill(0.0);
    let d = depth as isize;
    let radius = kernel.radius() as isize;
    let weights = kernel.weights();

    for (index, &value) in src.iter().enumerate() {
        if value == 0.0 {
            continue;
        }
        let coord = ((index / stride) % depth) as isize;
        let base = index - coord as usize * stride;
        for (offset, &weight) in (-radius..=radius).zip(weights) {
            let target = match axis {
                Axis::Hue => (coord + offset).rem_euclid(d) as usize,
                Axis::Chroma | Axis::Lightness => reflect(coord + offset, d),
            };
            dst[base + target * stride] += value * weight;
        }
    }
}
