//! Local-maxima matching.
//!
//! A histogram is summarized by its dominant color clusters: the peaks of
//! the smoothed histogram, each weighed by the mass of the hill around it.
//! Two summaries are compared by pairing clusters one-to-one, heaviest
//! pairs first, where a pair's weight is the Gaussian similarity of the two
//! peak positions times the share of pixels each cluster holds.

use super::{select_best, MatchOutcome};
use crate::api::MosaicError;
use crate::emoticon::EmoticonSet;
use crate::histogram::Histogram3D;
use crate::quantize::{Depth, ReducedColor};

/// Configuration for peak extraction and cluster comparison.
///
/// `max_peaks` and `extent_fraction` shape the extracted clusters; the
/// emoticon set precomputes its clusters with them, so tiles must use the
/// same values. `similarity_sigma` and `distance_scale` only affect
/// scoring.
///
/// # Example
///
/// ```
/// use emoticon_match::PeakOptions;
///
/// let options = PeakOptions::new()
///     .max_peaks(3)
///     .distance_scale([2.0, 1.0, 1.0]);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PeakOptions {
    /// Clusters kept per histogram, heaviest first.
    ///
    /// Default: 5
    pub max_peaks: usize,

    /// Flood fill around a peak stops at cells below this share of the
    /// peak value.
    ///
    /// Default: 0.5
    pub extent_fraction: f32,

    /// Width of the Gaussian similarity, in units of the whole axis.
    ///
    /// Default: 0.1
    pub similarity_sigma: f32,

    /// Per-axis weights `[hue, chroma, lightness]` in the peak distance.
    ///
    /// Default: `[1.0, 1.0, 1.0]`
    pub distance_scale: [f32; 3],
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            max_peaks: 5,
            extent_fraction: 0.5,
            similarity_sigma: 0.1,
            distance_scale: [1.0, 1.0, 1.0],
        }
    }
}

impl PeakOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_peaks(mut self, max_peaks: usize) -> Self {
        self.max_peaks = max_peaks;
        self
    }

    #[inline]
    pub fn extent_fraction(mut self, fraction: f32) -> Self {
        self.extent_fraction = fraction;
        self
    }

    #[inline]
    pub fn similarity_sigma(mut self, sigma: f32) -> Self {
        self.similarity_sigma = sigma;
        self
    }

    #[inline]
    pub fn distance_scale(mut self, scale: [f32; 3]) -> Self {
        self.distance_scale = scale;
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// [`MosaicError::InvalidOptions`] naming the first offending field.
    pub fn validate(&self) -> Result<(), MosaicError> {
        if self.max_peaks == 0 {
            return Err(MosaicError::InvalidOptions(
                "max_peaks must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.extent_fraction) {
            return Err(MosaicError::InvalidOptions(format!(
                "extent_fraction must be within 0..=1, got {}",
                self.extent_fraction
            )));
        }
        if !(self.similarity_sigma.is_finite() && self.similarity_sigma > 0.0) {
            return Err(MosaicError::InvalidOptions(format!(
                "similarity_sigma must be positive, got {}",
                self.similarity_sigma
            )));
        }
        if self
            .distance_scale
            .iter()
            .any(|s| !(s.is_finite() && *s >= 0.0))
        {
            return Err(MosaicError::InvalidOptions(format!(
                "distance_scale entries must be non-negative, got {:?}",
                self.distance_scale
            )));
        }
        Ok(())
    }

    /// Whether clusters extracted with `other` are interchangeable with ours.
    pub(crate) fn same_extraction(&self, other: &PeakOptions) -> bool {
        self.max_peaks == other.max_peaks && self.extent_fraction == other.extent_fraction
    }
}

/// A dominant color of a histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    /// Bucket of the peak cell
    pub position: ReducedColor,
    /// Dense index of the peak cell
    pub index: usize,
    /// Smoothed value at the peak
    pub peak: f32,
    /// Smoothed mass of the flood-filled hill around the peak
    pub mass: f32,
    /// `mass` divided by the histogram's raw pixel count
    pub fraction: f32,
    /// Peak position divided by depth, per axis
    normalized: [f32; 3],
}

impl Cluster {
    fn new(index: usize, depth: Depth, peak: f32, mass: f32, total: f32) -> Self {
        let position = ReducedColor::from_index(index, depth);
        let d = depth.get() as f32;
        Self {
            position,
            index,
            peak,
            mass,
            fraction: if total > 0.0 { mass / total } else { 0.0 },
            normalized: [
                position.h as f32 / d,
                position.c as f32 / d,
                position.l as f32 / d,
            ],
        }
    }

    /// Scaled distance between two peak positions, in units of the whole
    /// axis. Hue distance goes the short way around the circle.
    pub fn distance(&self, other: &Cluster, scale: [f32; 3]) -> f32 {
        let raw_dh = (self.normalized[0] - other.normalized[0]).abs();
        let dh = raw_dh.min(1.0 - raw_dh) * scale[0];
        let dc = (self.normalized[1] - other.normalized[1]) * scale[1];
        let dl = (self.normalized[2] - other.normalized[2]) * scale[2];
        (dh * dh + dc * dc + dl * dl).sqrt()
    }
}

/// The 26-neighborhood of a cell. Hue wraps; chroma and lightness
/// neighbors outside the cube are skipped.
fn neighbors(index: usize, depth: Depth) -> impl Iterator<Item = usize> {
    let d = depth.get() as isize;
    let center = ReducedColor::from_index(index, depth);
    let (h, c, l) = (center.h as isize, center.c as isize, center.l as isize);

    (-1isize..=1).flat_map(move |dh| {
        (-1isize..=1).flat_map(move |dc| {
            (-1isize..=1).filter_map(move |dl| {
                if dh == 0 && dc == 0 && dl == 0 {
                    return None;
                }
                let (nc, nl) = (c + dc, l + dl);
                if !(0..d).contains(&nc) || !(0..d).contains(&nl) {
                    return None;
                }
                let nh = (h + dh).rem_euclid(d);
                Some(((nh * d + nc) * d + nl) as usize)
            })
        })
    })
}

/// True when `index` beats every neighbor. On a flat top only the cell
/// with the lowest index qualifies.
fn is_peak(values: &[f32], index: usize, depth: Depth) -> bool {
    let value = values[index];
    value > 0.0
        && neighbors(index, depth).all(|n| {
            let other = values[n];
            other < value || (other == value && n > index)
        })
}

/// Sum of the hill around a peak: cells reachable through non-increasing
/// steps that stay at or above `threshold`.
fn flood_mass(
    values: &[f32],
    start: usize,
    threshold: f32,
    depth: Depth,
    visited: &mut [bool],
) -> f32 {
    visited.fill(false);
    visited[start] = true;
    let mut stack = vec![start];
    let mut mass = 0.0f64;

    while let Some(cell) = stack.pop() {
        let value = values[cell];
        mass += value as f64;
        for n in neighbors(cell, depth) {
            if visited[n] {
                continue;
            }
            let other = values[n];
            if other >= threshold && other <= value {
                visited[n] = true;
                stack.push(n);
            }
        }
    }
    mass as f32
}

/// Extract at most `options.max_peaks` clusters from the smoothed histogram.
///
/// Clusters are ordered by mass, heaviest first, then by index. An empty
/// histogram has no clusters.
pub fn extract_peaks(histogram: &Histogram3D, options: &PeakOptions) -> Vec<Cluster> {
    let depth = histogram.depth();
    let values = histogram.smoothed();
    let total = histogram.total() as f32;
    if options.max_peaks == 0 || total <= 0.0 {
        return Vec::new();
    }

    let mut visited = vec![false; values.len()];
    let mut clusters: Vec<Cluster> = (0..values.len())
        .filter(|&index| is_peak(values, index, depth))
        .map(|index| {
            let peak = values[index];
            let threshold = peak * options.extent_fraction;
            let mass = flood_mass(values, index, threshold, depth, &mut visited);
            Cluster::new(index, depth, peak, mass, total)
        })
        .collect();

    clusters.sort_by(|a, b| b.mass.total_cmp(&a.mass).then(a.index.cmp(&b.index)));
    clusters.truncate(options.max_peaks);
    clusters
}

/// Similarity of two cluster lists, roughly in `[0, 1]`.
///
/// Every tile/emoticon cluster pair is weighted by
/// `exp(-d² / 2σ²) * fraction_tile * fraction_emoticon`. Pairs are then
/// accepted greedily, heaviest first (ties by tile cluster index, then
/// emoticon cluster index), each cluster used at most once. The score is
/// the sum of accepted weights.
pub fn score(tile: &[Cluster], emoticon: &[Cluster], options: &PeakOptions) -> f32 {
    if tile.is_empty() || emoticon.is_empty() {
        return 0.0;
    }

    let two_sigma_sq = 2.0 * options.similarity_sigma * options.similarity_sigma;
    let mut pairs: Vec<(f32, usize, usize)> = Vec::with_capacity(tile.len() * emoticon.len());
    for (ti, t) in tile.iter().enumerate() {
        for (ei, e) in emoticon.iter().enumerate() {
            let d = t.distance(e, options.distance_scale);
            let similarity = (-(d * d) / two_sigma_sq).exp();
            pairs.push((similarity * t.fraction * e.fraction, ti, ei));
        }
    }
    pairs.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let mut tile_used = vec![false; tile.len()];
    let mut emoticon_used = vec![false; emoticon.len()];
    let mut remaining = tile.len().min(emoticon.len());
    let mut total = 0.0f32;
    for (weight, ti, ei) in pairs {
        if remaining == 0 {
            break;
        }
        if tile_used[ti] || emoticon_used[ei] {
            continue;
        }
        tile_used[ti] = true;
        emoticon_used[ei] = true;
        remaining -= 1;
        total += weight;
    }
    total
}

/// Score the tile clusters against every emoticon's precomputed clusters.
pub fn best_match(tile: &[Cluster], set: &EmoticonSet, options: &PeakOptions) -> MatchOutcome {
    select_best(
        set.iter()
            .map(|emoticon| (emoticon.id(), score(tile, emoticon.peaks(), options))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Pixel;
    use crate::histogram::{GaussianKernel, HistogramOptions};
    use pretty_assertions::assert_eq;

    fn depth(d: usize) -> Depth {
        Depth::new(d).unwrap()
    }

    /// Histogram with hand-placed raw counts, smoothed with `kernel`.
    fn histogram_with(
        d: usize,
        counts: &[(ReducedColor, u32)],
        kernel: &GaussianKernel,
    ) -> Histogram3D {
        let depth = depth(d);
        let options = HistogramOptions::new()
            .depth(depth)
            .kernel(kernel.clone());
        // One opaque pixel per count, using each bucket's center color.
        let pixels: Vec<Pixel> = counts
            .iter()
            .flat_map(|&(color, n)| {
                let pixel = crate::color::to_rgb(color.center(depth));
                std::iter::repeat(pixel).take(n as usize)
            })
            .collect();
        Histogram3D::from_pixels(pixels, &options)
    }

    #[test]
    fn test_neighbor_count() {
        let d = depth(4);
        // interior cell: all 26
        assert_eq!(neighbors(ReducedColor::new(1, 1, 1).index(d), d).count(), 26);
        // corner in chroma/lightness: hue still wraps, 3 * 2 * 2 - 1
        assert_eq!(neighbors(ReducedColor::new(0, 0, 0).index(d), d).count(), 11);
        for n in neighbors(ReducedColor::new(0, 2, 2).index(d), d) {
            assert_ne!(n, ReducedColor::new(0, 2, 2).index(d));
        }
    }

    #[test]
    fn test_single_color_has_one_peak() {
        let red = vec![Pixel::rgb(255, 0, 0); 10];
        let histogram = Histogram3D::from_pixels(red, &HistogramOptions::default());
        let clusters = extract_peaks(&histogram, &PeakOptions::default());

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].position, ReducedColor::new(1, 12, 8));
        assert!(clusters[0].fraction > 0.0 && clusters[0].fraction <= 1.0);
    }

    #[test]
    fn test_plateau_resolves_to_lowest_index() {
        // Unsmoothed, two adjacent equal cells form a flat top.
        let d = depth(8);
        let a = ReducedColor::new(2, 3, 3);
        let b = ReducedColor::new(2, 3, 4);
        let mut values = vec![0.0f32; d.cells()];
        values[a.index(d)] = 5.0;
        values[b.index(d)] = 5.0;

        assert!(is_peak(&values, a.index(d), d));
        assert!(!is_peak(&values, b.index(d), d));
    }

    #[test]
    fn test_flood_fill_respects_threshold() {
        let d = depth(8);
        let mut values = vec![0.0f32; d.cells()];
        let top = ReducedColor::new(4, 4, 4).index(d);
        let shoulder = ReducedColor::new(4, 4, 5).index(d);
        let foot = ReducedColor::new(4, 4, 6).index(d);
        let low = ReducedColor::new(4, 4, 3).index(d);
        values[top] = 10.0;
        values[shoulder] = 6.0;
        values[foot] = 5.0;
        values[low] = 4.0;

        let mut visited = vec![false; values.len()];
        let mass = flood_mass(&values, top, 5.0, d, &mut visited);
        assert_eq!(mass, 21.0);
    }

    #[test]
    fn test_flood_fill_does_not_climb() {
        let d = depth(8);
        let mut values = vec![0.0f32; d.cells()];
        let start = ReducedColor::new(4, 4, 4).index(d);
        let dip = ReducedColor::new(4, 4, 5).index(d);
        let higher = ReducedColor::new(4, 4, 6).index(d);
        values[start] = 10.0;
        values[dip] = 8.0;
        values[higher] = 9.0;

        let mut visited = vec![false; values.len()];
        // `higher` neighbors `start` only through `dip`, and 9 > 8
        assert_eq!(flood_mass(&values, start, 5.0, d, &mut visited), 18.0);
    }

    #[test]
    fn test_max_peaks_is_respected() {
        let d = 16;
        let counts: Vec<(ReducedColor, u32)> = (0..8u8)
            .map(|i| (ReducedColor::new(i * 2, 8, 2 + i), 10 + i as u32))
            .collect();
        let histogram = histogram_with(d, &counts, &GaussianKernel::identity());

        for max_peaks in 1..=10 {
            let clusters = extract_peaks(&histogram, &PeakOptions::new().max_peaks(max_peaks));
            assert!(clusters.len() <= max_peaks);
        }
        let all = extract_peaks(&histogram, &PeakOptions::new().max_peaks(100));
        for pair in all.windows(2) {
            assert!(pair[0].mass >= pair[1].mass, "clusters must be sorted by mass");
        }
    }

    #[test]
    fn test_empty_histogram_has_no_peaks() {
        let histogram = Histogram3D::empty(depth(8));
        assert!(extract_peaks(&histogram, &PeakOptions::default()).is_empty());
    }

    #[test]
    fn test_identical_clusters_score_fraction_product() {
        let red = vec![Pixel::rgb(255, 0, 0); 10];
        let histogram = Histogram3D::from_pixels(red, &HistogramOptions::default());
        let clusters = extract_peaks(&histogram, &PeakOptions::default());

        let s = score(&clusters, &clusters, &PeakOptions::default());
        let f = clusters[0].fraction;
        assert!((s - f * f).abs() < 1e-6);
    }

    #[test]
    fn test_hue_distance_wraps() {
        let d = depth(16);
        let near_start = Cluster::new(ReducedColor::new(0, 8, 8).index(d), d, 1.0, 1.0, 1.0);
        let near_end = Cluster::new(ReducedColor::new(15, 8, 8).index(d), d, 1.0, 1.0, 1.0);
        let distance = near_start.distance(&near_end, [1.0, 1.0, 1.0]);
        assert!((distance - 1.0 / 16.0).abs() < 1e-6, "distance {distance}");
    }

    #[test]
    fn test_greedy_assignment_uses_each_cluster_once() {
        let d = depth(16);
        let a = Cluster::new(ReducedColor::new(2, 8, 8).index(d), d, 1.0, 0.5, 1.0);
        let b = Cluster::new(ReducedColor::new(10, 8, 8).index(d), d, 1.0, 0.5, 1.0);

        // One emoticon cluster cannot be matched twice.
        let one = score(&[a, a], &[a], &PeakOptions::default());
        assert!((one - 0.25).abs() < 1e-6, "score {one}");

        // Two far-apart clusters pair with their own counterparts.
        let two = score(&[a, b], &[b, a], &PeakOptions::default());
        assert!((two - 0.5).abs() < 1e-6, "score {two}");
    }

    #[test]
    fn test_options_validation() {
        assert!(PeakOptions::default().validate().is_ok());
        assert!(PeakOptions::new().max_peaks(0).validate().is_err());
        assert!(PeakOptions::new().extent_fraction(1.5).validate().is_err());
        assert!(PeakOptions::new().similarity_sigma(0.0).validate().is_err());
        assert!(PeakOptions::new()
            .distance_scale([1.0, -1.0, 1.0])
            .validate()
            .is_err());
    }
}
