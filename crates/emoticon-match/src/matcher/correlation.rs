//! Full-histogram Pearson correlation.

use super::{select_best, MatchOutcome};
use crate::emoticon::EmoticonSet;
use crate::histogram::Histogram3D;

/// Pearson correlation of the two smoothed histograms, clamped to `[0, 1]`.
///
/// Accumulates in `f64`. A histogram with zero variance (empty, or every
/// cell equal) carries no shape to compare and scores 0. Negative
/// correlation is not evidence of similarity and also scores 0.
///
/// Both histograms must have the same depth.
pub fn score(tile: &Histogram3D, emoticon: &Histogram3D) -> f32 {
    let a = tile.smoothed();
    let b = emoticon.smoothed();
    debug_assert_eq!(a.len(), b.len(), "histogram depths differ");
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let n = a.len() as f64;
    let mean_a = a.iter().map(|&v| v as f64).sum::<f64>() / n;
    let mean_b = b.iter().map(|&v| v as f64).sum::<f64>() / n;

    let mut covariance = 0.0f64;
    let mut var_a = 0.0f64;
    let mut var_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x as f64 - mean_a;
        let dy = y as f64 - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return 0.0;
    }
    let r = covariance / (var_a * var_b).sqrt();
    r.clamp(0.0, 1.0) as f32
}

/// Score every emoticon in the set and pick the best.
pub fn best_match(tile: &Histogram3D, set: &EmoticonSet) -> MatchOutcome {
    select_best(
        set.iter()
            .map(|emoticon| (emoticon.id(), score(tile, emoticon.histogram()))),
    )
}
