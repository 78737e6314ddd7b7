//! Matching tile histograms against the emoticon set
//!
//! Two algorithms compete:
//!
//! - [`MatchAlgorithm::Correlation`]: Pearson correlation of the full
//!   smoothed histograms. Cost `O(depth³)` per pair.
//! - [`MatchAlgorithm::Peak`]: compares the dominant color clusters of each
//!   histogram. Cost `O(max_peaks²)` per pair once clusters are extracted.
//!
//! Both pick the highest score. Scores within [`SCORE_TIE_EPSILON`] of the
//! best count as a tie and the lowest [`EmoticonId`] wins. When nothing
//! scores above zero the lowest id is chosen and the outcome is flagged as a
//! fallback.

pub mod correlation;
pub mod peak;

use std::fmt;
use std::str::FromStr;

use crate::api::MosaicError;
use crate::emoticon::EmoticonId;

/// Scores closer than this are treated as equal.
pub const SCORE_TIE_EPSILON: f32 = 1e-6;

/// Matching algorithm selection.
///
/// # Example
///
/// ```
/// use emoticon_match::MatchAlgorithm;
///
/// let algorithm: MatchAlgorithm = "peak".parse().unwrap();
/// assert_eq!(algorithm, MatchAlgorithm::Peak);
/// assert_eq!(MatchAlgorithm::default().as_str(), "correlation");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchAlgorithm {
    /// Pearson correlation of whole histograms (default)
    #[default]
    Correlation,
    /// Mass-weighted similarity of histogram peaks
    Peak,
}

impl MatchAlgorithm {
    pub const ALL: [MatchAlgorithm; 2] = [MatchAlgorithm::Correlation, MatchAlgorithm::Peak];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchAlgorithm::Correlation => "correlation",
            MatchAlgorithm::Peak => "peak",
        }
    }
}

impl fmt::Display for MatchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchAlgorithm {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correlation" => Ok(MatchAlgorithm::Correlation),
            "peak" | "peaks" => Ok(MatchAlgorithm::Peak),
            other => Err(MosaicError::InvalidOptions(format!(
                "unknown match algorithm '{other}' (expected correlation or peak)"
            ))),
        }
    }
}

/// The emoticon chosen for one histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub id: EmoticonId,
    /// Score of the chosen emoticon, in `[0, 1]`
    pub score: f32,
    /// True when no emoticon scored above zero
    pub fallback: bool,
}

/// Pick the best of `(id, score)` pairs given in ascending id order.
///
/// A later candidate only replaces the current best when it is better by
/// more than [`SCORE_TIE_EPSILON`], so ties resolve to the lowest id.
pub(crate) fn select_best<I>(scores: I) -> MatchOutcome
where
    I: IntoIterator<Item = (EmoticonId, f32)>,
{
    let mut best: Option<(EmoticonId, f32)> = None;
    for (id, score) in scores {
        let score = if score.is_nan() { 0.0 } else { score };
        match best {
            Some((_, best_score)) if score <= best_score + SCORE_TIE_EPSILON => {}
            _ => best = Some((id, score)),
        }
    }

    let (id, score) = best.unwrap_or((EmoticonId::new(0), 0.0));
    MatchOutcome {
        id,
        score,
        fallback: score <= 0.0,
    }
}
