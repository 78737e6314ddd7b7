//! One-dimensional Gaussian kernel, applied separably along each histogram axis.

use crate::api::MosaicError;

/// `1 / sqrt(2 ln 2)`: with radius 1 this sigma gives the binomial
/// `[1/4, 1/2, 1/4]` kernel.
pub const DEFAULT_SIGMA: f32 = 0.849_321_8;

/// Default kernel radius in buckets.
pub const DEFAULT_RADIUS: usize = 1;

/// Largest accepted radius.
pub const MAX_RADIUS: usize = 16;

/// Normalized, symmetric Gaussian weights for offsets `-radius..=radius`.
///
/// # Example
///
/// ```
/// use emoticon_match::GaussianKernel;
///
/// let kernel = GaussianKernel::default();
/// let w = kernel.weights();
/// assert_eq!(w.len(), 3);
/// assert!((w[0] - 0.25).abs() < 1e-6);
/// assert!((w[1] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    radius: usize,
    sigma: f32,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Build a kernel with weights `exp(-k² / 2σ²)` normalized to sum 1.
    ///
    /// Radius 0 is the identity kernel and ignores `sigma`.
    ///
    /// # Errors
    ///
    /// [`MosaicError::InvalidOptions`] if the radius exceeds [`MAX_RADIUS`]
    /// or `sigma` is not a positive finite number.
    pub fn new(radius: usize, sigma: f32) -> Result<Self, MosaicError> {
        if radius > MAX_RADIUS {
            return Err(MosaicError::InvalidOptions(format!(
                "smoothing radius {radius} exceeds {MAX_RADIUS}"
            )));
        }
        if radius == 0 {
            return Ok(Self::identity());
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(MosaicError::InvalidOptions(format!(
                "smoothing sigma must be positive, got {sigma}"
            )));
        }

        let r = radius as isize;
        let two_sigma_sq = 2.0 * (sigma as f64) * (sigma as f64);
        let raw: Vec<f64> = (-r..=r)
            .map(|k| (-((k * k) as f64) / two_sigma_sq).exp())
            .collect();
        let sum: f64 = raw.iter().sum();
        let weights = raw.iter().map(|w| (w / sum) as f32).collect();

        Ok(Self {
            radius,
            sigma,
            weights,
        })
    }

    /// The kernel that leaves a histogram untouched.
    pub fn identity() -> Self {
        Self {
            radius: 0,
            sigma: 0.0,
            weights: vec![1.0],
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Weights for offsets `-radius..=radius`.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.radius == 0
    }
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            sigma: DEFAULT_SIGMA,
            weights: vec![0.25, 0.5, 0.25],
        }
    }
}
