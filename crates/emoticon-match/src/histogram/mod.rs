//! Histogram construction and smoothing
//!
//! Every tile and every emoticon is summarized by a [`Histogram3D`]: pixel
//! counts over the quantized HCL cube, followed by a separable Gaussian
//! blur so that neighboring buckets share evidence.

mod histogram;
mod kernel;

pub use histogram::{Histogram3D, HistogramOptions, DEFAULT_ALPHA_THRESHOLD};
pub use kernel::{GaussianKernel, DEFAULT_RADIUS, DEFAULT_SIGMA, MAX_RADIUS};
