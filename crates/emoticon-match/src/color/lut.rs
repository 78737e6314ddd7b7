//! Gamma lookup table access functions
//!
//! The tables are generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB channel value to linear light.
///
/// Exact: the table holds the IEC 61966-2-1 value for every byte.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Convert a linear RGB value (0.0..=1.0) to sRGB using LUT with linear interpolation.
///
/// Out-of-range input is clamped first; the inverse HCL path routinely
/// produces slightly out-of-gamut values.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let linear = if linear.is_nan() {
        0.0
    } else {
        linear.clamp(0.0, 1.0)
    };

    // Scale to LUT index range (0..4095)
    let scaled = linear * 4095.0;
    let index = scaled as usize;

    if index >= 4095 {
        return LINEAR_TO_SRGB[4095];
    }

    let frac = scaled - index as f32;
    let a = LINEAR_TO_SRGB[index];
    let b = LINEAR_TO_SRGB[index + 1];
    a + (b - a) * frac
}
