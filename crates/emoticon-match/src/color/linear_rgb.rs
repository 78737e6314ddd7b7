//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! It is the entry point into the tristimulus chain (XYZ, Lab, HCL).

use super::lut::{linear_to_srgb, srgb8_to_linear};
use super::pixel::Pixel;

/// A color in linear RGB color space.
///
/// Values are typically in the range 0.0..=1.0, but the inverse HCL path may
/// produce values outside it for colors that are not displayable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f32,
    /// Green channel (linear light intensity)
    pub g: f32,
    /// Blue channel (linear light intensity)
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Gamma-encode into an 8-bit pixel with the given alpha.
    ///
    /// Channels outside the displayable range are clamped to 0..=255.
    pub fn to_pixel(self, alpha: u8) -> Pixel {
        let encode = |v: f32| (linear_to_srgb(v) * 255.0).round().clamp(0.0, 255.0) as u8;
        Pixel::new(encode(self.r), encode(self.g), encode(self.b), alpha)
    }
}

impl From<Pixel> for LinearRgb {
    /// Gamma-decode an 8-bit pixel. Alpha is dropped.
    fn from(pixel: Pixel) -> Self {
        Self {
            r: srgb8_to_linear(pixel.r),
            g: srgb8_to_linear(pixel.g),
            b: srgb8_to_linear(pixel.b),
        }
    }
}
