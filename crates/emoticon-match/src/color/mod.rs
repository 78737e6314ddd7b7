//! Color types and conversion utilities
//!
//! Pixels travel through a chain of typed color spaces on their way to the
//! histogram:
//!
//! ```text
//! Pixel (8-bit sRGB + alpha)
//!   -> LinearRgb   (gamma decode, exact 256-entry table)
//!   -> Xyz         (sRGB/D65 matrix)
//!   -> Lab         (D65 reference white)
//!   -> Hcl         (polar form: hue, chroma, lightness)
//! ```
//!
//! Every step has an inverse, so [`to_rgb`] walks the chain backwards. The
//! round trip is lossy (f32 math, gamut clamping) but stays within two
//! levels per channel for displayable colors.
//!
//! # Example
//!
//! ```
//! use emoticon_match::color::{to_hcl, to_rgb, Pixel};
//!
//! let orange = Pixel::rgb(255, 128, 0);
//! let hcl = to_hcl(orange);
//! let back = to_rgb(hcl);
//! assert!((back.g as i32 - 128).abs() <= 2);
//! ```

mod hcl;
mod lab;
mod linear_rgb;
mod lut;
mod pixel;
mod srgb;
mod xyz;

pub use hcl::{Hcl, ACHROMATIC_CHROMA};
pub use lab::{Lab, D65_WHITE};
pub use linear_rgb::LinearRgb;
pub use pixel::Pixel;
pub use srgb::Srgb;
pub use xyz::Xyz;

/// Convert a pixel to HCL. Alpha is ignored.
#[inline]
pub fn to_hcl(pixel: Pixel) -> Hcl {
    Hcl::from(Lab::from(Xyz::from(LinearRgb::from(pixel))))
}

/// Convert an HCL color back to an opaque pixel.
///
/// Colors outside the sRGB gamut are clamped per channel.
#[inline]
pub fn to_rgb(hcl: Hcl) -> Pixel {
    LinearRgb::from(Xyz::from(Lab::from(hcl))).to_pixel(255)
}
