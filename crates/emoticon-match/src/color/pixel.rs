//! 8-bit RGBA pixel, the unit every image and emoticon bitmap is made of.

use super::srgb::Srgb;

/// A gamma-encoded 8-bit pixel with alpha.
///
/// Pixels without an alpha channel use `a = 255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Create a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque pixel.
    ///
    /// # Example
    /// ```
    /// use emoticon_match::Pixel;
    /// let red = Pixel::rgb(255, 0, 0);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a pixel from an `[R, G, B, A]` byte array.
    #[inline]
    pub const fn from_rgba(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to an `[R, G, B, A]` byte array.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Source-over composition of `self` onto an opaque `background`.
    pub fn over(self, background: Pixel) -> Pixel {
        let alpha = self.a as u32;
        let blend =
            |fg: u8, bg: u8| ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8;
        Pixel::rgb(
            blend(self.r, background.r),
            blend(self.g, background.g),
            blend(self.b, background.b),
        )
    }
}

impl From<Srgb> for Pixel {
    /// Opaque pixel from a float sRGB color (rounded and clamped).
    fn from(srgb: Srgb) -> Self {
        let [r, g, b] = srgb.to_bytes();
        Pixel::rgb(r, g, b)
    }
}
