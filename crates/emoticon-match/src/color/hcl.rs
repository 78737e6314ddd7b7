//! HCL: the polar form of CIELAB (also known as LCh(ab)).
//!
//! - **h** (Hue): angle in degrees, `[0, 360)`
//! - **c** (Chroma): distance from the neutral axis, `>= 0`
//! - **l** (Lightness): same as Lab L, `[0, 100]`
//!
//! This is the space histograms are built in: hue, chroma and lightness are
//! each quantized independently, and hue is treated as circular.

use super::lab::Lab;

/// Chroma below this is treated as achromatic: hue is meaningless there.
pub const ACHROMATIC_CHROMA: f32 = 1e-3;

/// A color in HCL (polar CIELAB).
///
/// # Note
///
/// For achromatic colors (chroma below [`ACHROMATIC_CHROMA`]) hue is
/// undefined. The conversion emits `h = 0.0` and `c = 0.0` in this case;
/// this is a convention, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcl {
    /// Hue angle in degrees, 0.0..360.0
    pub h: f32,
    /// Chroma, 0.0 for greys
    pub c: f32,
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f32,
}

impl Hcl {
    #[inline]
    pub fn new(h: f32, c: f32, l: f32) -> Self {
        Self { h, c, l }
    }

    /// Whether this color has no meaningful hue.
    #[inline]
    pub fn is_achromatic(self) -> bool {
        self.c < ACHROMATIC_CHROMA
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
#[inline]
pub(crate) fn normalize_degrees(degrees: f32) -> f32 {
    let h = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

impl From<Lab> for Hcl {
    fn from(lab: Lab) -> Self {
        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        if c < ACHROMATIC_CHROMA {
            return Self { h: 0.0, c: 0.0, l: lab.l };
        }
        let h = normalize_degrees(lab.b.atan2(lab.a).to_degrees());
        Self { h, c, l: lab.l }
    }
}

impl From<Hcl> for Lab {
    fn from(hcl: Hcl) -> Self {
        let radians = hcl.h.to_radians();
        Lab::new(hcl.l, hcl.c * radians.cos(), hcl.c * radians.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tolerance for round-trip conversion (f32 trig functions)
    const ROUND_TRIP_TOLERANCE: f32 = 1e-3;

    #[test]
    fn test_lab_to_hcl_round_trip() {
        let test_colors = [
            Lab::new(50.0, 40.0, 0.0),
            Lab::new(50.0, 0.0, 40.0),
            Lab::new(50.0, -40.0, 0.0),
            Lab::new(50.0, 0.0, -40.0),
            Lab::new(70.0, 20.0, 30.0),
            Lab::new(20.0, -5.0, -60.0),
        ];

        for original in test_colors {
            let back = Lab::from(Hcl::from(original));
            assert!(
                (original.l - back.l).abs() < ROUND_TRIP_TOLERANCE
                    && (original.a - back.a).abs() < ROUND_TRIP_TOLERANCE
                    && (original.b - back.b).abs() < ROUND_TRIP_TOLERANCE,
                "round trip failed: {original:?} -> {back:?}"
            );
        }
    }

    #[test]
    fn test_hue_quadrants() {
        assert!((Hcl::from(Lab::new(50.0, 10.0, 0.0)).h - 0.0).abs() < 1e-4);
        assert!((Hcl::from(Lab::new(50.0, 0.0, 10.0)).h - 90.0).abs() < 1e-4);
        assert!((Hcl::from(Lab::new(50.0, -10.0, 0.0)).h - 180.0).abs() < 1e-4);
        assert!((Hcl::from(Lab::new(50.0, 0.0, -10.0)).h - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_achromatic_hue_is_zero() {
        let gray = Hcl::from(Lab::new(50.0, 0.0, 0.0));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.c, 0.0);
        assert!(gray.is_achromatic());

        let almost = Hcl::from(Lab::new(50.0, 1e-5, -1e-5));
        assert_eq!(almost.h, 0.0);
        assert!(!almost.h.is_nan());
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        let tiny = normalize_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }
}
