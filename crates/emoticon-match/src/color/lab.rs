//! CIELAB perceptual color space
//!
//! Lab is derived from XYZ relative to a reference white. Equal distances
//! in Lab roughly correspond to equal perceived differences, which is what
//! makes its polar form (HCL) a sensible space to histogram colors in.
//!
//! # References
//!
//! CIE 15:2004, "Colorimetry", section 8.2.1

use super::xyz::Xyz;

/// D65 reference white, normalized to Y = 1.
pub const D65_WHITE: Xyz = Xyz {
    x: 0.95047,
    y: 1.0,
    z: 1.08883,
};

/// (6/29), the knee of the Lab companding function.
const DELTA: f32 = 6.0 / 29.0;

/// A color in CIELAB space.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 100.0 = white)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
///
/// Values are not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Euclidean distance (CIE76 ΔE).
    ///
    /// ```
    /// use emoticon_match::Lab;
    ///
    /// let black = Lab::new(0.0, 0.0, 0.0);
    /// let white = Lab::new(100.0, 0.0, 0.0);
    /// assert_eq!(black.delta_e(white), 100.0);
    /// ```
    #[inline]
    pub fn delta_e(self, other: Lab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

#[inline]
fn compand(t: f32) -> f32 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn expand(t: f32) -> f32 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = compand(xyz.x / D65_WHITE.x);
        let fy = compand(xyz.y / D65_WHITE.y);
        let fz = compand(xyz.z / D65_WHITE.z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        Xyz {
            x: expand(fx) * D65_WHITE.x,
            y: expand(fy) * D65_WHITE.y,
            z: expand(fz) * D65_WHITE.z,
        }
    }
}
