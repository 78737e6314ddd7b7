//! CIE 1931 XYZ tristimulus values.
//!
//! Reached from linear sRGB with the standard D65 matrix
//! (IEC 61966-2-1), normalized so that white has Y = 1.

use super::linear_rgb::LinearRgb;

/// Linear sRGB to XYZ (D65).
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ (D65) to linear sRGB.
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// A color in CIE XYZ space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Xyz {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[inline]
fn apply(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

impl From<LinearRgb> for Xyz {
    fn from(rgb: LinearRgb) -> Self {
        let [x, y, z] = apply(&RGB_TO_XYZ, [rgb.r, rgb.g, rgb.b]);
        Self { x, y, z }
    }
}

impl From<Xyz> for LinearRgb {
    /// Not clamped: colors outside the sRGB gamut yield channels outside 0..=1.
    fn from(xyz: Xyz) -> Self {
        let [r, g, b] = apply(&XYZ_TO_RGB, [xyz.x, xyz.y, xyz.z]);
        LinearRgb { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_is_d65() {
        let white = Xyz::from(LinearRgb::new(1.0, 1.0, 1.0));
        assert!((white.x - 0.95047).abs() < 1e-4);
        assert!((white.y - 1.0).abs() < 1e-4);
        assert!((white.z - 1.08883).abs() < 1e-4);
    }

    #[test]
    fn test_matrices_are_inverse() {
        for rgb in [
            LinearRgb::new(0.2, 0.4, 0.6),
            LinearRgb::new(1.0, 0.0, 0.0),
            LinearRgb::new(0.0, 0.0, 1.0),
        ] {
            let back = LinearRgb::from(Xyz::from(rgb));
            assert!((back.r - rgb.r).abs() < 1e-4, "{rgb:?} -> {back:?}");
            assert!((back.g - rgb.g).abs() < 1e-4, "{rgb:?} -> {back:?}");
            assert!((back.b - rgb.b).abs() < 1e-4, "{rgb:?} -> {back:?}");
        }
    }
}
