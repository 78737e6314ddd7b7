//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Assert `bytes` is a PNG of the given size and return it decoded.
pub fn assert_png(bytes: &[u8], width: u32, height: u32) -> image::RgbaImage {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    let decoded = image::load_from_memory(bytes)
        .expect("PNG should decode")
        .to_rgba8();
    assert_eq!(
        decoded.dimensions(),
        (width, height),
        "Unexpected PNG dimensions"
    );
    decoded
}

/// Assert the pixel at `(x, y)` has the given RGBA value.
pub fn assert_pixel(image: &image::RgbaImage, x: u32, y: u32, rgba: [u8; 4]) {
    assert_eq!(
        image.get_pixel(x, y).0,
        rgba,
        "Unexpected color at ({x}, {y})"
    );
}
