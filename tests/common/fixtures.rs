//! Test fixtures: synthetic emoticon directories and source images.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Side length of the fixture emoticons
pub const GLYPH_SIZE: u32 = 4;

/// Codepoint-named solid emoticons, in file name order
pub mod glyphs {
    /// 🔴 large red circle
    pub const RED: (&str, [u8; 4]) = ("1f534", [255, 0, 0, 255]);
    /// 🔵 large blue circle
    pub const BLUE: (&str, [u8; 4]) = ("1f535", [0, 0, 255, 255]);
    /// 🟩 large green square
    pub const GREEN: (&str, [u8; 4]) = ("1f7e9", [0, 255, 0, 255]);
}

/// Write a solid `width`x`height` RGBA PNG.
pub fn write_solid_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    image.save(path).unwrap();
}

/// Write a PNG whose pixels come from `color(x, y)`.
pub fn write_png_with(path: &Path, width: u32, height: u32, color: impl Fn(u32, u32) -> [u8; 4]) {
    let image = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(color(x, y)));
    image.save(path).unwrap();
}

/// A temporary directory of emoticon PNGs, removed on drop.
pub struct EmoticonDir {
    dir: TempDir,
    scratch: TempDir,
}

impl EmoticonDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            scratch: tempfile::tempdir().unwrap(),
        }
    }

    /// Red, blue and green solid emoticons.
    pub fn primaries() -> Self {
        Self::new()
            .with(glyphs::RED.0, glyphs::RED.1)
            .with(glyphs::BLUE.0, glyphs::BLUE.1)
            .with(glyphs::GREEN.0, glyphs::GREEN.1)
    }

    pub fn with(self, key: &str, rgba: [u8; 4]) -> Self {
        write_solid_png(&self.path().join(format!("{key}.png")), GLYPH_SIZE, GLYPH_SIZE, rgba);
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a file outside the emoticon directory.
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.scratch.path().join(name)
    }
}

/// Write a source image of vertical stripes: red, blue, green, each
/// `stripe` pixels wide, `height` pixels tall.
pub fn write_stripes(path: &Path, stripe: u32, height: u32) {
    write_png_with(path, stripe * 3, height, |x, _| match x / stripe {
        0 => glyphs::RED.1,
        1 => glyphs::BLUE.1,
        _ => glyphs::GREEN.1,
    });
}
