//! Emoticon and image loading
//!
//! Emoticon sets are plain directories of PNG files named after the
//! Unicode codepoints they depict, the way emoji artwork is usually
//! distributed:
//!
//! - `1f600.png` is 😀
//! - `1f1e9-1f1ea.png` is the sequence 🇩🇪
//!
//! Files whose stem is not a codepoint sequence still load; their stem is
//! used wherever the glyph text would be.

use crate::error::AppError;
use emoticon_match::{Bitmap, EmoticonAsset};
use std::fs;
use std::path::{Path, PathBuf};

/// Decode any supported image file into a [`Bitmap`].
pub fn load_image(path: &Path) -> Result<Bitmap, AppError> {
    let decoded = image::open(path).map_err(|source| AppError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Bitmap::from_rgba(
        width as usize,
        height as usize,
        rgba.as_raw(),
    )?)
}

/// Decode a codepoint file stem (`1f600`, `1f1e9-1f1ea`) into its text.
///
/// Returns `None` unless every `-` separated part is a hexadecimal Unicode
/// scalar value.
pub fn decode_codepoints(stem: &str) -> Option<String> {
    if stem.is_empty() {
        return None;
    }
    stem.split('-')
        .map(|part| {
            if part.is_empty() || part.len() > 6 {
                return None;
            }
            u32::from_str_radix(part, 16).ok().and_then(char::from_u32)
        })
        .collect()
}

/// Loads every emoticon of a directory
pub struct EmoticonLoader;

impl EmoticonLoader {
    /// Load every `*.png` in `dir`, sorted by file name.
    ///
    /// Insertion order decides ties between equally good emoticons, so the
    /// sort makes results independent of directory listing order.
    ///
    /// # Errors
    ///
    /// - [`AppError::NoEmoticons`] when the directory has no PNG files
    /// - [`AppError::MismatchedEmoticonSize`] when a bitmap differs in size
    ///   from the first one
    /// - [`AppError::InvalidEmoticonName`] for a file without a usable stem
    pub fn load_dir(dir: &Path) -> Result<Vec<EmoticonAsset>, AppError> {
        let paths = Self::png_files(dir)?;
        if paths.is_empty() {
            return Err(AppError::NoEmoticons(dir.to_path_buf()));
        }

        let mut assets: Vec<EmoticonAsset> = Vec::with_capacity(paths.len());
        for path in paths {
            let key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| AppError::InvalidEmoticonName(path.clone()))?
                .to_string();
            let bitmap = load_image(&path)?;

            if let Some(first) = assets.first() {
                let (width, height) = (first.bitmap.width(), first.bitmap.height());
                if bitmap.width() != width || bitmap.height() != height {
                    return Err(AppError::MismatchedEmoticonSize {
                        key,
                        width,
                        height,
                        found_width: bitmap.width(),
                        found_height: bitmap.height(),
                    });
                }
            }

            let mut asset = EmoticonAsset::new(key.as_str(), bitmap);
            match decode_codepoints(&key) {
                Some(glyph) => asset = asset.glyph(glyph),
                None => tracing::debug!(%key, "Emoticon name is not a codepoint sequence"),
            }
            tracing::trace!(path = %path.display(), "Loaded emoticon");
            assets.push(asset);
        }

        tracing::info!(
            count = assets.len(),
            dir = %dir.display(),
            "Loaded emoticons"
        );
        Ok(assets)
    }

    fn png_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_png = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if is_png && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
        let mut image = image::RgbaImage::new(width, height);
        for pixel in image.pixels_mut() {
            *pixel = image::Rgba(rgba);
        }
        image.save(path).unwrap();
    }

    #[test]
    fn test_decode_codepoints() {
        assert_eq!(decode_codepoints("1f600").as_deref(), Some("😀"));
        assert_eq!(decode_codepoints("1f1e9-1f1ea").as_deref(), Some("🇩🇪"));
        assert_eq!(decode_codepoints("263A").as_deref(), Some("☺"));
        assert_eq!(decode_codepoints("smile"), None);
        assert_eq!(decode_codepoints("1f600-"), None);
        assert_eq!(decode_codepoints("d800"), None, "surrogates are not chars");
        assert_eq!(decode_codepoints("1234567"), None);
        assert_eq!(decode_codepoints(""), None);
    }

    #[test]
    fn test_load_dir_sorted_with_glyphs() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("1f60d.png"), 4, 4, [255, 0, 0, 255]);
        write_png(&dir.path().join("1f600.png"), 4, 4, [0, 255, 0, 255]);
        write_png(&dir.path().join("custom.png"), 4, 4, [0, 0, 255, 255]);
        fs::write(dir.path().join("README.txt"), "not an emoticon").unwrap();

        let assets = EmoticonLoader::load_dir(dir.path()).unwrap();
        let keys: Vec<&str> = assets.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["1f600", "1f60d", "custom"]);
        assert_eq!(assets[0].glyph.as_deref(), Some("😀"));
        assert_eq!(assets[2].glyph, None);
        assert_eq!(assets[1].bitmap.pixel(0, 0).map(|p| p.r), Some(255));
    }

    #[test]
    fn test_load_dir_rejects_mixed_sizes() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("1f600.png"), 4, 4, [0, 0, 0, 255]);
        write_png(&dir.path().join("1f601.png"), 8, 4, [0, 0, 0, 255]);

        match EmoticonLoader::load_dir(dir.path()) {
            Err(AppError::MismatchedEmoticonSize {
                key, found_width, ..
            }) => {
                assert_eq!(key, "1f601");
                assert_eq!(found_width, 8);
            }
            other => panic!("Expected MismatchedEmoticonSize, got {other:?}"),
        }
    }

    #[test]
    fn test_load_dir_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            EmoticonLoader::load_dir(dir.path()),
            Err(AppError::NoEmoticons(_))
        ));
    }

    #[test]
    fn test_load_image_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").unwrap();

        match load_image(&path) {
            Err(AppError::Decode { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Decode error, got {other:?}"),
        }
    }
}
