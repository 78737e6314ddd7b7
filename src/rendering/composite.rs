//! PNG composite output: the chosen emoticon bitmaps laid out on a canvas.

use crate::error::AppError;
use emoticon_match::{Bitmap, EmoticonSet, MosaicGrid, Pixel, Srgb};
use std::io::Cursor;

/// Lay out the chosen emoticon of every cell at glyph resolution.
///
/// The canvas is `columns × glyph_width` by `rows × glyph_height`. Cell
/// `(column, row)` receives its emoticon at `(column × gw, row × gh)`.
/// With a background color, emoticons are composited over it and the
/// canvas is opaque; without one, emoticon pixels are copied as they are.
pub fn compose(
    grid: &MosaicGrid,
    set: &EmoticonSet,
    background: Option<Srgb>,
) -> Result<Bitmap, AppError> {
    let (glyph_width, glyph_height) = set.glyph_size();
    let width = grid.columns() * glyph_width;
    let height = grid.rows() * glyph_height;

    let fill = background.map(Pixel::from).unwrap_or_default();
    let mut canvas = vec![fill; width * height];

    for cell in grid.cells() {
        let Some(emoticon) = set.get(cell.id) else {
            continue;
        };
        let glyph = emoticon.bitmap();
        let origin_x = cell.position.column * glyph_width;
        let origin_y = cell.position.row * glyph_height;

        for y in 0..glyph.height().min(glyph_height) {
            let row = &glyph.row(y)[..glyph.width().min(glyph_width)];
            let start = (origin_y + y) * width + origin_x;
            for (target, &pixel) in canvas[start..start + row.len()].iter_mut().zip(row) {
                *target = match background {
                    Some(_) => pixel.over(*target),
                    None => pixel,
                };
            }
        }
    }

    Ok(Bitmap::new(width, height, canvas)?)
}

/// Encode an RGBA bitmap as PNG.
///
/// Uses fast settings; [`optimize_png`] re-compresses afterwards.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder =
            png::Encoder::new(&mut buf, bitmap.width() as u32, bitmap.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&bitmap.to_rgba())?;
    }
    Ok(buf.into_inner())
}

/// Re-compress PNG bytes with oxipng, keeping the input on failure.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            ..Default::default()
        },
    ) {
        Ok(optimized) => optimized,
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping fast encoding");
            png_bytes
        }
    }
}

/// Compose, encode and optimize in one step.
pub fn render_png(
    grid: &MosaicGrid,
    set: &EmoticonSet,
    background: Option<Srgb>,
) -> Result<Vec<u8>, AppError> {
    let canvas = compose(grid, set, background)?;
    let png_bytes = encode_png(&canvas)?;
    let optimized = optimize_png(png_bytes);
    tracing::debug!(
        width = canvas.width(),
        height = canvas.height(),
        bytes = optimized.len(),
        "Encoded mosaic PNG"
    );
    Ok(optimized)
}
