//! Plain-text output: emoticon glyphs per cell, and the inspection listings.

use emoticon_match::{Cluster, Depth, EmoticonSet, Histogram3D, MosaicGrid, ReducedColor};
use std::fmt::Write;

/// One line per grid row, each cell replaced by its emoticon's glyph.
///
/// Emoticons without glyph text contribute their key.
pub fn render_text(grid: &MosaicGrid, set: &EmoticonSet) -> String {
    grid.iter_rows()
        .map(|row| {
            row.iter()
                .map(|cell| set.get(cell.id).map_or("?", |e| e.label()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_bucket(color: ReducedColor, depth: Depth) -> String {
    let center = color.center(depth);
    format!(
        "{color} h={:.0} c={:.0} l={:.0}",
        center.h, center.c, center.l
    )
}

/// Occupied buckets and extracted clusters of a histogram.
pub fn render_histogram(histogram: &Histogram3D, clusters: &[Cluster]) -> String {
    let depth = histogram.depth();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "depth {depth}: {} pixels counted, {} transparent",
        histogram.total(),
        histogram.transparent_pixels()
    );

    let buckets = histogram.occupied_buckets();
    let _ = writeln!(out, "{} occupied buckets:", buckets.len());
    for (color, count) in buckets {
        let _ = writeln!(out, "  {:>8}  {}", count, describe_bucket(color, depth));
    }

    let _ = writeln!(out, "{} clusters:", clusters.len());
    for cluster in clusters {
        let _ = writeln!(
            out,
            "  {:>6.1}%  {}  peak {:.2}",
            cluster.fraction * 100.0,
            describe_bucket(cluster.position, depth),
            cluster.peak
        );
    }
    out
}

/// One line per emoticon: id, key, glyph, bucket count and top cluster.
pub fn render_emoticon_list(set: &EmoticonSet) -> String {
    let depth = set.histogram_options().depth;
    let mut out = String::new();
    for emoticon in set {
        let top = emoticon
            .peaks()
            .first()
            .map(|c| {
                format!(
                    "{:.0}% at {}",
                    c.fraction * 100.0,
                    describe_bucket(c.position, depth)
                )
            })
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:<16} {:<4} {:>4} buckets  {}",
            emoticon.id().index(),
            emoticon.key(),
            emoticon.glyph().unwrap_or(""),
            emoticon.histogram().occupied_buckets().len(),
            top
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use emoticon_match::{
        Bitmap, CancelToken, EmoticonAsset, HistogramOptions, PeakOptions, Pixel, Tiler,
        TilerOptions,
    };
    use pretty_assertions::assert_eq;

    fn set() -> EmoticonSet {
        let assets = vec![
            EmoticonAsset::new("1f534", Bitmap::solid(2, 2, Pixel::rgb(255, 0, 0))).glyph("🔴"),
            EmoticonAsset::new("blue-square", Bitmap::solid(2, 2, Pixel::rgb(0, 0, 255))),
        ];
        EmoticonSet::new(assets, HistogramOptions::default(), PeakOptions::default()).unwrap()
    }

    #[test]
    fn test_render_text_rows() {
        let set = set();
        // 4x4 image: top half red, bottom half blue
        let pixels = (0..16)
            .map(|i| {
                if i < 8 {
                    Pixel::rgb(255, 0, 0)
                } else {
                    Pixel::rgb(0, 0, 255)
                }
            })
            .collect();
        let image = Bitmap::new(4, 4, pixels).unwrap();
        let grid = Tiler::new(TilerOptions::new())
            .run(&image, &set, &CancelToken::new())
            .unwrap();

        assert_eq!(render_text(&grid, &set), "🔴🔴\nblue-squareblue-square");
    }

    #[test]
    fn test_render_histogram_lists_buckets() {
        let histogram = Histogram3D::from_pixels(
            vec![Pixel::rgb(255, 0, 0); 3],
            &HistogramOptions::default(),
        );
        let text = render_histogram(&histogram, &[]);
        assert!(text.starts_with("depth 16: 3 pixels counted, 0 transparent\n"));
        assert!(text.contains("1 occupied buckets:"));
        assert!(text.contains("(1, 12, 8)"));
        assert!(text.contains("0 clusters:"));
    }

    #[test]
    fn test_render_emoticon_list() {
        let text = render_emoticon_list(&set());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1f534"));
        assert!(lines[0].contains("🔴"));
        assert!(lines[1].contains("blue-square"));
    }
}
