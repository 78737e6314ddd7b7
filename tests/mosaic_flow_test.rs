//! End-to-end flow: emoticon directory and source image on disk through to
//! PNG, text and JSON output.

mod common;

use common::fixtures::{self, glyphs, EmoticonDir, GLYPH_SIZE};
use emoticon_match::MatchAlgorithm;
use emotim::assets::load_image;
use emotim::models::MosaicConfig;
use emotim::rendering::{render_emoticon_list, render_json, render_png, render_text};
use emotim::services::MosaicService;
use pretty_assertions::assert_eq;

fn stripes(dir: &EmoticonDir) -> emoticon_match::Bitmap {
    let path = dir.scratch("stripes.png");
    fixtures::write_stripes(&path, GLYPH_SIZE, GLYPH_SIZE);
    load_image(&path).unwrap()
}

#[test]
fn test_stripes_become_matching_emoticons() {
    let dir = EmoticonDir::primaries();
    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();
    let grid = service.run(&stripes(&dir)).unwrap();

    assert_eq!((grid.columns(), grid.rows()), (3, 1));
    assert_eq!(render_text(&grid, service.set()), "🔴🔵🟩");
    assert_eq!(grid.fallback_count(), 0);
}

#[test]
fn test_peak_algorithm_agrees_on_solid_stripes() {
    let dir = EmoticonDir::primaries();
    let config = MosaicConfig {
        match_algorithm: "peak".to_string(),
        ..MosaicConfig::default()
    };
    let service = MosaicService::from_dir(&config, dir.path()).unwrap();
    let grid = service.run(&stripes(&dir)).unwrap();

    assert_eq!(grid.algorithm(), MatchAlgorithm::Peak);
    assert_eq!(render_text(&grid, service.set()), "🔴🔵🟩");
}

#[test]
fn test_png_output_places_emoticons() {
    let dir = EmoticonDir::primaries();
    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();
    let grid = service.run(&stripes(&dir)).unwrap();

    let png = render_png(&grid, service.set(), service.background()).unwrap();
    let decoded = common::assert_png(&png, 3 * GLYPH_SIZE, GLYPH_SIZE);
    common::assert_pixel(&decoded, 0, 0, glyphs::RED.1);
    common::assert_pixel(&decoded, GLYPH_SIZE, 3, glyphs::BLUE.1);
    common::assert_pixel(&decoded, 2 * GLYPH_SIZE + 1, 1, glyphs::GREEN.1);
}

#[test]
fn test_edge_tiles_still_get_a_full_emoticon() {
    let dir = EmoticonDir::primaries();
    let path = dir.scratch("blue.png");
    fixtures::write_solid_png(&path, 6, 6, [0, 0, 250, 255]);
    let image = load_image(&path).unwrap();

    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();
    let grid = service.run(&image).unwrap();
    assert_eq!((grid.columns(), grid.rows()), (2, 2));

    let png = render_png(&grid, service.set(), None).unwrap();
    let decoded = common::assert_png(&png, 2 * GLYPH_SIZE, 2 * GLYPH_SIZE);
    common::assert_pixel(&decoded, 7, 7, glyphs::BLUE.1);
}

#[test]
fn test_json_report_names_emoticons() {
    let dir = EmoticonDir::primaries();
    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();
    let grid = service.run(&stripes(&dir)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&render_json(&grid, service.set()).unwrap()).unwrap();
    assert_eq!(json["columns"], 3);
    assert_eq!(json["tile_width"], GLYPH_SIZE);
    assert_eq!(json["algorithm"], "correlation");
    assert_eq!(json["cells"][1]["key"], glyphs::BLUE.0);
    assert_eq!(json["cells"][1]["glyph"], "🔵");
    assert_eq!(json["cells"][2]["fallback"], false);
}

#[test]
fn test_unnamed_emoticons_use_their_key_in_text() {
    let dir = EmoticonDir::new()
        .with("dark", [10, 10, 10, 255])
        .with("light", [245, 245, 245, 255]);
    let path = dir.scratch("gray.png");
    fixtures::write_png_with(&path, 8, 4, |x, _| {
        if x < 4 {
            [10, 10, 10, 255]
        } else {
            [245, 245, 245, 255]
        }
    });

    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();
    let grid = service.run(&load_image(&path).unwrap()).unwrap();
    assert_eq!(render_text(&grid, service.set()), "darklight");
}

#[test]
fn test_emoticon_listing() {
    let dir = EmoticonDir::primaries();
    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();
    let listing = render_emoticon_list(service.set());

    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(glyphs::RED.0) && lines[0].contains("🔴"));
    assert!(lines[2].contains(glyphs::GREEN.0) && lines[2].contains("🟩"));
}

#[tokio::test]
async fn test_cancelled_run_returns_no_grid() {
    let dir = EmoticonDir::primaries();
    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();

    let result = service
        .run_until(stripes(&dir), std::future::ready(()))
        .await;
    assert!(matches!(result, Err(ref e) if e.is_cancelled()));
}

#[tokio::test]
async fn test_uncancelled_async_run_matches_blocking_run() {
    let dir = EmoticonDir::primaries();
    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();

    let blocking = service.run(&stripes(&dir)).unwrap();
    let async_grid = service
        .run_until(stripes(&dir), std::future::pending())
        .await
        .unwrap();
    assert_eq!(async_grid, blocking);
}
