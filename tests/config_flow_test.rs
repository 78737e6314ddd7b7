//! Configuration files driving a mosaic run.

mod common;

use common::fixtures::{self, EmoticonDir};
use emoticon_match::{Depth, MatchAlgorithm};
use emotim::assets::load_image;
use emotim::error::AppError;
use emotim::models::MosaicConfig;
use emotim::rendering::{render_png, render_text};
use emotim::services::MosaicService;
use pretty_assertions::assert_eq;

#[test]
fn test_config_file_sets_tiling_and_matching() {
    let dir = EmoticonDir::primaries();
    let config_path = dir.scratch("emotim.yaml");
    std::fs::write(
        &config_path,
        "color_depth: 8\nmatch_algorithm: peak\ntile_size: 2\nworkers: 1\n",
    )
    .unwrap();

    let config = MosaicConfig::load(Some(&config_path)).unwrap();
    config.validate().unwrap();
    let service = MosaicService::from_dir(&config, dir.path()).unwrap();
    assert_eq!(service.set().histogram_options().depth, Depth::new(8).unwrap());

    let image_path = dir.scratch("stripes.png");
    fixtures::write_stripes(&image_path, 2, 2);
    let grid = service.run(&load_image(&image_path).unwrap()).unwrap();

    assert_eq!(grid.algorithm(), MatchAlgorithm::Peak);
    assert_eq!(grid.tile_size(), (2, 2));
    assert_eq!(render_text(&grid, service.set()), "🔴🔵🟩");
}

#[test]
fn test_background_fills_transparent_emoticon_pixels() {
    let dir = EmoticonDir::new().with("1f535", [0, 0, 255, 255]);
    // Red on the left half, transparent on the right.
    fixtures::write_png_with(&dir.path().join("1f534.png"), 4, 4, |x, _| {
        if x < 2 {
            [255, 0, 0, 255]
        } else {
            [0, 0, 0, 0]
        }
    });
    let config = MosaicConfig {
        background: Some("#00ff00".to_string()),
        ..MosaicConfig::default()
    };
    let service = MosaicService::from_dir(&config, dir.path()).unwrap();

    let image_path = dir.scratch("red.png");
    fixtures::write_solid_png(&image_path, 4, 4, [255, 0, 0, 255]);
    let grid = service.run(&load_image(&image_path).unwrap()).unwrap();
    let png = render_png(&grid, service.set(), service.background()).unwrap();

    let decoded = common::assert_png(&png, 4, 4);
    common::assert_pixel(&decoded, 0, 0, [255, 0, 0, 255]);
    common::assert_pixel(&decoded, 3, 3, [0, 255, 0, 255]);
}

#[test]
fn test_fully_transparent_emoticon_is_dropped() {
    let dir = EmoticonDir::primaries().with("2b55", [255, 0, 0, 0]);
    let service = MosaicService::from_dir(&MosaicConfig::default(), dir.path()).unwrap();
    let keys: Vec<&str> = service.set().iter().map(|e| e.key()).collect();
    assert_eq!(keys, vec!["1f534", "1f535", "1f7e9"]);
}

#[test]
fn test_invalid_config_values_are_rejected() {
    let config = MosaicConfig::from_yaml_str("color_depth: 100\n").unwrap();
    assert!(matches!(config.validate(), Err(AppError::Mosaic(_))));

    let config = MosaicConfig::from_yaml_str("match_algorithm: nearest\n").unwrap();
    assert!(matches!(config.validate(), Err(AppError::Mosaic(_))));

    let config = MosaicConfig::from_yaml_str("background: \"#12\"\n").unwrap();
    assert!(matches!(config.validate(), Err(AppError::Color(_))));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = EmoticonDir::new();
    let result = MosaicConfig::load(Some(&dir.scratch("missing.yaml")));
    assert!(matches!(result, Err(AppError::Io(_))));
}
