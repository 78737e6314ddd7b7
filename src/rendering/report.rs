//! JSON report of a mosaic grid.

use crate::error::AppError;
use emoticon_match::{EmoticonSet, MosaicGrid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicReport {
    pub columns: usize,
    pub rows: usize,
    pub tile_width: usize,
    pub tile_height: usize,
    pub algorithm: String,
    pub fallbacks: usize,
    pub cells: Vec<CellReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    pub column: usize,
    pub row: usize,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    pub score: f32,
    pub fallback: bool,
}

impl MosaicReport {
    pub fn new(grid: &MosaicGrid, set: &EmoticonSet) -> Self {
        let (tile_width, tile_height) = grid.tile_size();
        let cells = grid
            .cells()
            .iter()
            .map(|cell| {
                let emoticon = set.get(cell.id);
                CellReport {
                    column: cell.position.column,
                    row: cell.position.row,
                    key: emoticon.map(|e| e.key().to_string()).unwrap_or_default(),
                    glyph: emoticon.and_then(|e| e.glyph()).map(str::to_string),
                    score: cell.score,
                    fallback: cell.fallback,
                }
            })
            .collect();

        Self {
            columns: grid.columns(),
            rows: grid.rows(),
            tile_width,
            tile_height,
            algorithm: grid.algorithm().to_string(),
            fallbacks: grid.fallback_count(),
            cells,
        }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build and serialize the report in one step.
pub fn render_json(grid: &MosaicGrid, set: &EmoticonSet) -> Result<String, AppError> {
    MosaicReport::new(grid, set).to_json()
}
