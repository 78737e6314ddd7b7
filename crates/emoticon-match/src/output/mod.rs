//! Output types for mosaic runs
//!
//! [`MosaicGrid`] is consumed by the renderers of the application crate
//! (PNG composite, text, JSON report).

mod grid;

pub use grid::{MatchResult, MosaicGrid};
