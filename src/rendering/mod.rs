pub mod composite;
pub mod report;
pub mod text;

pub use composite::render_png;
pub use report::{render_json, MosaicReport};
pub use text::{render_emoticon_list, render_histogram, render_text};
