//! Emoticon assets and the shared histogram cache
//!
//! [`EmoticonSet`] is constructed explicitly from [`EmoticonAsset`]s and
//! passed to the tiler; there is no global state.

mod bitmap;
mod set;

pub use bitmap::Bitmap;
pub use set::{Emoticon, EmoticonAsset, EmoticonId, EmoticonSet};
