//! Public API for the emoticon-match crate.
//!
//! This module provides the high-level API: [`EmoticonMosaic`] builder and
//! [`MosaicError`] unified error type.

mod builder;
mod error;

pub use builder::EmoticonMosaic;
pub use error::{MosaicError, ParseColorError};
