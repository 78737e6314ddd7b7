//! emotim - images rebuilt from emoticons
//!
//! Loads emoticon sets from disk, configures and runs the
//! [`emoticon_match`] engine, and writes the resulting mosaic as PNG, text
//! or JSON. This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
