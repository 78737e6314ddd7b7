pub mod config;

pub use config::MosaicConfig;
