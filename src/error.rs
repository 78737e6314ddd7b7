use emoticon_match::{MosaicError, ParseColorError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color: {0}")]
    Color(#[from] ParseColorError),

    #[error("Invalid emoticon file name: {0}")]
    InvalidEmoticonName(PathBuf),

    #[error("Emoticon {key} is {found_width}x{found_height}, expected {width}x{height}")]
    MismatchedEmoticonSize {
        key: String,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("No emoticons found in {0}")]
    NoEmoticons(PathBuf),

    #[error("Mosaic error: {0}")]
    Mosaic(#[from] MosaicError),

    #[error("Mosaic task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<png::EncodingError> for AppError {
    fn from(e: png::EncodingError) -> Self {
        AppError::Encode(e.to_string())
    }
}

impl AppError {
    /// True when the run was aborted rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Mosaic(MosaicError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_emoticons_message() {
        let error = AppError::NoEmoticons(PathBuf::from("/tmp/faces"));
        assert_eq!(error.to_string(), "No emoticons found in /tmp/faces");
    }

    #[test]
    fn test_mismatched_size_message() {
        let error = AppError::MismatchedEmoticonSize {
            key: "1f600".to_string(),
            width: 16,
            height: 16,
            found_width: 32,
            found_height: 16,
        };
        assert_eq!(error.to_string(), "Emoticon 1f600 is 32x16, expected 16x16");
    }

    #[test]
    fn test_invalid_name_message() {
        let error = AppError::InvalidEmoticonName(PathBuf::from(".png"));
        assert_eq!(error.to_string(), "Invalid emoticon file name: .png");
    }

    #[test]
    fn test_from_mosaic_error() {
        let error: AppError = MosaicError::InvalidDepth(1).into();
        assert_eq!(
            error.to_string(),
            "Mosaic error: invalid color depth 1 (expected 2..=64)"
        );
        assert!(!error.is_cancelled());
        assert!(AppError::from(MosaicError::Cancelled).is_cancelled());
    }

    #[test]
    fn test_from_color_error() {
        let error: AppError = "#12345".parse::<emoticon_match::Srgb>().unwrap_err().into();
        match error {
            AppError::Color(ParseColorError::InvalidLength) => {}
            other => panic!("Expected Color variant, got {other:?}"),
        }
    }
}
