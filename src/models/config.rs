use crate::error::AppError;
use emoticon_match::{
    Depth, GaussianKernel, HistogramOptions, MatchAlgorithm, MosaicError, PeakOptions, Srgb,
    TilerOptions, Workers,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file to use when `--config` is absent
pub const CONFIG_ENV: &str = "EMOTIM_CONFIG";

/// Mosaic configuration loaded from a YAML file
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicConfig {
    /// Quantization buckets per HCL channel (2..=64)
    #[serde(default = "default_color_depth")]
    pub color_depth: usize,

    /// Square tile size in source pixels; defaults to the emoticon size
    #[serde(default)]
    pub tile_size: Option<usize>,

    /// Gaussian smoothing radius in buckets (0 disables smoothing)
    #[serde(default = "default_smoothing_radius")]
    pub smoothing_radius: usize,

    /// Gaussian smoothing sigma in buckets
    #[serde(default = "default_smoothing_sigma")]
    pub smoothing_sigma: f32,

    /// "correlation" or "peak"
    #[serde(default = "default_match_algorithm")]
    pub match_algorithm: String,

    /// Clusters kept per histogram by the peak algorithm
    #[serde(default = "default_max_peaks")]
    pub max_peaks: usize,

    /// Per-axis weights [hue, chroma, lightness] of the peak distance
    #[serde(default = "default_peak_distance_scale")]
    pub peak_distance_scale: [f32; 3],

    /// Width of the peak similarity Gaussian
    #[serde(default = "default_peak_similarity_sigma")]
    pub peak_similarity_sigma: f32,

    /// Share of the peak value where a cluster's flood fill stops
    #[serde(default = "default_peak_extent_fraction")]
    pub peak_extent_fraction: f32,

    /// Pixels with lower alpha are ignored
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,

    /// Worker threads; unset means one per processing unit
    #[serde(default)]
    pub workers: Option<usize>,

    /// Background color behind emoticons in PNG output (hex, e.g. "#ffffff");
    /// unset keeps transparency
    #[serde(default)]
    pub background: Option<String>,
}

fn default_color_depth() -> usize {
    Depth::DEFAULT
}

fn default_smoothing_radius() -> usize {
    emoticon_match::histogram::DEFAULT_RADIUS
}

fn default_smoothing_sigma() -> f32 {
    emoticon_match::histogram::DEFAULT_SIGMA
}

fn default_match_algorithm() -> String {
    MatchAlgorithm::default().as_str().to_string()
}

fn default_max_peaks() -> usize {
    PeakOptions::default().max_peaks
}

fn default_peak_distance_scale() -> [f32; 3] {
    PeakOptions::default().distance_scale
}

fn default_peak_similarity_sigma() -> f32 {
    PeakOptions::default().similarity_sigma
}

fn default_peak_extent_fraction() -> f32 {
    PeakOptions::default().extent_fraction
}

fn default_alpha_threshold() -> u8 {
    emoticon_match::histogram::DEFAULT_ALPHA_THRESHOLD
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            color_depth: default_color_depth(),
            tile_size: None,
            smoothing_radius: default_smoothing_radius(),
            smoothing_sigma: default_smoothing_sigma(),
            match_algorithm: default_match_algorithm(),
            max_peaks: default_max_peaks(),
            peak_distance_scale: default_peak_distance_scale(),
            peak_similarity_sigma: default_peak_similarity_sigma(),
            peak_extent_fraction: default_peak_extent_fraction(),
            alpha_threshold: default_alpha_threshold(),
            workers: None,
            background: None,
        }
    }
}

impl MosaicConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must load. A path from [`CONFIG_ENV`] that fails to
    /// load is reported and replaced by the defaults. Without either, the
    /// defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve(explicit, from_env.as_deref())
    }

    fn resolve(explicit: Option<&Path>, from_env: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match from_env {
            Some(path) => match Self::from_file(path) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to load config, using defaults"
                    );
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn algorithm(&self) -> Result<MatchAlgorithm, MosaicError> {
        self.match_algorithm.parse()
    }

    pub fn histogram_options(&self) -> Result<HistogramOptions, MosaicError> {
        Ok(HistogramOptions::new()
            .depth(Depth::new(self.color_depth)?)
            .alpha_threshold(self.alpha_threshold)
            .kernel(GaussianKernel::new(self.smoothing_radius, self.smoothing_sigma)?))
    }

    pub fn peak_options(&self) -> Result<PeakOptions, MosaicError> {
        let options = PeakOptions::new()
            .max_peaks(self.max_peaks)
            .extent_fraction(self.peak_extent_fraction)
            .similarity_sigma(self.peak_similarity_sigma)
            .distance_scale(self.peak_distance_scale);
        options.validate()?;
        Ok(options)
    }

    pub fn tiler_options(&self) -> Result<TilerOptions, MosaicError> {
        let mut options = TilerOptions::new()
            .algorithm(self.algorithm()?)
            .peak(self.peak_options()?)
            .workers(Workers::from(self.workers));
        if let Some(size) = self.tile_size {
            if size == 0 {
                return Err(MosaicError::InvalidTileSize {
                    width: size,
                    height: size,
                });
            }
            options = options.tile_size(size, size);
        }
        Ok(options)
    }

    pub fn background_color(&self) -> Result<Option<Srgb>, AppError> {
        match &self.background {
            Some(hex) => Ok(Some(hex.parse()?)),
            None => Ok(None),
        }
    }

    /// Check every setting without running anything.
    pub fn validate(&self) -> Result<(), AppError> {
        self.histogram_options()?;
        self.tiler_options()?;
        self.background_color()?;
        Ok(())
    }
}
