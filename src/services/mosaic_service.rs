use crate::assets::EmoticonLoader;
use crate::error::AppError;
use crate::models::MosaicConfig;
use emoticon_match::{
    Bitmap, CancelToken, EmoticonAsset, EmoticonMosaic, EmoticonSet, MosaicError, MosaicGrid,
    Srgb,
};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

/// Runs mosaics for one configuration and emoticon set
#[derive(Debug, Clone)]
pub struct MosaicService {
    mosaic: EmoticonMosaic,
    background: Option<Srgb>,
}

impl MosaicService {
    /// Use a prepared emoticon set with the tiling settings of `config`.
    ///
    /// The set must have been built with `config`'s histogram and peak
    /// options; [`from_assets`](Self::from_assets) takes care of that.
    pub fn new(
        config: &MosaicConfig,
        set: impl Into<Arc<EmoticonSet>>,
    ) -> Result<Self, AppError> {
        let mosaic = EmoticonMosaic::new(set).with_options(config.tiler_options()?);
        Ok(Self {
            mosaic,
            background: config.background_color()?,
        })
    }

    /// Prepare the emoticon set described by `config` from loaded assets.
    pub fn from_assets(
        config: &MosaicConfig,
        assets: Vec<EmoticonAsset>,
    ) -> Result<Self, AppError> {
        let set = EmoticonSet::new(assets, config.histogram_options()?, config.peak_options()?)?;
        Self::new(config, set)
    }

    /// Load every emoticon in `dir` and prepare it.
    pub fn from_dir(config: &MosaicConfig, dir: &Path) -> Result<Self, AppError> {
        Self::from_assets(config, EmoticonLoader::load_dir(dir)?)
    }

    pub fn set(&self) -> &Arc<EmoticonSet> {
        self.mosaic.set()
    }

    pub fn mosaic(&self) -> &EmoticonMosaic {
        &self.mosaic
    }

    /// Background for PNG output, if the config sets one
    pub fn background(&self) -> Option<Srgb> {
        self.background
    }

    /// Match `image` on the calling thread's worker pool.
    pub fn run(&self, image: &Bitmap) -> Result<MosaicGrid, AppError> {
        Ok(self.mosaic.render(image)?)
    }

    /// Match `image` in a blocking task, cancelling it once `shutdown`
    /// completes.
    ///
    /// When `shutdown` wins, the worker is told to stop and awaited before
    /// returning [`MosaicError::Cancelled`], so no tile is still being
    /// matched afterwards.
    pub async fn run_until<F>(&self, image: Bitmap, shutdown: F) -> Result<MosaicGrid, AppError>
    where
        F: Future<Output = ()>,
    {
        let cancel = CancelToken::new();
        let mosaic = self.mosaic.clone();
        let worker_cancel = cancel.clone();
        let mut task =
            tokio::task::spawn_blocking(move || mosaic.render_cancellable(&image, &worker_cancel));

        tokio::select! {
            biased;
            _ = shutdown => {
                tracing::warn!("Cancelling mosaic run");
                cancel.cancel();
                // The result no longer matters, only that the worker stopped.
                let _ = task.await;
                Err(MosaicError::Cancelled.into())
            }
            result = &mut task => Ok(result??),
        }
    }

    /// [`run_until`](Self::run_until) with Ctrl-C as the shutdown signal.
    pub async fn run_cancellable(&self, image: Bitmap) -> Result<MosaicGrid, AppError> {
        self.run_until(image, ctrl_c()).await
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the run can only finish normally.
        tracing::warn!("Failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
}
