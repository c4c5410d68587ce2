// ============================================================
// Layer 2 — ConfigUseCase
// ============================================================
//   Step 1: Read every caption           (Layer 4 - data)
//   Step 2: Scan vocabulary and lengths  (Layer 4 - data)
//   Step 3: Save config.json             (Layer 6 - infra)

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{config_builder::build_config, features::model_dir};
use crate::domain::{
    config::{ConfigDefaults, DataConfig},
    traits::CaptionSource,
};
use crate::infra::config_store::ConfigStore;

pub struct ConfigUseCase<S> {
    source:   S,
    data_dir: PathBuf,
    defaults: ConfigDefaults,
}

impl<S: CaptionSource> ConfigUseCase<S> {
    pub fn new(source: S, data_dir: impl Into<PathBuf>, defaults: ConfigDefaults) -> Self {
        Self {
            source,
            data_dir: data_dir.into(),
            defaults,
        }
    }

    /// Compute the configuration record and write it to
    /// `<data_dir>/model/config.json`.
    pub fn execute(&self) -> Result<DataConfig> {
        let corpus = self.source.read_captions()?;
        let config = build_config(&corpus, self.defaults)?;

        let store = ConfigStore::new(model_dir(&self.data_dir));
        store.save(&config)?;
        tracing::info!(
            "Config written to '{}' ({} full batches per pass)",
            store.path().display(),
            config.batches_per_pass()
        );

        Ok(config)
    }
}
