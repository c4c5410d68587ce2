// ============================================================
// Layer 6 — Config Store
// ============================================================
// Saves and restores the DataConfig record as pretty JSON:
//
//   {
//     "embedding_dim": 128,
//     "vocabulary_size": 8918,
//     "max_caption_length": 40,
//     "batch_size": 100,
//     "total_number_of_examples": 383454
//   }

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::config::DataConfig;

pub const CONFIG_FILE: &str = "config.json";

pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Write the record, creating the directory if needed.
    pub fn save(&self, config: &DataConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.path();
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved data config to '{}'", path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<DataConfig> {
        let path = self.path();
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read config from '{}'. Run the 'config' command first.",
                path.display()
            )
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config file '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("caption-config-{}", std::process::id()));
        let store = ConfigStore::new(&dir);
        let cfg = DataConfig {
            embedding_dim:            128,
            vocabulary_size:          42,
            max_caption_length:       7,
            batch_size:               100,
            total_number_of_examples: 1234,
        };

        store.save(&cfg).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), cfg);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_field_is_error() {
        let dir = std::env::temp_dir().join(format!("caption-config-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), r#"{"embedding_dim": 128, "batch_size": 100}"#).unwrap();

        assert!(ConfigStore::new(&dir).load().is_err());

        fs::remove_dir_all(&dir).ok();
    }
}
