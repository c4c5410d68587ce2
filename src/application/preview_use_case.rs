// ============================================================
// Layer 2 — PreviewUseCase
// ============================================================
// Dry run of the training input pipeline:
//
//   Step 1: Load config.json, or scan captions and write it
//   Step 2: Build the batch generator for the split
//           (tokenizer fit + feature cache load)
//   Step 3: Save tokenizer.json
//   Step 4: Pull N batches, either from the endless generator
//           or from one epoch through Burn's DataLoader, and
//           move each onto the CPU backend as tensors
//
// Each batch's tensor shapes and its first example (decoded
// back to words) are logged.

use anyhow::Result;
use burn::data::dataloader::DataLoaderBuilder;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::application::config_use_case::ConfigUseCase;
use crate::data::{
    batcher::{CaptionBatcher, CaptionTensorBatch},
    features::model_dir,
    generator::BatchGenerator,
    padding::PAD_TOKEN,
};
use crate::domain::{
    config::{ConfigDefaults, DataConfig},
    split::Split,
    traits::CaptionSource,
};
use crate::infra::{config_store::ConfigStore, tokenizer_store::TokenizerStore};

type PreviewBackend = burn::backend::NdArray;

#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub data_dir:   PathBuf,
    pub split:      Split,
    pub batches:    usize,
    pub use_loader: bool,
    pub defaults:   ConfigDefaults,
}

/// What the preview produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewReport {
    pub batches:      usize,
    pub examples:     usize,
    pub feature_dim:  usize,
    pub sequence_len: usize,
}

pub struct PreviewUseCase<S> {
    source: S,
    config: PreviewConfig,
}

impl<S: CaptionSource> PreviewUseCase<S> {
    pub fn new(source: S, config: PreviewConfig) -> Self {
        Self { source, config }
    }

    pub fn execute(&self) -> Result<PreviewReport> {
        let cfg = &self.config;

        // ── Step 1: Configuration record ──────────────────────────────────────
        let data_config = self.data_config()?;

        // ── Step 2: Generator ─────────────────────────────────────────────────
        let mut generator =
            BatchGenerator::open(&data_config, &self.source, &cfg.data_dir, cfg.split)?;
        tracing::info!(
            "{} split: {} examples per pass, feature_dim = {}",
            cfg.split,
            generator.examples_per_pass(),
            generator.feature_dim()
        );

        // ── Step 3: Tokenizer JSON ────────────────────────────────────────────
        let vocab = TokenizerStore::new(model_dir(&cfg.data_dir)).save(generator.tokenizer())?;

        // ── Step 4: Pull batches ──────────────────────────────────────────────
        let device = burn::backend::ndarray::NdArrayDevice::default();

        let batches: Vec<CaptionTensorBatch<PreviewBackend>> = if cfg.use_loader {
            let batcher = CaptionBatcher::<PreviewBackend>::new(
                device.clone(),
                data_config.max_caption_length,
            );
            let loader = DataLoaderBuilder::new(batcher)
                .batch_size(data_config.batch_size)
                .num_workers(1)
                .build(generator.epoch_dataset());
            loader.iter().take(cfg.batches).collect()
        } else {
            let batches: Vec<_> = generator
                .by_ref()
                .take(cfg.batches)
                .map(|batch| batch.to_tensors::<PreviewBackend>(&device))
                .collect();
            tracing::debug!("Generator completed {} full passes", generator.passes());
            batches
        };

        let mut report = PreviewReport {
            batches:      batches.len(),
            examples:     0,
            feature_dim:  0,
            sequence_len: 0,
        };

        for (i, batch) in batches.into_iter().enumerate() {
            let [rows, feature_dim] = batch.image_features.dims();
            let [_, sequence_len]   = batch.prefixes.dims();

            tracing::info!(
                "batch {}: image_features {:?}, prefixes {:?}, labels {:?}",
                i,
                batch.image_features.dims(),
                batch.prefixes.dims(),
                batch.labels.dims()
            );
            tracing::info!("  first example: {}", describe_first(&batch, &vocab));

            report.examples    += rows;
            report.feature_dim  = feature_dim;
            report.sequence_len = sequence_len;
        }

        Ok(report)
    }

    fn data_config(&self) -> Result<DataConfig> {
        let cfg   = &self.config;
        let store = ConfigStore::new(model_dir(&cfg.data_dir));

        if store.exists() {
            tracing::info!("Using existing config '{}'", store.path().display());
            store.load()
        } else {
            tracing::info!("No saved config, scanning captions");
            ConfigUseCase::new(&self.source, &cfg.data_dir, cfg.defaults).execute()
        }
    }
}

/// "a dog → runs", decoded with the saved vocabulary.
fn describe_first(batch: &CaptionTensorBatch<PreviewBackend>, vocab: &Tokenizer) -> String {
    let prefix: Vec<i64> = batch
        .prefixes
        .clone()
        .slice([0..1])
        .into_data()
        .convert::<i64>()
        .to_vec()
        .unwrap_or_default();
    let label: Vec<i64> = batch
        .labels
        .clone()
        .slice([0..1])
        .into_data()
        .convert::<i64>()
        .to_vec()
        .unwrap_or_default();

    let word = |id: i64| {
        vocab
            .id_to_token(id as u32)
            .unwrap_or_else(|| format!("<{id}>"))
    };

    let words: Vec<String> = prefix
        .into_iter()
        .filter(|&id| id != PAD_TOKEN as i64)
        .map(word)
        .collect();
    let next = label.first().map(|&id| word(id)).unwrap_or_default();

    format!("{} → {}", words.join(" "), next)
}
