// ============================================================
// Layer 4 — Infinite Batch Generator
// ============================================================
// Pull-based stream of fixed-size training batches.
//
// Construction (eager, once):
//   1. Read every caption and fit the frequency tokenizer on
//      the whole corpus, capped at vocabulary_size words
//   2. Read the split's image list
//   3. Load the split's feature cache and key it by image id
//   4. Pair each caption of each listed image with its image
//      features and tokenize it
//
// Iteration (lazy, per call to next()):
//
//   ACCUMULATING ── example ──▶ push to buffer
//        ▲                          │
//        │                 buffer.len() == batch_size
//        │                          ▼
//        └──── reset buffer ◀── FLUSHING (pad + emit)
//
// When the cursor runs past the last pair it wraps to the
// first one and keeps going, so `next()` never returns None.
// A partially filled buffer carries across the wrap, which
// means batch boundaries drift between passes when the example
// count is not a multiple of batch_size.
//
// Not for concurrent use: the buffer is mutated in place.
// Stop iterating (drop the generator) to cancel.
//
// Reference: Rust Book §13 (Processing a Series of Items
//            with Iterators)

use anyhow::{bail, Result};
use std::path::Path;

use crate::data::{
    batcher::CaptionBatch,
    dataset::CaptionDataset,
    expander::{example_count, pair_captions, CaptionExample, CaptionPair},
    features::{cache_path, load_feature_cache, ImageFeatures},
    tokenizer::{FrequencyTokenizer, TokenizerOptions},
};
use crate::domain::{
    config::DataConfig, corpus::CaptionCorpus, split::Split, traits::CaptionSource,
};

/// Position of the next example: which caption, which window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    pair:   usize,
    window: usize,
}

pub struct BatchGenerator {
    pairs:              Vec<CaptionPair>,
    tokenizer:          FrequencyTokenizer,
    batch_size:         usize,
    max_caption_length: usize,
    feature_dim:        usize,
    examples_per_pass:  usize,
    cursor:             Cursor,
    buffer:             Vec<CaptionExample>,
    passes:             usize,
}

impl BatchGenerator {
    /// Read captions, image list and feature cache for `split`
    /// and build a generator over them.
    pub fn open<S: CaptionSource>(
        config:   &DataConfig,
        source:   &S,
        data_dir: &Path,
        split:    Split,
    ) -> Result<Self> {
        let corpus = source.read_captions()?;
        let tokenizer = FrequencyTokenizer::fit(
            TokenizerOptions::default().with_num_words(config.vocabulary_size),
            corpus.captions(),
        );

        let image_list = source.read_image_list(split)?;
        let vectors    = load_feature_cache(&cache_path(data_dir, split))?;
        let features   = ImageFeatures::from_aligned(&image_list, vectors)?;

        Self::from_parts(config, tokenizer, &corpus, &image_list, &features)
    }

    /// Build a generator from already loaded pieces.
    pub fn from_parts(
        config:     &DataConfig,
        tokenizer:  FrequencyTokenizer,
        corpus:     &CaptionCorpus,
        image_list: &[String],
        features:   &ImageFeatures,
    ) -> Result<Self> {
        if config.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }

        let pairs = pair_captions(image_list, corpus, features, &tokenizer)?;
        let examples_per_pass = example_count(&pairs);
        if examples_per_pass == 0 {
            bail!(
                "no training examples: {} captions for {} images all tokenize to fewer than two words",
                pairs.len(),
                image_list.len()
            );
        }

        tracing::info!(
            "Batch generator ready: {} captions, {} examples per pass, batch size {}, {} of {} words encodable",
            pairs.len(),
            examples_per_pass,
            config.batch_size,
            tokenizer.effective_vocab_size(),
            tokenizer.word_count()
        );

        Ok(Self {
            pairs,
            tokenizer,
            batch_size:         config.batch_size,
            max_caption_length: config.max_caption_length,
            feature_dim:        features.feature_dim(),
            examples_per_pass,
            cursor:             Cursor::default(),
            buffer:             Vec::with_capacity(config.batch_size),
            passes:             0,
        })
    }

    pub fn tokenizer(&self) -> &FrequencyTokenizer {
        &self.tokenizer
    }

    pub fn examples_per_pass(&self) -> usize {
        self.examples_per_pass
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// Completed passes over the pair list so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// A finite, one-pass copy of the examples for Burn's DataLoader.
    pub fn epoch_dataset(&self) -> CaptionDataset {
        CaptionDataset::from_pairs(&self.pairs)
    }

    /// Advance the cursor to the next example, wrapping to the
    /// first pair after the last one.
    fn next_example(&mut self) -> CaptionExample {
        loop {
            let pair = &self.pairs[self.cursor.pair];
            if self.cursor.window < pair.window_count() {
                let example = pair.window(self.cursor.window);
                self.cursor.window += 1;
                return example;
            }

            self.cursor.window = 0;
            self.cursor.pair  += 1;
            if self.cursor.pair == self.pairs.len() {
                self.cursor.pair = 0;
                self.passes     += 1;
                tracing::debug!("Batch generator finished pass {}", self.passes);
            }
        }
    }
}

impl Iterator for BatchGenerator {
    type Item = CaptionBatch;

    fn next(&mut self) -> Option<CaptionBatch> {
        loop {
            let example = self.next_example();
            self.buffer.push(example);

            if self.buffer.len() == self.batch_size {
                let batch = CaptionBatch::from_examples(&self.buffer, self.max_caption_length);
                self.buffer.clear();
                return Some(batch);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
