// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from caption text files to padded training
// batches.
//
//   Flickr8k text files
//       │
//       ▼
//   Flickr8kSource     → captions per image, split image lists
//       │
//       ├──▶ config_builder → vocabulary size, max length,
//       │                     example count
//       ▼
//   FrequencyTokenizer → word ids ranked by frequency
//       │
//       ▼
//   ImageFeatures      → cached image vectors keyed by id
//       │
//       ▼
//   expander           → (image, prefix) → next word examples
//       │
//       ▼
//   BatchGenerator     → endless stream of CaptionBatch
//       │
//       ▼
//   CaptionBatch       → Burn tensors
//
// CaptionDataset + CaptionBatcher offer the same examples as
// a finite epoch for Burn's DataLoader.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads Flickr8k caption and image-list files
pub mod loader;

/// Derives the corpus statistics of the configuration record
pub mod config_builder;

/// Frequency-ranked word tokenizer
pub mod tokenizer;

/// Post-padding of token sequences
pub mod padding;

/// Loads the pickled image feature cache
pub mod features;

/// Expands captions into next-word examples
pub mod expander;

/// Infinite, restartable batch stream
pub mod generator;

/// Implements Burn's Dataset trait for caption examples
pub mod dataset;

/// Plain and tensor batches, plus Burn's Batcher trait
pub mod batcher;
