// ============================================================
// Layer 4 — Caption Batcher
// ============================================================
// Stacks CaptionExamples into one fixed-shape batch:
//
//   image_features : [batch_size, feature_dim]
//   prefixes       : [batch_size, max_caption_length]  (post-padded)
//   labels         : [batch_size]
//
// CaptionBatch is the plain-Vec form the generator yields.
// CaptionTensorBatch is the same data as Burn tensors, built
// either from a CaptionBatch or directly by CaptionBatcher
// inside Burn's DataLoader.
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{data::dataloader::batcher::Batcher, prelude::*};
use std::sync::Arc;

use crate::data::{expander::CaptionExample, padding::pad_sequences};

// ─── CaptionBatch ─────────────────────────────────────────────────────────────
/// A full batch of examples with prefixes padded to a common length.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBatch {
    pub image_features: Vec<Arc<[f32]>>,
    pub prefixes:       Vec<Vec<u32>>,
    pub labels:         Vec<u32>,
}

impl CaptionBatch {
    /// Pad each prefix to `max_caption_length` and split the
    /// examples into three parallel arrays.
    pub fn from_examples(examples: &[CaptionExample], max_caption_length: usize) -> Self {
        let prefixes: Vec<&[u32]> = examples.iter().map(|e| e.prefix.as_slice()).collect();

        Self {
            image_features: examples.iter().map(|e| Arc::clone(&e.image)).collect(),
            prefixes:       pad_sequences(&prefixes, max_caption_length),
            labels:         examples.iter().map(|e| e.next_word).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn feature_dim(&self) -> usize {
        self.image_features.first().map_or(0, |f| f.len())
    }

    pub fn sequence_len(&self) -> usize {
        self.prefixes.first().map_or(0, Vec::len)
    }

    /// Copy the batch onto `device` as Burn tensors.
    pub fn to_tensors<B: Backend>(&self, device: &B::Device) -> CaptionTensorBatch<B> {
        let batch_size  = self.len();
        let feature_dim = self.feature_dim();
        let seq_len     = self.sequence_len();

        // ── Flatten row-major, then reshape ───────────────────────────────────
        let features_flat: Vec<f32> = self
            .image_features
            .iter()
            .flat_map(|f| f.iter().copied())
            .collect();

        let prefix_flat: Vec<i32> = self
            .prefixes
            .iter()
            .flat_map(|p| p.iter().map(|&x| x as i32))
            .collect();

        let labels: Vec<i32> = self.labels.iter().map(|&x| x as i32).collect();

        let image_features = Tensor::<B, 1>::from_floats(features_flat.as_slice(), device)
            .reshape([batch_size, feature_dim]);

        let prefixes = Tensor::<B, 1, Int>::from_ints(prefix_flat.as_slice(), device)
            .reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), device);

        CaptionTensorBatch {
            image_features,
            prefixes,
            labels,
        }
    }
}

// ─── CaptionTensorBatch ───────────────────────────────────────────────────────
/// A batch ready for the caption model's forward pass.
#[derive(Debug, Clone)]
pub struct CaptionTensorBatch<B: Backend> {
    /// shape: [batch_size, feature_dim]
    pub image_features: Tensor<B, 2>,

    /// shape: [batch_size, max_caption_length]
    pub prefixes: Tensor<B, 2, Int>,

    /// shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── CaptionBatcher ───────────────────────────────────────────────────────────
/// Burn Batcher for the finite, one-pass epoch view.
#[derive(Clone, Debug)]
pub struct CaptionBatcher<B: Backend> {
    device:             B::Device,
    max_caption_length: usize,
}

impl<B: Backend> CaptionBatcher<B> {
    pub fn new(device: B::Device, max_caption_length: usize) -> Self {
        Self { device, max_caption_length }
    }
}

impl<B: Backend> Batcher<CaptionExample, CaptionTensorBatch<B>> for CaptionBatcher<B> {
    fn batch(&self, items: Vec<CaptionExample>) -> CaptionTensorBatch<B> {
        CaptionBatch::from_examples(&items, self.max_caption_length).to_tensors(&self.device)
    }
}
