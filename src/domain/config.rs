// ============================================================
// Layer 3 — Data Configuration Record
// ============================================================
// The five values the caption model and the batch generator
// agree on. vocabulary_size, max_caption_length and
// total_number_of_examples are derived from the caption corpus;
// embedding_dim and batch_size are fixed hyperparameters.
//
// vocabulary_size and max_caption_length must come from the
// same corpus the generator later tokenizes, otherwise batch
// shapes will not line up with the model's input layers.

use serde::{Deserialize, Serialize};

/// Width of the word embedding layer
pub const DEFAULT_EMBEDDING_DIM: usize = 128;

/// Training examples per batch
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Flat configuration record, serialised as JSON with exactly
/// these five keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    pub embedding_dim:            usize,
    pub vocabulary_size:          usize,
    pub max_caption_length:       usize,
    pub batch_size:               usize,
    pub total_number_of_examples: usize,
}

impl DataConfig {
    /// Number of full batches one pass over the data can fill.
    pub fn batches_per_pass(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        self.total_number_of_examples / self.batch_size
    }
}

/// The hyperparameters that are not derived from the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub embedding_dim: usize,
    pub batch_size:    usize,
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            batch_size:    DEFAULT_BATCH_SIZE,
        }
    }
}
