// ============================================================
// Layer 4 — Example Expander
// ============================================================
// Turns (image, caption) pairs into supervised next-word
// examples with a growing window over the caption:
//
//   caption ids:  [a, cat, sat]          (L = 3)
//
//   window 0:     prefix [a]       → cat
//   window 1:     prefix [a, cat]  → sat
//
// A caption of L ids yields L − 1 examples; captions with
// fewer than two ids (e.g. every word was out of vocabulary)
// yield none.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::data::{features::ImageFeatures, tokenizer::FrequencyTokenizer};
use crate::domain::corpus::CaptionCorpus;

/// One training example: image + prefix → next word.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionExample {
    /// Feature vector of the captioned image (shared)
    pub image: Arc<[f32]>,

    /// Word ids seen so far, unpadded
    pub prefix: Vec<u32>,

    /// The word id that follows `prefix`
    pub next_word: u32,
}

/// A tokenized caption together with its image's features.
#[derive(Debug, Clone)]
pub struct CaptionPair {
    pub image:  Arc<[f32]>,
    pub tokens: Vec<u32>,
}

impl CaptionPair {
    /// How many examples this caption expands into.
    pub fn window_count(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    /// The `index`-th window. `index` must be < `window_count()`.
    pub fn window(&self, index: usize) -> CaptionExample {
        CaptionExample {
            image:     Arc::clone(&self.image),
            prefix:    self.tokens[..=index].to_vec(),
            next_word: self.tokens[index + 1],
        }
    }

    /// Every window, in order of increasing prefix length.
    pub fn windows(&self) -> impl Iterator<Item = CaptionExample> + '_ {
        (0..self.window_count()).map(move |i| self.window(i))
    }
}

/// Pair every caption of every image in `image_list` with that
/// image's features, tokenizing the captions.
///
/// Images appear in `image_list` order and captions in corpus
/// order. An image with no features or no captions is an error.
pub fn pair_captions(
    image_list: &[String],
    corpus:     &CaptionCorpus,
    features:   &ImageFeatures,
    tokenizer:  &FrequencyTokenizer,
) -> Result<Vec<CaptionPair>> {
    let mut pairs = Vec::new();

    for image_id in image_list {
        let image = features
            .get(image_id)
            .with_context(|| format!("no feature vector for image '{image_id}'"))?;
        let captions = corpus
            .captions_for(image_id)
            .with_context(|| format!("no captions for image '{image_id}'"))?;

        for caption in captions {
            pairs.push(CaptionPair {
                image:  Arc::clone(image),
                tokens: tokenizer.encode(caption),
            });
        }
    }

    Ok(pairs)
}

/// Total examples a list of pairs expands into.
pub fn example_count(pairs: &[CaptionPair]) -> usize {
    pairs.iter().map(CaptionPair::window_count).sum()
}
