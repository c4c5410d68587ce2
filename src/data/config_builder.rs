// ============================================================
// Layer 4 — Vocabulary / Length Scanner
// ============================================================
// One pass over every caption in the corpus to derive the
// three corpus-dependent configuration values:
//
//   max_caption_length       = longest caption, in words
//   vocabulary_size          = distinct words (exact spelling,
//                              no lower-casing, punctuation kept)
//   total_number_of_examples = Σ (words − 1); a caption of L
//                              words yields L − 1 (prefix → next
//                              word) training pairs
//
// Words are whitespace-delimited here; the tokenizer's own
// normalisation is NOT applied.

use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::domain::{
    config::{ConfigDefaults, DataConfig},
    corpus::CaptionCorpus,
};

/// Number of whitespace-delimited words in a caption.
pub fn caption_length(caption: &str) -> usize {
    caption.split_whitespace().count()
}

/// Scan the corpus and build the configuration record.
///
/// Fails when the corpus has no captions at all, since the
/// maximum caption length is undefined.
pub fn build_config(corpus: &CaptionCorpus, defaults: ConfigDefaults) -> Result<DataConfig> {
    if corpus.is_empty() {
        bail!("caption corpus is empty; cannot compute maximum caption length");
    }

    let mut max_caption_length = 0usize;
    let mut total_examples     = 0usize;
    let mut token_set: HashSet<&str> = HashSet::new();

    for caption in corpus.captions() {
        let len = caption_length(caption);
        max_caption_length = max_caption_length.max(len);
        total_examples    += len.saturating_sub(1);
        token_set.extend(caption.split_whitespace());
    }

    let config = DataConfig {
        embedding_dim:            defaults.embedding_dim,
        vocabulary_size:          token_set.len(),
        max_caption_length,
        batch_size:               defaults.batch_size,
        total_number_of_examples: total_examples,
    };

    tracing::info!("Vocabulary size = {}", config.vocabulary_size);
    tracing::info!("Maximum caption length = {}", config.max_caption_length);
    tracing::info!("Total number of examples = {}", config.total_number_of_examples);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(pairs: &[(&str, &str)]) -> CaptionCorpus {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_single_caption_example() {
        let cfg = build_config(&corpus(&[("img1", "a cat sat")]), ConfigDefaults::default())
            .unwrap();
        assert_eq!(cfg.vocabulary_size, 3);
        assert_eq!(cfg.max_caption_length, 3);
        assert_eq!(cfg.total_number_of_examples, 2);
        assert_eq!(cfg.embedding_dim, 128);
        assert_eq!(cfg.batch_size, 100);
    }

    #[test]
    fn test_uniform_length_captions() {
        // N = 3 captions of K = 4 words → N × (K − 1) examples
        let c = corpus(&[
            ("a", "one two three four"),
            ("a", "five six seven eight"),
            ("b", "one two three four"),
        ]);
        let cfg = build_config(&c, ConfigDefaults::default()).unwrap();
        assert_eq!(cfg.max_caption_length, 4);
        assert_eq!(cfg.total_number_of_examples, 9);
    }

    #[test]
    fn test_vocabulary_ignores_order_and_repetition() {
        let c1 = corpus(&[("a", "dog cat dog"), ("b", "cat bird")]);
        let c2 = corpus(&[("x", "bird bird bird cat dog")]);
        let d  = ConfigDefaults::default();
        assert_eq!(build_config(&c1, d).unwrap().vocabulary_size, 3);
        assert_eq!(build_config(&c2, d).unwrap().vocabulary_size, 3);
    }

    #[test]
    fn test_vocabulary_is_case_and_punctuation_sensitive() {
        let c = corpus(&[("a", "Dog dog dog.")]);
        let cfg = build_config(&c, ConfigDefaults::default()).unwrap();
        assert_eq!(cfg.vocabulary_size, 3);
    }

    #[test]
    fn test_single_word_caption_contributes_no_examples() {
        let c = corpus(&[("a", "hello"), ("b", "a cat sat")]);
        let cfg = build_config(&c, ConfigDefaults::default()).unwrap();
        assert_eq!(cfg.total_number_of_examples, 2);
        assert_eq!(cfg.max_caption_length, 3);

        let only = build_config(&corpus(&[("a", "hello")]), ConfigDefaults::default()).unwrap();
        assert_eq!(only.max_caption_length, 1);
        assert_eq!(only.total_number_of_examples, 0);
    }

    #[test]
    fn test_empty_corpus_is_error() {
        let result = build_config(&CaptionCorpus::new(), ConfigDefaults::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_are_overridable() {
        let defaults = ConfigDefaults { embedding_dim: 64, batch_size: 8 };
        let cfg = build_config(&corpus(&[("a", "x y")]), defaults).unwrap();
        assert_eq!(cfg.embedding_dim, 64);
        assert_eq!(cfg.batch_size, 8);
    }
}
