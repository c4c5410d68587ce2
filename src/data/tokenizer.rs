// ============================================================
// Layer 4 — Frequency-Ranked Word Tokenizer
// ============================================================
// Turns caption text into sequences of integer word ids.
//
// Fitting:
//   1. Lower-case the text and replace filter characters
//      (punctuation, tabs, newlines) with spaces
//   2. Split on spaces, dropping empty pieces
//   3. Count every word across the whole corpus
//   4. Rank words by descending count; ties keep the order in
//      which the words were first seen
//   5. Assign ids 1, 2, 3, ... by rank (0 is the padding id)
//
// Encoding keeps only words whose rank is within `num_words`.
// Anything else (unseen words, rare words past the cap) is
// silently left out, so an encoded caption can be shorter
// than its raw word count. There is no out-of-vocabulary id.
//
// Reference: Rust Book §8 (Hash Maps)
//            Rust Book §13 (Iterators)

use std::collections::HashMap;

/// Characters replaced by a space before splitting.
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Normalisation and vocabulary cap used while fitting and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Keep only the `num_words` most frequent words when encoding.
    /// None keeps every fitted word.
    pub num_words: Option<usize>,

    /// Lower-case text before splitting
    pub lower: bool,

    /// Characters treated as word separators
    pub filters: String,
}

impl TokenizerOptions {
    pub fn with_num_words(mut self, num_words: usize) -> Self {
        self.num_words = Some(num_words);
        self
    }
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            num_words: None,
            lower:     true,
            filters:   DEFAULT_FILTERS.to_string(),
        }
    }
}

/// A word-level tokenizer fitted on a caption corpus.
#[derive(Debug, Clone)]
pub struct FrequencyTokenizer {
    options:    TokenizerOptions,
    /// word → id (1-based rank)
    word_index: HashMap<String, u32>,
    /// ranked words; `ranked[id - 1]` is the word with that id
    ranked:     Vec<(String, usize)>,
}

impl FrequencyTokenizer {
    /// Count words across `texts` and rank them by frequency.
    pub fn fit<'a, I>(options: TokenizerOptions, texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for text in texts {
            for word in split_words(&options, text) {
                let count = counts.entry(word.clone()).or_insert(0);
                if *count == 0 {
                    first_seen.push(word);
                }
                *count += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = first_seen
            .into_iter()
            .map(|w| {
                let c = counts[&w];
                (w, c)
            })
            .collect();
        // sort_by is stable, so equal counts stay in first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let word_index = ranked
            .iter()
            .enumerate()
            .map(|(i, (w, _))| (w.clone(), i as u32 + 1))
            .collect();

        tracing::debug!(
            "Tokenizer fitted: {} distinct words, cap = {:?}",
            ranked.len(),
            options.num_words
        );

        Self { options, word_index, ranked }
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Number of distinct words seen while fitting (ignores the cap).
    pub fn word_count(&self) -> usize {
        self.ranked.len()
    }

    /// Number of ids `encode` can actually produce.
    pub fn effective_vocab_size(&self) -> usize {
        match self.options.num_words {
            Some(cap) => cap.min(self.ranked.len()),
            None      => self.ranked.len(),
        }
    }

    /// Convert one caption into word ids, dropping unknown and
    /// capped-out words.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let limit = self.effective_vocab_size() as u32;
        split_words(&self.options, text)
            .iter()
            .filter_map(|w| self.word_index.get(w).copied())
            .filter(|&id| id <= limit)
            .collect()
    }

    /// Rank of a word, regardless of the cap.
    pub fn id_for(&self, word: &str) -> Option<u32> {
        self.word_index.get(word).copied()
    }

    /// `(word, id, count)` for every encodable word, in rank order.
    pub fn vocabulary(&self) -> impl Iterator<Item = (&str, u32, usize)> + '_ {
        self.ranked
            .iter()
            .take(self.effective_vocab_size())
            .enumerate()
            .map(|(i, (w, c))| (w.as_str(), i as u32 + 1, *c))
    }
}

fn split_words(options: &TokenizerOptions, text: &str) -> Vec<String> {
    let text = if options.lower {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    let separated: String = text
        .chars()
        .map(|c| if options.filters.contains(c) { ' ' } else { c })
        .collect();

    separated
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(texts: &[&str]) -> FrequencyTokenizer {
        FrequencyTokenizer::fit(TokenizerOptions::default(), texts.iter().copied())
    }

    #[test]
    fn test_ids_ranked_by_frequency() {
        let tok = fit(&["the dog", "the cat", "a dog and the cat"]);
        assert_eq!(tok.id_for("the"), Some(1));
        // dog and cat both appear twice; dog was seen first
        assert_eq!(tok.id_for("dog"), Some(2));
        assert_eq!(tok.id_for("cat"), Some(3));
        assert_eq!(tok.word_count(), 5);
    }

    #[test]
    fn test_encode_a_cat_sat() {
        let tok = fit(&["a cat sat"]);
        assert_eq!(tok.encode("a cat sat"), vec![1, 2, 3]);
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let tok = fit(&["A Dog, running!"]);
        assert_eq!(
            split_words(tok.options(), "A Dog, running!"),
            ["a", "dog", "running"]
        );
        assert_eq!(tok.encode("a DOG."), vec![1, 2]);
    }

    #[test]
    fn test_unknown_words_are_dropped() {
        let tok = fit(&["a cat sat"]);
        assert_eq!(tok.encode("a zebra sat"), vec![1, 3]);
    }

    #[test]
    fn test_words_past_cap_are_dropped() {
        let tok = FrequencyTokenizer::fit(
            TokenizerOptions::default().with_num_words(2),
            ["x x x y y z"],
        );
        assert_eq!(tok.effective_vocab_size(), 2);
        assert_eq!(tok.encode("z y x"), vec![2, 1]);
        assert_eq!(tok.vocabulary().count(), 2);
    }

    #[test]
    fn test_zero_cap_encodes_nothing() {
        let tok = FrequencyTokenizer::fit(
            TokenizerOptions::default().with_num_words(0),
            ["a cat sat"],
        );
        assert!(tok.encode("a cat sat").is_empty());
    }

    #[test]
    fn test_vocabulary_lists_words_in_rank_order() {
        let tok = fit(&["b a b"]);
        let vocab: Vec<(&str, u32, usize)> = tok.vocabulary().collect();
        assert_eq!(vocab, [("b", 1, 2), ("a", 2, 1)]);
        assert_eq!(tok.id_for("c"), None);
    }

    #[test]
    fn test_case_sensitive_when_lower_disabled() {
        let options = TokenizerOptions {
            lower: false,
            ..TokenizerOptions::default()
        };
        let tok = FrequencyTokenizer::fit(options, ["Dog dog"]);
        assert_eq!(tok.word_count(), 2);
    }
}
