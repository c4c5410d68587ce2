// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Persists a fitted FrequencyTokenizer as a HuggingFace
// `tokenizers` WordLevel JSON file, so any code using the
// tokenizers crate can map ids back to words (or encode new
// text) with exactly the same vocabulary.
//
// Id layout in the written file:
//   0        [PAD]
//   1..=N    words, by frequency rank (N = encodable words)
//   N + 1    [UNK]
//
// The normalizer mirrors FrequencyTokenizer: optional
// lower-casing, then every filter character becomes a space.
//
// Reference: HuggingFace tokenizers JSON serialisation format

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::data::tokenizer::FrequencyTokenizer;

pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const PAD: &str = "[PAD]";
pub const UNK: &str = "[UNK]";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load a previously saved tokenizer from JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        Tokenizer::from_file(&path).map_err(|e| {
            anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })
    }

    /// Write `tokenizer` to disk and load it back as a
    /// `tokenizers::Tokenizer`.
    pub fn save(&self, tokenizer: &FrequencyTokenizer) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        // ── Vocabulary ────────────────────────────────────────────────────────
        let mut vocab = Map::new();
        vocab.insert(PAD.to_string(), json!(0));
        for (word, id, _) in tokenizer.vocabulary() {
            vocab.insert(word.to_string(), json!(id));
        }
        let unk_id = tokenizer.effective_vocab_size() + 1;
        vocab.insert(UNK.to_string(), json!(unk_id));

        let tokenizer_json = json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                special_token(0, PAD),
                special_token(unk_id, UNK),
            ],
            "normalizer": normalizer(tokenizer),
            "pre_tokenizer": { "type": "WhitespaceSplit" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": UNK,
            }
        });

        let path = self.path();
        std::fs::write(&path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| format!("Cannot write tokenizer JSON to '{}'", path.display()))?;

        tracing::info!(
            "Tokenizer saved with {} words to '{}'",
            tokenizer.effective_vocab_size(),
            path.display()
        );

        // Load back as a proper Tokenizer instance and spot-check
        // that the most frequent word kept its id
        let loaded = self.load()?;
        if let Some((word, id, _)) = tokenizer.vocabulary().next() {
            if loaded.token_to_id(word) != tokenizer.id_for(word) {
                anyhow::bail!(
                    "reloaded tokenizer maps '{}' to {:?}, expected {}",
                    word,
                    loaded.token_to_id(word),
                    id
                );
            }
        }
        Ok(loaded)
    }
}

fn special_token(id: usize, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "single_word": false,
        "lstrip": false,
        "rstrip": false,
        "normalized": false,
        "special": true
    })
}

fn normalizer(tokenizer: &FrequencyTokenizer) -> Value {
    let options = tokenizer.options();
    let mut steps = Vec::new();

    if options.lower {
        steps.push(json!({ "type": "Lowercase" }));
    }
    if !options.filters.is_empty() {
        steps.push(json!({
            "type": "Replace",
            "pattern": { "Regex": filter_class(&options.filters) },
            "content": " "
        }));
    }

    match steps.len() {
        0 => Value::Null,
        1 => steps.remove(0),
        _ => json!({ "type": "Sequence", "normalizers": steps }),
    }
}

/// Regex character class matching any filter character.
fn filter_class(filters: &str) -> String {
    let mut class = String::from("[");
    for c in filters.chars() {
        match c {
            '\t' => class.push_str("\\t"),
            '\n' => class.push_str("\\n"),
            c if c.is_ascii_punctuation() => {
                class.push('\\');
                class.push(c);
            }
            c => class.push(c),
        }
    }
    class.push(']');
    class
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tokenizer::TokenizerOptions;

    #[test]
    fn test_filter_class_escapes_punctuation() {
        assert_eq!(filter_class("-]\t"), "[\\-\\]\\t]");
    }

    #[test]
    fn test_save_and_reload_keeps_ids() {
        let dir = std::env::temp_dir().join(format!("caption-tokenizer-{}", std::process::id()));
        let fitted = FrequencyTokenizer::fit(
            TokenizerOptions::default(),
            ["a dog", "a cat", "a dog runs"],
        );

        let store = TokenizerStore::new(&dir);
        let hf = store.save(&fitted).unwrap();

        assert_eq!(hf.token_to_id("a"), fitted.id_for("a"));
        assert_eq!(hf.token_to_id("runs"), fitted.id_for("runs"));
        assert_eq!(hf.id_to_token(0).as_deref(), Some(PAD));
        assert_eq!(hf.id_to_token(5).as_deref(), Some(UNK));

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.id_to_token(2).as_deref(), Some("dog"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_capped_words_are_not_written() {
        let dir = std::env::temp_dir().join(format!("caption-tokenizer-cap-{}", std::process::id()));
        let fitted = FrequencyTokenizer::fit(
            TokenizerOptions::default().with_num_words(1),
            ["x x y"],
        );

        let hf = TokenizerStore::new(&dir).save(&fitted).unwrap();
        assert_eq!(hf.token_to_id("x"), Some(1));
        assert_eq!(hf.token_to_id("y"), None);

        std::fs::remove_dir_all(&dir).ok();
    }
}
