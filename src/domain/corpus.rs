// ============================================================
// Layer 3 — Caption Corpus
// ============================================================
// Every image in the dataset is described by several
// human-written captions. The corpus keeps them grouped per
// image, in the order they were read.
//
// Order matters: the tokenizer breaks frequency ties by first
// appearance, so iterating a HashMap here would make word ids
// change from run to run.

use std::collections::HashMap;

/// All captions written for a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCaptions {
    /// Image file name, e.g. "1000268201_693b08cb0e.jpg"
    pub image_id: String,

    /// Captions in the order they appear in the source file
    pub captions: Vec<String>,
}

/// Ordered mapping from image id to its captions.
#[derive(Debug, Clone, Default)]
pub struct CaptionCorpus {
    entries: Vec<ImageCaptions>,
    index:   HashMap<String, usize>,
}

impl CaptionCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a caption to an image, registering the image on
    /// first sight.
    pub fn push(&mut self, image_id: impl Into<String>, caption: impl Into<String>) {
        let image_id = image_id.into();
        let slot = match self.index.get(&image_id) {
            Some(&slot) => slot,
            None => {
                self.entries.push(ImageCaptions {
                    image_id: image_id.clone(),
                    captions: Vec::new(),
                });
                self.index.insert(image_id, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].captions.push(caption.into());
    }

    /// Captions for one image, or None if the image is unknown.
    pub fn captions_for(&self, image_id: &str) -> Option<&[String]> {
        self.index
            .get(image_id)
            .map(|&slot| self.entries[slot].captions.as_slice())
    }

    /// Every caption in the corpus, flattened image by image.
    pub fn captions(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .flat_map(|e| e.captions.iter().map(String::as_str))
    }

    pub fn image_count(&self) -> usize {
        self.entries.len()
    }

    pub fn caption_count(&self) -> usize {
        self.entries.iter().map(|e| e.captions.len()).sum()
    }

    /// True when there is not a single caption to scan.
    pub fn is_empty(&self) -> bool {
        self.caption_count() == 0
    }
}

/// Collect `(image_id, caption)` pairs into a corpus.
impl<I, C> FromIterator<(I, C)> for CaptionCorpus
where
    I: Into<String>,
    C: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (I, C)>>(iter: T) -> Self {
        let mut corpus = Self::new();
        for (image_id, caption) in iter {
            corpus.push(image_id, caption);
        }
        corpus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_captions_by_image() {
        let corpus: CaptionCorpus = [
            ("img1", "a dog runs"),
            ("img2", "a cat sits"),
            ("img1", "the dog is running"),
        ]
        .into_iter()
        .collect();

        assert_eq!(corpus.image_count(), 2);
        assert_eq!(corpus.caption_count(), 3);
        assert_eq!(
            corpus.captions_for("img1").unwrap(),
            ["a dog runs", "the dog is running"]
        );
    }

    #[test]
    fn test_flattened_order_follows_first_appearance() {
        let corpus: CaptionCorpus = [("b", "one"), ("a", "two"), ("b", "three")]
            .into_iter()
            .collect();

        let flat: Vec<&str> = corpus.captions().collect();
        assert_eq!(flat, ["one", "three", "two"]);
    }

    #[test]
    fn test_unknown_image() {
        let corpus = CaptionCorpus::new();
        assert!(corpus.captions_for("missing.jpg").is_none());
        assert!(corpus.is_empty());
    }
}
