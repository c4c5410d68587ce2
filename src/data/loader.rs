// ============================================================
// Layer 4 — Flickr8k Caption Loader
// ============================================================
// Reads captions and split image lists laid out the way the
// Flickr8k text release ships them:
//
//   <data_dir>/
//     Flickr8k.token.txt          ← "image.jpg#n<TAB>caption"
//     Flickr_8k.trainImages.txt   ← one image id per line
//     Flickr_8k.devImages.txt
//     Flickr_8k.testImages.txt
//
// The "#n" suffix numbers the captions of one image (0..4);
// it is stripped so all captions group under the image id.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::{corpus::CaptionCorpus, split::Split, traits::CaptionSource};

/// File holding every caption of every image
pub const CAPTIONS_FILE: &str = "Flickr8k.token.txt";

/// File listing the image ids of one split
pub fn image_list_file(split: Split) -> String {
    format!("Flickr_8k.{split}Images.txt")
}

/// Loads captions and image lists from a Flickr8k text directory.
/// Implements the CaptionSource trait from Layer 3.
pub struct Flickr8kSource {
    dir: PathBuf,
}

impl Flickr8kSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CaptionSource for Flickr8kSource {
    fn read_captions(&self) -> Result<CaptionCorpus> {
        let path = self.dir.join(CAPTIONS_FILE);
        let text = read_text(&path)?;
        let corpus = parse_captions(&text);

        tracing::info!(
            "Loaded {} captions for {} images from '{}'",
            corpus.caption_count(),
            corpus.image_count(),
            path.display()
        );
        Ok(corpus)
    }

    fn read_image_list(&self, split: Split) -> Result<Vec<String>> {
        let path = self.dir.join(image_list_file(split));
        let images = parse_image_list(&read_text(&path)?);

        tracing::info!("Loaded {} {} images", images.len(), split);
        Ok(images)
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot read '{}'", path.display()))
}

/// Parse the token file. Malformed lines are logged and skipped.
pub fn parse_captions(text: &str) -> CaptionCorpus {
    let mut corpus = CaptionCorpus::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let Some((key, caption)) = line.split_once('\t') else {
            tracing::warn!("Skipping line {}: no tab separator", line_no + 1);
            continue;
        };

        // "1000268201_693b08cb0e.jpg#0" → "1000268201_693b08cb0e.jpg"
        let image_id = key.split('#').next().unwrap_or(key).trim();
        let caption  = caption.trim();

        if image_id.is_empty() || caption.is_empty() {
            tracing::warn!("Skipping line {}: empty image id or caption", line_no + 1);
            continue;
        }

        corpus.push(image_id, caption);
    }

    corpus
}

/// Parse an image list: one id per non-blank line, order kept.
pub fn parse_image_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_numbered_captions() {
        let text = "img1.jpg#0\tA dog runs .\nimg1.jpg#1\tA dog is running .\nimg2.jpg#0\tA cat .\n";
        let corpus = parse_captions(text);

        assert_eq!(corpus.image_count(), 2);
        assert_eq!(
            corpus.captions_for("img1.jpg").unwrap(),
            ["A dog runs .", "A dog is running ."]
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "no tab here\nimg1.jpg#0\t\n\nimg2.jpg#0\ta cat\n";
        let corpus = parse_captions(text);
        assert_eq!(corpus.caption_count(), 1);
        assert!(corpus.captions_for("img2.jpg").is_some());
    }

    #[test]
    fn test_image_list_keeps_order() {
        let images = parse_image_list("b.jpg\n\na.jpg\r\nc.jpg");
        assert_eq!(images, ["b.jpg", "a.jpg", "c.jpg"]);
    }

    #[test]
    fn test_image_list_file_name() {
        assert_eq!(image_list_file(Split::Train), "Flickr_8k.trainImages.txt");
    }

    #[test]
    fn test_missing_directory_is_error() {
        let source = Flickr8kSource::new("/definitely/not/here");
        assert!(source.read_captions().is_err());
        assert!(source.read_image_list(Split::Dev).is_err());
    }
}
