// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline never reads caption files directly; it goes
// through CaptionSource so tests and other dataset layouts can
// plug in their own reader.
//
// Implementations:
//   - Flickr8kSource → token file + per-split image lists
//   - (tests) in-memory sources
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::{corpus::CaptionCorpus, split::Split};

// ─── CaptionSource ────────────────────────────────────────────────────────────
/// Anything that can provide captions and per-split image lists.
pub trait CaptionSource {
    /// Read every caption of every image, grouped by image id.
    fn read_captions(&self) -> Result<CaptionCorpus>;

    /// Read the ordered image ids belonging to one split.
    /// The order must match the order of the split's feature cache.
    fn read_image_list(&self, split: Split) -> Result<Vec<String>>;
}

/// Borrowed sources are sources too, so one reader can serve
/// several use cases.
impl<T: CaptionSource + ?Sized> CaptionSource for &T {
    fn read_captions(&self) -> Result<CaptionCorpus> {
        (**self).read_captions()
    }

    fn read_image_list(&self, split: Split) -> Result<Vec<String>> {
        (**self).read_image_list(split)
    }
}
