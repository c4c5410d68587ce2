// ============================================================
// Layer 4 — Image Feature Store
// ============================================================
// Precomputed image embeddings are produced by an external
// feature extractor and cached on disk per split:
//
//   <data_dir>/model/<split>_image_encoding.pkl
//
// The cache is a pickled list of float lists, one vector per
// image, in the same order as the split's image list. Only
// plain Python lists are understood; numpy arrays must be
// converted with `.tolist()` before pickling.
//
// The cache is loaded whole, once, then re-keyed by image id
// so later lookups do not depend on list position.

use anyhow::{bail, Context, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::domain::split::Split;

/// Subdirectory of the data dir holding caches, config and tokenizer
pub const MODEL_DIR: &str = "model";

pub fn model_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(MODEL_DIR)
}

/// Location of a split's feature cache.
pub fn cache_path(data_dir: &Path, split: Split) -> PathBuf {
    model_dir(data_dir).join(format!("{split}_image_encoding.pkl"))
}

/// Read every feature vector from a pickled cache file.
pub fn load_feature_cache(path: &Path) -> Result<Vec<Vec<f32>>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open feature cache '{}'", path.display()))?;

    let vectors: Vec<Vec<f32>> =
        serde_pickle::from_reader(BufReader::new(file), serde_pickle::DeOptions::new())
            .with_context(|| format!("Cannot decode feature cache '{}'", path.display()))?;

    tracing::info!(
        "Loaded {} image feature vectors from '{}'",
        vectors.len(),
        path.display()
    );
    Ok(vectors)
}

/// Image feature vectors keyed by image id.
///
/// Vectors are reference counted: every training example built
/// from an image shares the same allocation.
#[derive(Debug, Clone, Default)]
pub struct ImageFeatures {
    by_id:       HashMap<String, Arc<[f32]>>,
    feature_dim: usize,
}

impl ImageFeatures {
    /// Pair the i-th image id with the i-th vector.
    ///
    /// Fails if the two lists differ in length or if the vectors
    /// do not all share one dimension.
    pub fn from_aligned(image_list: &[String], vectors: Vec<Vec<f32>>) -> Result<Self> {
        if image_list.len() != vectors.len() {
            bail!(
                "image list has {} entries but the feature cache holds {} vectors",
                image_list.len(),
                vectors.len()
            );
        }

        let feature_dim = vectors.first().map_or(0, Vec::len);
        let mut by_id = HashMap::with_capacity(vectors.len());

        for (position, (image_id, vector)) in image_list.iter().zip(vectors).enumerate() {
            if vector.len() != feature_dim {
                bail!(
                    "feature vector {} ('{}') has {} values, expected {}",
                    position,
                    image_id,
                    vector.len(),
                    feature_dim
                );
            }
            if by_id.contains_key(image_id) {
                tracing::warn!("Duplicate image '{}' in image list; keeping first vector", image_id);
                continue;
            }
            by_id.insert(image_id.clone(), Arc::from(vector));
        }

        Ok(Self { by_id, feature_dim })
    }

    pub fn get(&self, image_id: &str) -> Option<&Arc<[f32]>> {
        self.by_id.get(image_id)
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cache_path_layout() {
        let path = cache_path(Path::new("data"), Split::Train);
        assert_eq!(path, Path::new("data/model/train_image_encoding.pkl"));
    }

    #[test]
    fn test_keys_vectors_by_image_id() {
        let features = ImageFeatures::from_aligned(
            &ids(&["a.jpg", "b.jpg"]),
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .unwrap();

        assert_eq!(features.feature_dim(), 2);
        assert_eq!(features.get("b.jpg").unwrap().to_vec(), vec![3.0f32, 4.0]);
        assert!(features.get("c.jpg").is_none());
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let result = ImageFeatures::from_aligned(&ids(&["a.jpg", "b.jpg"]), vec![vec![1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ragged_vectors_are_error() {
        let result = ImageFeatures::from_aligned(
            &ids(&["a.jpg", "b.jpg"]),
            vec![vec![1.0, 2.0], vec![3.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_pickle_cache_round_trip() {
        let dir = std::env::temp_dir().join(format!("caption-features-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("train_image_encoding.pkl");

        let vectors: Vec<Vec<f64>> = vec![vec![0.5, 1.5], vec![2.5, 3.5]];
        let mut file = File::create(&path).unwrap();
        serde_pickle::to_writer(&mut file, &vectors, serde_pickle::SerOptions::new()).unwrap();
        drop(file);

        let loaded = load_feature_cache(&path).unwrap();
        assert_eq!(loaded, vec![vec![0.5f32, 1.5], vec![2.5, 3.5]]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_cache_is_error() {
        assert!(load_feature_cache(Path::new("/no/such/cache.pkl")).is_err());
    }
}
