use burn::data::dataset::Dataset;

use crate::data::expander::{CaptionExample, CaptionPair};

/// Every example of one pass over the pairs, materialised up
/// front. This is the finite view handed to Burn's DataLoader;
/// the infinite stream is `BatchGenerator`.
pub struct CaptionDataset {
    examples: Vec<CaptionExample>,
}

impl CaptionDataset {
    pub fn new(examples: Vec<CaptionExample>) -> Self { Self { examples } }

    pub fn from_pairs(pairs: &[CaptionPair]) -> Self {
        Self::new(pairs.iter().flat_map(CaptionPair::windows).collect())
    }
}

impl Dataset<CaptionExample> for CaptionDataset {
    fn get(&self, index: usize) -> Option<CaptionExample> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_from_pairs_flattens_windows_in_order() {
        let image: Arc<[f32]> = Arc::from(vec![1.0f32]);
        let pairs = vec![
            CaptionPair { image: Arc::clone(&image), tokens: vec![1, 2, 3] },
            CaptionPair { image: Arc::clone(&image), tokens: vec![4] },
            CaptionPair { image, tokens: vec![5, 6] },
        ];
        let dataset = CaptionDataset::from_pairs(&pairs);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get(1).unwrap().prefix, vec![1, 2]);
        assert_eq!(dataset.get(2).unwrap().next_word, 6);
        assert!(dataset.get(3).is_none());
    }
}
