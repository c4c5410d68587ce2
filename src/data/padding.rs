// Fixed-length padding for token sequences.
//
// Short sequences get PAD_TOKEN appended at the end ("post"
// padding). Sequences longer than `max_len` lose tokens from
// the front, keeping the words closest to the prediction target.

/// Filler id; the tokenizer never assigns it to a word.
pub const PAD_TOKEN: u32 = 0;

/// Pad or truncate one sequence to exactly `max_len` ids.
pub fn pad_post(seq: &[u32], max_len: usize) -> Vec<u32> {
    let start = seq.len().saturating_sub(max_len);
    let mut out = Vec::with_capacity(max_len);
    out.extend_from_slice(&seq[start..]);
    out.resize(max_len, PAD_TOKEN);
    out
}

/// Pad every sequence in a batch to the same length.
pub fn pad_sequences<S: AsRef<[u32]>>(seqs: &[S], max_len: usize) -> Vec<Vec<u32>> {
    seqs.iter().map(|s| pad_post(s.as_ref(), max_len)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_at_end() {
        assert_eq!(pad_post(&[4, 5], 4), vec![4, 5, 0, 0]);
    }

    #[test]
    fn test_exact_length_unchanged() {
        assert_eq!(pad_post(&[1, 2, 3], 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_truncates_from_front() {
        assert_eq!(pad_post(&[1, 2, 3, 4], 2), vec![3, 4]);
    }

    #[test]
    fn test_batch_is_rectangular() {
        let padded = pad_sequences(&[vec![1], vec![1, 2, 3]], 3);
        assert!(padded.iter().all(|row| row.len() == 3));
        assert_eq!(padded[0], vec![1, 0, 0]);
    }
}
