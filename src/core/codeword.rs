//! Codeword and per-bit frequency counting.

use tracing::debug;

use crate::error::{Result, VisualsError, ensure_non_empty};

/// Collapse a codeword to its bit string, e.g. `[1, 0, 1]` -> `"101"`.
pub fn codeword_key(bits: &[u8]) -> String {
    bits.iter().map(|bit| bit.to_string()).collect()
}

/// Occurrence counts of distinct codewords, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodewordFrequencies {
    entries: Vec<(String, usize)>,
}

impl CodewordFrequencies {
    pub fn count<W: AsRef<[u8]>>(words: &[W]) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        for word in words {
            let key = codeword_key(word.as_ref());
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, n)) => *n += 1,
                None => entries.push((key, 1)),
            }
        }
        debug!(
            total = words.len(),
            distinct = entries.len(),
            "counted codewords"
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, n)| *n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent codewords, highest count first; ties keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCount {
    pub zeros: usize,
    pub ones: usize,
}

/// Per-position counts of zeros and ones. Any bit other than 1 counts as a zero.
pub fn bit_frequencies<W: AsRef<[u8]>>(words: &[W]) -> Result<Vec<BitCount>> {
    ensure_non_empty(words, "codewords")?;
    let expected = words[0].as_ref().len();
    let mut counts = vec![BitCount::default(); expected];
    for (index, word) in words.iter().enumerate() {
        let word = word.as_ref();
        if word.len() != expected {
            return Err(VisualsError::InconsistentCodewordLength {
                expected,
                found: word.len(),
                index,
            });
        }
        for (slot, &bit) in counts.iter_mut().zip(word) {
            if bit == 1 {
                slot.ones += 1;
            } else {
                slot.zeros += 1;
            }
        }
    }
    Ok(counts)
}
