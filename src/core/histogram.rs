//! Unit-width binning for minimum Hamming distances.

use tracing::debug;

/// Number of bin edges; bins are centred on `0..HAMMING_BINS`.
pub const HAMMING_BIN_EDGES: u32 = 20;
/// Unit bins between consecutive edges `k - 0.5`.
pub const HAMMING_BINS: u32 = HAMMING_BIN_EDGES - 1;

/// Count occurrences of each distance in `0..HAMMING_BINS`.
///
/// Edges sit at half-integers so every bar is centred on its distance. The last
/// bin is closed on the right, which only matters for values that are not
/// integers. Distances beyond the last edge are dropped.
pub fn hamming_histogram(distances: &[u32]) -> Vec<(u32, usize)> {
    let mut counts = vec![0usize; HAMMING_BINS as usize];
    let mut dropped = 0usize;
    for &d in distances {
        match counts.get_mut(d as usize) {
            Some(slot) => *slot += 1,
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "hamming distances outside histogram range");
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(d, n)| (d as u32, n))
        .collect()
}

/// Largest bin count across several histograms, at least 1.
pub fn max_bin_count(histograms: &[&[(u32, usize)]]) -> usize {
    histograms
        .iter()
        .flat_map(|h| h.iter().map(|(_, n)| *n))
        .max()
        .unwrap_or(0)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_are_centred_on_integers() {
        let hist = hamming_histogram(&[0, 0, 3, 18]);
        assert_eq!(hist.len(), HAMMING_BINS as usize);
        assert_eq!(hist[0], (0, 2));
        assert_eq!(hist[3], (3, 1));
        assert_eq!(hist[18], (18, 1));
        assert_eq!(hist.iter().map(|(_, n)| n).sum::<usize>(), 4);
    }

    #[test]
    fn out_of_range_distances_are_dropped() {
        let hist = hamming_histogram(&[19, 25, 1]);
        assert_eq!(hist.iter().map(|(_, n)| n).sum::<usize>(), 1);
    }

    #[test]
    fn empty_input_gives_empty_bins() {
        let hist = hamming_histogram(&[]);
        assert!(hist.iter().all(|(_, n)| *n == 0));
        assert_eq!(max_bin_count(&[&hist]), 1);
    }
}
