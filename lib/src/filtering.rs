use std::cmp::Ordering;

use rayon::prelude::*;

use crate::errors::{KmerError, KmerResult};

/// Below this many survivors the sort isn't worth handing to rayon.
const PARALLEL_SORT_THRESHOLD: usize = 1 << 16;

/// Used to pass around the reporting threshold
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParams {
    /// Fraction of all windows a k-mer must account for to be reported.
    pub min_frequency: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams { min_frequency: 0. }
    }
}

impl FilterParams {
    pub fn new(min_frequency: f64) -> KmerResult<Self> {
        if !min_frequency.is_finite() || min_frequency < 0. {
            return Err(KmerError::InvalidFrequency(min_frequency));
        }
        Ok(FilterParams { min_frequency })
    }

    /// The smallest count that gets reported when there are
    /// `max_possible_count` windows in total; never less than 1.
    pub fn min_count(&self, max_possible_count: usize) -> u32 {
        let mut min_count = 0;
        if self.min_frequency > 0. {
            min_count = (self.min_frequency * max_possible_count as f64).round() as u32;
        }
        u32::max(min_count, 1)
    }

    /// Select and rank the representatives in `counts` (indexed by start
    /// position; only the first `max_possible_count` entries can be
    /// representatives) that reach the threshold.
    pub fn filter_counts(&self, counts: &[u32], max_possible_count: usize) -> Vec<RankedKmer> {
        let min_count = self.min_count(max_possible_count);
        let mut ranked = select(counts, max_possible_count, min_count);
        rank(&mut ranked);
        ranked
    }
}

/// A representative start position and how often its k-mer occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RankedKmer {
    pub position: usize,
    pub count: u32,
}

impl Ord for RankedKmer {
    /// Most frequent first; equal counts fall back to the earlier position.
    fn cmp(&self, other: &RankedKmer) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl PartialOrd for RankedKmer {
    fn partial_cmp(&self, other: &RankedKmer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Every position below `max_possible_count` whose count is at least
/// `min_count`, in position order.
pub fn select(counts: &[u32], max_possible_count: usize, min_count: u32) -> Vec<RankedKmer> {
    counts
        .iter()
        .take(max_possible_count)
        .enumerate()
        .filter(|&(_, &count)| count >= min_count)
        .map(|(position, &count)| RankedKmer { position, count })
        .collect()
}

/// Sort by descending count, then ascending position.
///
/// Positions are unique so the ordering is total and an unstable sort gives
/// the same answer as a stable one.
pub fn rank(kmers: &mut [RankedKmer]) {
    if kmers.len() >= PARALLEL_SORT_THRESHOLD {
        kmers.par_sort_unstable();
    } else {
        kmers.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_count() {
        let filter = FilterParams::default();
        assert_eq!(filter.min_count(3), 1);
        assert_eq!(filter.min_count(0), 1);

        let filter = FilterParams::new(0.4).unwrap();
        assert_eq!(filter.min_count(3), 1);
        assert_eq!(filter.min_count(10), 4);

        // rounds to the nearest count
        let filter = FilterParams::new(0.25).unwrap();
        assert_eq!(filter.min_count(10), 3);
        assert_eq!(filter.min_count(9), 2);

        let filter = FilterParams::new(0.01).unwrap();
        assert_eq!(filter.min_count(10), 1);

        let filter = FilterParams::new(2.).unwrap();
        assert_eq!(filter.min_count(5), 10);
    }

    #[test]
    fn test_invalid_frequency() {
        assert!(FilterParams::new(-0.1).is_err());
        assert!(FilterParams::new(f64::NAN).is_err());
        assert!(FilterParams::new(f64::INFINITY).is_err());
        assert!(FilterParams::new(0.).is_ok());
    }

    #[test]
    fn test_select_ignores_tail_positions() {
        // the last k - 1 slots of a count array are never representatives
        let counts = vec![2, 0, 1, 5, 7];
        let selected = select(&counts, 3, 1);
        assert_eq!(
            selected,
            vec![
                RankedKmer {
                    position: 0,
                    count: 2
                },
                RankedKmer {
                    position: 2,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_filter_counts() {
        let counts = vec![3, 1, 0, 3, 0, 0, 4, 2, 0];
        let filter = FilterParams::default();
        let ranked = filter.filter_counts(&counts, 8);
        let order: Vec<(usize, u32)> = ranked.iter().map(|r| (r.position, r.count)).collect();
        assert_eq!(order, vec![(6, 4), (0, 3), (3, 3), (7, 2), (1, 1)]);

        let filter = FilterParams::new(0.3).unwrap();
        let ranked = filter.filter_counts(&counts, 8);
        let order: Vec<usize> = ranked.iter().map(|r| r.position).collect();
        assert_eq!(order, vec![6, 0, 3, 7]);

        let filter = FilterParams::new(1.).unwrap();
        assert!(filter.filter_counts(&counts, 8).is_empty());
    }

    #[test]
    fn test_rank_large_input() {
        let mut kmers: Vec<RankedKmer> = (0..PARALLEL_SORT_THRESHOLD + 10)
            .map(|position| RankedKmer {
                position,
                count: (position % 97) as u32 + 1,
            })
            .collect();
        rank(&mut kmers);
        for pair in kmers.windows(2) {
            assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                assert!(pair[0].position < pair[1].position);
            }
        }
        assert_eq!(kmers[0].count, 97);
        assert_eq!(kmers[0].position, 96);
    }
}
