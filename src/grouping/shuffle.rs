//! Deterministic Fisher–Yates shuffle.
//!
//! # Algorithm
//!
//! The random stream is `frac(sin(seed) * 10000)` with `seed` incremented
//! after every draw. Walking the slice from the end, position `i - 1` is
//! swapped with `floor(r * i)`.
//!
//! The same `(items, seed)` always yields the same order, so the first
//! (naive) variant of every plan is exactly reproducible.

/// Seed distance between consecutive variants.
const VARIANT_STRIDE: u64 = 1_000_000;
/// Seed distance between consecutive dates within a variant.
///
/// A shuffle of `n` members draws `n` values, so slots stay disjoint
/// while rosters have fewer than `DATE_STRIDE` members.
const DATE_STRIDE: u64 = 1_000;
/// Date slots per variant. Date indices wrap at this count so a variant
/// never reaches into the next variant's seed range.
const DATES_PER_VARIANT: u64 = VARIANT_STRIDE / DATE_STRIDE;

/// Sine-based pseudorandom stream in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SineStream {
    seed: u64,
}

impl SineStream {
    /// Creates a stream starting at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let x = (self.seed as f64).sin() * 10_000.0;
        self.seed = self.seed.wrapping_add(1);
        x - x.floor()
    }

    /// Next index in `0..bound`. Returns 0 when `bound` is 0.
    pub fn next_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let idx = (self.next_f64() * bound as f64).floor() as usize;
        idx.min(bound - 1)
    }
}

/// Shuffle seed for one `(variant, date)` slot.
///
/// Distinct slots get disjoint streams for up to `DATES_PER_VARIANT`
/// dates and rosters below `DATE_STRIDE` members. Past that date count
/// the date index wraps and seeds repeat within the variant.
pub fn shuffle_seed(base_seed: u64, variant_index: usize, date_index: usize) -> u64 {
    let date_slot = date_index as u64 % DATES_PER_VARIANT;
    base_seed
        .wrapping_add((variant_index as u64).wrapping_mul(VARIANT_STRIDE))
        .wrapping_add(date_slot * DATE_STRIDE)
        .wrapping_add(1)
}

/// Returns a permuted copy of `items`.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    let mut stream = SineStream::new(seed);
    for remaining in (1..=out.len()).rev() {
        let j = stream.next_index(remaining);
        out.swap(remaining - 1, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_range() {
        let mut s = SineStream::new(1);
        for _ in 0..1000 {
            let r = s.next_f64();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_reproducible() {
        let items: Vec<u32> = (1..=12).collect();
        let a = seeded_shuffle(&items, 7);
        let b = seeded_shuffle(&items, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_permutation() {
        let items: Vec<u32> = (1..=20).collect();
        let mut shuffled = seeded_shuffle(&items, 3);
        assert_ne!(shuffled, items);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_seeds_differ_per_slot() {
        let a = shuffle_seed(0, 0, 0);
        let b = shuffle_seed(0, 0, 1);
        let c = shuffle_seed(0, 1, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(shuffle_seed(0, 2, 3), shuffle_seed(0, 2, 3));
    }

    #[test]
    fn test_date_slots_stay_within_variant() {
        assert_ne!(shuffle_seed(0, 0, 1000), shuffle_seed(0, 1, 0));
        assert_ne!(shuffle_seed(5, 0, 999), shuffle_seed(5, 1, 0));
        assert!(shuffle_seed(0, 0, 999) < shuffle_seed(0, 1, 0));
        assert_eq!(shuffle_seed(0, 0, 1000), shuffle_seed(0, 0, 0));
    }

    #[test]
    fn test_next_index_zero_bound() {
        let mut s = SineStream::new(9);
        assert_eq!(s.next_index(0), 0);
        assert_eq!(s.next_index(1), 0);
        assert!(s.next_index(10) < 10);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(seeded_shuffle::<u32>(&[], 1).is_empty());
        assert_eq!(seeded_shuffle(&[42], 1), vec![42]);
    }
}
