//! Gray-code index counter.
//!
//! Consecutive integers in binary-reflected Gray code differ in exactly one
//! bit, and the index of that bit for the step `n -> n+1` is the number of
//! trailing zeros of `n+1`. [`GrayIndex`] tracks that counter so the point
//! engine can advance by XORing a single generating row per step instead of
//! recomputing the whole point.

use crate::bits::trailing_zero_bit;

/// A counter whose successive [`index`](GrayIndex::index) values enumerate
/// the changed-bit sequence of the binary-reflected Gray code.
///
/// The counter starts at 1: point 0 of a net is materialized by
/// initialization, so the first `index()` call answers "which row flips to
/// reach point 1".
///
/// # Example
///
/// ```
/// use digitalnet::gray::GrayIndex;
///
/// let mut gray = GrayIndex::new();
/// assert_eq!(gray.index(), 0);
/// gray.next();
/// assert_eq!(gray.index(), 1);
/// gray.next();
/// assert_eq!(gray.index(), 0);
/// gray.next();
/// assert_eq!(gray.index(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GrayIndex {
    count: u64,
}

impl GrayIndex {
    /// Creates a counter in its cleared state.
    pub fn new() -> Self {
        GrayIndex { count: 1 }
    }

    /// Resets the counter to 1, the "about to produce point 1" state.
    pub fn clear(&mut self) {
        self.count = 1;
    }

    /// Advances the counter by one.
    pub fn next(&mut self) {
        self.count += 1;
    }

    /// Returns the active bit index for the current step.
    pub fn index(&self) -> usize {
        trailing_zero_bit(self.count) as usize
    }

    /// Returns true if the counter is in its cleared state.
    pub fn is_cleared(&self) -> bool {
        self.count == 1
    }
}

impl Default for GrayIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_cleared() {
        let gray = GrayIndex::new();
        assert!(gray.is_cleared());
        assert_eq!(gray.index(), 0);
    }

    #[test]
    fn test_changed_bit_sequence() {
        // For a walk of 2^m points the active bit stays below m; check the
        // first 15 steps against the known Gray sequence.
        let mut gray = GrayIndex::new();
        let expected = [0, 1, 0, 2, 0, 1, 0, 3, 0, 1, 0, 2, 0, 1, 0];
        for &e in &expected {
            assert_eq!(gray.index(), e);
            gray.next();
        }
    }

    #[test]
    fn test_clear_restarts() {
        let mut gray = GrayIndex::new();
        for _ in 0..7 {
            gray.next();
        }
        assert!(!gray.is_cleared());
        gray.clear();
        assert!(gray.is_cleared());
        assert_eq!(gray.index(), 0);
    }

    #[test]
    fn test_each_bit_below_m_touched_evenly() {
        // Across one full 2^m cycle, bit b is the active index 2^(m-1-b)
        // times; every row of a generating matrix gets exercised.
        let m = 6;
        let mut gray = GrayIndex::new();
        let mut hits = [0u32; 6];
        for _ in 0..(1u32 << m) - 1 {
            hits[gray.index()] += 1;
            gray.next();
        }
        for (b, &h) in hits.iter().enumerate() {
            assert_eq!(h, 1 << (m - 1 - b));
        }
    }
}
