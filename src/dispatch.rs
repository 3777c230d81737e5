use serde::Serialize;
use std::fmt;

use crate::bound::upper_bound;
use crate::error::SieveError;
use crate::segmented::SegmentedSieve;
use crate::sieve::plain_nth_prime;
use crate::window::{DEFAULT_WINDOW_SIZE, Window};

/// Indices at or above this use the segmented sieve.
pub const SEGMENT_THRESHOLD: u64 = 10_000_000;

/// Tuning knobs for [`Sieve`]. `Default` gives the stock behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SieveConfig {
    pub segment_threshold: u64,
    pub window_size: u64,
    /// Chunks per window and threads to mark them with. `None` uses the
    /// available hardware parallelism.
    pub workers: Option<usize>,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            segment_threshold: SEGMENT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
            workers: None,
        }
    }
}

impl SieveConfig {
    pub fn validate(&self) -> Result<(), SieveError> {
        if self.window_size == 0 {
            return Err(SieveError::InvalidConfig("window size must be > 0"));
        }
        if usize::try_from(self.window_size).is_err() {
            return Err(SieveError::InvalidConfig("window size exceeds address space"));
        }
        if self.workers == Some(0) {
            return Err(SieveError::InvalidConfig("worker count must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Plain,
    Segmented,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Plain => f.write_str("plain"),
            Strategy::Segmented => f.write_str("segmented"),
        }
    }
}

/// Routes n-th prime requests to the plain or segmented sieve.
#[derive(Debug, Clone, Default)]
pub struct Sieve {
    config: SieveConfig,
}

impl Sieve {
    pub fn new(config: SieveConfig) -> Result<Self, SieveError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Negative indices are treated as 0.
    pub fn normalize(n: i64) -> u64 {
        n.max(0) as u64
    }

    pub fn strategy_for(&self, n: i64) -> Strategy {
        if Self::normalize(n) >= self.config.segment_threshold {
            Strategy::Segmented
        } else {
            Strategy::Plain
        }
    }

    /// Number of windows the segmented path sieves in the worst case for `n`.
    pub fn window_count(&self, n: i64) -> u64 {
        let bound = upper_bound(Self::normalize(n));
        if bound < 2 {
            return 0;
        }
        (bound - 2) / self.config.window_size + 1
    }

    pub fn nth_prime(&self, n: i64) -> Result<u64, SieveError> {
        self.nth_prime_with_progress(n, |_| {})
    }

    /// Like [`Sieve::nth_prime`], calling `on_window` after each window on
    /// the segmented path. The plain path never calls it.
    pub fn nth_prime_with_progress<F>(&self, n: i64, on_window: F) -> Result<u64, SieveError>
    where
        F: FnMut(&Window),
    {
        let n = Self::normalize(n);
        if n < self.config.segment_threshold {
            return plain_nth_prime(n);
        }
        SegmentedSieve::new(upper_bound(n), self.config.window_size, self.config.workers)?
            .find(n, on_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmented_everywhere() -> Sieve {
        Sieve::new(SieveConfig {
            segment_threshold: 0,
            window_size: 1_000,
            workers: Some(4),
        })
        .unwrap()
    }

    #[test]
    fn test_strategy_selection() {
        let sieve = Sieve::default();
        assert_eq!(sieve.strategy_for(-3), Strategy::Plain);
        assert_eq!(sieve.strategy_for(9_999_999), Strategy::Plain);
        assert_eq!(sieve.strategy_for(10_000_000), Strategy::Segmented);
        assert_eq!(segmented_everywhere().strategy_for(0), Strategy::Segmented);
    }

    #[test]
    fn test_negative_input_is_index_zero() {
        let sieve = Sieve::default();
        assert_eq!(sieve.nth_prime(-5).unwrap(), 2);
        assert_eq!(sieve.nth_prime(i64::MIN).unwrap(), 2);
        assert_eq!(segmented_everywhere().nth_prime(-1).unwrap(), 2);
    }

    #[test]
    fn test_paths_agree_below_threshold() {
        let plain = Sieve::default();
        let segmented = segmented_everywhere();
        for n in (0..5_000).step_by(37).chain([9, 10, 11, 4_999]) {
            assert_eq!(plain.nth_prime(n).unwrap(), segmented.nth_prime(n).unwrap());
        }
    }

    #[test]
    fn test_progress_only_on_segmented_path() {
        let mut plain_windows = 0;
        Sieve::default()
            .nth_prime_with_progress(100, |_| plain_windows += 1)
            .unwrap();
        assert_eq!(plain_windows, 0);

        let mut segmented_windows = 0;
        let prime = segmented_everywhere()
            .nth_prime_with_progress(1_000, |_| segmented_windows += 1)
            .unwrap();
        assert_eq!(prime, 7_927);
        assert_eq!(segmented_windows, 8);
    }

    #[test]
    fn test_window_count() {
        let sieve = segmented_everywhere();
        // upper_bound(0) = 30 fits one window.
        assert_eq!(sieve.window_count(0), 1);
        assert_eq!(sieve.window_count(1_000), 9);
    }

    #[test]
    fn test_rejects_zero_window() {
        let config = SieveConfig {
            window_size: 0,
            ..SieveConfig::default()
        };
        assert!(Sieve::new(config).is_err());
    }
}
