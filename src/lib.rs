//! Finds the n-th prime (0-indexed) with a Sieve of Eratosthenes.
//!
//! Small indices sieve a single in-memory table sized by an analytic upper
//! bound. Indices at or above [`SEGMENT_THRESHOLD`] switch to a segmented
//! sieve that walks the candidate range in fixed windows, marking each window
//! in parallel over disjoint chunks.
//!
//! ```
//! assert_eq!(nth_prime::nth_prime(0), Ok(2));
//! assert_eq!(nth_prime::nth_prime(4), Ok(11));
//! assert_eq!(nth_prime::nth_prime_or_sentinel(-5), 2);
//! ```

mod bound;
mod dispatch;
mod error;
mod segmented;
mod sieve;
mod window;

pub use bound::upper_bound;
pub use dispatch::{SEGMENT_THRESHOLD, Sieve, SieveConfig, Strategy};
pub use error::SieveError;
pub use segmented::SegmentedSieve;
pub use sieve::{base_primes, plain_nth_prime, sieve_table};
pub use window::{DEFAULT_WINDOW_SIZE, Window, Windows};

/// Returned by [`nth_prime_or_sentinel`] when no prime could be produced.
pub const NOT_FOUND: i64 = -1;

/// The n-th prime (0-indexed) with the default configuration. Negative `n`
/// is treated as 0.
pub fn nth_prime(n: i64) -> Result<u64, SieveError> {
    Sieve::default().nth_prime(n)
}

/// Integer form of [`nth_prime`]: any failure collapses to [`NOT_FOUND`].
pub fn nth_prime_or_sentinel(n: i64) -> i64 {
    nth_prime(n)
        .ok()
        .and_then(|p| i64::try_from(p).ok())
        .unwrap_or(NOT_FOUND)
}
