use thiserror::Error;

/// Failures surfaced by the sieve engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// The estimated upper bound held fewer than `index + 1` primes.
    #[error("upper bound {bound} holds fewer than {} primes", .index + 1)]
    BoundExhausted { index: u64, bound: u64 },

    /// The upper bound cannot be addressed as a table on this target.
    #[error("upper bound {bound} does not fit in memory")]
    BoundTooLarge { bound: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}
