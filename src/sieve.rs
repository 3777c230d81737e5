use bitvec::prelude::*;

use crate::bound::upper_bound;
use crate::error::SieveError;

/// Classical Sieve of Eratosthenes over `[0, limit]`. A set bit means prime.
pub fn sieve_table(limit: u64) -> Result<BitVec<u8, Lsb0>, SieveError> {
    let len = usize::try_from(limit)
        .ok()
        .and_then(|l| l.checked_add(1))
        .ok_or(SieveError::BoundTooLarge { bound: limit })?;
    let limit = len - 1;

    let mut table = bitvec![u8, Lsb0; 1; len];
    table.set(0, false);
    if len > 1 {
        table.set(1, false);
    }

    // Multiples below i * i were struck by smaller factors.
    for i in 2..=limit.isqrt() {
        if table[i] {
            for j in (i * i..=limit).step_by(i) {
                table.set(j, false);
            }
        }
    }

    Ok(table)
}

/// Finds the n-th prime (0-indexed) with a single in-memory table.
pub fn plain_nth_prime(n: u64) -> Result<u64, SieveError> {
    let bound = upper_bound(n);
    let table = sieve_table(bound)?;
    let exhausted = SieveError::BoundExhausted { index: n, bound };

    let index = usize::try_from(n).map_err(|_| exhausted.clone())?;
    table
        .iter_ones()
        .nth(index)
        .map(|p| p as u64)
        .ok_or(exhausted)
}

/// All primes <= floor(sqrt(bound)), ascending. Every composite <= bound has
/// one of these as a factor.
pub fn base_primes(bound: u64) -> Result<Vec<u32>, SieveError> {
    let table = sieve_table(bound.isqrt())?;
    Ok(table.iter_ones().map(|p| p as u32).collect())
}
