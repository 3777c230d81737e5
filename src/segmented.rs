use bitvec::prelude::*;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::SieveError;
use crate::sieve::base_primes;
use crate::window::{Window, Windows};

const WORD_BITS: usize = u64::BITS as usize;

/// A contiguous run of a window, owned by exactly one marking task.
///
/// `words` is an exclusive sub-slice of the window's storage, so two chunks
/// can never write the same bit.
#[derive(Debug)]
struct Chunk<'a> {
    start: u64,
    end: u64,
    words: &'a mut [u64],
}

impl Chunk<'_> {
    fn mark_composites(self, base_primes: &[u32]) {
        let bits = self.words.view_bits_mut::<Lsb0>();
        for &p in base_primes {
            let p = p as u64;
            let square = p * p;
            // Base primes ascend, so no later prime has a multiple to strike here.
            if square > self.end {
                break;
            }
            let first = square.max(self.start.div_ceil(p) * p);
            for j in (first..=self.end).step_by(p as usize) {
                bits.set((j - self.start) as usize, true);
            }
        }
    }
}

/// Splits a window's storage into at most `workers` word-aligned chunks of
/// near-equal size. The last chunk absorbs the remainder.
fn split_chunks(window: Window, words: &mut [u64], workers: usize) -> Vec<Chunk<'_>> {
    let workers = workers.max(1);
    let per_chunk = (words.len() / workers).max(1);

    let mut chunks = Vec::with_capacity(workers);
    let mut rest = words;
    let mut offset = 0usize;
    for t in 0..workers {
        if rest.is_empty() {
            break;
        }
        let take = if t + 1 == workers {
            rest.len()
        } else {
            per_chunk.min(rest.len())
        };
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(take);
        let start = window.low + (offset * WORD_BITS) as u64;
        let end = (start + (take * WORD_BITS) as u64 - 1).min(window.high);
        chunks.push(Chunk {
            start,
            end,
            words: head,
        });
        rest = tail;
        offset += take;
    }
    chunks
}

/// Segmented sieve over `[2, bound]`, marking each window in parallel.
pub struct SegmentedSieve {
    bound: u64,
    base_primes: Vec<u32>,
    window_size: u64,
    workers: usize,
    pool: Option<ThreadPool>,
}

impl SegmentedSieve {
    /// Precomputes the base primes for `bound`. With `workers` set, marking
    /// runs on a dedicated pool of that many threads; otherwise on the global
    /// rayon pool, one chunk per available thread.
    pub fn new(bound: u64, window_size: u64, workers: Option<usize>) -> Result<Self, SieveError> {
        if window_size == 0 {
            return Err(SieveError::InvalidConfig("window size must be > 0"));
        }
        if workers == Some(0) {
            return Err(SieveError::InvalidConfig("worker count must be > 0"));
        }

        let pool = workers
            .map(|threads| ThreadPoolBuilder::new().num_threads(threads).build())
            .transpose()
            .map_err(|e| SieveError::ThreadPool(e.to_string()))?;

        Ok(Self {
            bound,
            base_primes: base_primes(bound)?,
            window_size,
            workers: workers.unwrap_or_else(rayon::current_num_threads),
            pool,
        })
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    pub fn base_primes(&self) -> &[u32] {
        &self.base_primes
    }

    pub fn windows(&self) -> Windows {
        Windows::new(self.bound, self.window_size)
    }

    /// Marks composites in `window`. A clear bit at offset `i` means
    /// `window.low + i` is prime.
    fn mark_window(&self, window: Window) -> BitVec<u64, Lsb0> {
        let mut marks = bitvec![u64, Lsb0; 0; window.size() as usize];
        let chunks = split_chunks(window, marks.as_raw_mut_slice(), self.workers);
        let base_primes = self.base_primes.as_slice();

        // The join at the end of `for_each` is the barrier before counting.
        let mark = || {
            chunks
                .into_par_iter()
                .for_each(|chunk| chunk.mark_composites(base_primes))
        };
        match &self.pool {
            Some(pool) => pool.install(mark),
            None => mark(),
        }

        marks
    }

    /// Finds the n-th prime (0-indexed), scanning windows in ascending order
    /// and stopping at the window that contains it. `on_window` is called once
    /// per window after it has been counted.
    pub fn find<F>(&self, n: u64, mut on_window: F) -> Result<u64, SieveError>
    where
        F: FnMut(&Window),
    {
        let exhausted = SieveError::BoundExhausted {
            index: n,
            bound: self.bound,
        };

        // Invariant: count <= n.
        let mut count = 0u64;
        for window in self.windows() {
            let marks = self.mark_window(window);
            let primes = marks.count_zeros() as u64;
            on_window(&window);

            if n - count < primes {
                return marks
                    .iter_zeros()
                    .nth((n - count) as usize)
                    .map(|offset| window.low + offset as u64)
                    .ok_or(exhausted);
            }
            count += primes;
        }

        Err(exhausted)
    }
}
