/// Width of each segmented-sieve window.
pub const DEFAULT_WINDOW_SIZE: u64 = 1_000_000;

/// A closed range `[low, high]` of candidates sieved as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub low: u64,
    pub high: u64,
}

impl Window {
    pub fn size(&self) -> u64 {
        self.high - self.low + 1
    }
}

/// Ascending, non-overlapping windows that cover `[2, bound]` exactly once.
#[derive(Debug, Clone)]
pub struct Windows {
    next_low: Option<u64>,
    bound: u64,
    width: u64,
}

impl Windows {
    pub fn new(bound: u64, width: u64) -> Self {
        let width = width.max(1);
        Self {
            next_low: (bound >= 2).then_some(2),
            bound,
            width,
        }
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Self::Item> {
        let low = self.next_low?;
        let high = low.saturating_add(self.width - 1).min(self.bound);
        self.next_low = if high < self.bound { Some(high + 1) } else { None };
        Some(Window { low, high })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next_low {
            Some(low) => ((self.bound - low) / self.width + 1) as usize,
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows {}
