use clap::{Parser, ValueEnum};
use nth_prime::{DEFAULT_WINDOW_SIZE, SEGMENT_THRESHOLD, SieveConfig};
use std::path::PathBuf;

/// Largest `--from/--to` range accepted in one run; every result is kept for output.
pub const MAX_RANGE_LEN: u64 = 1_000_000;

/// Find the n-th prime number (0-indexed) with a plain or segmented parallel sieve.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Prime indices to look up. Negative indices are treated as 0.
    #[arg(allow_negative_numbers = true)]
    pub indices: Vec<i64>,

    /// First index of an inclusive range to look up (requires --to).
    #[arg(long, requires = "to", allow_negative_numbers = true)]
    pub from: Option<i64>,

    /// Last index of an inclusive range to look up (requires --from).
    #[arg(long, requires = "from", allow_negative_numbers = true)]
    pub to: Option<i64>,

    /// Indices at or above this value use the segmented sieve.
    #[arg(long, default_value_t = SEGMENT_THRESHOLD)]
    pub threshold: u64,

    /// Numbers sieved per window on the segmented path.
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: u64,

    /// Size windows to the L2 cache instead of --window-size.
    #[arg(long)]
    pub fit_cache: bool,

    /// Marking threads (and chunks per window). Defaults to all available cores.
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Output format for the results.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Write results to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress status lines and the progress bar.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Csv,
    Json,
}

impl Config {
    /// Positional indices followed by the --from/--to range, in request order.
    pub fn indices(&self) -> Result<Vec<i64>, String> {
        let mut indices = self.indices.clone();
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(format!("--from {} is greater than --to {}", from, to));
            }
            if to.abs_diff(from) >= MAX_RANGE_LEN {
                return Err(format!(
                    "range too large: --from {} --to {} exceeds {} indices",
                    from, to, MAX_RANGE_LEN
                ));
            }
            indices.extend(from..=to);
        }
        if indices.is_empty() {
            return Err("no indices provided".to_string());
        }
        Ok(indices)
    }

    pub fn sieve_config(&self) -> SieveConfig {
        let window_size = if self.fit_cache {
            cache_window_size()
        } else {
            self.window_size
        };
        SieveConfig {
            segment_threshold: self.threshold,
            window_size,
            workers: self.workers,
        }
    }
}

/// One bit per candidate, so an L2-sized window holds `8 * bytes` numbers.
fn cache_window_size() -> u64 {
    cache_size::l2_cache_size()
        .filter(|&bytes| bytes > 0)
        .map(|bytes| (bytes * 8) as u64)
        .unwrap_or(DEFAULT_WINDOW_SIZE)
}
