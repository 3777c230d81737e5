mod config;
mod output;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use nth_prime::{Sieve, Strategy};
use output::PrimeRecord;
use std::time::Instant;

use crate::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // --- Config Validation ---
    let indices = match config.indices() {
        Ok(indices) => indices,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            std::process::exit(1);
        }
    };
    let sieve = match Sieve::new(config.sieve_config()) {
        Ok(sieve) => sieve,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // stdout carries results, so status goes to stderr.
    if !config.quiet {
        let settings = sieve.config();
        eprintln!("Indices: {}", indices.len());
        eprintln!("Segment Threshold: {}", settings.segment_threshold);
        eprintln!("Window Size: {}", settings.window_size);
        match settings.workers {
            Some(workers) => eprintln!("Workers: {}", workers),
            None => eprintln!("Workers: {} (auto)", rayon::current_num_threads()),
        }
    }

    // Plain lookups count as one step, segmented ones as one step per window.
    let steps = |n: i64| match sieve.strategy_for(n) {
        Strategy::Plain => 1,
        Strategy::Segmented => sieve.window_count(n),
    };
    let total_steps: u64 = indices.iter().map(|&n| steps(n)).sum();

    let bar = if config.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total_steps)
    };
    bar.set_style(progress_style()?);

    let mut records = Vec::with_capacity(indices.len());
    let mut done = 0;
    for &n in &indices {
        bar.set_message(format!("index {}", n));
        let strategy = sieve.strategy_for(n);
        let started = Instant::now();

        let prime = match sieve.nth_prime_with_progress(n, |_| bar.inc(1)) {
            Ok(prime) => prime,
            Err(e) => {
                bar.abandon();
                eprintln!("Error: index {} ({}): {}", n, strategy, e);
                std::process::exit(1);
            }
        };

        records.push(PrimeRecord {
            index: Sieve::normalize(n),
            prime,
            strategy,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        });

        // The segmented path stops early once the prime is found.
        done += steps(n);
        bar.set_position(done);
    }

    bar.finish_with_message("Search complete.");

    output::write_results(&records, &config)?;

    if let Some(path) = &config.output {
        if !config.quiet {
            eprintln!("Results written to {}", path.display());
        }
    }

    Ok(())
}

/// Bar over sieve steps: one per plain lookup, one per segmented window.
fn progress_style() -> Result<ProgressStyle, Box<dyn std::error::Error>> {
    Ok(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} steps ({eta}) {msg}")?
        .progress_chars("=> "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_style_template_parses() {
        assert!(progress_style().is_ok());
    }
}
