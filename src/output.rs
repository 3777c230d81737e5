use crate::config::{Config, Format};
use csv::Writer;
use nth_prime::Strategy;
use serde::Serialize;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

#[derive(Debug, Serialize)]
pub struct PrimeRecord {
    pub index: u64,
    pub prime: u64,
    pub strategy: Strategy,
    pub elapsed_ms: f64,
}

pub fn write_results(records: &[PrimeRecord], config: &Config) -> Result<(), Box<dyn Error>> {
    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = BufWriter::new(File::create(path)?);
            write_records(records, config.format, file)
        }
        None => write_records(records, config.format, io::stdout().lock()),
    }
}

fn write_records<W: Write>(
    records: &[PrimeRecord],
    format: Format,
    mut out: W,
) -> Result<(), Box<dyn Error>> {
    match format {
        Format::Text => {
            for record in records {
                writeln!(out, "{}", record.prime)?;
            }
        }
        Format::Csv => {
            let mut wtr = Writer::from_writer(&mut out);
            for record in records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
