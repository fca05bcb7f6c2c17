use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use site_data::{DataKind, LoaderError};

/// Validate a reference-data CSV file before pointing the dashboard at it.
///
/// Parses the file with the same loader the dashboard uses and reports the
/// number of rows, or the first problem found.
#[derive(Parser, Debug)]
#[command(name = "site-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Which table the file holds
    #[arg(short, long, value_enum)]
    kind: DataKind,

    /// Path to the CSV file
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking {:?} data in: {}", args.kind, args.file.display());

    let file = std::fs::File::open(&args.file)
        .map_err(|source| LoaderError::Io {
            path: args.file.clone(),
            source,
        })
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let rows = args
        .kind
        .count_rows(file)
        .with_context(|| format!("Invalid data in: {}", args.file.display()))?;

    println!("OK: {} rows.", rows);

    Ok(())
}
