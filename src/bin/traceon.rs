//! Example CLI: load a FASTA/FASTQ file into a cache and print one
//! record. A thin demonstration binary, not part of the core engine.

use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;
use traceon::Cache;

#[derive(Parser)]
#[command(
    name = "traceon",
    version,
    about = "Load a FASTA/FASTQ file and print a record by id"
)]
struct Args {
    /// Path to a FASTA or FASTQ file (.gz accepted)
    input: String,

    /// Sequence id to print
    id: String,
}

fn main() {
    let log_level = std::env::var("TRACEON_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let cache = Cache::new();
    let skipped = cache.load_file(&args.input)?;
    if skipped > 0 {
        eprintln!("{} skipped {} malformed record(s)", "Warning:".yellow().bold(), skipped);
    }

    match cache.get_fastq(&args.id) {
        Some((sequence, quality)) => {
            println!("{}", format!(">{}", args.id).green());
            println!("{sequence}");
            println!("{quality}");
        }
        None => match cache.get(&args.id) {
            Some(sequence) => {
                println!("{}", format!(">{}", args.id).green());
                println!("{sequence}");
            }
            None => {
                eprintln!("{} no record with id {:?}", "Error:".red().bold(), args.id);
                process::exit(1);
            }
        },
    }

    Ok(())
}
