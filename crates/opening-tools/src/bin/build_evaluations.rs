//! Convert Lichess cloud evaluations (JSON lines) into the evaluations table.
//!
//! Usage: cargo run --release --bin build-evaluations -- <evals.jsonl> [output]

use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::Context;
use tracing::info;

use opening_tools::cloud_eval::parse_line;
use opening_tools::export::write_table;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(input) = args.get(1) else {
        eprintln!("Usage: {} <evals.jsonl> [output]", args[0]);
        std::process::exit(1);
    };
    let output = args.get(2).map(String::as_str).unwrap_or("evaluations-db");

    let reader = BufReader::new(File::open(input)?);
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (fen, evaluation) = parse_line(&line).with_context(|| format!("line {}", i + 1))?;
        rows.push((fen, evaluation.value()));

        if rows.len() % 1_000_000 == 0 {
            info!("Read {} evaluations...", rows.len());
        }
    }

    let written = write_table(File::create(output)?, rows)?;
    info!("Wrote {written} evaluations to {output}");

    Ok(())
}
