//! Build the frequent-positions table from PGN files.
//!
//! Usage: cargo run --release --bin build-positions -- <pgn_dir> [--max-moves 15] [--threshold 10000] [--output positions-db]

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use pgn_reader::Reader;
use tracing::info;

use opening_tools::export::write_table;
use opening_tools::position_counter::{PositionCounter, DEFAULT_MAX_MOVES, DEFAULT_THRESHOLD};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <pgn_dir> [--max-moves N] [--threshold N] [--output PATH]",
            args[0]
        );
        std::process::exit(1);
    }

    let pgn_dir = &args[1];

    // Parse optional args
    let mut max_moves = DEFAULT_MAX_MOVES;
    let mut threshold = DEFAULT_THRESHOLD;
    let mut output = "positions-db".to_string();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--max-moves" => {
                max_moves = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_MAX_MOVES);
                i += 2;
            }
            "--threshold" => {
                threshold = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_THRESHOLD);
                i += 2;
            }
            "--output" => {
                if let Some(path) = args.get(i + 1) {
                    output = path.clone();
                }
                i += 2;
            }
            _ => i += 1,
        }
    }

    let pattern = format!("{}/*.pgn", pgn_dir);
    let mut pgn_files: Vec<_> = glob::glob(&pattern)?.filter_map(|p| p.ok()).collect();
    pgn_files.sort();
    anyhow::ensure!(!pgn_files.is_empty(), "No PGN files found in {}", pgn_dir);

    info!(files = pgn_files.len(), max_moves, threshold, "Counting positions");

    let mut counter = PositionCounter::new(max_moves, threshold);
    let start = Instant::now();

    for pgn_path in &pgn_files {
        info!("Processing {}...", pgn_path.display());
        let mut reader = Reader::new(BufReader::new(File::open(pgn_path)?));
        while reader.read_game(&mut counter)?.is_some() {}
    }

    info!(
        games = counter.games(),
        unique = counter.unique_positions(),
        secs = start.elapsed().as_secs(),
        "Parsing complete"
    );

    let positions = counter.finish();
    let written = write_table(File::create(&output)?, positions)?;
    info!("Wrote {written} positions to {output}");

    Ok(())
}
