//! Build the opening names table from the Lichess chess-openings TSV files
//! (a.tsv .. e.tsv) in a local directory.
//!
//! Usage: cargo run --release --bin build-names -- <tsv_dir> [output]

use std::env;
use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use tracing::info;

use opening_tools::export::write_table;
use opening_tools::opening_names::read_openings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(tsv_dir) = args.get(1) else {
        eprintln!("Usage: {} <tsv_dir> [output]", args[0]);
        std::process::exit(1);
    };
    let output = args.get(2).map(String::as_str).unwrap_or("names-db");

    let pattern = format!("{}/*.tsv", tsv_dir);
    let mut tsv_files: Vec<_> = glob::glob(&pattern)?.filter_map(|p| p.ok()).collect();
    tsv_files.sort();
    anyhow::ensure!(!tsv_files.is_empty(), "No TSV files found in {}", tsv_dir);

    let mut rows = Vec::new();
    for path in &tsv_files {
        let openings = read_openings(BufReader::new(File::open(path)?))
            .with_context(|| format!("reading {}", path.display()))?;
        info!("{}: {} openings", path.display(), openings.len());
        rows.extend(openings.into_iter().map(|o| (o.identity, o.name)));
    }

    let written = write_table(File::create(output)?, rows)?;
    info!("Wrote {written} names to {output}");

    Ok(())
}
