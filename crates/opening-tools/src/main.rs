//! Best-moves builder
//!
//! Loads the positions, names and evaluations tables, names every position
//! after its opening, ranks the best moves from each one and writes the
//! result as JSON for the rendering and deck-export stages.

use anyhow::Context;
use tracing::info;

use opening_core::{
    check_consistency, neighborhood, propagate, rank_catalog, EvaluationCatalog, PositionCatalog,
    ShakmatyOracle, STARTING_IDENTITY, STARTING_NAME,
};
use opening_tools::config::PipelineConfig;
use opening_tools::export::write_json_file;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = PipelineConfig::load();
    info!(
        positions = %config.positions_path,
        names = %config.names_path,
        evaluations = %config.evaluations_path,
        cutoff = config.cutoff,
        "Config loaded"
    );

    let oracle = ShakmatyOracle;

    let mut catalog = PositionCatalog::new();
    let n = catalog
        .load_positions(&config.positions_path)
        .with_context(|| format!("reading {}", config.positions_path))?;
    info!("Loaded {n} positions");

    catalog.insert_name(STARTING_IDENTITY, STARTING_NAME);
    catalog
        .load_names(&config.names_path)
        .with_context(|| format!("reading {}", config.names_path))?;
    info!("Loaded {} names", catalog.name_count());

    info!("Assigning names based on the names of parent positions...");
    let (lineage, stats) = propagate(STARTING_IDENTITY, &catalog, &oracle)?;
    info!(
        reached = stats.expanded,
        merged = stats.merged,
        "Propagated names"
    );

    info!("Exploring neighbor positions...");
    let neighbors = neighborhood(&catalog, &oracle)?;
    info!("Created list of {} positions", neighbors.len());

    let mut evaluations = EvaluationCatalog::new();
    evaluations
        .load(&config.evaluations_path, Some(&neighbors))
        .with_context(|| format!("reading {}", config.evaluations_path))?;
    info!("Loaded {} evaluations", evaluations.len());

    info!("Listing best moves...");
    let report = rank_catalog(&catalog, &lineage, &evaluations, &oracle, config.cutoff)?;
    info!(
        ranked = report.records.len(),
        terminal = report.terminal,
        unevaluated = report.unevaluated,
        "Ranked positions"
    );

    let issues = check_consistency(&report.records, &evaluations, config.mismatch_threshold);
    if !issues.is_empty() {
        info!("{} positions disagree with their best move", issues.len());
    }

    write_json_file(&config.output_path, &report.records)?;
    info!("Output written to {}", config.output_path);

    Ok(())
}
