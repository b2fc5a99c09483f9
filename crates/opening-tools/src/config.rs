//! Pipeline configuration from environment variables

use std::env;

use opening_core::{DEFAULT_CUTOFF, DEFAULT_MISMATCH_THRESHOLD};

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Frequent positions table (`identity<TAB>count`)
    pub positions_path: String,

    /// Opening names table (`identity<TAB>name`)
    pub names_path: String,

    /// Engine evaluations table (`identity<TAB>centipawns`)
    pub evaluations_path: String,

    /// Where the ranked positions are written as JSON
    pub output_path: String,

    /// Keep moves within this many centipawns of the best move
    pub cutoff: u32,

    /// Warn when a position and its best move disagree by more than this
    pub mismatch_threshold: u32,
}

impl PipelineConfig {
    /// Load configuration from environment variables, falling back to the
    /// file names the builder binaries write by default.
    pub fn load() -> Self {
        let positions_path = env::var("POSITIONS_DB").unwrap_or_else(|_| "positions-db".to_string());
        let names_path = env::var("NAMES_DB").unwrap_or_else(|_| "names-db".to_string());
        let evaluations_path =
            env::var("EVALUATIONS_DB").unwrap_or_else(|_| "evaluations-db".to_string());
        let output_path = env::var("OUTPUT_PATH")
            .unwrap_or_else(|_| "chess-positions-best-moves.json".to_string());

        let cutoff = env::var("BEST_MOVES_CUTOFF")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CUTOFF);

        let mismatch_threshold = env::var("EVAL_MISMATCH_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MISMATCH_THRESHOLD);

        Self {
            positions_path,
            names_path,
            evaluations_path,
            output_path,
            cutoff,
            mismatch_threshold,
        }
    }
}
