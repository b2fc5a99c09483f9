//! Sanity check of ranked output against the positions' own evaluations.
//!
//! A position's evaluation should be close to the evaluation after its best
//! move. Large gaps usually mean the two came from searches of different
//! depth. Findings are logged and returned; the records are never touched.

use tracing::warn;

use crate::catalog::EvaluationCatalog;
use crate::evaluation::Evaluation;
use crate::record::PositionRecord;

/// Largest tolerated gap, in centipawns, between a position and its top move.
pub const DEFAULT_MISMATCH_THRESHOLD: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    MissingEvaluation {
        fen: String,
    },
    Mismatch {
        fen: String,
        evaluation: Evaluation,
        top_move: String,
        top_move_evaluation: Evaluation,
    },
}

pub fn check_consistency(
    records: &[PositionRecord],
    evaluations: &EvaluationCatalog,
    threshold: u32,
) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();

    for record in records {
        let Some(top) = record.top_move() else {
            continue;
        };
        let Some(evaluation) = evaluations.get(&record.fen) else {
            warn!(fen = %record.fen, "Position has no evaluation");
            issues.push(ConsistencyIssue::MissingEvaluation {
                fen: record.fen.clone(),
            });
            continue;
        };

        if evaluation.abs_diff(top.evaluation) > threshold {
            warn!(
                fen = %record.fen,
                evaluation = evaluation.value(),
                best_move = %top.notation,
                best_move_evaluation = top.evaluation.value(),
                "Position evaluation disagrees with its best move"
            );
            issues.push(ConsistencyIssue::Mismatch {
                fen: record.fen.clone(),
                evaluation,
                top_move: top.notation.clone(),
                top_move_evaluation: top.evaluation,
            });
        }
    }

    issues
}
