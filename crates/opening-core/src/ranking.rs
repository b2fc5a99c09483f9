//! Best-move selection.
//!
//! Every legal move is scored by the evaluation of the position it leads
//! to. Moves into uncataloged, undecided positions are dropped. The rest are
//! ordered by the mover's preference and every move within `cutoff`
//! centipawns of the best one is kept.

use tracing::{debug, info, warn};

use crate::catalog::{EvaluationCatalog, PositionCatalog};
use crate::error::OracleError;
use crate::evaluation::Evaluation;
use crate::lineage::Lineage;
use crate::oracle::RulesOracle;
use crate::record::{format_id, BestMove, PositionRecord};

/// Keep moves within this many centipawns of the best move.
pub const DEFAULT_CUTOFF: u32 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMove {
    pub notation: String,
    pub resulting_identity: String,
    pub evaluation: Evaluation,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ranking {
    /// Game over: no ranking at all.
    Terminal,
    /// Legal moves exist but none of them has a usable evaluation.
    Unevaluated,
    Ranked(Vec<RankedMove>),
}

/// Evaluation of the position reached by a move, if one can be resolved.
fn resolve_evaluation<O: RulesOracle>(
    identity: &str,
    evaluations: &EvaluationCatalog,
    oracle: &O,
) -> Result<Option<Evaluation>, OracleError> {
    if let Some(ev) = evaluations.get(identity) {
        return Ok(Some(ev));
    }
    if oracle.is_terminal(identity)? {
        return Ok(oracle.winner(identity)?.map(Evaluation::forced_win));
    }
    Ok(None)
}

pub fn rank_moves<O: RulesOracle>(
    identity: &str,
    catalog: &PositionCatalog,
    evaluations: &EvaluationCatalog,
    oracle: &O,
    cutoff: u32,
) -> Result<Ranking, OracleError> {
    if oracle.is_terminal(identity)? {
        return Ok(Ranking::Terminal);
    }

    let mut moves = Vec::new();
    for mv in oracle.legal_moves(identity)? {
        if let Some(evaluation) = resolve_evaluation(&mv.resulting_identity, evaluations, oracle)? {
            moves.push(RankedMove {
                notation: mv.notation,
                evaluation,
                name: None,
                resulting_identity: mv.resulting_identity,
            });
        }
    }

    if moves.is_empty() {
        return Ok(Ranking::Unevaluated);
    }

    let side = oracle.side_to_move(identity)?;
    moves.sort_by(|a, b| a.evaluation.preference_cmp(b.evaluation, side));

    let best = moves[0].evaluation;
    moves.retain(|m| m.evaluation.abs_diff(best) <= cutoff);
    for m in &mut moves {
        m.name = catalog.name(&m.resulting_identity).map(str::to_string);
    }

    Ok(Ranking::Ranked(moves))
}

/// Largest best-move list seen while ranking a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxMoves {
    pub count: usize,
    pub identity: String,
}

#[derive(Debug, Clone, Default)]
pub struct RankingReport {
    /// Ranked positions, most frequent first.
    pub records: Vec<PositionRecord>,
    pub max_moves: Option<MaxMoves>,
    pub terminal: usize,
    pub unevaluated: usize,
}

/// Rank every cataloged position and build the output records.
///
/// Ids are handed out in catalog order to the positions that end up with a
/// ranking; the records are then sorted by descending frequency (stable, so
/// equal frequencies keep catalog order).
pub fn rank_catalog<O: RulesOracle>(
    catalog: &PositionCatalog,
    lineage: &Lineage,
    evaluations: &EvaluationCatalog,
    oracle: &O,
    cutoff: u32,
) -> Result<RankingReport, OracleError> {
    let mut report = RankingReport::default();

    for (identity, freq) in catalog.positions() {
        let moves = match rank_moves(identity, catalog, evaluations, oracle, cutoff)? {
            Ranking::Terminal => {
                debug!(fen = identity, "Skipping finished game");
                report.terminal += 1;
                continue;
            }
            Ranking::Unevaluated => {
                warn!(fen = identity, "No evaluated moves found");
                report.unevaluated += 1;
                continue;
            }
            Ranking::Ranked(moves) => moves,
        };

        if report.max_moves.as_ref().map_or(true, |m| moves.len() > m.count) {
            report.max_moves = Some(MaxMoves {
                count: moves.len(),
                identity: identity.to_string(),
            });
        }

        report.records.push(PositionRecord {
            id: format_id(report.records.len()),
            fen: identity.to_string(),
            freq,
            name: catalog.name(identity).map(str::to_string),
            continuation_of: lineage.get(identity).cloned().unwrap_or_default(),
            best_moves: moves
                .into_iter()
                .map(|m| BestMove {
                    notation: m.notation,
                    evaluation: m.evaluation,
                    name: m.name,
                })
                .collect(),
        });
    }

    report.records.sort_by(|a, b| b.freq.cmp(&a.freq));

    if let Some(max) = &report.max_moves {
        info!(
            count = max.count,
            fen = %max.identity,
            "Maximum number of moves considered from one position"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{ShakmatyOracle, Side};

    // 1. f3 e5 2. g4, Black to play Qh4#.
    const BEFORE_FOOLS_MATE: &str = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq -";
    const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -";

    #[test]
    fn test_catalog_evaluation_beats_terminal_rule() {
        let evals: EvaluationCatalog = [(FOOLS_MATE.to_string(), Evaluation::centipawns(-42))]
            .into_iter()
            .collect();
        let ev = resolve_evaluation(FOOLS_MATE, &evals, &ShakmatyOracle).unwrap();
        assert_eq!(ev, Some(Evaluation::centipawns(-42)));
    }

    #[test]
    fn test_checkmate_resolves_to_forced_score() {
        let ev = resolve_evaluation(FOOLS_MATE, &EvaluationCatalog::new(), &ShakmatyOracle).unwrap();
        assert_eq!(ev, Some(Evaluation::forced_win(Side::Minimizing)));
    }

    #[test]
    fn test_only_mate_is_ranked_without_evaluations() {
        let ranking = rank_moves(
            BEFORE_FOOLS_MATE,
            &PositionCatalog::new(),
            &EvaluationCatalog::new(),
            &ShakmatyOracle,
            DEFAULT_CUTOFF,
        )
        .unwrap();

        let moves = match ranking {
            Ranking::Ranked(moves) => moves,
            other => panic!("expected a ranking, got {other:?}"),
        };
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].notation, "Qh4#");
        assert_eq!(moves[0].evaluation.value(), -10_000);
    }

    #[test]
    fn test_terminal_position_has_no_ranking() {
        let ranking = rank_moves(
            FOOLS_MATE,
            &PositionCatalog::new(),
            &EvaluationCatalog::new(),
            &ShakmatyOracle,
            DEFAULT_CUTOFF,
        )
        .unwrap();
        assert_eq!(ranking, Ranking::Terminal);
    }
}
