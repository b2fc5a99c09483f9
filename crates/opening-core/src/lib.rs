//! Opening knowledge base core: name lineage over the position graph and
//! best-move ranking for frequently played positions.

pub mod catalog;
pub mod consistency;
pub mod error;
pub mod evaluation;
pub mod identity;
pub mod lineage;
pub mod oracle;
pub mod ranking;
pub mod record;

pub use catalog::{neighborhood, EvaluationCatalog, PositionCatalog};
pub use consistency::{check_consistency, ConsistencyIssue, DEFAULT_MISMATCH_THRESHOLD};
pub use error::{CatalogError, OracleError};
pub use evaluation::Evaluation;
pub use identity::{normalize_fen, STARTING_IDENTITY, STARTING_NAME};
pub use lineage::{propagate, Lineage, PropagationStats};
pub use oracle::{LegalMove, RulesOracle, ShakmatyOracle, Side};
pub use ranking::{
    rank_catalog, rank_moves, MaxMoves, RankedMove, Ranking, RankingReport, DEFAULT_CUTOFF,
};
pub use record::{BestMove, PositionRecord};
