//! Output records handed to the rendering and export stages.

use serde::{Deserialize, Serialize};

use crate::evaluation::Evaluation;

/// One of the best moves from a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMove {
    #[serde(rename = "move")]
    pub notation: String,
    pub evaluation: Evaluation,
    /// Opening name of the position the move leads to.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Zero-padded sequence number, stable across runs on the same input.
    pub id: String,
    pub fen: String,
    pub freq: u64,
    pub name: Option<String>,
    pub continuation_of: Vec<String>,
    pub best_moves: Vec<BestMove>,
}

impl PositionRecord {
    pub fn top_move(&self) -> Option<&BestMove> {
        self.best_moves.first()
    }
}

pub fn format_id(n: usize) -> String {
    format!("{n:04}")
}
