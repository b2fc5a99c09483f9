#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use opening_core::{
    Evaluation, EvaluationCatalog, LegalMove, OracleError, PositionCatalog, RulesOracle, Side,
};

/// A hand-built position graph standing in for the chess rules.
#[derive(Default)]
pub struct TableOracle {
    moves: HashMap<String, Vec<LegalMove>>,
    black_to_move: HashSet<String>,
    winners: HashMap<String, Option<Side>>,
    expansions: RefCell<HashMap<String, usize>>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a move `notation` from `from` to `to`.
    pub fn edge(mut self, from: &str, notation: &str, to: &str) -> Self {
        self.moves.entry(from.to_string()).or_default().push(LegalMove {
            notation: notation.to_string(),
            resulting_identity: to.to_string(),
        });
        self
    }

    pub fn minimizing_to_move(mut self, identity: &str) -> Self {
        self.black_to_move.insert(identity.to_string());
        self
    }

    /// Mark a position as game over, with `winner` (None for a draw).
    pub fn terminal(mut self, identity: &str, winner: Option<Side>) -> Self {
        self.winners.insert(identity.to_string(), winner);
        self
    }

    pub fn expansions(&self, identity: &str) -> usize {
        self.expansions.borrow().get(identity).copied().unwrap_or(0)
    }

    pub fn all_expansions(&self) -> Vec<usize> {
        self.expansions.borrow().values().copied().collect()
    }
}

impl RulesOracle for TableOracle {
    fn legal_moves(&self, identity: &str) -> Result<Vec<LegalMove>, OracleError> {
        *self.expansions.borrow_mut().entry(identity.to_string()).or_default() += 1;
        if self.winners.contains_key(identity) {
            return Ok(Vec::new());
        }
        Ok(self.moves.get(identity).cloned().unwrap_or_default())
    }

    fn is_terminal(&self, identity: &str) -> Result<bool, OracleError> {
        Ok(self.winners.contains_key(identity))
    }

    fn winner(&self, identity: &str) -> Result<Option<Side>, OracleError> {
        Ok(self.winners.get(identity).copied().flatten())
    }

    fn side_to_move(&self, identity: &str) -> Result<Side, OracleError> {
        if self.black_to_move.contains(identity) {
            Ok(Side::Minimizing)
        } else {
            Ok(Side::Maximizing)
        }
    }
}

pub fn catalog(positions: &[(&str, u64)], names: &[(&str, &str)]) -> PositionCatalog {
    let mut catalog = PositionCatalog::new();
    for (identity, freq) in positions {
        catalog.insert_position(*identity, *freq);
    }
    for (identity, name) in names {
        catalog.insert_name(*identity, *name);
    }
    catalog
}

pub fn evaluations(rows: &[(&str, i32)]) -> EvaluationCatalog {
    rows.iter()
        .map(|(identity, cp)| (identity.to_string(), Evaluation::centipawns(*cp)))
        .collect()
}
