//! Lichess cloud evaluations (one JSON object per line).
//!
//! Each line holds a position and one or more searches, deepest first. Only
//! the principal variation of the first search is used.

use serde::Deserialize;

use opening_core::{normalize_fen, Evaluation};

use crate::error::ToolError;

#[derive(Debug, Deserialize)]
pub struct CloudEval {
    pub fen: String,
    pub evals: Vec<Search>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
    pub depth: u32,
    pub pvs: Vec<PrincipalVariation>,
}

#[derive(Debug, Deserialize)]
pub struct PrincipalVariation {
    pub cp: Option<i32>,
    pub mate: Option<i32>,
}

impl CloudEval {
    pub fn best(&self) -> Result<Evaluation, ToolError> {
        let fail = |reason| ToolError::CloudEval {
            fen: self.fen.clone(),
            reason,
        };

        let first = self.evals.first().ok_or_else(|| fail("no searches"))?;
        if self.evals.iter().any(|s| s.depth > first.depth) {
            return Err(fail("first search is not the deepest"));
        }
        let pv = first.pvs.first().ok_or_else(|| fail("no principal variation"))?;

        match (pv.mate, pv.cp) {
            (Some(mate), _) => Ok(Evaluation::from_mate(mate)),
            (None, Some(cp)) => Ok(Evaluation::centipawns(cp)),
            (None, None) => Err(fail("principal variation has no score")),
        }
    }
}

/// Parse one line into `(identity, evaluation)`.
pub fn parse_line(line: &str) -> Result<(String, Evaluation), ToolError> {
    let entry: CloudEval = serde_json::from_str(line)?;
    let evaluation = entry.best()?;
    Ok((normalize_fen(&entry.fen), evaluation))
}
