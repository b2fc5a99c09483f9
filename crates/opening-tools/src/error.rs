//! Tool error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cloud eval for {fen}: {reason}")]
    CloudEval { fen: String, reason: &'static str },

    #[error("Opening {name:?}: cannot play {san:?}")]
    OpeningLine { name: String, san: String },

    #[error("Malformed opening row: {0:?}")]
    OpeningRow(String),
}
