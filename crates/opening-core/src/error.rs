//! Core error types

use thiserror::Error;

/// Failure reading one of the tab-separated catalog tables.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `identity<TAB>value`, got {content:?}")]
    MalformedRow { line: usize, content: String },

    #[error("line {line}: invalid {field} {value:?}")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Failure asking the rules oracle about a position.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Invalid position identity {identity:?}: {reason}")]
    InvalidIdentity { identity: String, reason: String },
}
