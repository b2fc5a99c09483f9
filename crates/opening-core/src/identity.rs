//! Canonical position identities.
//!
//! An identity is the first four FEN fields (placement, side to move,
//! castling rights, en passant square). Move counters are dropped so that
//! transpositions collapse to one entry.

use shakmaty::{fen::Fen, CastlingMode, Chess, EnPassantMode};

use crate::error::OracleError;

pub const STARTING_IDENTITY: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

/// Name given to the starting position when no opening table names it.
pub const STARTING_NAME: &str = "Starting position";

/// Strips move counters from FEN, keeping only position + side + castling + ep.
pub fn normalize_fen(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

/// Identity of a shakmaty position. The en passant square is only kept
/// when a capture is actually legal.
pub fn identity_of(pos: &Chess) -> String {
    let fen = Fen::from_position(pos, EnPassantMode::Legal);
    normalize_fen(&fen.to_string())
}

/// Rebuild a playable position from an identity (counters reset).
pub fn position_from_identity(identity: &str) -> Result<Chess, OracleError> {
    let invalid = |reason: String| OracleError::InvalidIdentity {
        identity: identity.to_string(),
        reason,
    };

    let fen: Fen = format!("{} 0 1", normalize_fen(identity))
        .parse()
        .map_err(|e| invalid(format!("{e}")))?;
    fen.into_position::<Chess>(CastlingMode::Standard)
        .map_err(|e| invalid(format!("{e}")))
}
