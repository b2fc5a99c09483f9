//! The rules oracle: everything the engines need to know about chess,
//! asked by identity.

use serde::{Deserialize, Serialize};
use shakmaty::{san::SanPlus, Color, Position};

use crate::error::OracleError;
use crate::identity::{identity_of, position_from_identity};

/// Which way a side wants the evaluation to move. White maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Maximizing,
    Minimizing,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Maximizing => Side::Minimizing,
            Side::Minimizing => Side::Maximizing,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::Maximizing,
            Color::Black => Side::Minimizing,
        }
    }
}

/// A legal move and where it leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMove {
    pub notation: String,
    pub resulting_identity: String,
}

pub trait RulesOracle {
    /// Legal moves in a stable, deterministic order.
    fn legal_moves(&self, identity: &str) -> Result<Vec<LegalMove>, OracleError>;

    fn is_terminal(&self, identity: &str) -> Result<bool, OracleError>;

    /// The side that has won, if the game is decided.
    fn winner(&self, identity: &str) -> Result<Option<Side>, OracleError>;

    fn side_to_move(&self, identity: &str) -> Result<Side, OracleError>;
}

impl<O: RulesOracle + ?Sized> RulesOracle for &O {
    fn legal_moves(&self, identity: &str) -> Result<Vec<LegalMove>, OracleError> {
        (**self).legal_moves(identity)
    }

    fn is_terminal(&self, identity: &str) -> Result<bool, OracleError> {
        (**self).is_terminal(identity)
    }

    fn winner(&self, identity: &str) -> Result<Option<Side>, OracleError> {
        (**self).winner(identity)
    }

    fn side_to_move(&self, identity: &str) -> Result<Side, OracleError> {
        (**self).side_to_move(identity)
    }
}

/// Standard chess rules backed by shakmaty. Moves are reported in SAN,
/// with `+`/`#` suffixes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShakmatyOracle;

impl RulesOracle for ShakmatyOracle {
    fn legal_moves(&self, identity: &str) -> Result<Vec<LegalMove>, OracleError> {
        let pos = position_from_identity(identity)?;
        let mut moves = Vec::new();

        for mv in pos.legal_moves() {
            let mut next = pos.clone();
            let notation = SanPlus::from_move_and_play_unchecked(&mut next, mv).to_string();
            moves.push(LegalMove {
                notation,
                resulting_identity: identity_of(&next),
            });
        }

        Ok(moves)
    }

    fn is_terminal(&self, identity: &str) -> Result<bool, OracleError> {
        let pos = position_from_identity(identity)?;
        Ok(pos.is_game_over())
    }

    fn winner(&self, identity: &str) -> Result<Option<Side>, OracleError> {
        let pos = position_from_identity(identity)?;
        if pos.is_checkmate() {
            Ok(Some(Side::from(pos.turn()).opponent()))
        } else {
            Ok(None)
        }
    }

    fn side_to_move(&self, identity: &str) -> Result<Side, OracleError> {
        let pos = position_from_identity(identity)?;
        Ok(pos.turn().into())
    }
}
