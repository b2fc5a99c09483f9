//! Engine evaluations in centipawns, with forced results folded into the
//! same integer space.
//!
//! Values are always from the maximizing side's (White's) point of view.
//! Ordinary evaluations stay well inside `±FORCED_SCORE`; a forced win in
//! `n` moves is stored as `FORCED_SCORE - n` and a forced loss as
//! `-FORCED_SCORE + n`, so a faster mate always compares as better for the
//! side delivering it. A position that is already decided (checkmate on the
//! board) is exactly `±FORCED_SCORE`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::oracle::Side;

/// Magnitude of a decided game.
pub const FORCED_SCORE: i32 = 10_000;

/// Mates further away than this are not representable.
pub const MAX_MATE_DISTANCE: i32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluation(i32);

impl Evaluation {
    pub const fn centipawns(cp: i32) -> Self {
        Self(cp)
    }

    /// Encode a mate score as reported by an engine: positive `moves` means
    /// the maximizing side mates, negative means it gets mated.
    pub const fn from_mate(moves: i32) -> Self {
        if moves > 0 {
            Self(FORCED_SCORE - moves)
        } else {
            Self(-FORCED_SCORE - moves)
        }
    }

    /// The game is over and `winner` has won it.
    pub const fn forced_win(winner: Side) -> Self {
        match winner {
            Side::Maximizing => Self(FORCED_SCORE),
            Side::Minimizing => Self(-FORCED_SCORE),
        }
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub fn is_forced(self) -> bool {
        self.0.abs() > FORCED_SCORE - MAX_MATE_DISTANCE
    }

    /// Signed distance to mate, `Some(0)` for a decided game.
    pub fn mate_distance(self) -> Option<i32> {
        if !self.is_forced() {
            return None;
        }
        let distance = FORCED_SCORE - self.0.abs();
        Some(if self.0 > 0 { distance } else { -distance })
    }

    pub fn abs_diff(self, other: Self) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// Order two evaluations by `side`'s preference: `Less` means `self`
    /// is the better one for that side.
    pub fn preference_cmp(self, other: Self, side: Side) -> Ordering {
        match side {
            Side::Maximizing => other.cmp(&self),
            Side::Minimizing => self.cmp(&other),
        }
    }
}

impl From<i32> for Evaluation {
    fn from(cp: i32) -> Self {
        Self(cp)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mate_distance() {
            Some(0) if self.0 > 0 => write!(f, "1-0"),
            Some(0) => write!(f, "0-1"),
            Some(n) => write!(f, "#{n}"),
            None => write!(f, "{:+.2}", self.0 as f64 / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_encoding() {
        assert_eq!(Evaluation::from_mate(3).value(), 9997);
        assert_eq!(Evaluation::from_mate(-3).value(), -9997);
        assert_eq!(Evaluation::from_mate(3).mate_distance(), Some(3));
        assert_eq!(Evaluation::from_mate(-3).mate_distance(), Some(-3));
        assert!(Evaluation::from_mate(1) > Evaluation::from_mate(2));
        assert!(Evaluation::from_mate(-1) < Evaluation::from_mate(-2));
    }

    #[test]
    fn test_forced_win() {
        assert_eq!(Evaluation::forced_win(Side::Maximizing).value(), 10_000);
        assert_eq!(Evaluation::forced_win(Side::Minimizing).value(), -10_000);
        assert_eq!(Evaluation::forced_win(Side::Minimizing).mate_distance(), Some(0));
    }

    #[test]
    fn test_centipawns_are_not_forced() {
        let ev = Evaluation::centipawns(-850);
        assert!(!ev.is_forced());
        assert_eq!(ev.mate_distance(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Evaluation::centipawns(35).to_string(), "+0.35");
        assert_eq!(Evaluation::centipawns(-120).to_string(), "-1.20");
        assert_eq!(Evaluation::from_mate(2).to_string(), "#2");
        assert_eq!(Evaluation::from_mate(-4).to_string(), "#-4");
        assert_eq!(Evaluation::forced_win(Side::Maximizing).to_string(), "1-0");
    }

    #[test]
    fn test_preference_by_side() {
        let a = Evaluation::centipawns(40);
        let b = Evaluation::centipawns(10);
        assert_eq!(a.preference_cmp(b, Side::Maximizing), Ordering::Less);
        assert_eq!(a.preference_cmp(b, Side::Minimizing), Ordering::Greater);
        assert_eq!(a.preference_cmp(a, Side::Minimizing), Ordering::Equal);
        assert_eq!(a.abs_diff(b), 30);
    }
}
