//! Count how often each position occurs in the opening phase of PGN games.
//!
//! Counting runs in two phases. During the first `100 * threshold` games
//! every position is counted. After that only positions already seen are
//! counted: anything that has not appeared by then is assumed to stay below
//! the final cut, which keeps the table from growing without bound.

use std::collections::HashMap;
use std::ops::ControlFlow;

use pgn_reader::{RawTag, SanPlus, Visitor};
use shakmaty::{Chess, Position};
use tracing::info;

use opening_core::identity::identity_of;

/// Follow games up to this full-move number.
pub const DEFAULT_MAX_MOVES: u32 = 15;

/// Keep positions seen in at least 1/threshold of all games.
pub const DEFAULT_THRESHOLD: u64 = 10_000;

const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Tags collected during header parsing.
#[derive(Default)]
pub struct GameTags {
    non_standard_start: bool,
}

/// State during movetext parsing.
pub struct GameState {
    board: Chess,
    ply: u32,
    done: bool,
}

/// Visitor that counts positions across games.
pub struct PositionCounter {
    /// identity -> (count, order of first sighting)
    counts: HashMap<String, (u64, usize)>,
    max_moves: u32,
    threshold: u64,
    /// Games whose positions were counted.
    games: u64,
    add_new_positions: bool,
}

impl PositionCounter {
    pub fn new(max_moves: u32, threshold: u64) -> Self {
        Self {
            counts: HashMap::new(),
            max_moves,
            threshold: threshold.max(1),
            games: 0,
            add_new_positions: true,
        }
    }

    pub fn games(&self) -> u64 {
        self.games
    }

    pub fn unique_positions(&self) -> usize {
        self.counts.len()
    }

    fn count(&mut self, board: &Chess) {
        let identity = identity_of(board);
        let next_order = self.counts.len();
        if let Some((count, _)) = self.counts.get_mut(&identity) {
            *count += 1;
        } else if self.add_new_positions {
            self.counts.insert(identity, (1, next_order));
        }
    }

    fn min_count(&self) -> u64 {
        self.games / self.threshold
    }

    /// Positions at or above the final threshold, most frequent first.
    pub fn finish(self) -> Vec<(String, u64)> {
        let min_count = self.min_count();
        let mut kept: Vec<(String, u64, usize)> = self
            .counts
            .into_iter()
            .filter(|(_, (count, _))| *count >= min_count)
            .map(|(identity, (count, order))| (identity, count, order))
            .collect();
        kept.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        kept.into_iter().map(|(identity, count, _)| (identity, count)).collect()
    }
}

impl Visitor for PositionCounter {
    type Tags = GameTags;
    type Movetext = GameState;
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<(), GameTags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(&mut self, tags: &mut GameTags, name: &[u8], value: RawTag<'_>) -> ControlFlow<()> {
        if name == b"FEN" && value.decode_utf8_lossy() != STANDARD_START_FEN {
            tags.non_standard_start = true;
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameTags) -> ControlFlow<(), GameState> {
        if tags.non_standard_start {
            return ControlFlow::Break(());
        }

        self.games += 1;
        let board = Chess::default();
        self.count(&board);

        ControlFlow::Continue(GameState {
            board,
            ply: 0,
            done: false,
        })
    }

    fn san(&mut self, state: &mut GameState, san_plus: SanPlus) -> ControlFlow<()> {
        if state.done {
            return ControlFlow::Continue(());
        }

        let Ok(mv) = san_plus.san.to_move(&state.board) else {
            state.done = true;
            return ControlFlow::Continue(());
        };
        state.board = match state.board.clone().play(mv) {
            Ok(board) => board,
            Err(_) => {
                state.done = true;
                return ControlFlow::Continue(());
            }
        };
        state.ply += 1;
        self.count(&state.board);

        // Full-move number after this ply; stop once it passes the limit.
        if state.ply / 2 + 1 > self.max_moves {
            state.done = true;
        }

        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _state: GameState) {
        if self.games > 0 && self.games % 10_000 == 0 {
            let min_count = self.min_count();
            let above = self.counts.values().filter(|(c, _)| *c >= min_count).count();
            info!(
                games = self.games,
                unique = self.counts.len(),
                above_threshold = above,
                "Counting positions"
            );
        }

        // Positions not seen by now will not reach the threshold.
        if self.add_new_positions && self.games >= self.threshold.saturating_mul(100) {
            self.add_new_positions = false;
            info!(games = self.games, "Only counting previously seen positions from now on");
        }
    }
}
