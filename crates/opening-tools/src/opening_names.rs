//! Named openings from the Lichess chess-openings tables
//! (`eco<TAB>name<TAB>pgn`, with a header row).

use std::io::BufRead;

use shakmaty::{san::SanPlus, Chess, Position};

use opening_core::identity::identity_of;

use crate::error::ToolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedOpening {
    pub eco: String,
    pub name: String,
    pub identity: String,
}

/// Replay a movetext like `1. e4 e5 2. Nf3` and return the final identity.
pub fn identity_after(name: &str, pgn: &str) -> Result<String, ToolError> {
    let mut pos = Chess::default();

    for token in pgn.split_whitespace() {
        // Move numbers ("1.", "12...") and results carry no move.
        if token.ends_with('.') || matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*") {
            continue;
        }
        let san = token.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
        let illegal = || ToolError::OpeningLine {
            name: name.to_string(),
            san: san.to_string(),
        };

        let san_plus: SanPlus = san.parse().map_err(|_| illegal())?;
        let mv = san_plus.san.to_move(&pos).map_err(|_| illegal())?;
        pos = pos.play(mv).map_err(|_| illegal())?;
    }

    Ok(identity_of(&pos))
}

/// Read one table, skipping its header row.
pub fn read_openings<R: BufRead>(reader: R) -> Result<Vec<NamedOpening>, ToolError> {
    let mut openings = Vec::new();

    for line in reader.lines().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.splitn(3, '\t');
        let (Some(eco), Some(name), Some(pgn)) = (fields.next(), fields.next(), fields.next()) else {
            return Err(ToolError::OpeningRow(line));
        };

        openings.push(NamedOpening {
            eco: eco.to_string(),
            name: name.to_string(),
            identity: identity_after(name, pgn)?,
        });
    }

    Ok(openings)
}
