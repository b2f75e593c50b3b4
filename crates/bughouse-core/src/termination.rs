//! Reasons a board, and with it the game, ends.

use std::fmt;

use crate::board_id::BoardId;

/// Why a single board is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    /// 75 moves by each side without a capture, pawn move, or drop.
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::SeventyFiveMoves => "seventy-five move rule",
            Termination::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(text)
    }
}

/// Per-board termination reasons of a finished game.
///
/// At least one of the two fields is `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub a: Option<Termination>,
    pub b: Option<Termination>,
}

impl GameOver {
    /// Termination reason for one board.
    pub fn on(&self, id: BoardId) -> Option<Termination> {
        match id {
            BoardId::A => self.a,
            BoardId::B => self.b,
        }
    }
}

impl fmt::Display for GameOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in BoardId::ALL {
            if let Some(reason) = self.on(id) {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "board {id}: {reason}")?;
                first = false;
            }
        }
        Ok(())
    }
}
