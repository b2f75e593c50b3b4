//! Bughouse moves: ordinary chess moves plus pocket drops.

use std::fmt;
use std::str::FromStr;

use cozy_chess::{Color, Move, Piece, Square};

use crate::error::BoardError;
use crate::pocket::{parse_piece_symbol, piece_symbol};

/// A move on one board.
///
/// Ordinary moves use the rules engine's encoding (castling is written as
/// king-takes-own-rook, e.g. `e1h1`). Drops are written `Q@e5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BugMove {
    /// A move of a piece already on the board.
    Normal(Move),
    /// A piece placed from the mover's pocket onto an empty square.
    Drop {
        /// Piece type taken from the pocket.
        piece: Piece,
        /// Target square.
        square: Square,
    },
}

impl BugMove {
    /// Origin square; equal to [`to`](Self::to) for drops.
    #[inline]
    pub fn from(self) -> Square {
        match self {
            BugMove::Normal(mv) => mv.from,
            BugMove::Drop { square, .. } => square,
        }
    }

    /// Destination square.
    #[inline]
    pub fn to(self) -> Square {
        match self {
            BugMove::Normal(mv) => mv.to,
            BugMove::Drop { square, .. } => square,
        }
    }

    /// Promotion piece of an ordinary move.
    #[inline]
    pub fn promotion(self) -> Option<Piece> {
        match self {
            BugMove::Normal(mv) => mv.promotion,
            BugMove::Drop { .. } => None,
        }
    }

    /// Piece type of a drop.
    #[inline]
    pub fn drop_piece(self) -> Option<Piece> {
        match self {
            BugMove::Normal(_) => None,
            BugMove::Drop { piece, .. } => Some(piece),
        }
    }

    #[inline]
    pub fn is_drop(self) -> bool {
        matches!(self, BugMove::Drop { .. })
    }
}

impl From<Move> for BugMove {
    fn from(mv: Move) -> Self {
        BugMove::Normal(mv)
    }
}

impl fmt::Display for BugMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BugMove::Normal(mv) => write!(f, "{mv}"),
            BugMove::Drop { piece, square } => {
                write!(f, "{}@{square}", piece_symbol(*piece, Color::White))
            }
        }
    }
}

impl FromStr for BugMove {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidMoveText {
            text: s.to_string(),
        };

        match s.split_once('@') {
            Some((piece, square)) => {
                let mut chars = piece.chars();
                let (piece, _) = match (chars.next(), chars.next()) {
                    (Some(c), None) => parse_piece_symbol(c).ok_or_else(invalid)?,
                    _ => return Err(invalid()),
                };
                let square = square.parse::<Square>().map_err(|_| invalid())?;
                Ok(BugMove::Drop { piece, square })
            }
            None => s.parse::<Move>().map(BugMove::Normal).map_err(|_| invalid()),
        }
    }
}
