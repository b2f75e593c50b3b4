//! Error types for pockets and board mutation.

use cozy_chess::{Piece, Square};

use crate::board_id::BoardId;

/// Violations of the pocket count contract.
///
/// These are unreachable when pushes and pops are correctly paired, so
/// callers treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PocketError {
    /// Adding one more unit would exceed the per-type cap.
    #[error("pocket already holds the maximum of {cap} {piece:?}")]
    Capacity {
        /// Piece type being added.
        piece: Piece,
        /// Absolute cap for that type.
        cap: u8,
    },
    /// Removing from a type whose count is already zero.
    #[error("no {piece:?} left in pocket")]
    Underflow {
        /// Piece type being removed.
        piece: Piece,
    },
    /// Kings never enter a pocket.
    #[error("kings cannot be pocketed")]
    King,
}

/// Errors from building, mutating, or unwinding a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The ordinary move is not legal in the current position.
    #[error("illegal move {mv} on board {board}")]
    IllegalMove {
        /// Board the move was played on.
        board: BoardId,
        /// Move in text form.
        mv: String,
    },
    /// The drop fails one of the drop rules.
    #[error("illegal drop of {piece:?} on {square} (board {board})")]
    IllegalDrop {
        /// Board the drop was played on.
        board: BoardId,
        /// Piece type being dropped.
        piece: Piece,
        /// Target square.
        square: Square,
    },
    /// The placement/turn part of a FEN could not be parsed.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },
    /// The bracketed pocket suffix of a FEN contains an unknown letter.
    #[error("invalid pocket character: '{character}'")]
    InvalidPocket {
        /// The offending character.
        character: char,
    },
    /// A move string is neither UCI nor `P@sq` drop notation.
    #[error("invalid move text: {text}")]
    InvalidMoveText {
        /// The text that failed to parse.
        text: String,
    },
    /// `pop` on a board or super board with no pushed moves.
    #[error("no move to pop")]
    EmptyHistory,
    /// The position produced by a drop was rejected by the rules engine.
    #[error("drop on {square} produced an invalid position")]
    Rebuild {
        /// Target square of the drop.
        square: Square,
    },
    /// Pocket contract violation while pushing or popping.
    #[error("pocket error: {source}")]
    Pocket {
        /// The underlying pocket error.
        #[from]
        source: PocketError,
    },
}
