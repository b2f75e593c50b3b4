//! Search engine errors.

use bughouse_core::{BoardError, BoardId, Color};

/// Errors surfaced by [`SearchEngine`](crate::SearchEngine) and the runner.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Legal moves were enumerated but no best move came out of the search.
    #[error("search at depth {depth} produced no best move")]
    SearchExhausted {
        /// Depth limit of the failed search.
        depth: u32,
    },
    /// The seat has no legal move (its board is mated or stalemated).
    #[error("no legal moves for {color:?} on board {board}")]
    NoLegalMoves {
        /// Board searched.
        board: BoardId,
        /// Seat color.
        color: Color,
    },
    /// The seat was asked to move while the other side has the turn.
    #[error("{color:?} is not on move on board {board}")]
    NotOnMove {
        /// Board searched.
        board: BoardId,
        /// Seat color.
        color: Color,
    },
    /// Runner seats are not in WhiteA, WhiteB, BlackA, BlackB order.
    #[error("seat {index} is assigned to the wrong board or color")]
    SeatMismatch {
        /// Index into the seat array.
        index: usize,
    },
    /// A board operation failed while searching or applying a move.
    #[error("board error: {source}")]
    Board {
        /// The underlying board error.
        #[from]
        source: BoardError,
    },
}
