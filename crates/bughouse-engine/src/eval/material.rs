//! Material balance evaluation.
//!
//! Counts weighted piece material for each side on the board. Pocketed
//! pieces are scored separately by [`pocket`](super::pocket).

use bughouse_core::{BaseBoard, Board, Color, Piece};

use super::Evaluator;

/// Piece values indexed by `Piece as usize`.
///
/// | Piece  | value |
/// |--------|-------|
/// | Pawn   |   100 |
/// | Knight |   320 |
/// | Bishop |   325 |
/// | Rook   |   500 |
/// | Queen  |   975 |
/// | King   | 32767 |
pub const PIECE_VALUE: [f64; 6] = [100.0, 320.0, 325.0, 500.0, 975.0, 32_767.0];

#[inline]
pub fn piece_value(piece: Piece) -> f64 {
    PIECE_VALUE[piece as usize]
}

/// Material balance from White's perspective.
pub fn material(board: &Board) -> f64 {
    Piece::ALL
        .iter()
        .map(|&piece| {
            let white = board.colored_pieces(Color::White, piece).len() as f64;
            let black = board.colored_pieces(Color::Black, piece).len() as f64;
            (white - black) * piece_value(piece)
        })
        .sum()
}

/// Material only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Material;

impl Evaluator for Material {
    fn evaluate(&self, board: &BaseBoard) -> f64 {
        material(board.position())
    }

    fn name(&self) -> &'static str {
        "material"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
