//! Piece-square tables for pawns, knights, bishops, and the king.
//!
//! Tables are from White's perspective in LERF order:
//! index 0 = A1, index 7 = H1, index 8 = A2, ..., index 63 = H8.
//! Black looks squares up mirrored vertically (`sq ^ 56`).

use bughouse_core::{BaseBoard, Board, Color, Piece, Square};

use super::Evaluator;
use super::material::material;

// ---------------------------------------------------------------------------
// Individual piece-square tables
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
    // Rank 1 - never used
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -25, -25,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  25,  25,   0,   0,   0,
      5,   5,  10,  27,  27,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
    // Rank 8 - never used
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -20, -30, -30, -20, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -40, -10, -10, -40, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

/// King safety table; rewards staying behind the pawn shield.
#[rustfmt::skip]
const KING_PST: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Table value of `piece` on `sq` for `color`; rooks and queens have none.
#[inline]
pub fn pst_value(piece: Piece, color: Color, sq: Square) -> i32 {
    let table = match piece {
        Piece::Pawn => &PAWN_PST,
        Piece::Knight => &KNIGHT_PST,
        Piece::Bishop => &BISHOP_PST,
        Piece::King => &KING_PST,
        Piece::Rook | Piece::Queen => return 0,
    };
    let idx = match color {
        Color::White => sq as usize,
        Color::Black => sq as usize ^ 56,
    };
    table[idx]
}

/// Sum of table values, White minus Black.
pub fn position(board: &Board) -> f64 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for piece in Piece::ALL {
            for sq in board.colored_pieces(color, piece) {
                score += sign * pst_value(piece, color, sq);
            }
        }
    }
    f64::from(score)
}

/// Material plus piece-square tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialPosition;

impl Evaluator for MaterialPosition {
    fn evaluate(&self, board: &BaseBoard) -> f64 {
        material(board.position()) + position(board.position())
    }

    fn name(&self) -> &'static str {
        "material+position"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use bughouse_core::{Board, Color, Piece, Square};

    use super::{position, pst_value};

    #[test]
    fn starting_position_is_symmetric() {
        assert_eq!(position(&Board::default()), 0.0);
    }

    #[test]
    fn black_tables_are_mirrored() {
        for (white, black) in [(Square::E4, Square::E5), (Square::G1, Square::G8), (Square::A7, Square::A2)] {
            for piece in [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::King] {
                assert_eq!(pst_value(piece, Color::White, white), pst_value(piece, Color::Black, black));
            }
        }
    }

    #[test]
    fn centralized_knight_beats_rim_knight() {
        assert!(pst_value(Piece::Knight, Color::White, Square::D4) > pst_value(Piece::Knight, Color::White, Square::A4));
    }

    #[test]
    fn castled_king_scores_above_exposed_king() {
        let castled: Board = "4k3/8/8/8/8/8/8/6K1 w - - 0 1".parse().unwrap();
        let exposed: Board = "4k3/8/8/8/4K3/8/8/8 w - - 0 1".parse().unwrap();
        assert!(position(&castled) > position(&exposed));
    }

    #[test]
    fn rooks_and_queens_are_neutral() {
        assert_eq!(pst_value(Piece::Rook, Color::White, Square::D4), 0);
        assert_eq!(pst_value(Piece::Queen, Color::Black, Square::A8), 0);
    }
}
