//! Value of pieces held in pockets.
//!
//! A pocketed piece is worth a fraction of its on-board value: it can land
//! anywhere, but it is not yet doing anything.

use bughouse_core::{BaseBoard, Color};

use super::Evaluator;
use super::material::{material, piece_value};
use super::pst::position;

/// Default fraction of a piece's value credited while it sits in a pocket.
pub const DEFAULT_POCKET_WEIGHT: f64 = 0.5;

/// Weighted pocket material, White minus Black.
pub fn pocket_value(board: &BaseBoard, weight: f64) -> f64 {
    let side = |color| {
        board
            .pocket(color)
            .iter()
            .map(|(piece, count)| f64::from(count) * piece_value(piece))
            .sum::<f64>()
    };
    weight * (side(Color::White) - side(Color::Black))
}

/// Material, piece-square tables, and pocket value.
#[derive(Debug, Clone, Copy)]
pub struct MaterialPositionPocket {
    pub pocket_weight: f64,
}

impl MaterialPositionPocket {
    pub fn new(pocket_weight: f64) -> Self {
        Self { pocket_weight }
    }
}

impl Default for MaterialPositionPocket {
    fn default() -> Self {
        Self::new(DEFAULT_POCKET_WEIGHT)
    }
}

impl Evaluator for MaterialPositionPocket {
    fn evaluate(&self, board: &BaseBoard) -> f64 {
        let pos = board.position();
        material(pos) + position(pos) + pocket_value(board, self.pocket_weight)
    }

    fn name(&self) -> &'static str {
        "material+position+pocket"
    }
}

#[cfg(test)]
mod tests {
    use bughouse_core::{BaseBoard, BoardId, RuleSet};

    use super::{MaterialPositionPocket, pocket_value};
    use crate::eval::Evaluator;

    fn board(fen: &str) -> BaseBoard {
        BaseBoard::from_fen(BoardId::A, fen, RuleSet::bughouse()).unwrap()
    }

    #[test]
    fn pocket_is_weighted() {
        let b = board("4k3/8/8/8/8/8/8/4K3[Qp] w - - 0 1");
        assert_eq!(pocket_value(&b, 0.5), 0.5 * (975.0 - 100.0));
        assert_eq!(pocket_value(&b, 1.0), 875.0);
    }

    #[test]
    fn weight_is_per_instance() {
        let b = board("4k3/8/8/8/8/8/8/4K3[R] w - - 0 1");
        let light = MaterialPositionPocket::new(0.25);
        let heavy = MaterialPositionPocket::new(1.0);
        assert_eq!(heavy.evaluate(&b) - light.evaluate(&b), 0.75 * 500.0);
    }
}
