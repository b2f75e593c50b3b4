//! Static evaluation of a single bughouse board.
//!
//! Every evaluator scores from White's perspective (positive = White ahead);
//! White is the maximizing side in search.

pub mod material;
pub mod mobility;
pub mod pocket;
pub mod pst;

use bughouse_core::{BaseBoard, BoardId, SuperBoard};

use crate::comm::AdviceContext;

pub use material::Material;
pub use mobility::MaterialMobility;
pub use pocket::MaterialPositionPocket;
pub use pst::MaterialPosition;

/// A static scorer for one board.
///
/// Implementations carry their weights as immutable per-instance fields.
pub trait Evaluator {
    /// Score `board` from White's perspective.
    fn evaluate(&self, board: &BaseBoard) -> f64;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Score a search leaf on board `id`, adding the partner-advice term
    /// when the searching seat communicates.
    fn evaluate_leaf(&self, board: &SuperBoard, id: BoardId, advice: Option<&AdviceContext>) -> f64 {
        let base = self.evaluate(board.board(id));
        match advice {
            Some(ctx) => base + ctx.adjustment(board),
            None => base,
        }
    }
}
