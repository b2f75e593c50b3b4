//! Mobility evaluation.
//!
//! Counts ordinary legal moves per side (drops are excluded; with a full
//! pocket they would swamp every other term).

use bughouse_core::{BaseBoard, Color};

use super::Evaluator;
use super::material::material;
use super::pocket::{DEFAULT_POCKET_WEIGHT, pocket_value};

/// Default score per ordinary legal move.
pub const DEFAULT_MOBILITY_WEIGHT: f64 = 2.0;

/// Ordinary move count, White minus Black.
pub fn mobility(board: &BaseBoard) -> f64 {
    let white = board.ordinary_move_count(Color::White) as f64;
    let black = board.ordinary_move_count(Color::Black) as f64;
    white - black
}

/// Material, pocket value, and mobility.
#[derive(Debug, Clone, Copy)]
pub struct MaterialMobility {
    pub pocket_weight: f64,
    pub mobility_weight: f64,
}

impl Default for MaterialMobility {
    fn default() -> Self {
        Self {
            pocket_weight: DEFAULT_POCKET_WEIGHT,
            mobility_weight: DEFAULT_MOBILITY_WEIGHT,
        }
    }
}

impl Evaluator for MaterialMobility {
    fn evaluate(&self, board: &BaseBoard) -> f64 {
        material(board.position())
            + pocket_value(board, self.pocket_weight)
            + self.mobility_weight * mobility(board)
    }

    fn name(&self) -> &'static str {
        "material+mobility"
    }
}
