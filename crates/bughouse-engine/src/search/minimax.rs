//! Minimax/maximin with alpha-beta pruning over one board of a bughouse game.
//!
//! White maximizes and Black minimizes the White-perspective evaluation.
//! Moves are pushed on a sandbox [`SuperBoard`] and popped after the child
//! returns, so captures reach the partner board's pockets during search
//! exactly as they would in the game.
//!
//! Inside the search a checkmate scores `MATE_SCORE - ply`, so shorter mates
//! outrank longer ones. [`reported`] maps every mate score to ±∞ before a
//! score leaves the engine.

use std::time::Instant;

use bughouse_core::{BoardId, BugMove, Color, SuperBoard};
use rand::rngs::SmallRng;
use tracing::trace;

use crate::comm::AdviceContext;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::search::control::{NextDepth, SearchControl};
use crate::search::ordering::{MoveOrder, order_moves};
use crate::stats::Statistics;

/// Root window bound.
pub const INF: f64 = f64::INFINITY;

/// Score of delivering mate at the root; reduced by one per ply.
pub const MATE_SCORE: f64 = 1.0e9;

/// Scores beyond this magnitude are mates.
pub const MATE_THRESHOLD: f64 = MATE_SCORE - 1.0e6;

/// Convert an internal score to the White-perspective score the engine
/// reports: any mate becomes ±∞.
pub fn reported(score: f64) -> f64 {
    if score > MATE_THRESHOLD {
        INF
    } else if score < -MATE_THRESHOLD {
        -INF
    } else {
        score
    }
}

/// Which side of the minimax a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Maximizing,
    Minimizing,
}

impl Role {
    /// White maximizes, Black minimizes.
    pub fn of(color: Color) -> Self {
        match color {
            Color::White => Role::Maximizing,
            Color::Black => Role::Minimizing,
        }
    }

    #[inline]
    fn flip(self) -> Self {
        match self {
            Role::Maximizing => Role::Minimizing,
            Role::Minimizing => Role::Maximizing,
        }
    }

    /// Score of the side to move being checkmated `ply` plies from the root.
    #[inline]
    fn mated(self, ply: u32) -> f64 {
        let score = MATE_SCORE - f64::from(ply);
        match self {
            Role::Maximizing => -score,
            Role::Minimizing => score,
        }
    }

    /// Worse than any real score for this side.
    #[inline]
    fn worst(self) -> f64 {
        match self {
            Role::Maximizing => -INF,
            Role::Minimizing => INF,
        }
    }
}

/// State threaded through one search.
pub(crate) struct SearchContext<'a> {
    pub board_id: BoardId,
    /// Length of the cross-board move stack at the root.
    pub root_len: usize,
    pub control: SearchControl,
    pub next_depth: NextDepth,
    pub order: MoveOrder,
    pub evaluator: &'a dyn Evaluator,
    pub advice: Option<&'a AdviceContext>,
    pub rng: &'a mut SmallRng,
    pub stats: &'a mut Statistics,
}

impl SearchContext<'_> {
    fn ply(&self, board: &SuperBoard) -> u32 {
        let ply = board.move_order().len().saturating_sub(self.root_len);
        u32::try_from(ply).unwrap_or(u32::MAX)
    }

    fn evaluate(&mut self, board: &SuperBoard) -> f64 {
        let start = Instant::now();
        let score = self.evaluator.evaluate_leaf(board, self.board_id, self.advice);
        self.stats.record_eval(start.elapsed());
        score
    }
}

/// Alpha-beta search from the side to move on `ctx.board_id`.
///
/// Returns the node's internal score (see [`reported`]) and its best move.
/// The move is `None` only at leaves, checkmates, and stalemates.
/// `forbidden` moves are skipped at this node only.
pub(crate) fn alphabeta(
    ctx: &mut SearchContext<'_>,
    board: &mut SuperBoard,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    role: Role,
    forbidden: &[BugMove],
) -> Result<(f64, Option<BugMove>), EngineError> {
    ctx.stats.record_node();
    let id = ctx.board_id;

    if board.board(id).is_checkmate() {
        return Ok((role.mated(ctx.ply(board)), None));
    }

    if ctx.control.is_leaf(board.board(id), depth) {
        return Ok((ctx.evaluate(board), None));
    }

    let mut moves = board.board(id).generate_legal_moves();
    if moves.is_empty() {
        // Stalemate
        return Ok((0.0, None));
    }
    moves.retain(|mv| !forbidden.contains(mv));
    order_moves(&mut moves, board.board(id), ctx.order, &mut *ctx.rng);

    let limit = ctx.control.limit();
    let mut best_move: Option<BugMove> = None;
    let mut best = role.worst();

    for mv in moves {
        let child_depth = ctx.next_depth.next(depth, limit, mv);
        board.push(mv, id)?;
        let child = alphabeta(ctx, board, child_depth, alpha, beta, role.flip(), &[]);
        board.pop()?;
        let (score, _) = child?;

        match role {
            Role::Maximizing => {
                if score > best || best_move.is_none() {
                    best = score;
                    best_move = Some(mv);
                }
                if best >= beta {
                    trace!(depth, mv = %mv, score, "beta cutoff");
                    return Ok((best, best_move));
                }
                alpha = alpha.max(best);
            }
            Role::Minimizing => {
                if score < best || best_move.is_none() {
                    best = score;
                    best_move = Some(mv);
                }
                if best <= alpha {
                    trace!(depth, mv = %mv, score, "alpha cutoff");
                    return Ok((best, best_move));
                }
                beta = beta.min(best);
            }
        }
    }

    match best_move {
        Some(_) => Ok((best, best_move)),
        None => Err(EngineError::SearchExhausted { depth: limit }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use bughouse_core::{BoardId, SuperBoard};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::{INF, MATE_SCORE, Role, SearchContext, alphabeta, reported};
    use crate::error::EngineError;
    use crate::eval::Material;
    use crate::search::control::{NextDepth, SearchControl};
    use crate::search::ordering::MoveOrder;
    use crate::stats::Statistics;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn run(fen: &str, depth: u32, forbidden: &[bughouse_core::BugMove]) -> Result<(f64, Option<bughouse_core::BugMove>), EngineError> {
        let mut board = SuperBoard::from_fens(fen, STARTPOS).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut stats = Statistics::new();
        let role = Role::of(board.board(BoardId::A).side_to_move());
        let mut ctx = SearchContext {
            board_id: BoardId::A,
            root_len: board.move_order().len(),
            control: SearchControl::new(depth, u64::MAX, None),
            next_depth: NextDepth::Increment,
            order: MoveOrder::Generator,
            evaluator: &Material,
            advice: None,
            rng: &mut rng,
            stats: &mut stats,
        };
        alphabeta(&mut ctx, &mut board, 0, -INF, INF, role, forbidden)
    }

    #[test]
    fn mated_side_scores_infinite_loss() {
        let (score, mv) = run("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 2, &[]).unwrap();
        assert_eq!(score, MATE_SCORE, "Black is mated at the root");
        assert_eq!(reported(score), INF);
        assert!(mv.is_none());
    }

    #[test]
    fn shorter_mate_outranks_longer_mate() {
        // Qg7# is available, but deeper searches also see slower mates.
        for depth in 1..=4 {
            let (score, mv) = run("7k/8/5K2/8/8/8/8/6Q1 w - - 0 1", depth, &[]).unwrap();
            assert_eq!(mv.unwrap().to_string(), "g1g7", "depth {depth}");
            assert_eq!(score, MATE_SCORE - 1.0);
        }
    }

    #[test]
    fn reported_scores_leave_evaluations_alone() {
        assert_eq!(reported(-MATE_SCORE + 3.0), -INF);
        assert_eq!(reported(975.5), 975.5);
    }

    #[test]
    fn stalemate_scores_zero() {
        let (score, mv) = run("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2, &[]).unwrap();
        assert_eq!(score, 0.0);
        assert!(mv.is_none());
    }

    #[test]
    fn winning_a_free_queen() {
        let (score, mv) = run("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 1, &[]).unwrap();
        assert_eq!(mv.unwrap().to_string(), "e4d5");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn forbidding_every_move_exhausts_the_search() {
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
        let board = SuperBoard::from_fens(fen, STARTPOS).unwrap();
        let all = board.board(BoardId::A).generate_legal_moves();
        let err = run(fen, 1, &all).unwrap_err();
        assert_eq!(err, EngineError::SearchExhausted { depth: 1 });
    }
}
