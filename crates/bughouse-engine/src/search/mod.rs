//! Move selection for one seat.

pub mod control;
pub mod minimax;
pub mod ordering;

mod advice;

use std::fmt;

use bughouse_core::{BoardId, BugMove, Color, SuperBoard};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::comm::{AdviceContext, CommChannel};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::stats::Statistics;
use control::SearchControl;
use minimax::{INF, Role, SearchContext, alphabeta, reported};

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Best move found at the deepest completed depth.
    pub best_move: BugMove,
    /// Score from White's perspective; ±∞ for a forced mate.
    pub score: f64,
    /// Nodes visited by the search that produced this result.
    pub nodes: u64,
    /// Depth limit of that search.
    pub depth: u32,
}

/// The search engine for one seat (board and color).
///
/// Each call to [`choose_move`](Self::choose_move) searches a private copy of
/// the game, so the caller's [`SuperBoard`] is never touched.
pub struct SearchEngine {
    board_id: BoardId,
    color: Color,
    evaluator: Box<dyn Evaluator>,
    config: SearchConfig,
    rng: SmallRng,
    stats: Statistics,
    received: CommChannel,
    outbound: CommChannel,
    forbidden: Vec<BugMove>,
}

impl SearchEngine {
    pub fn new(board_id: BoardId, color: Color, evaluator: Box<dyn Evaluator>, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            board_id,
            color,
            evaluator,
            config,
            rng,
            stats: Statistics::new(),
            received: CommChannel::new(),
            outbound: CommChannel::new(),
            forbidden: Vec::new(),
        }
    }

    #[inline]
    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Moves rejected for completing a fivefold repetition during the last
    /// [`choose_move`](Self::choose_move), in the order they were rejected.
    pub fn last_forbidden(&self) -> &[BugMove] {
        &self.forbidden
    }

    /// Accept the partner's latest advice. Ignored unless communicating.
    pub fn partners_advice(&mut self, channel: CommChannel) {
        if self.config.communicating {
            self.received = channel;
        }
    }

    /// Advice for the partner computed after the last chosen move.
    ///
    /// Empty for non-communicating seats.
    pub fn give_advice(&self) -> CommChannel {
        if self.config.communicating {
            self.outbound.clone()
        } else {
            CommChannel::new()
        }
    }

    /// Pick a move for this seat in `board`.
    ///
    /// Never returns a null move: fails with [`EngineError::NoLegalMoves`]
    /// when the seat has nothing to play.
    pub fn choose_move(&mut self, board: &SuperBoard) -> Result<BugMove, EngineError> {
        let own = board.board(self.board_id);
        if own.side_to_move() != self.color {
            return Err(EngineError::NotOnMove {
                board: self.board_id,
                color: self.color,
            });
        }
        let legal = own.generate_legal_moves();
        if legal.is_empty() {
            return Err(EngineError::NoLegalMoves {
                board: self.board_id,
                color: self.color,
            });
        }

        self.stats.single_move_reset();
        let advice = self.advice_context(board);
        let outcome = self.search_avoiding_repetition(board, &legal, advice.as_ref())?;

        if self.config.communicating {
            self.publish_advice(board, outcome.best_move, advice.as_ref())?;
        }

        self.stats.finish_move();
        self.stats.log_summary(self.board_id, self.color);
        info!(
            board = %self.board_id,
            color = ?self.color,
            mv = %outcome.best_move,
            score = outcome.score,
            depth = outcome.depth,
            evaluator = self.evaluator.name(),
            "chose move"
        );
        Ok(outcome.best_move)
    }

    /// Fixed-depth search of `board` from the side to move on this seat's
    /// board, without deepening or repetition checks.
    pub fn search_position(&mut self, board: &SuperBoard, depth: u32) -> Result<SearchOutcome, EngineError> {
        let advice = self.advice_context(board);
        self.search_root(board, depth.max(1), &[], advice.as_ref())
    }

    fn advice_context(&self, board: &SuperBoard) -> Option<AdviceContext> {
        if !self.config.communicating || self.received.is_empty() {
            return None;
        }
        Some(AdviceContext::new(board, self.board_id, self.color, self.received.clone()))
    }

    fn control(&self, limit: u32) -> SearchControl {
        SearchControl::new(limit, self.config.max_nodes, self.config.cutoff)
    }

    /// One alpha-beta search to `depth` on a fresh sandbox.
    fn search_root(
        &mut self,
        board: &SuperBoard,
        depth: u32,
        forbidden: &[BugMove],
        advice: Option<&AdviceContext>,
    ) -> Result<SearchOutcome, EngineError> {
        let mut sandbox = board.clone();
        let role = Role::of(sandbox.board(self.board_id).side_to_move());
        self.stats.iter_deep_reset();

        let mut ctx = SearchContext {
            board_id: self.board_id,
            root_len: sandbox.move_order().len(),
            control: self.control(depth),
            next_depth: self.config.next_depth,
            order: self.config.order,
            evaluator: self.evaluator.as_ref(),
            advice,
            rng: &mut self.rng,
            stats: &mut self.stats,
        };
        let (score, best) = alphabeta(&mut ctx, &mut sandbox, 0, -INF, INF, role, forbidden)?;
        let best_move = best.ok_or(EngineError::SearchExhausted { depth })?;

        self.stats.complete_iteration(depth);
        Ok(SearchOutcome {
            best_move,
            score: reported(score),
            nodes: self.stats.iteration_nodes(),
            depth,
        })
    }

    /// Iterative deepening: depths 1..=max_depth until the node budget is
    /// spent, keeping the deepest completed result.
    fn deepen(
        &mut self,
        board: &SuperBoard,
        forbidden: &[BugMove],
        advice: Option<&AdviceContext>,
    ) -> Result<SearchOutcome, EngineError> {
        let max_depth = self.config.max_depth.max(1);
        if !self.config.iterative {
            return self.search_root(board, max_depth, forbidden, advice);
        }

        let control = self.control(max_depth);
        let mut completed: Option<SearchOutcome> = None;
        for depth in 1..=max_depth {
            if let Some(done) = &completed {
                if control.should_stop_iterating(done.nodes) {
                    debug!(depth, nodes = done.nodes, "node budget spent");
                    break;
                }
            }

            let outcome = self.search_root(board, depth, forbidden, advice)?;
            debug!(
                depth,
                score = outcome.score,
                nodes = outcome.nodes,
                best = %outcome.best_move,
                "iteration complete"
            );
            completed = Some(outcome);
        }

        completed.ok_or(EngineError::SearchExhausted { depth: max_depth })
    }

    /// Deepen, then forbid-and-restart while the best move would complete a
    /// fivefold repetition.
    ///
    /// Gives up after `max_repetition_retries` rejections, or once every
    /// legal move has been rejected, and plays the first rejected move.
    fn search_avoiding_repetition(
        &mut self,
        board: &SuperBoard,
        legal: &[BugMove],
        advice: Option<&AdviceContext>,
    ) -> Result<SearchOutcome, EngineError> {
        self.forbidden.clear();
        let mut forbidden = Vec::new();
        let mut first_rejected: Option<SearchOutcome> = None;

        loop {
            let outcome = self.deepen(board, &forbidden, advice)?;
            if self.config.allow_repetition || !self.repeats(board, outcome.best_move)? {
                self.forbidden = forbidden;
                return Ok(outcome);
            }

            debug!(mv = %outcome.best_move, "move repeats position five times; restarting");
            forbidden.push(outcome.best_move);
            let fallback = *first_rejected.get_or_insert(outcome);

            let exhausted = legal.iter().all(|mv| forbidden.contains(mv));
            if exhausted || forbidden.len() >= self.config.max_repetition_retries {
                warn!(
                    board = %self.board_id,
                    mv = %fallback.best_move,
                    rejected = forbidden.len(),
                    "no non-repeating move found; accepting repetition"
                );
                self.forbidden = forbidden;
                return Ok(fallback);
            }
        }
    }

    /// Whether playing `mv` makes this seat's board repeat five times.
    fn repeats(&self, board: &SuperBoard, mv: BugMove) -> Result<bool, EngineError> {
        let mut sandbox = board.clone();
        sandbox.push(mv, self.board_id)?;
        Ok(sandbox.board(self.board_id).is_fivefold_repetition())
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("board_id", &self.board_id)
            .field("color", &self.color)
            .field("evaluator", &self.evaluator.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
