//! Search control: node budget, leaf cutoff, and depth progression.

use bughouse_core::{BaseBoard, BugMove};

/// Custom leaf test: `(board, depth, limit) -> is_leaf`.
pub type CutoffFn = fn(&BaseBoard, u32, u32) -> bool;

/// Custom depth progression: `(depth, limit, move) -> next depth`.
pub type NextDepthFn = fn(u32, u32, BugMove) -> u32;

/// How the depth counter advances after a move is made.
#[derive(Debug, Clone, Copy)]
pub enum NextDepth {
    /// One ply per move.
    Increment,
    /// After a drop, jump to two plies short of the limit.
    ///
    /// Drops multiply the branching factor, so lines that start with one
    /// are searched less deeply.
    TruncateAfterDrop,
    Custom(NextDepthFn),
}

impl NextDepth {
    /// Depth of the child reached by `mv` from a node at `depth`.
    pub fn next(self, depth: u32, limit: u32, mv: BugMove) -> u32 {
        match self {
            NextDepth::Increment => depth + 1,
            NextDepth::TruncateAfterDrop => {
                let jump = limit.saturating_sub(2);
                if mv.is_drop() && jump > depth + 1 {
                    jump
                } else {
                    depth + 1
                }
            }
            NextDepth::Custom(f) => f(depth, limit, mv).max(depth + 1),
        }
    }
}

/// Decides when a search node is a leaf and when deepening stops.
#[derive(Debug, Clone, Copy)]
pub struct SearchControl {
    limit: u32,
    max_nodes: u64,
    cutoff: Option<CutoffFn>,
}

impl SearchControl {
    pub fn new(limit: u32, max_nodes: u64, cutoff: Option<CutoffFn>) -> Self {
        Self {
            limit,
            max_nodes,
            cutoff,
        }
    }

    /// Depth limit of the current iteration.
    #[inline]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Same budget and cutoff with a new depth limit.
    pub fn with_limit(self, limit: u32) -> Self {
        Self { limit, ..self }
    }

    /// Whether a node at `depth` is evaluated instead of expanded.
    #[inline]
    pub fn is_leaf(&self, board: &BaseBoard, depth: u32) -> bool {
        match self.cutoff {
            Some(f) => depth >= self.limit || f(board, depth, self.limit),
            None => depth >= self.limit,
        }
    }

    /// Checked between depth iterations only, so an iteration may overshoot.
    pub fn should_stop_iterating(&self, last_iteration_nodes: u64) -> bool {
        last_iteration_nodes > self.max_nodes
    }
}
