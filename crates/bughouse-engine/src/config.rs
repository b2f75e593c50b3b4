//! Search configuration.

use crate::search::control::{CutoffFn, NextDepth};
use crate::search::ordering::MoveOrder;

/// Knobs fixed when a [`SearchEngine`](crate::SearchEngine) is built.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Deepest iteration (plies) to search.
    pub max_depth: u32,
    /// Stop deepening once a completed iteration visited more nodes than this.
    pub max_nodes: u64,
    /// Search depths 1..=max_depth; otherwise search max_depth once.
    pub iterative: bool,
    /// Move ordering at every node.
    pub order: MoveOrder,
    /// Depth progression after each move.
    pub next_depth: NextDepth,
    /// Replaces the plain `depth >= limit` leaf test when set.
    pub cutoff: Option<CutoffFn>,
    /// Exchange advice with the partner seat.
    pub communicating: bool,
    /// Plies searched by each advice probe.
    pub advice_depth: u32,
    /// Permit moves that complete a fivefold repetition.
    pub allow_repetition: bool,
    /// Forbid-and-restart attempts before a repeating move is accepted.
    pub max_repetition_retries: usize,
    /// Seed for shuffled move ordering; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_nodes: 50_000,
            iterative: true,
            order: MoveOrder::Generator,
            next_depth: NextDepth::Increment,
            cutoff: None,
            communicating: false,
            advice_depth: 2,
            allow_repetition: false,
            max_repetition_retries: 8,
            seed: None,
        }
    }
}
