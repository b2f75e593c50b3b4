//! Search instrumentation.
//!
//! Purely informational: nothing here feeds back into move selection.

use std::time::Duration;

use bughouse_core::{BoardId, Color};
use tracing::info;

/// Per-seat counters for nodes, evaluations, and branching.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Nodes visited in the current depth iteration.
    iteration_nodes: u64,
    /// Leaf evaluations in the current depth iteration.
    iteration_evals: u64,
    /// Nodes visited while choosing the current move.
    move_nodes: u64,
    /// Leaf evaluations while choosing the current move.
    move_evals: u64,
    /// Time spent inside the evaluator for the current move.
    eval_time: Duration,
    /// Largest branching estimate seen for the current move.
    branching_max: f64,
    /// Nodes across every move this seat has chosen.
    total_nodes: u64,
    /// Moves this seat has chosen.
    moves: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_node(&mut self) {
        self.iteration_nodes += 1;
        self.move_nodes += 1;
    }

    #[inline]
    pub fn record_eval(&mut self, elapsed: Duration) {
        self.iteration_evals += 1;
        self.move_evals += 1;
        self.eval_time += elapsed;
    }

    /// Clear per-iteration counters before a new depth iteration.
    pub fn iter_deep_reset(&mut self) {
        self.iteration_nodes = 0;
        self.iteration_evals = 0;
    }

    /// Fold a finished iteration of `depth` plies into the branching estimate.
    pub fn complete_iteration(&mut self, depth: u32) {
        if depth == 0 || self.iteration_evals == 0 {
            return;
        }
        let estimate = (self.iteration_evals as f64).powf(1.0 / f64::from(depth));
        if estimate > self.branching_max {
            self.branching_max = estimate;
        }
    }

    /// Clear per-move counters before choosing a new move.
    pub fn single_move_reset(&mut self) {
        self.iter_deep_reset();
        self.move_nodes = 0;
        self.move_evals = 0;
        self.eval_time = Duration::ZERO;
        self.branching_max = 0.0;
    }

    /// Close the books on the move just chosen.
    pub fn finish_move(&mut self) {
        self.total_nodes += self.move_nodes;
        self.moves += 1;
    }

    #[inline]
    pub fn iteration_nodes(&self) -> u64 {
        self.iteration_nodes
    }

    #[inline]
    pub fn move_nodes(&self) -> u64 {
        self.move_nodes
    }

    pub fn move_evals(&self) -> u64 {
        self.move_evals
    }

    pub fn eval_time(&self) -> Duration {
        self.eval_time
    }

    pub fn branching_max(&self) -> f64 {
        self.branching_max
    }

    pub fn total_nodes(&self) -> u64 {
        self.total_nodes
    }

    pub fn average_nodes_per_move(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            self.total_nodes as f64 / self.moves as f64
        }
    }

    /// Emit the per-move summary for one seat.
    pub fn log_summary(&self, board: BoardId, color: Color) {
        info!(
            board = %board,
            color = ?color,
            nodes = self.move_nodes,
            evals = self.move_evals,
            eval_ms = self.eval_time.as_secs_f64() * 1000.0,
            branching = self.branching_max,
            avg_nodes = self.average_nodes_per_move(),
            "move statistics"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Statistics;

    #[test]
    fn iteration_reset_keeps_move_totals() {
        let mut stats = Statistics::new();
        for _ in 0..10 {
            stats.record_node();
        }
        stats.iter_deep_reset();
        stats.record_node();
        assert_eq!(stats.iteration_nodes(), 1);
        assert_eq!(stats.move_nodes(), 11);
    }

    #[test]
    fn branching_estimate_is_root_of_evals() {
        let mut stats = Statistics::new();
        for _ in 0..400 {
            stats.record_eval(Duration::from_micros(1));
        }
        stats.complete_iteration(2);
        assert!((stats.branching_max() - 20.0).abs() < 1e-9);
        assert_eq!(stats.eval_time(), Duration::from_micros(400));
    }

    #[test]
    fn averages_across_moves() {
        let mut stats = Statistics::new();
        for nodes in [10, 30] {
            stats.single_move_reset();
            for _ in 0..nodes {
                stats.record_node();
            }
            stats.finish_move();
        }
        assert_eq!(stats.total_nodes(), 40);
        assert_eq!(stats.average_nodes_per_move(), 20.0);
        stats.single_move_reset();
        assert_eq!(stats.move_nodes(), 0);
    }
}
