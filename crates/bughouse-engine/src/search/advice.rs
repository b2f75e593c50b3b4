//! Drop probes that produce the advice a seat publishes for its partner.
//!
//! Each probe stages a hypothetical pocket unit on the mover's board after
//! the chosen move and re-searches shallowly. The difference against the
//! same search without the staged unit estimates what that piece type is
//! worth to the team.

use bughouse_core::{BugMove, Color, POCKET_PIECES, Piece, SuperBoard};
use tracing::debug;

use super::SearchEngine;
use super::minimax::{INF, Role, SearchContext, alphabeta, reported};
use crate::comm::{AdviceContext, CommChannel};
use crate::error::EngineError;
use crate::stats::Statistics;

impl SearchEngine {
    /// Recompute outbound advice after choosing `mv`.
    pub(super) fn publish_advice(
        &mut self,
        board: &SuperBoard,
        mv: BugMove,
        advice: Option<&AdviceContext>,
    ) -> Result<(), EngineError> {
        self.outbound.clear();

        let mut after = board.clone();
        after.push(mv, self.board_id)?;
        if after.board(self.board_id).termination().is_some() {
            return Ok(());
        }
        let baseline = self.probe(&mut after, advice)?;

        let dangerous = self.find_dangerous_drops(board, mv, baseline, advice)?;
        let valuable = self.find_valuable_drops(board, mv, baseline, advice)?;
        for (piece, loss) in dangerous {
            self.outbound.set_protect(piece, loss);
        }
        for (piece, gain) in valuable {
            self.outbound.set_capture(piece, gain);
        }
        debug!(board = %self.board_id, advice = ?self.outbound, "published advice");
        Ok(())
    }

    /// Estimated loss, per type the opponent lacks after `mv`, if the
    /// opponent were handed one unit of it.
    pub fn find_dangerous_drops(
        &mut self,
        board: &SuperBoard,
        mv: BugMove,
        baseline: f64,
        advice: Option<&AdviceContext>,
    ) -> Result<Vec<(Piece, f64)>, EngineError> {
        let opponent = !self.color;
        let sign = self.team_sign();
        let deltas = self.probe_drops(board, mv, opponent, baseline, advice)?;
        Ok(deltas.into_iter().map(|(piece, delta)| (piece, -sign * delta)).collect())
    }

    /// Estimated gain, per type this seat lacks after `mv`, if the seat
    /// were handed one unit of it.
    pub fn find_valuable_drops(
        &mut self,
        board: &SuperBoard,
        mv: BugMove,
        baseline: f64,
        advice: Option<&AdviceContext>,
    ) -> Result<Vec<(Piece, f64)>, EngineError> {
        let sign = self.team_sign();
        let deltas = self.probe_drops(board, mv, self.color, baseline, advice)?;
        Ok(deltas.into_iter().map(|(piece, delta)| (piece, sign * delta)).collect())
    }

    /// White-perspective `probe - baseline` for each type `holder` lacks.
    fn probe_drops(
        &mut self,
        board: &SuperBoard,
        mv: BugMove,
        holder: Color,
        baseline: f64,
        advice: Option<&AdviceContext>,
    ) -> Result<Vec<(Piece, f64)>, EngineError> {
        let id = self.board_id;
        let mut sandbox = board.clone();
        sandbox.push(mv, id)?;

        let mut deltas = Vec::new();
        for piece in POCKET_PIECES {
            if sandbox.board(id).pocket(holder).count(piece) > 0 {
                continue;
            }
            sandbox.push_to_pocket(id, holder, piece)?;
            let probed = self.probe(&mut sandbox, advice);
            sandbox.remove_from_pocket(id, holder, piece)?;
            deltas.push((piece, probed? - baseline));
        }
        Ok(deltas)
    }

    /// Shallow search score of `board` from whoever is to move there.
    ///
    /// Counted in a scratch [`Statistics`] so the per-move figures describe
    /// move selection only.
    fn probe(&mut self, board: &mut SuperBoard, advice: Option<&AdviceContext>) -> Result<f64, EngineError> {
        let role = Role::of(board.board(self.board_id).side_to_move());
        let mut scratch = Statistics::new();
        let mut ctx = SearchContext {
            board_id: self.board_id,
            root_len: board.move_order().len(),
            control: self.control(self.config.advice_depth.max(1)),
            next_depth: self.config.next_depth,
            order: self.config.order,
            evaluator: self.evaluator.as_ref(),
            advice,
            rng: &mut self.rng,
            stats: &mut scratch,
        };
        let (score, _) = alphabeta(&mut ctx, board, 0, -INF, INF, role, &[])?;
        Ok(reported(score))
    }

    /// +1 for White, -1 for Black: converts White-perspective deltas into
    /// this seat's team perspective.
    fn team_sign(&self) -> f64 {
        match self.color {
            Color::White => 1.0,
            Color::Black => -1.0,
        }
    }

    /// Outbound advice as last published.
    pub fn outbound_advice(&self) -> &CommChannel {
        &self.outbound
    }
}

#[cfg(test)]
mod tests {
    use bughouse_core::{BoardId, Color, Piece, SuperBoard};

    use crate::config::SearchConfig;
    use crate::eval::Material;
    use crate::search::SearchEngine;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn communicating(board: BoardId, color: Color) -> SearchEngine {
        let config = SearchConfig {
            max_depth: 1,
            advice_depth: 1,
            communicating: true,
            seed: Some(11),
            ..SearchConfig::default()
        };
        SearchEngine::new(board, color, Box::new(Material), config)
    }

    #[test]
    fn dangerous_drops_skip_types_the_opponent_holds() {
        let board = SuperBoard::from_fens("4k3/8/8/8/8/8/8/4K3[qr] w - - 0 1", STARTPOS).unwrap();
        let mut white = communicating(BoardId::A, Color::White);
        let mv = "e1d1".parse().unwrap();
        let found = white.find_dangerous_drops(&board, mv, 0.0, None).unwrap();
        let pieces: Vec<Piece> = found.iter().map(|(p, _)| *p).collect();
        assert_eq!(pieces, vec![Piece::Pawn, Piece::Knight, Piece::Bishop]);
    }

    #[test]
    fn valuable_drops_report_gains_for_the_mover() {
        let board = SuperBoard::from_fens("r3k3/8/8/8/8/8/8/4K3 w - - 0 1", STARTPOS).unwrap();
        let mut white = communicating(BoardId::A, Color::White);
        let mv = "e1e2".parse().unwrap();
        let found = white.find_valuable_drops(&board, mv, -500.0, None).unwrap();
        assert_eq!(found.len(), 5, "White's pocket is empty, so every type is probed");
        assert!(found.iter().all(|(_, gain)| gain.is_finite()));
    }

    #[test]
    fn choose_move_publishes_advice_for_the_partner() {
        let board = SuperBoard::from_fens("r3k3/8/8/8/8/8/8/4K3 w - - 0 1", STARTPOS).unwrap();
        let mut white = communicating(BoardId::A, Color::White);
        white.choose_move(&board).unwrap();

        let advice = white.give_advice();
        assert!(!advice.is_empty());
        assert_eq!(advice.iter_protect().count(), 5, "Black holds nothing after a quiet move");
        assert!(advice.protect(Piece::King).is_none());
    }

    #[test]
    fn advice_probes_stay_out_of_move_statistics() {
        let board = SuperBoard::from_fens("r3k3/8/8/8/8/8/8/4K3 w - - 0 1", STARTPOS).unwrap();
        let mut talking = communicating(BoardId::A, Color::White);
        let mut quiet = SearchEngine::new(
            BoardId::A,
            Color::White,
            Box::new(Material),
            SearchConfig {
                communicating: false,
                ..*talking.config()
            },
        );

        assert_eq!(talking.choose_move(&board).unwrap(), quiet.choose_move(&board).unwrap());
        assert!(!talking.give_advice().is_empty());
        assert_eq!(talking.stats().move_nodes(), quiet.stats().move_nodes());
        assert_eq!(talking.stats().move_evals(), quiet.stats().move_evals());
    }

    #[test]
    fn partner_advice_is_ignored_when_not_communicating() {
        let mut quiet = SearchEngine::new(BoardId::B, Color::Black, Box::new(Material), SearchConfig::default());
        let mut channel = crate::comm::CommChannel::new();
        channel.set_protect(Piece::Queen, 900.0);
        quiet.partners_advice(channel);
        assert!(quiet.give_advice().is_empty());
    }
}
