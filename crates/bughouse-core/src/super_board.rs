//! The pair of linked boards that make up a bughouse game.

use cozy_chess::{Color, Piece};
use tracing::debug;

use crate::base_board::BaseBoard;
use crate::board_id::BoardId;
use crate::error::BoardError;
use crate::moves::BugMove;
use crate::rules::RuleSet;
use crate::termination::GameOver;

/// Boards A and B plus the order in which moves were pushed across them.
///
/// A capture on one board deposits the captured type into the pocket of the
/// capturer's partner on the other board (White on A partners Black on B).
/// Cloning yields a fully independent sandbox.
#[derive(Debug, Clone)]
pub struct SuperBoard {
    boards: [BaseBoard; 2],
    order: Vec<BoardId>,
}

impl SuperBoard {
    /// Two boards in the starting position with empty pockets.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::bughouse())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            boards: [BaseBoard::new(BoardId::A, rules), BaseBoard::new(BoardId::B, rules)],
            order: Vec::new(),
        }
    }

    /// Build from one FEN per board (pockets as a bracketed suffix).
    pub fn from_fens(fen_a: &str, fen_b: &str) -> Result<Self, BoardError> {
        let rules = RuleSet::bughouse();
        Ok(Self {
            boards: [
                BaseBoard::from_fen(BoardId::A, fen_a, rules)?,
                BaseBoard::from_fen(BoardId::B, fen_b, rules)?,
            ],
            order: Vec::new(),
        })
    }

    /// Replace the rule set on both boards.
    pub fn set_rules(&mut self, rules: RuleSet) {
        for board in &mut self.boards {
            board.set_rules(rules);
        }
    }

    #[inline]
    pub fn board(&self, id: BoardId) -> &BaseBoard {
        &self.boards[id.index()]
    }

    /// Board ids in push order, oldest first.
    pub fn move_order(&self) -> &[BoardId] {
        &self.order
    }

    /// Play `mv` on board `id`, routing any capture to the partner board.
    pub fn push(&mut self, mv: BugMove, id: BoardId) -> Result<(), BoardError> {
        let mover = self.boards[id.index()].side_to_move();
        let captured = self.boards[id.index()].push(mv)?;

        if let Some(piece) = captured {
            let deposit = self.boards[id.opposite().index()]
                .pocket_mut(!mover)
                .add(piece);
            if let Err(err) = deposit {
                self.boards[id.index()].pop()?;
                return Err(err.into());
            }
        }

        self.order.push(id);
        Ok(())
    }

    /// Take back the most recent push on either board.
    pub fn pop(&mut self) -> Result<BugMove, BoardError> {
        let id = self.order.pop().ok_or(BoardError::EmptyHistory)?;
        let undone = self.boards[id.index()].pop()?;
        if let Some(piece) = undone.captured {
            self.boards[id.opposite().index()]
                .pocket_mut(!undone.mover)
                .remove(piece)?;
        }
        Ok(undone.mv)
    }

    /// Put one unit of `piece` into `color`'s pocket on board `id`.
    ///
    /// Used to stage hypothetical positions; not recorded in any history.
    pub fn push_to_pocket(&mut self, id: BoardId, color: Color, piece: Piece) -> Result<(), BoardError> {
        self.boards[id.index()].pocket_mut(color).add(piece)?;
        Ok(())
    }

    /// Inverse of [`push_to_pocket`](Self::push_to_pocket).
    pub fn remove_from_pocket(&mut self, id: BoardId, color: Color, piece: Piece) -> Result<(), BoardError> {
        self.boards[id.index()].pocket_mut(color).remove(piece)?;
        Ok(())
    }

    /// Either board has repeated its position five times.
    pub fn is_fivefold_repetition(&self) -> bool {
        self.boards.iter().any(BaseBoard::is_fivefold_repetition)
    }

    /// Per-board termination reasons, or `None` while both boards play on.
    pub fn is_game_over(&self) -> Option<GameOver> {
        let over = GameOver {
            a: self.boards[0].termination(),
            b: self.boards[1].termination(),
        };
        if over.a.is_none() && over.b.is_none() {
            return None;
        }
        debug!(result = %over, "game over");
        Some(over)
    }
}

impl Default for SuperBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use cozy_chess::{Color, Piece};

    use super::SuperBoard;
    use crate::board_id::BoardId;
    use crate::error::{BoardError, PocketError};
    use crate::pocket::Pocket;
    use crate::termination::Termination;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn capture_deposits_into_partner_pocket() {
        let mut sb = SuperBoard::new();
        for mv in ["e2e4", "d7d5", "e4d5"] {
            sb.push(mv.parse().unwrap(), BoardId::A).unwrap();
        }
        // White captured on A, so Black on B (White's partner) gains the pawn.
        assert_eq!(sb.board(BoardId::B).pocket(Color::Black).count(Piece::Pawn), 1);
        assert_eq!(sb.board(BoardId::B).pocket(Color::White).count(Piece::Pawn), 0);
        assert!(sb.board(BoardId::A).pocket(Color::White).is_empty());

        sb.pop().unwrap();
        assert_eq!(sb.board(BoardId::B).pocket(Color::Black).count(Piece::Pawn), 0);
    }

    #[test]
    fn pop_follows_cross_board_order() {
        let mut sb = SuperBoard::new();
        sb.push("e2e4".parse().unwrap(), BoardId::A).unwrap();
        sb.push("d2d4".parse().unwrap(), BoardId::B).unwrap();
        assert_eq!(sb.move_order(), &[BoardId::A, BoardId::B]);

        assert_eq!(sb.pop().unwrap().to_string(), "d2d4");
        assert_eq!(sb.board(BoardId::B).moves().count(), 0);
        assert_eq!(sb.board(BoardId::A).moves().count(), 1);
    }

    #[test]
    fn pop_on_fresh_board_fails() {
        let mut sb = SuperBoard::new();
        assert_eq!(sb.pop(), Err(BoardError::EmptyHistory));
    }

    #[test]
    fn clone_is_an_independent_sandbox() {
        let sb = SuperBoard::new();
        let mut sandbox = sb.clone();
        sandbox.push("e2e4".parse().unwrap(), BoardId::A).unwrap();
        assert_eq!(sb.move_order().len(), 0);
        assert_eq!(sb.board(BoardId::A).position(), &cozy_chess::Board::default());
    }

    #[test]
    fn game_over_names_the_finished_board() {
        let sb = SuperBoard::from_fens(
            "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        )
        .unwrap();
        let over = sb.is_game_over().expect("board A is mated");
        assert_eq!(over.a, Some(Termination::Checkmate));
        assert_eq!(over.b, None);
        assert!(SuperBoard::new().is_game_over().is_none());
    }

    #[test]
    fn staged_pocket_units_round_trip() {
        let mut sb = SuperBoard::new();
        sb.push_to_pocket(BoardId::B, Color::White, Piece::Rook).unwrap();
        assert_eq!(sb.board(BoardId::B).pocket(Color::White).count(Piece::Rook), 1);
        sb.remove_from_pocket(BoardId::B, Color::White, Piece::Rook).unwrap();
        assert!(sb.remove_from_pocket(BoardId::B, Color::White, Piece::Rook).is_err());
    }

    #[test]
    fn full_partner_pocket_rolls_back_the_capture() {
        let mut sb = SuperBoard::from_fens("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1", STARTPOS).unwrap();
        for _ in 0..Pocket::cap(Piece::Knight) {
            sb.push_to_pocket(BoardId::B, Color::Black, Piece::Knight).unwrap();
        }
        let before = sb.clone();

        let err = sb.push("e4d5".parse().unwrap(), BoardId::A).unwrap_err();
        assert_eq!(
            err,
            BoardError::Pocket {
                source: PocketError::Capacity {
                    piece: Piece::Knight,
                    cap: Pocket::cap(Piece::Knight),
                },
            }
        );

        assert!(sb.move_order().is_empty());
        for id in BoardId::ALL {
            let (now, then) = (sb.board(id), before.board(id));
            assert_eq!(now.position(), then.position(), "board {id}");
            assert_eq!(now.pocket(Color::White), then.pocket(Color::White), "board {id}");
            assert_eq!(now.pocket(Color::Black), then.pocket(Color::Black), "board {id}");
            assert_eq!(now.moves().count(), 0);
            assert_eq!(now.halfmove_clock(), then.halfmove_clock());
        }
    }
}
