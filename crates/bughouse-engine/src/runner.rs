//! Round-robin driver for a four-seat game.

use bughouse_core::{BoardId, BugMove, Color, GameOver, SuperBoard};
use tracing::info;

use crate::error::EngineError;
use crate::search::SearchEngine;

/// Default cap on plies across both boards.
pub const DEFAULT_MAX_MOVES: usize = 200;

/// One of the four players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub board: BoardId,
    pub color: Color,
}

impl Seat {
    /// Turn order: WhiteA, WhiteB, BlackA, BlackB.
    pub const ALL: [Seat; 4] = [
        Seat { board: BoardId::A, color: Color::White },
        Seat { board: BoardId::B, color: Color::White },
        Seat { board: BoardId::A, color: Color::Black },
        Seat { board: BoardId::B, color: Color::Black },
    ];

    /// Teammate on the other board, playing the other color.
    pub fn partner(self) -> Seat {
        Seat {
            board: self.board.opposite(),
            color: !self.color,
        }
    }

    fn index(self) -> usize {
        match (self.board, self.color) {
            (BoardId::A, Color::White) => 0,
            (BoardId::B, Color::White) => 1,
            (BoardId::A, Color::Black) => 2,
            (BoardId::B, Color::Black) => 3,
        }
    }
}

/// Moves played and how the game ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub moves: Vec<(BoardId, BugMove)>,
    /// `None` when the move cap was reached first.
    pub result: Option<GameOver>,
}

impl GameRecord {
    /// Plies played across both boards.
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Owns the real game and the four seats' engines.
#[derive(Debug)]
pub struct Runner {
    board: SuperBoard,
    engines: [SearchEngine; 4],
    max_moves: usize,
}

impl Runner {
    /// `engines` must be ordered like [`Seat::ALL`].
    pub fn new(board: SuperBoard, engines: [SearchEngine; 4]) -> Result<Self, EngineError> {
        for (index, (engine, seat)) in engines.iter().zip(Seat::ALL).enumerate() {
            if engine.board_id() != seat.board || engine.color() != seat.color {
                return Err(EngineError::SeatMismatch { index });
            }
        }
        Ok(Self {
            board,
            engines,
            max_moves: DEFAULT_MAX_MOVES,
        })
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn board(&self) -> &SuperBoard {
        &self.board
    }

    /// Play until a board ends or the move cap is hit.
    ///
    /// After each move the mover's advice is handed to its partner, who
    /// reads it during its next search.
    pub fn play(&mut self) -> Result<GameRecord, EngineError> {
        let mut record = GameRecord {
            moves: Vec::new(),
            result: None,
        };

        for ply in 0..self.max_moves {
            if let Some(over) = self.board.is_game_over() {
                info!(plies = ply, result = %over, "game over");
                record.result = Some(over);
                return Ok(record);
            }

            let seat = Seat::ALL[ply % Seat::ALL.len()];
            let engine = &mut self.engines[seat.index()];
            let mv = engine.choose_move(&self.board)?;
            self.board.push(mv, seat.board)?;
            record.moves.push((seat.board, mv));

            let advice = engine.give_advice();
            self.engines[seat.partner().index()].partners_advice(advice);
        }

        record.result = self.board.is_game_over();
        info!(plies = record.plies(), "move cap reached");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use bughouse_core::{BoardId, Color, SuperBoard};

    use super::{Runner, Seat};
    use crate::config::SearchConfig;
    use crate::error::EngineError;
    use crate::eval::Material;
    use crate::search::SearchEngine;

    fn engines(config: SearchConfig) -> [SearchEngine; 4] {
        Seat::ALL.map(|seat| SearchEngine::new(seat.board, seat.color, Box::new(Material), config))
    }

    #[test]
    fn partners_sit_on_opposite_boards_and_colors() {
        for seat in Seat::ALL {
            let partner = seat.partner();
            assert_ne!(partner.board, seat.board);
            assert_ne!(partner.color, seat.color);
            assert_eq!(partner.partner(), seat);
        }
        assert_eq!(
            Seat::ALL[0].partner(),
            Seat { board: BoardId::B, color: Color::Black }
        );
    }

    #[test]
    fn seats_must_follow_turn_order() {
        let mut seats = engines(SearchConfig::default());
        seats.swap(0, 1);
        assert_eq!(
            Runner::new(SuperBoard::new(), seats).unwrap_err(),
            EngineError::SeatMismatch { index: 0 }
        );
    }

    #[test]
    fn plays_round_robin_up_to_the_cap() {
        let config = SearchConfig {
            max_depth: 1,
            communicating: true,
            advice_depth: 1,
            seed: Some(5),
            ..SearchConfig::default()
        };
        let mut runner = Runner::new(SuperBoard::new(), engines(config)).unwrap().with_max_moves(8);
        let record = runner.play().unwrap();

        assert_eq!(record.plies(), 8);
        let boards: Vec<BoardId> = record.moves.iter().map(|(id, _)| *id).collect();
        assert_eq!(boards[..4], [BoardId::A, BoardId::B, BoardId::A, BoardId::B]);
        assert_eq!(runner.board().board(BoardId::A).moves().count(), 4);
        assert_eq!(runner.board().board(BoardId::B).moves().count(), 4);
    }
}
