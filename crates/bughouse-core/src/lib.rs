//! Bughouse game state: pockets, drop moves, and the linked pair of boards.
//!
//! Single-board chess rules come from `cozy_chess`; this crate layers the
//! bughouse rules on top.

mod base_board;
mod board_id;
mod error;
mod moves;
mod pocket;
mod rules;
mod super_board;
mod termination;

pub use base_board::{BaseBoard, Undone};
pub use board_id::BoardId;
pub use cozy_chess::{BitBoard, Board, Color, Piece, Square};
pub use error::{BoardError, PocketError};
pub use moves::BugMove;
pub use pocket::{POCKET_PIECES, Pocket, parse_piece_symbol, piece_symbol};
pub use rules::RuleSet;
pub use super_board::SuperBoard;
pub use termination::{GameOver, Termination};
