//! One board of a bughouse game: position, pockets, and undo history.
//!
//! Ordinary chess rules (move generation, check detection, hashing) are
//! delegated to `cozy_chess`. This layer adds drop moves, the pocket
//! bookkeeping around captures, promoted-piece tracking, and an undo stack
//! so search can push and pop moves in place.

use cozy_chess::{
    BitBoard, Board, BoardBuilder, Color, Move, Piece, Rank, Square, get_between_rays,
};
use tracing::trace;

use crate::board_id::BoardId;
use crate::error::BoardError;
use crate::moves::BugMove;
use crate::pocket::{POCKET_PIECES, Pocket, parse_piece_symbol};
use crate::rules::RuleSet;
use crate::termination::Termination;

/// Halfmove clock at which the 75-move rule ends the board.
const SEVENTY_FIVE_MOVE_PLIES: u16 = 150;

/// Identity of a position for repetition detection.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PositionKey {
    hash: u64,
    pockets: [Pocket; 2],
}

/// Everything needed to undo one push.
#[derive(Debug, Clone)]
struct Undo {
    mv: BugMove,
    position: Board,
    promoted: BitBoard,
    halfmove: u16,
    captured: Option<Piece>,
    key: PositionKey,
}

/// Result of popping a move off a [`BaseBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undone {
    /// The move that was taken back.
    pub mv: BugMove,
    /// Side that had played it.
    pub mover: Color,
    /// Pocket type the move had sent to the partner board, if any.
    pub captured: Option<Piece>,
}

/// A single bughouse board.
///
/// The board knows its own [`BoardId`] and so its partner's; routing a
/// captured piece to the partner is done by the owning
/// [`SuperBoard`](crate::SuperBoard).
#[derive(Debug, Clone)]
pub struct BaseBoard {
    id: BoardId,
    rules: RuleSet,
    position: Board,
    pockets: [Pocket; 2],
    promoted: BitBoard,
    /// Plies since the last capture, pawn move, or drop. Kept here because
    /// the rules engine's own clock stops at 100.
    halfmove: u16,
    history: Vec<Undo>,
}

impl BaseBoard {
    /// Standard starting position with empty pockets.
    pub fn new(id: BoardId, rules: RuleSet) -> Self {
        Self {
            id,
            rules,
            position: Board::default(),
            pockets: [Pocket::new(), Pocket::new()],
            promoted: BitBoard::EMPTY,
            halfmove: 0,
            history: Vec::new(),
        }
    }

    /// Parse a FEN, optionally carrying pockets as a bracketed suffix on the
    /// placement field: `6k1/5ppp/8/8/8/8/8/6K1[Qn] w - - 0 1`.
    pub fn from_fen(id: BoardId, fen: &str, rules: RuleSet) -> Result<Self, BoardError> {
        let (core, pocket_text) = split_pocket(fen)?;
        let position = Board::from_fen(&core, false).map_err(|_| BoardError::InvalidFen {
            fen: fen.to_string(),
        })?;

        let mut pockets = [Pocket::new(), Pocket::new()];
        for c in pocket_text.chars() {
            match parse_piece_symbol(c) {
                Some((Piece::King, _)) | None => {
                    return Err(BoardError::InvalidPocket { character: c });
                }
                Some((piece, color)) => pockets[color as usize].add(piece)?,
            }
        }

        let halfmove = u16::from(position.halfmove_clock());
        Ok(Self {
            id,
            rules,
            position,
            pockets,
            promoted: BitBoard::EMPTY,
            halfmove,
            history: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> BoardId {
        self.id
    }

    #[inline]
    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub(crate) fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    /// The on-board position as seen by the rules engine.
    #[inline]
    pub fn position(&self) -> &Board {
        &self.position
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Pocket of `color` on this board.
    #[inline]
    pub fn pocket(&self, color: Color) -> &Pocket {
        &self.pockets[color as usize]
    }

    #[inline]
    pub(crate) fn pocket_mut(&mut self, color: Color) -> &mut Pocket {
        &mut self.pockets[color as usize]
    }

    /// Squares holding pieces that arrived by promotion.
    #[inline]
    pub fn promoted(&self) -> BitBoard {
        self.promoted
    }

    /// Moves pushed on this board, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = BugMove> + '_ {
        self.history.iter().map(|u| u.mv)
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        !self.position.checkers().is_empty()
    }

    // -----------------------------------------------------------------------
    // Move generation
    // -----------------------------------------------------------------------

    /// Squares a piece could be dropped on, before pawn and pocket filters.
    ///
    /// Out of check every empty square qualifies. In single check only the
    /// squares strictly between the king and the checker do. In double
    /// check nothing does.
    pub fn drop_target_mask(&self) -> BitBoard {
        let empty = !self.position.occupied();
        let checkers = self.position.checkers();
        match checkers.len() {
            0 => empty,
            1 => {
                let king = self.position.king(self.side_to_move());
                match checkers.into_iter().next() {
                    Some(checker) => get_between_rays(king, checker) & empty,
                    None => BitBoard::EMPTY,
                }
            }
            _ => BitBoard::EMPTY,
        }
    }

    /// Squares `piece` may legally be dropped on by the side to move.
    pub fn legal_drop_squares(&self, piece: Piece) -> BitBoard {
        if !self.rules.drops
            || piece == Piece::King
            || self.pocket(self.side_to_move()).count(piece) == 0
        {
            return BitBoard::EMPTY;
        }
        let mask = self.drop_target_mask();
        if piece == Piece::Pawn {
            mask & !(Rank::First.bitboard() | Rank::Eighth.bitboard())
        } else {
            mask
        }
    }

    fn extend_drops(&self, moves: &mut Vec<BugMove>) {
        for piece in POCKET_PIECES {
            for square in self.legal_drop_squares(piece) {
                moves.push(BugMove::Drop { piece, square });
            }
        }
    }

    /// All legal moves: ordinary moves first, then drops.
    pub fn generate_legal_moves(&self) -> Vec<BugMove> {
        let mut moves = Vec::with_capacity(64);
        self.position.generate_moves(|piece_moves| {
            moves.extend(piece_moves.into_iter().map(BugMove::Normal));
            false
        });
        self.extend_drops(&mut moves);

        if self.rules.capture_compulsory {
            let captures: Vec<BugMove> = moves
                .iter()
                .copied()
                .filter(|&mv| self.is_capture(mv))
                .collect();
            if !captures.is_empty() {
                return captures;
            }
        }
        moves
    }

    /// Ordinary (non-drop) legal moves of `color`, counted without generating
    /// drops. The side not to move is counted as if it had the turn.
    pub fn ordinary_move_count(&self, color: Color) -> usize {
        let count = |board: &Board| {
            let mut n = 0;
            board.generate_moves(|piece_moves| {
                n += piece_moves.len();
                false
            });
            n
        };
        if color == self.side_to_move() {
            count(&self.position)
        } else {
            self.position.null_move().map_or(0, |b| count(&b))
        }
    }

    fn has_legal_moves(&self) -> bool {
        if self.rules.capture_compulsory {
            return !self.generate_legal_moves().is_empty();
        }
        if self.position.generate_moves(|_| true) {
            return true;
        }
        POCKET_PIECES
            .iter()
            .any(|&piece| !self.legal_drop_squares(piece).is_empty())
    }

    /// Whether `mv` removes an enemy piece.
    pub fn is_capture(&self, mv: BugMove) -> bool {
        match mv {
            BugMove::Normal(mv) => self.captured_square(mv).is_some(),
            BugMove::Drop { .. } => false,
        }
    }

    /// Square of the piece an ordinary move captures, if any.
    fn captured_square(&self, mv: Move) -> Option<Square> {
        let stm = self.side_to_move();
        match self.position.color_on(mv.to) {
            Some(color) if color != stm => Some(mv.to),
            // Castling is encoded as king takes own rook.
            Some(_) => None,
            None => {
                let pawn = self.position.piece_on(mv.from) == Some(Piece::Pawn);
                if pawn && mv.from.file() != mv.to.file() {
                    Some(Square::new(mv.to.file(), mv.from.rank()))
                } else {
                    None
                }
            }
        }
    }

    pub fn is_legal(&self, mv: BugMove) -> bool {
        match mv {
            BugMove::Normal(inner) => {
                if !self.position.is_legal(inner) {
                    return false;
                }
                if self.rules.capture_compulsory && !self.is_capture(mv) {
                    return !self.generate_legal_moves().iter().any(|&m| self.is_capture(m));
                }
                true
            }
            BugMove::Drop { piece, square } => {
                if self.rules.capture_compulsory
                    && self.generate_legal_moves().iter().any(|&m| self.is_capture(m))
                {
                    return false;
                }
                self.legal_drop_squares(piece).has(square)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Push / pop
    // -----------------------------------------------------------------------

    /// Play `mv`, returning the pocket type the capture (if any) sends to the
    /// partner board. Promoted pieces are returned as pawns.
    pub(crate) fn push(&mut self, mv: BugMove) -> Result<Option<Piece>, BoardError> {
        if !self.is_legal(mv) {
            return Err(match mv {
                BugMove::Drop { piece, square } => BoardError::IllegalDrop {
                    board: self.id,
                    piece,
                    square,
                },
                BugMove::Normal(_) => BoardError::IllegalMove {
                    board: self.id,
                    mv: mv.to_string(),
                },
            });
        }

        let key = self.position_key();
        let position = self.position.clone();
        let promoted = self.promoted;
        let halfmove = self.halfmove;

        let captured = match mv {
            BugMove::Normal(inner) => self.play_normal(inner),
            BugMove::Drop { piece, square } => {
                self.play_drop(piece, square)?;
                None
            }
        };

        trace!(board = %self.id, mv = %mv, ?captured, "push");
        self.history.push(Undo {
            mv,
            position,
            promoted,
            halfmove,
            captured,
            key,
        });
        Ok(captured)
    }

    fn play_normal(&mut self, mv: Move) -> Option<Piece> {
        let captured = self.captured_square(mv).and_then(|sq| {
            if self.promoted.has(sq) {
                Some(Piece::Pawn)
            } else {
                self.position.piece_on(sq)
            }
        });

        let pawn_move = self.position.piece_on(mv.from) == Some(Piece::Pawn);
        self.halfmove = if pawn_move || captured.is_some() {
            0
        } else {
            self.halfmove.saturating_add(1)
        };

        let moved_promoted = self.promoted.has(mv.from);
        // En passant victims are never promoted, so clearing `to` suffices.
        self.promoted &= !(mv.from.bitboard() | mv.to.bitboard());
        if mv.promotion.is_some() || moved_promoted {
            self.promoted |= mv.to.bitboard();
        }

        self.position.play_unchecked(mv);
        captured
    }

    fn play_drop(&mut self, piece: Piece, square: Square) -> Result<(), BoardError> {
        let color = self.side_to_move();
        let mut builder = BoardBuilder::from_board(&self.position);
        *builder.square_mut(square) = Some((piece, color));
        builder.side_to_move = !color;
        builder.en_passant = None;
        builder.halfmove_clock = 0;
        if color == Color::Black {
            builder.fullmove_number = builder.fullmove_number.saturating_add(1);
        }
        let position = builder.build().map_err(|_| BoardError::Rebuild { square })?;

        self.pockets[color as usize].remove(piece)?;
        self.position = position;
        self.halfmove = 0;
        Ok(())
    }

    /// Take back the last move pushed on this board.
    ///
    /// Restores occupancy and the mover's pocket for drops. Removing a
    /// deposited capture from the partner board is the caller's job.
    pub(crate) fn pop(&mut self) -> Result<Undone, BoardError> {
        let undo = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        let mover = undo.position.side_to_move();
        if let BugMove::Drop { piece, .. } = undo.mv {
            self.pockets[mover as usize].add(piece)?;
        }
        self.position = undo.position;
        self.promoted = undo.promoted;
        self.halfmove = undo.halfmove;
        trace!(board = %self.id, mv = %undo.mv, "pop");
        Ok(Undone {
            mv: undo.mv,
            mover,
            captured: undo.captured,
        })
    }

    // -----------------------------------------------------------------------
    // Game state
    // -----------------------------------------------------------------------

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_moves()
    }

    /// Neither side can ever mate: at most three units in play counting
    /// pockets, and no pawn, rook, or queen anywhere on this board.
    pub fn is_insufficient_material(&self) -> bool {
        let pockets = self.pockets.iter().map(Pocket::total).sum::<u32>();
        if self.position.occupied().len() + pockets > 3 {
            return false;
        }
        let heavy = [Piece::Pawn, Piece::Rook, Piece::Queen];
        heavy.iter().all(|&piece| {
            self.position.pieces(piece).is_empty()
                && self.pockets.iter().all(|p| p.count(piece) == 0)
        })
    }

    /// Plies since the last capture, pawn move, or drop.
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.halfmove >= SEVENTY_FIVE_MOVE_PLIES
    }

    fn position_key(&self) -> PositionKey {
        PositionKey {
            hash: self.position.hash(),
            pockets: self.pockets.clone(),
        }
    }

    /// How many times the current position (occupancy, pockets, side to
    /// move) has occurred on this board, counting the present one.
    pub fn repetition_count(&self) -> usize {
        let key = self.position_key();
        1 + self.history.iter().filter(|u| u.key == key).count()
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= 5
    }

    /// First applicable reason this board is over, if it is.
    pub fn termination(&self) -> Option<Termination> {
        if !self.has_legal_moves() {
            return Some(if self.in_check() {
                Termination::Checkmate
            } else {
                Termination::Stalemate
            });
        }
        if self.is_insufficient_material() {
            Some(Termination::InsufficientMaterial)
        } else if self.is_seventyfive_moves() {
            Some(Termination::SeventyFiveMoves)
        } else if self.is_fivefold_repetition() {
            Some(Termination::FivefoldRepetition)
        } else {
            None
        }
    }
}

/// Split `placement[pocket] rest` into (`placement rest`, `pocket`).
fn split_pocket(fen: &str) -> Result<(String, String), BoardError> {
    let Some(open) = fen.find('[') else {
        return Ok((fen.trim().to_string(), String::new()));
    };
    let close = fen[open..]
        .find(']')
        .map(|i| open + i)
        .ok_or_else(|| BoardError::InvalidFen {
            fen: fen.to_string(),
        })?;
    let core = format!("{}{}", &fen[..open], &fen[close + 1..]);
    Ok((core.trim().to_string(), fen[open + 1..close].to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
