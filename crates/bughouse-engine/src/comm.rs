//! Advice exchanged between partnered seats.
//!
//! After choosing a move a communicating seat estimates, per piece type,
//! how much it would lose if its opponent were handed that piece and how
//! much it would gain if it received that piece itself. Its partner reads
//! the estimates during its next search and steers captures accordingly.

use bughouse_core::{BoardId, Color, POCKET_PIECES, Piece, Pocket, SuperBoard};

/// Largest magnitude an advice value may carry.
pub const ADVICE_LIMIT: f64 = 32_767.0;

/// Per piece type advice published by one seat for its partner.
///
/// Values are from the publishing team's point of view: `protect` holds
/// estimated losses, `capture` estimated gains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommChannel {
    protect: [Option<f64>; 5],
    capture: [Option<f64>; 5],
}

impl CommChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the estimated loss if the opponent gains `piece`.
    pub fn set_protect(&mut self, piece: Piece, loss: f64) {
        if let Some(i) = slot(piece) {
            self.protect[i] = Some(sanitize(loss));
        }
    }

    /// Record the estimated gain if the holder receives `piece`.
    pub fn set_capture(&mut self, piece: Piece, gain: f64) {
        if let Some(i) = slot(piece) {
            self.capture[i] = Some(sanitize(gain));
        }
    }

    pub fn protect(&self, piece: Piece) -> Option<f64> {
        slot(piece).and_then(|i| self.protect[i])
    }

    pub fn capture(&self, piece: Piece) -> Option<f64> {
        slot(piece).and_then(|i| self.capture[i])
    }

    /// "please_protect" entries.
    pub fn iter_protect(&self) -> impl Iterator<Item = (Piece, f64)> + '_ {
        entries(&self.protect)
    }

    /// "please_capture" entries.
    pub fn iter_capture(&self) -> impl Iterator<Item = (Piece, f64)> + '_ {
        entries(&self.capture)
    }

    pub fn is_empty(&self) -> bool {
        self.protect.iter().chain(self.capture.iter()).all(Option::is_none)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn slot(piece: Piece) -> Option<usize> {
    POCKET_PIECES.iter().position(|&p| p == piece)
}

fn entries(values: &[Option<f64>; 5]) -> impl Iterator<Item = (Piece, f64)> + '_ {
    POCKET_PIECES
        .iter()
        .zip(values.iter())
        .filter_map(|(&piece, value)| value.map(|v| (piece, v)))
}

/// Mate scores make probe deltas infinite or NaN; keep advice finite.
fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-ADVICE_LIMIT, ADVICE_LIMIT)
    }
}

/// Received advice plus the partner-board pockets at search start.
///
/// Leaf evaluation compares the partner board's pockets against the
/// snapshot to see which pieces this seat's line of play has sent there.
#[derive(Debug, Clone)]
pub struct AdviceContext {
    color: Color,
    partner_board: BoardId,
    ally_snapshot: Pocket,
    enemy_snapshot: Pocket,
    received: CommChannel,
}

impl AdviceContext {
    /// Snapshot the partner board of `board_id` for the seat of `color`.
    pub fn new(board: &SuperBoard, board_id: BoardId, color: Color, received: CommChannel) -> Self {
        let partner_board = board_id.opposite();
        let partner = board.board(partner_board);
        Self {
            color,
            partner_board,
            ally_snapshot: partner.pocket(!color).clone(),
            enemy_snapshot: partner.pocket(color).clone(),
            received,
        }
    }

    /// Advice term for a leaf, from White's perspective.
    ///
    /// Subtracts the partner's estimated loss for every type its opponent
    /// gained, and adds the partner's estimated gain for every type the
    /// partner itself gained.
    pub fn adjustment(&self, board: &SuperBoard) -> f64 {
        let partner = board.board(self.partner_board);
        let ally_gain = self.ally_snapshot.diff(partner.pocket(!self.color));
        let enemy_gain = self.enemy_snapshot.diff(partner.pocket(self.color));

        let mut team = 0.0;
        for (piece, loss) in self.received.iter_protect() {
            if enemy_gain.count(piece) > 0 {
                team -= loss;
            }
        }
        for (piece, gain) in self.received.iter_capture() {
            if ally_gain.count(piece) > 0 {
                team += gain;
            }
        }

        match self.color {
            Color::White => team,
            Color::Black => -team,
        }
    }
}
