//! Per-seat store of captured pieces available for dropping.

use std::fmt;

use cozy_chess::{Color, Piece};

use crate::error::PocketError;

/// Number of droppable piece types (everything except the king).
const POCKET_TYPES: usize = 5;

/// Droppable piece types in pocket index order.
pub const POCKET_PIECES: [Piece; POCKET_TYPES] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
];

/// Absolute per-type caps, indexed like [`POCKET_PIECES`].
///
/// | Piece  | cap |
/// |--------|-----|
/// | Pawn   |  32 |
/// | Knight |   8 |
/// | Bishop |   8 |
/// | Rook   |   8 |
/// | Queen  |   4 |
const MAX_COUNT: [u8; POCKET_TYPES] = [32, 8, 8, 8, 4];

/// Captured pieces held by one seat on one board.
///
/// Counts are never negative and never exceed [`Pocket::cap`]. Kings are
/// never held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pocket {
    counts: [u8; POCKET_TYPES],
}

impl Pocket {
    /// An empty pocket.
    pub const fn new() -> Self {
        Self {
            counts: [0; POCKET_TYPES],
        }
    }

    /// Maximum number of units of `piece` a pocket may hold (0 for the king).
    pub const fn cap(piece: Piece) -> u8 {
        match slot(piece) {
            Some(i) => MAX_COUNT[i],
            None => 0,
        }
    }

    /// Add one unit of `piece`.
    pub fn add(&mut self, piece: Piece) -> Result<(), PocketError> {
        let i = slot(piece).ok_or(PocketError::King)?;
        if self.counts[i] >= MAX_COUNT[i] {
            return Err(PocketError::Capacity {
                piece,
                cap: MAX_COUNT[i],
            });
        }
        self.counts[i] += 1;
        Ok(())
    }

    /// Remove one unit of `piece`.
    pub fn remove(&mut self, piece: Piece) -> Result<(), PocketError> {
        let i = slot(piece).ok_or(PocketError::Underflow { piece })?;
        if self.counts[i] == 0 {
            return Err(PocketError::Underflow { piece });
        }
        self.counts[i] -= 1;
        Ok(())
    }

    /// Units of `piece` held (always 0 for the king).
    #[inline]
    pub fn count(&self, piece: Piece) -> u8 {
        slot(piece).map_or(0, |i| self.counts[i])
    }

    /// Total units held across all types.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }

    /// Whether the pocket holds nothing.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Per-type accumulation since `self` was snapshotted: `other - self`.
    ///
    /// Callers pass a pocket that only grew since the snapshot. A type that
    /// shrank instead is clamped to zero rather than reported as negative.
    pub fn diff(&self, other: &Pocket) -> Pocket {
        let mut counts = [0; POCKET_TYPES];
        for (i, out) in counts.iter_mut().enumerate() {
            *out = other.counts[i].saturating_sub(self.counts[i]);
        }
        Pocket { counts }
    }

    /// Held piece types with their non-zero counts, pawns first.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, u8)> + '_ {
        POCKET_PIECES
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(&piece, &count)| (piece, count))
    }

    /// Write the pocket as FEN letters for `color` (uppercase for White).
    pub fn write_symbols(&self, color: Color, out: &mut String) {
        for (piece, count) in self.iter().collect::<Vec<_>>().into_iter().rev() {
            for _ in 0..count {
                out.push(piece_symbol(piece, color));
            }
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        self.write_symbols(Color::White, &mut text);
        write!(f, "[{text}]")
    }
}

/// Index of a droppable piece type, `None` for the king.
#[inline]
const fn slot(piece: Piece) -> Option<usize> {
    match piece {
        Piece::Pawn => Some(0),
        Piece::Knight => Some(1),
        Piece::Bishop => Some(2),
        Piece::Rook => Some(3),
        Piece::Queen => Some(4),
        Piece::King => None,
    }
}

/// FEN letter of a piece, uppercase for White.
pub fn piece_symbol(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

/// Parse a FEN letter into a piece and its color.
pub fn parse_piece_symbol(c: char) -> Option<(Piece, Color)> {
    let piece = match c.to_ascii_lowercase() {
        'p' => Piece::Pawn,
        'n' => Piece::Knight,
        'b' => Piece::Bishop,
        'r' => Piece::Rook,
        'q' => Piece::Queen,
        'k' => Piece::King,
        _ => return None,
    };
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some((piece, color))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use cozy_chess::{Color, Piece};

    use super::{Pocket, parse_piece_symbol, piece_symbol};
    use crate::error::PocketError;

    #[test]
    fn counts_track_net_additions() {
        let mut pocket = Pocket::new();
        let script = [
            (Piece::Pawn, true),
            (Piece::Pawn, true),
            (Piece::Knight, true),
            (Piece::Pawn, false),
            (Piece::Queen, true),
            (Piece::Knight, false),
            (Piece::Pawn, true),
        ];
        for (piece, add) in script {
            if add {
                pocket.add(piece).unwrap();
            } else {
                pocket.remove(piece).unwrap();
            }
        }
        assert_eq!(pocket.count(Piece::Pawn), 2);
        assert_eq!(pocket.count(Piece::Knight), 0);
        assert_eq!(pocket.count(Piece::Queen), 1);
        assert_eq!(pocket.total(), 3);
    }

    #[test]
    fn remove_from_empty_fails() {
        let mut pocket = Pocket::new();
        for piece in super::POCKET_PIECES {
            assert_eq!(pocket.remove(piece), Err(PocketError::Underflow { piece }));
        }
        assert!(pocket.is_empty(), "failed removals must not change counts");
    }

    #[test]
    fn add_respects_cap() {
        let mut pocket = Pocket::new();
        for _ in 0..Pocket::cap(Piece::Queen) {
            pocket.add(Piece::Queen).unwrap();
        }
        assert_eq!(
            pocket.add(Piece::Queen),
            Err(PocketError::Capacity {
                piece: Piece::Queen,
                cap: 4
            })
        );
        assert_eq!(pocket.count(Piece::Queen), 4);
    }

    #[test]
    fn king_never_enters() {
        let mut pocket = Pocket::new();
        assert_eq!(pocket.add(Piece::King), Err(PocketError::King));
        assert_eq!(pocket.count(Piece::King), 0);
        assert_eq!(Pocket::cap(Piece::King), 0);
    }

    #[test]
    fn diff_measures_accumulation() {
        let mut snapshot = Pocket::new();
        snapshot.add(Piece::Rook).unwrap();
        let mut now = snapshot.clone();
        now.add(Piece::Rook).unwrap();
        now.add(Piece::Bishop).unwrap();

        let gained = snapshot.diff(&now);
        assert_eq!(gained.count(Piece::Rook), 1);
        assert_eq!(gained.count(Piece::Bishop), 1);
        assert_eq!(gained.count(Piece::Pawn), 0);
    }

    #[test]
    fn diff_clamps_shrinking_types() {
        let mut snapshot = Pocket::new();
        snapshot.add(Piece::Knight).unwrap();
        let gained = snapshot.diff(&Pocket::new());
        assert_eq!(gained.count(Piece::Knight), 0);
    }

    #[test]
    fn copy_is_independent() {
        let mut original = Pocket::new();
        original.add(Piece::Pawn).unwrap();
        let mut copy = original.clone();
        copy.add(Piece::Pawn).unwrap();
        assert_eq!(original.count(Piece::Pawn), 1);
        assert_eq!(copy.count(Piece::Pawn), 2);
    }

    #[test]
    fn symbols_round_trip() {
        assert_eq!(piece_symbol(Piece::Queen, Color::White), 'Q');
        assert_eq!(piece_symbol(Piece::Knight, Color::Black), 'n');
        assert_eq!(parse_piece_symbol('R'), Some((Piece::Rook, Color::White)));
        assert_eq!(parse_piece_symbol('x'), None);

        let mut pocket = Pocket::new();
        pocket.add(Piece::Queen).unwrap();
        pocket.add(Piece::Pawn).unwrap();
        pocket.add(Piece::Pawn).unwrap();
        assert_eq!(pocket.to_string(), "[QPP]");
    }
}
