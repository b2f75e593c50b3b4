//! Identifiers for the two boards of a bughouse game.

use std::fmt;

/// One of the two boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardId {
    A,
    B,
}

impl BoardId {
    /// Both boards, in index order.
    pub const ALL: [BoardId; 2] = [BoardId::A, BoardId::B];

    /// The partner board, where captures made on this one are deposited.
    #[inline]
    pub const fn opposite(self) -> BoardId {
        match self {
            BoardId::A => BoardId::B,
            BoardId::B => BoardId::A,
        }
    }

    /// Zero-based index (A = 0, B = 1).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardId::A => write!(f, "A"),
            BoardId::B => write!(f, "B"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoardId;

    #[test]
    fn opposite_is_an_involution() {
        for id in BoardId::ALL {
            assert_ne!(id, id.opposite());
            assert_eq!(id, id.opposite().opposite());
        }
    }

    #[test]
    fn index_matches_order() {
        assert_eq!(BoardId::A.index(), 0);
        assert_eq!(BoardId::B.index(), 1);
        assert_eq!(BoardId::B.to_string(), "B");
    }
}
