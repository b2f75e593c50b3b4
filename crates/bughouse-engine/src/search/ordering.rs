//! Move ordering policies.

use bughouse_core::{BaseBoard, BugMove};
use rand::Rng;
use rand::seq::SliceRandom;

/// Order in which a node's moves are searched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveOrder {
    /// As produced by move generation: ordinary moves, then drops.
    #[default]
    Generator,
    /// Uniformly shuffled.
    Shuffle,
    /// Captures, then drops, then everything else; each group shuffled.
    CapturesFirst,
}

/// Reorder `moves` in place according to `order`.
pub fn order_moves<R: Rng + ?Sized>(moves: &mut Vec<BugMove>, board: &BaseBoard, order: MoveOrder, rng: &mut R) {
    match order {
        MoveOrder::Generator => {}
        MoveOrder::Shuffle => moves.shuffle(rng),
        MoveOrder::CapturesFirst => {
            let mut captures = Vec::new();
            let mut drops = Vec::new();
            let mut quiet = Vec::new();
            for mv in moves.drain(..) {
                if board.is_capture(mv) {
                    captures.push(mv);
                } else if mv.is_drop() {
                    drops.push(mv);
                } else {
                    quiet.push(mv);
                }
            }
            for group in [&mut captures, &mut drops, &mut quiet] {
                group.shuffle(rng);
            }
            moves.extend(captures);
            moves.extend(drops);
            moves.extend(quiet);
        }
    }
}

#[cfg(test)]
mod tests {
    use bughouse_core::{BaseBoard, BoardId, RuleSet};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::{MoveOrder, order_moves};

    fn board(fen: &str) -> BaseBoard {
        BaseBoard::from_fen(BoardId::A, fen, RuleSet::bughouse()).unwrap()
    }

    #[test]
    fn generator_order_is_untouched() {
        let b = BaseBoard::new(BoardId::A, RuleSet::bughouse());
        let original = b.generate_legal_moves();
        let mut moves = original.clone();
        order_moves(&mut moves, &b, MoveOrder::Generator, &mut SmallRng::seed_from_u64(1));
        assert_eq!(moves, original);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let b = BaseBoard::new(BoardId::A, RuleSet::bughouse());
        let original = b.generate_legal_moves();
        let mut moves = original.clone();
        order_moves(&mut moves, &b, MoveOrder::Shuffle, &mut SmallRng::seed_from_u64(7));
        assert_eq!(moves.len(), original.len());
        assert!(original.iter().all(|mv| moves.contains(mv)));
    }

    #[test]
    fn captures_then_drops_then_quiet() {
        let b = board("4k3/8/8/3n4/4P3/8/8/4K3[N] w - - 0 1");
        let mut moves = b.generate_legal_moves();
        order_moves(&mut moves, &b, MoveOrder::CapturesFirst, &mut SmallRng::seed_from_u64(3));

        assert!(b.is_capture(moves[0]), "exd5 comes first");
        let first_quiet = moves
            .iter()
            .position(|&mv| !mv.is_drop() && !b.is_capture(mv))
            .unwrap();
        assert!(moves[1..first_quiet].iter().all(|mv| mv.is_drop()));
        assert!(moves[first_quiet..].iter().all(|mv| !mv.is_drop()));
    }
}
