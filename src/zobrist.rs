// Zobrist hashing with per-session key tables
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Color, Piece, Undo, NUM_SQUARES};

/// One random key per (square, piece) pair plus the side-to-move key.
/// Built once per game and owned by the search session.
#[derive(Clone)]
pub struct ZobristKeys {
    piece: Box<[[u64; Piece::NUM]; NUM_SQUARES]>,
    side: u64,
}

impl ZobristKeys {
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut piece = Box::new([[0u64; Piece::NUM]; NUM_SQUARES]);
        for square in piece.iter_mut() {
            for key in square.iter_mut() {
                *key = rng.random();
            }
        }
        let side = rng.random();
        Self { piece, side }
    }

    /// Keys from a fresh random seed.
    pub fn random() -> Self {
        Self::from_seed(rand::rng().random())
    }

    pub fn piece_key(&self, sq: usize, piece: Piece) -> u64 {
        self.piece[sq][piece.index()]
    }

    pub fn side_key(&self) -> u64 {
        self.side
    }

    pub fn full_hash(&self, board: &Board) -> u64 {
        let mut h = board
            .pieces()
            .fold(0u64, |h, (sq, p)| h ^ self.piece_key(sq, p));
        if board.side == Color::Black {
            h ^= self.side;
        }
        h
    }

    /// Incremental update for the move recorded in `undo`. XOR is its own
    /// inverse, so applying it again to the result gives back `hash`.
    pub fn apply(&self, hash: u64, undo: &Undo) -> u64 {
        let mut h = hash ^ self.piece_key(undo.mv.from(), undo.moved);
        if let Some(captured) = undo.captured {
            h ^= self.piece_key(undo.mv.to(), captured);
        }
        h ^= self.piece_key(undo.mv.to(), undo.moved);
        h ^ self.side
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{square, Move};

    #[test]
    fn test_seeded_keys_are_reproducible() {
        let a = ZobristKeys::from_seed(7);
        let b = ZobristKeys::from_seed(7);
        let board = Board::start_position();
        assert_eq!(a.full_hash(&board), b.full_hash(&board));
        assert_ne!(
            a.full_hash(&board),
            ZobristKeys::from_seed(8).full_hash(&board)
        );
    }

    #[test]
    fn test_side_key_distinguishes_side_to_move() {
        let keys = ZobristKeys::from_seed(1);
        let mut board = Board::start_position();
        let red = keys.full_hash(&board);
        board.side = Color::Black;
        assert_eq!(keys.full_hash(&board), red ^ keys.side_key());
    }

    #[test]
    fn test_incremental_matches_full_after_capture() {
        let keys = ZobristKeys::from_seed(99);
        let mut board = Board::start_position();
        let h0 = keys.full_hash(&board);
        // Cannon b2 takes the horse on b9.
        let undo = board.make_move(Move::new(square(7, 1), square(0, 1)));
        assert!(undo.captured.is_some());
        let h1 = keys.apply(h0, &undo);
        assert_eq!(h1, keys.full_hash(&board));
        assert_eq!(keys.apply(h1, &undo), h0);
        board.unmake_move(undo);
        assert_eq!(keys.full_hash(&board), h0);
    }
}
