//! Move generation and the legality filter.
//!
//! Pseudo-legal moves follow the per-kind rules; the legality filter only
//! removes moves that leave the two generals facing each other on an open
//! file. Other exposures of the general are not filtered here.

use crate::board::{
    col_of, in_palace, offset, on_own_side, row_of, square, Board, Color, Move, Piece, PieceKind,
    ROWS,
};

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// Horse jumps paired with the leg square that blocks them.
const HORSE_JUMPS: [((i32, i32), (i32, i32)); 8] = [
    ((-2, 1), (-1, 0)),
    ((-1, 2), (0, 1)),
    ((1, 2), (0, 1)),
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
    ((-2, -1), (-1, 0)),
];

impl Board {
    /// Push `from -> to` unless the destination holds a friendly piece.
    fn push_if_not_friendly(&self, from: usize, to: usize, color: Color, out: &mut Vec<Move>) {
        match self.piece_on(to) {
            Some(p) if p.color == color => {}
            _ => out.push(Move::new(from, to)),
        }
    }

    pub fn generate_pseudo_moves(&self, color: Color, out: &mut Vec<Move>) {
        for (sq, piece) in self.pieces() {
            if piece.color != color {
                continue;
            }
            match piece.kind {
                PieceKind::General => self.general_moves(sq, color, out),
                PieceKind::Advisor => self.advisor_moves(sq, color, out),
                PieceKind::Elephant => self.elephant_moves(sq, color, out),
                PieceKind::Horse => self.horse_moves(sq, color, out),
                PieceKind::Chariot => self.chariot_moves(sq, color, out),
                PieceKind::Cannon => self.cannon_moves(sq, color, out),
                PieceKind::Soldier => self.soldier_moves(sq, color, out),
            }
        }
    }

    fn general_moves(&self, sq: usize, color: Color, out: &mut Vec<Move>) {
        for (dr, dc) in ORTHOGONAL {
            if let Some(to) = offset(sq, dr, dc) {
                if in_palace(to, color) {
                    self.push_if_not_friendly(sq, to, color, out);
                }
            }
        }
    }

    fn advisor_moves(&self, sq: usize, color: Color, out: &mut Vec<Move>) {
        for (dr, dc) in DIAGONAL {
            if let Some(to) = offset(sq, dr, dc) {
                if in_palace(to, color) {
                    self.push_if_not_friendly(sq, to, color, out);
                }
            }
        }
    }

    fn elephant_moves(&self, sq: usize, color: Color, out: &mut Vec<Move>) {
        for (dr, dc) in DIAGONAL {
            let (Some(eye), Some(to)) = (offset(sq, dr, dc), offset(sq, 2 * dr, 2 * dc)) else {
                continue;
            };
            if !on_own_side(to, color) || self.is_occupied(eye) {
                continue;
            }
            self.push_if_not_friendly(sq, to, color, out);
        }
    }

    fn horse_moves(&self, sq: usize, color: Color, out: &mut Vec<Move>) {
        for ((dr, dc), (lr, lc)) in HORSE_JUMPS {
            let (Some(leg), Some(to)) = (offset(sq, lr, lc), offset(sq, dr, dc)) else {
                continue;
            };
            if self.is_occupied(leg) {
                continue;
            }
            self.push_if_not_friendly(sq, to, color, out);
        }
    }

    fn chariot_moves(&self, sq: usize, color: Color, out: &mut Vec<Move>) {
        for (dr, dc) in ORTHOGONAL {
            let mut cur = sq;
            while let Some(to) = offset(cur, dr, dc) {
                match self.piece_on(to) {
                    None => out.push(Move::new(sq, to)),
                    Some(p) => {
                        if p.color != color {
                            out.push(Move::new(sq, to));
                        }
                        break;
                    }
                }
                cur = to;
            }
        }
    }

    fn cannon_moves(&self, sq: usize, color: Color, out: &mut Vec<Move>) {
        for (dr, dc) in ORTHOGONAL {
            let mut cur = sq;
            let mut screened = false;
            while let Some(to) = offset(cur, dr, dc) {
                match (self.piece_on(to), screened) {
                    (None, false) => out.push(Move::new(sq, to)),
                    (None, true) => {}
                    (Some(_), false) => screened = true,
                    (Some(p), true) => {
                        if p.color != color {
                            out.push(Move::new(sq, to));
                        }
                        break;
                    }
                }
                cur = to;
            }
        }
    }

    fn soldier_moves(&self, sq: usize, color: Color, out: &mut Vec<Move>) {
        let forward = match color {
            Color::Red => -1,
            Color::Black => 1,
        };
        if let Some(to) = offset(sq, forward, 0) {
            self.push_if_not_friendly(sq, to, color, out);
        }
        if !on_own_side(sq, color) {
            for dc in [-1, 1] {
                if let Some(to) = offset(sq, 0, dc) {
                    self.push_if_not_friendly(sq, to, color, out);
                }
            }
        }
    }

    /// Locate `color`'s general by scanning its palace.
    pub fn general_sq(&self, color: Color) -> Option<usize> {
        let rows = match color {
            Color::Black => 0..3,
            Color::Red => 7..ROWS,
        };
        let general = Piece::new(PieceKind::General, color);
        rows.flat_map(|r| (3..=5).map(move |c| square(r, c)))
            .find(|&sq| self.piece_on(sq) == Some(general))
    }

    /// Both generals on one file with nothing between them.
    /// A missing general never counts as facing.
    pub fn generals_facing(&self) -> bool {
        let (Some(red), Some(black)) = (self.general_sq(Color::Red), self.general_sq(Color::Black))
        else {
            return false;
        };
        if col_of(red) != col_of(black) {
            return false;
        }
        let col = col_of(red);
        (row_of(black) + 1..row_of(red)).all(|r| !self.is_occupied(square(r, col)))
    }

    /// Legal moves for `color`: pseudo-legal moves minus those that leave the
    /// generals facing. The board is restored before returning.
    pub fn generate_moves_for(&mut self, color: Color) -> Vec<Move> {
        let mut pseudo = Vec::with_capacity(64);
        self.generate_pseudo_moves(color, &mut pseudo);
        pseudo.retain(|&mv| !self.play(mv).generals_facing());
        pseudo
    }

    /// Legal moves for the side to move.
    pub fn generate_moves(&mut self) -> Vec<Move> {
        self.generate_moves_for(self.side)
    }

    /// Leaf count of the legal move tree, side to move first.
    pub fn perft(&mut self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .into_iter()
            .map(|mv| self.play(mv).perft(depth - 1))
            .sum()
    }
}
