//! Static evaluation: material plus small positional bonuses.
//!
//! Scores are additive. Each piece is worth its base material value plus a
//! bonus that depends only on its own square; there is no mobility or
//! general-safety term.

use crate::board::{col_of, on_own_side, row_of, Board, Color, Piece, PieceKind};

// ============================================================================
// MATERIAL
// ============================================================================
pub const GENERAL_VALUE: i32 = 10000;
pub const ADVISOR_VALUE: i32 = 200;
pub const ELEPHANT_VALUE: i32 = 200;
pub const HORSE_VALUE: i32 = 450;
pub const CHARIOT_VALUE: i32 = 1000;
pub const CANNON_VALUE: i32 = 500;
pub const SOLDIER_VALUE: i32 = 100;

// ============================================================================
// POSITIONAL BONUSES
// ============================================================================
const SOLDIER_CROSSED_BONUS: i32 = 30;
const SOLDIER_NEAR_PALACE_BONUS: i32 = 20;
const SOLDIER_FLANK_FILE_BONUS: i32 = 10;
const HORSE_CENTRAL_BONUS: i32 = 10;
const HORSE_ADVANCED_BONUS: i32 = 10;
const HORSE_HOME_PENALTY: i32 = 10;
const CANNON_CENTRAL_BONUS: i32 = 10;
const CHARIOT_CENTRAL_BONUS: i32 = 10;
const CHARIOT_DEEP_BONUS: i32 = 20;

const CENTRAL_FILE: usize = 4;

pub fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::General => GENERAL_VALUE,
        PieceKind::Advisor => ADVISOR_VALUE,
        PieceKind::Elephant => ELEPHANT_VALUE,
        PieceKind::Horse => HORSE_VALUE,
        PieceKind::Chariot => CHARIOT_VALUE,
        PieceKind::Cannon => CANNON_VALUE,
        PieceKind::Soldier => SOLDIER_VALUE,
    }
}

/// Rows advanced from the piece's own back rank (0 on the back rank, 9 on
/// the enemy back rank).
fn advance(sq: usize, color: Color) -> usize {
    match color {
        Color::Red => 9 - row_of(sq),
        Color::Black => row_of(sq),
    }
}

fn positional_bonus(piece: Piece, sq: usize) -> i32 {
    let col = col_of(sq);
    let crossed = !on_own_side(sq, piece.color);
    match piece.kind {
        PieceKind::Soldier => {
            let mut bonus = 0;
            if crossed {
                bonus += SOLDIER_CROSSED_BONUS;
                if col == 3 || col == 5 {
                    bonus += SOLDIER_FLANK_FILE_BONUS;
                }
            }
            if advance(sq, piece.color) >= 8 {
                bonus += SOLDIER_NEAR_PALACE_BONUS;
            }
            bonus
        }
        PieceKind::Horse => {
            let mut bonus = 0;
            if (3..=5).contains(&col) {
                bonus += HORSE_CENTRAL_BONUS;
            }
            if crossed {
                bonus += HORSE_ADVANCED_BONUS;
            }
            if advance(sq, piece.color) == 0 && (col == 1 || col == 7) {
                bonus -= HORSE_HOME_PENALTY;
            }
            bonus
        }
        PieceKind::Cannon => {
            if col == CENTRAL_FILE {
                CANNON_CENTRAL_BONUS
            } else {
                0
            }
        }
        PieceKind::Chariot => {
            let mut bonus = 0;
            if col == CENTRAL_FILE {
                bonus += CHARIOT_CENTRAL_BONUS;
            }
            if advance(sq, piece.color) >= 7 {
                bonus += CHARIOT_DEEP_BONUS;
            }
            bonus
        }
        PieceKind::General | PieceKind::Advisor | PieceKind::Elephant => 0,
    }
}

/// Material plus positional value of one piece on `sq`.
pub fn piece_value(piece: Piece, sq: usize) -> i32 {
    material_value(piece.kind) + positional_bonus(piece, sq)
}

/// Score from `side`'s point of view: own total minus opponent total.
pub fn evaluate(board: &Board, side: Color) -> i32 {
    board.pieces().fold(0, |score, (sq, piece)| {
        let v = piece_value(piece, sq);
        if piece.color == side {
            score + v
        } else {
            score - v
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square;

    #[test]
    fn test_start_position_is_balanced() {
        let board = Board::start_position();
        assert_eq!(evaluate(&board, Color::Red), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn test_side_relative() {
        let board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/R3K4 w").expect("valid fen");
        let red = evaluate(&board, Color::Red);
        assert_eq!(red, CHARIOT_VALUE);
        assert_eq!(evaluate(&board, Color::Black), -red);
    }

    #[test]
    fn test_soldier_bonuses() {
        let red = |kind| Piece::new(kind, Color::Red);
        let home = piece_value(red(PieceKind::Soldier), square(6, 0));
        let crossed = piece_value(red(PieceKind::Soldier), square(4, 0));
        let flank = piece_value(red(PieceKind::Soldier), square(4, 3));
        let deep = piece_value(red(PieceKind::Soldier), square(1, 0));
        assert_eq!(home, SOLDIER_VALUE);
        assert_eq!(crossed, SOLDIER_VALUE + SOLDIER_CROSSED_BONUS);
        assert_eq!(flank, crossed + SOLDIER_FLANK_FILE_BONUS);
        assert_eq!(deep, crossed + SOLDIER_NEAR_PALACE_BONUS);
    }

    #[test]
    fn test_horse_home_corner_penalty() {
        let black_horse = Piece::new(PieceKind::Horse, Color::Black);
        assert_eq!(
            piece_value(black_horse, square(0, 1)),
            HORSE_VALUE - HORSE_HOME_PENALTY
        );
        assert_eq!(
            piece_value(black_horse, square(2, 4)),
            HORSE_VALUE + HORSE_CENTRAL_BONUS
        );
        assert_eq!(
            piece_value(black_horse, square(6, 4)),
            HORSE_VALUE + HORSE_CENTRAL_BONUS + HORSE_ADVANCED_BONUS
        );
    }

    #[test]
    fn test_chariot_infiltration() {
        let red_chariot = Piece::new(PieceKind::Chariot, Color::Red);
        assert_eq!(
            piece_value(red_chariot, square(1, 4)),
            CHARIOT_VALUE + CHARIOT_CENTRAL_BONUS + CHARIOT_DEEP_BONUS
        );
        assert_eq!(piece_value(red_chariot, square(5, 0)), CHARIOT_VALUE);
    }
}
