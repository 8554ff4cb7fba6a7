use qishou::board::{square, Board, Color, Move};
use qishou::eval::{evaluate, CHARIOT_VALUE};

#[test]
fn test_material_difference() {
    let mut board = Board::start_position();
    assert_eq!(evaluate(&board, Color::Red), 0, "Initial position should be 0");

    // Black loses the a-file chariot.
    board.remove_piece(square(0, 0));
    assert_eq!(evaluate(&board, Color::Red), CHARIOT_VALUE);
    assert_eq!(evaluate(&board, Color::Black), -CHARIOT_VALUE);
}

#[test]
fn test_central_cannon_bonus() {
    let mut board = Board::start_position();
    board.make_move(Move::new(square(7, 7), square(7, 4)));
    assert_eq!(evaluate(&board, Color::Red), 10);
}
