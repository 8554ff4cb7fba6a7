use qishou::board::{Board, START_FEN};

fn perft_from(fen: &str, depth: u8) -> u64 {
    let mut board = Board::from_fen(fen).expect("Invalid FEN");
    board.perft(depth)
}

#[test]
fn test_perft_start_depth_1() {
    assert_eq!(perft_from(START_FEN, 1), 44);
}

#[test]
fn test_perft_start_depth_2() {
    assert_eq!(perft_from(START_FEN, 2), 1920);
}

#[test]
fn test_perft_leaves_board_unchanged() {
    let mut board = Board::start_position();
    let before = board.clone();
    board.perft(3);
    assert_eq!(board, before);
}

#[test]
fn test_perft_bare_generals() {
    // Stepping onto the open e-file would face the black general.
    assert_eq!(perft_from("4k4/9/9/9/9/9/9/9/9/3K5 w", 1), 1);
}
