use qishou::board::{col_of, square, Board};

#[test]
fn test_screen_piece_pinned_on_file() {
    // The red chariot is the only piece between the generals.
    let mut board = Board::from_fen("4k4/9/9/9/9/9/9/9/4R4/4K4 w").expect("Invalid FEN");
    let moves = board.generate_moves();
    for mv in moves.iter().filter(|mv| mv.from() == square(8, 4)) {
        assert_eq!(col_of(mv.to()), 4, "chariot left the file: {mv}");
    }
    // Seven quiet steps plus the capture, and two sideways general steps.
    assert_eq!(moves.len(), 10);
}

#[test]
fn test_general_cannot_step_into_facing() {
    let mut board = Board::from_fen("3k5/9/9/9/9/9/9/9/9/4K4 w").expect("Invalid FEN");
    let moves = board.generate_moves();
    assert!(moves.iter().all(|mv| mv.to() != square(9, 3)));
    assert_eq!(moves.len(), 2);
}

#[test]
fn test_no_generated_move_leaves_generals_facing() {
    let mut board = Board::start_position();
    for ply in 0..40 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        for &mv in &moves {
            let child = board.play(mv);
            assert!(!child.generals_facing(), "{mv} leaves the generals facing");
        }
        let mv = moves[(ply * 7) % moves.len()];
        board.make_move(mv);
        if board.general_sq(board.side).is_none() {
            break;
        }
    }
}

#[test]
fn test_illegal_notation_is_rejected() {
    let mut board = Board::start_position();
    assert!(qishou::board::parse_iccs_move(&mut board, "h2e2").is_ok());
    assert!(qishou::board::parse_iccs_move(&mut board, "h2h9").is_err());
    assert!(qishou::board::parse_iccs_move(&mut board, "z2e2").is_err());
    assert!(qishou::board::parse_iccs_move(&mut board, "h2e").is_err());
}
