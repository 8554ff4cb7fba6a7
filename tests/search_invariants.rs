use qishou::board::{square, Board, Color, Move};
use qishou::search::{Search, SearchParams};

fn engine(depth: u8, time_ms: u64) -> Search {
    Search::new(
        SearchParams::new()
            .max_depth(depth)
            .time_limit(time_ms)
            .tt_size_mb(1)
            .zobrist_seed(2024),
    )
}

#[test]
fn test_takes_the_general_when_possible() {
    let mut board = Board::from_fen("3k5/9/9/9/9/9/9/9/9/3RK4 w").expect("Invalid FEN");
    let mut search = engine(4, 0);
    let mv = search.request_ai_move(&mut board, Color::Red, 4, 0);
    assert_eq!(mv, Some(Move::new(square(9, 3), square(0, 3))));
}

#[test]
fn test_no_legal_move_resigns() {
    let mut board = Board::from_fen("3aka3/4n4/9/9/9/9/9/9/9/4K4 b").expect("Invalid FEN");
    let mut search = engine(3, 0);
    let result = search.search(&mut board, Color::Black);
    assert_eq!(result.best_move, None);
    assert_eq!(result.depth, 0);
}

#[test]
fn test_wins_hanging_chariot() {
    let mut board = Board::from_fen("4k4/9/9/9/r8/9/9/9/9/R2K5 w").expect("Invalid FEN");
    let mut search = engine(2, 0);
    let result = search.search(&mut board, Color::Red);
    assert_eq!(result.best_move, Some(Move::new(square(9, 0), square(4, 0))));
    assert!(result.score > 500, "score {}", result.score);
}

#[test]
fn test_time_budget_stops_deepening() {
    let mut board = Board::start_position();
    let mut search = engine(6, 1);
    let result = search.search(&mut board, Color::Red);
    assert!(result.best_move.is_some());
    assert!(result.depth >= 2, "depth {}", result.depth);
    assert!(result.depth < 6, "depth {}", result.depth);
}

#[test]
fn test_same_seed_same_choice() {
    let mut a = Board::start_position();
    let mut b = Board::start_position();
    let first = engine(3, 0).search(&mut a, Color::Red);
    let second = engine(3, 0).search(&mut b, Color::Red);
    assert_eq!(first, second);
}

#[test]
fn test_search_for_black_after_opening_move() {
    let mut board = Board::start_position();
    board.make_move(Move::new(square(7, 7), square(7, 4)));
    let mut search = engine(3, 0);
    let result = search.search(&mut board, Color::Black);
    let mv = result.best_move.expect("black has moves");
    assert_eq!(board.piece_on(mv.from()).map(|p| p.color), Some(Color::Black));
}
