// Board layout: 10 rows x 9 columns, row-major, index = row * 9 + col.
// Row 0 is black's back rank, row 9 is red's back rank.

use std::fmt;
use std::ops::{Deref, DerefMut};

use thiserror::Error;

pub const ROWS: usize = 10;
pub const COLS: usize = 9;
pub const NUM_SQUARES: usize = ROWS * COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    General = 0,
    Advisor = 1,
    Elephant = 2,
    Horse = 3,
    Chariot = 4,
    Cannon = 5,
    Soldier = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const NUM: usize = 14;

    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Dense index: red pieces 0..7, black pieces 7..14.
    pub fn index(self) -> usize {
        (self.color as usize) * 7 + (self.kind as usize)
    }

    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        match self.color {
            Color::Red => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        let kind = match ch.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Advisor,
            'b' | 'e' => PieceKind::Elephant,
            'n' | 'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };
        let color = if ch.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        Some(Self::new(kind, color))
    }
}

pub fn square(row: usize, col: usize) -> usize {
    assert!(row < ROWS && col < COLS, "square ({row}, {col}) off board");
    row * COLS + col
}

pub fn row_of(sq: usize) -> usize {
    sq / COLS
}

pub fn col_of(sq: usize) -> usize {
    sq % COLS
}

/// Offset a square by (dr, dc); None when the target falls off the board.
pub fn offset(sq: usize, dr: i32, dc: i32) -> Option<usize> {
    let r = row_of(sq) as i32 + dr;
    let c = col_of(sq) as i32 + dc;
    if (0..ROWS as i32).contains(&r) && (0..COLS as i32).contains(&c) {
        Some(r as usize * COLS + c as usize)
    } else {
        None
    }
}

/// Palace: columns 3-5, rows 0-2 for black and 7-9 for red.
pub fn in_palace(sq: usize, color: Color) -> bool {
    let (r, c) = (row_of(sq), col_of(sq));
    let rows_ok = match color {
        Color::Black => r <= 2,
        Color::Red => r >= 7,
    };
    rows_ok && (3..=5).contains(&c)
}

/// True while `sq` is on `color`'s side of the river.
pub fn on_own_side(sq: usize, color: Color) -> bool {
    match color {
        Color::Black => row_of(sq) <= 4,
        Color::Red => row_of(sq) >= 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: u8,
    to: u8,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        assert!(
            from < NUM_SQUARES && to < NUM_SQUARES,
            "move {from}->{to} off board"
        );
        Self {
            from: from as u8,
            to: to as u8,
        }
    }

    pub fn from(self) -> usize {
        self.from as usize
    }

    pub fn to(self) -> usize {
        self.to as usize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_iccs(*self))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("move notation must be four characters, got {0:?}")]
    Length(String),
    #[error("invalid square {0:?}")]
    Square(String),
    #[error("move {0} is not legal in this position")]
    Illegal(String),
}

fn square_to_iccs(sq: usize) -> String {
    let file = (b'a' + col_of(sq) as u8) as char;
    let rank = (b'0' + (ROWS - 1 - row_of(sq)) as u8) as char;
    format!("{file}{rank}")
}

/// ICCS coordinates, e.g. the central cannon opening is "h2e2".
pub fn move_to_iccs(mv: Move) -> String {
    format!("{}{}", square_to_iccs(mv.from()), square_to_iccs(mv.to()))
}

pub fn iccs_to_square(s: &str) -> Result<usize, NotationError> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::Square(s.to_string()));
    }
    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'i').contains(&file) || !rank.is_ascii_digit() {
        return Err(NotationError::Square(s.to_string()));
    }
    let col = (file - b'a') as usize;
    let row = ROWS - 1 - (rank - b'0') as usize;
    Ok(square(row, col))
}

/// Parse an ICCS move and match it against the legal moves of the side to move.
pub fn parse_iccs_move(board: &mut Board, s: &str) -> Result<Move, NotationError> {
    let s = s.trim();
    if s.len() != 4 || !s.is_ascii() {
        return Err(NotationError::Length(s.to_string()));
    }
    let from = iccs_to_square(&s[0..2])?;
    let to = iccs_to_square(&s[2..4])?;
    board
        .generate_moves()
        .into_iter()
        .find(|mv| mv.from() == from && mv.to() == to)
        .ok_or_else(|| NotationError::Illegal(s.to_string()))
}

/// What `make_move` changed, enough to reverse it and to update the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub moved: Piece,
    pub captured: Option<Piece>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; NUM_SQUARES],
    pub side: Color,
}

pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

impl Board {
    /// Empty board, red to move.
    pub fn new() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
            side: Color::Red,
        }
    }

    pub fn start_position() -> Self {
        let mut board = Self::new();
        board
            .set_from_fen(START_FEN)
            .expect("start position FEN is valid");
        board
    }

    pub fn piece_on(&self, sq: usize) -> Option<Piece> {
        self.cells[sq]
    }

    pub fn is_occupied(&self, sq: usize) -> bool {
        self.cells[sq].is_some()
    }

    pub fn set_piece(&mut self, sq: usize, piece: Piece) {
        self.cells[sq] = Some(piece);
    }

    pub fn remove_piece(&mut self, sq: usize) -> Option<Piece> {
        self.cells[sq].take()
    }

    /// Occupied squares with their pieces, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(sq, p)| p.map(|p| (sq, p)))
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.cells[mv.from()]
            .take()
            .unwrap_or_else(|| panic!("make_move {mv}: no piece on source square"));
        // Captured piece is read from the board now, never carried on the move.
        let captured = self.cells[mv.to()].replace(moved);
        self.side = self.side.opponent();
        Undo {
            mv,
            moved,
            captured,
        }
    }

    pub fn unmake_move(&mut self, undo: Undo) {
        self.cells[undo.mv.from()] = Some(undo.moved);
        self.cells[undo.mv.to()] = undo.captured;
        self.side = self.side.opponent();
    }

    /// Apply `mv` for the lifetime of the returned guard.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        let undo = self.make_move(mv);
        MoveGuard {
            board: self,
            undo: Some(undo),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Undoes its move on drop, on every exit path of the borrowing scope.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl MoveGuard<'_> {
    pub fn undo_info(&self) -> &Undo {
        self.undo.as_ref().expect("guard holds its undo until drop")
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.unmake_move(undo);
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("missing piece placement field")]
    MissingPlacement,
    #[error("expected 10 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {0} does not describe exactly 9 files")]
    FileCount(usize),
    #[error("invalid piece character {0:?}")]
    PieceChar(char),
    #[error("invalid side to move {0:?}")]
    Side(String),
    #[error("{0} has more than one general")]
    ExtraGeneral(Color),
    #[error("{piece:?} outside its allowed area at {square}")]
    Placement { piece: Piece, square: String },
}

// FEN parsing/serialisation
impl Board {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Self::new();
        board.set_from_fen(fen)?;
        Ok(board)
    }

    /// Replace the whole position. On error the board is left untouched.
    pub fn set_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::MissingPlacement)?;
        let side = match parts.next() {
            None | Some("w") | Some("r") => Color::Red,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::Side(other.to_string())),
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != ROWS {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut cells = [None; NUM_SQUARES];
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    col += skip as usize;
                } else {
                    let piece = Piece::from_char(ch).ok_or(FenError::PieceChar(ch))?;
                    if col >= COLS {
                        return Err(FenError::FileCount(row));
                    }
                    cells[square(row, col)] = Some(piece);
                    col += 1;
                }
                if col > COLS {
                    return Err(FenError::FileCount(row));
                }
            }
            if col != COLS {
                return Err(FenError::FileCount(row));
            }
        }

        validate_placement(&cells)?;
        self.cells = cells;
        self.side = side;
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(96);
        for row in 0..ROWS {
            let mut empty = 0;
            for col in 0..COLS {
                match self.cells[square(row, col)] {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row + 1 < ROWS {
                out.push('/');
            }
        }
        out.push_str(match self.side {
            Color::Red => " w - - 0 1",
            Color::Black => " b - - 0 1",
        });
        out
    }
}

fn validate_placement(cells: &[Option<Piece>; NUM_SQUARES]) -> Result<(), FenError> {
    let mut generals = [0u8; 2];
    for (sq, cell) in cells.iter().enumerate() {
        let Some(piece) = *cell else { continue };
        let allowed = match piece.kind {
            PieceKind::General => {
                generals[piece.color as usize] += 1;
                if generals[piece.color as usize] > 1 {
                    return Err(FenError::ExtraGeneral(piece.color));
                }
                in_palace(sq, piece.color)
            }
            PieceKind::Advisor => in_palace(sq, piece.color),
            PieceKind::Elephant => on_own_side(sq, piece.color),
            _ => true,
        };
        if !allowed {
            return Err(FenError::Placement {
                piece,
                square: square_to_iccs(sq),
            });
        }
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "{} ", ROWS - 1 - row)?;
            for col in 0..COLS {
                let ch = self.cells[square(row, col)].map_or('.', Piece::to_char);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
            if row == 4 {
                writeln!(f, "   ~~~~~~~~~~~~~~~~~")?;
            }
        }
        writeln!(f, "   a b c d e f g h i")?;
        write!(f, "{} to move", self.side)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_roundtrip_start() {
        let board = Board::start_position();
        assert_eq!(board.to_fen(), START_FEN);
        assert_eq!(board.side, Color::Red);
        assert_eq!(
            board.piece_on(square(9, 4)),
            Some(Piece::new(PieceKind::General, Color::Red))
        );
        assert_eq!(
            board.piece_on(square(2, 1)),
            Some(Piece::new(PieceKind::Cannon, Color::Black))
        );
    }

    #[test]
    fn test_fen_rejects_bad_layouts() {
        assert_eq!(
            Board::from_fen("rnbakabnr/9/9 w"),
            Err(FenError::RankCount(3))
        );
        assert_eq!(
            Board::from_fen("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABN w"),
            Err(FenError::FileCount(9))
        );
        assert!(matches!(
            Board::from_fen("4k4/9/9/9/9/9/9/9/9/K8 w"),
            Err(FenError::Placement { .. })
        ));
        assert_eq!(
            Board::from_fen("3kk4/9/9/9/9/9/9/9/9/4K4 w"),
            Err(FenError::ExtraGeneral(Color::Black))
        );
        assert!(matches!(
            Board::from_fen("4k4/9/9/9/9/2B6/9/9/9/4K4 w"),
            Ok(_)
        ));
        assert!(matches!(
            Board::from_fen("4k4/9/9/9/2B6/9/9/9/9/4K4 w"),
            Err(FenError::Placement { .. })
        ));
    }

    #[test]
    fn test_iccs_notation() {
        assert_eq!(iccs_to_square("a0"), Ok(square(9, 0)));
        assert_eq!(iccs_to_square("i9"), Ok(square(0, 8)));
        let mv = Move::new(square(7, 7), square(7, 4));
        assert_eq!(move_to_iccs(mv), "h2e2");

        let mut board = Board::start_position();
        assert_eq!(parse_iccs_move(&mut board, "h2e2"), Ok(mv));
        assert!(matches!(
            parse_iccs_move(&mut board, "h2e3"),
            Err(NotationError::Illegal(_))
        ));
        assert!(matches!(
            parse_iccs_move(&mut board, "z2e2"),
            Err(NotationError::Square(_))
        ));
    }

    #[test]
    fn test_make_unmake_restores_capture() {
        let mut board =
            Board::from_fen("4k4/9/9/9/9/9/9/4r4/9/4RK3 w").expect("valid fen");
        let before = board.clone();
        let mv = Move::new(square(9, 4), square(7, 4));
        let undo = board.make_move(mv);
        assert_eq!(
            undo.captured,
            Some(Piece::new(PieceKind::Chariot, Color::Black))
        );
        assert_eq!(board.side, Color::Black);
        board.unmake_move(undo);
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_guard_undoes_on_drop() {
        let mut board = Board::start_position();
        let before = board.clone();
        {
            let guard = board.play(Move::new(square(7, 7), square(7, 4)));
            assert!(guard.piece_on(square(7, 4)).is_some());
            assert_eq!(guard.undo_info().captured, None);
        }
        assert_eq!(board, before);
    }

    #[test]
    #[should_panic]
    fn test_move_off_board_panics() {
        let _ = Move::new(90, 0);
    }
}
