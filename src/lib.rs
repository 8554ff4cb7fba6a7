//! qishou: a Xiangqi (Chinese chess) rules engine with an alpha-beta opponent.

pub mod board;
pub mod console;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod search;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, PieceKind, START_FEN};
pub use game::{Game, GameError, GameStatus};
pub use search::{Search, SearchParams, SearchResult};
