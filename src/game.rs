//! Game session: the board, the engine opponent, move history and the
//! terminal state, as seen by a front end.

use thiserror::Error;

use crate::board::{Board, Color, FenError, Move, Piece, PieceKind, Undo};
use crate::search::{Search, SearchParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won(Color),
}

/// One played move with the position it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub captured: Option<Piece>,
    pub snapshot: Board,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("move {0} is not legal")]
    IllegalMove(Move),
    #[error("the game is over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("cannot undo while the engine is to move")]
    AiToMove,
}

pub struct Game {
    board: Board,
    search: Search,
    human: Color,
    history: Vec<HistoryEntry>,
    last_move: Option<Move>,
    status: GameStatus,
}

impl Game {
    /// New game from the standard opening.
    pub fn new(human: Color, params: SearchParams) -> Self {
        Self {
            board: Board::start_position(),
            search: Search::new(params),
            human,
            history: Vec::new(),
            last_move: None,
            status: GameStatus::Ongoing,
        }
    }

    /// New game from an arbitrary position.
    pub fn from_fen(fen: &str, human: Color, params: SearchParams) -> Result<Self, FenError> {
        let mut game = Self::new(human, params);
        game.board.set_from_fen(fen)?;
        game.refresh_status();
        Ok(game)
    }

    /// Back to the opening with a fresh search session (new keys, empty table).
    pub fn reset(&mut self) {
        let params = self.search.params().clone();
        *self = Self::new(self.human, params);
        log::info!("new game, human plays {}", self.human);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn ai(&self) -> Color {
        self.human.opponent()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn search_mut(&mut self) -> &mut Search {
        &mut self.search
    }

    /// Legal moves of the side to move; empty once the game is over.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.generate_moves()
    }

    /// Play a move for the human side. Rejected moves leave the game untouched.
    pub fn apply_human_move(&mut self, from: usize, to: usize) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.board.side != self.human {
            return Err(GameError::NotYourTurn(self.human));
        }
        let mv = self
            .board
            .generate_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .ok_or_else(|| GameError::IllegalMove(Move::new(from, to)))?;
        self.commit(mv);
        Ok(())
    }

    /// Let the engine move for its side. Returns the move played, or None
    /// when the engine has no legal move (the human then wins).
    pub fn play_ai_move(&mut self) -> Result<Option<Move>, GameError> {
        self.play_ai_move_with_progress(|_| {})
    }

    pub fn play_ai_move_with_progress<F>(&mut self, on_depth: F) -> Result<Option<Move>, GameError>
    where
        F: FnMut(&crate::search::SearchInfo),
    {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let ai = self.ai();
        if self.board.side != ai {
            return Err(GameError::NotYourTurn(ai));
        }
        let result = self
            .search
            .search_with_progress(&mut self.board, ai, on_depth);
        match result.best_move {
            Some(mv) => {
                self.commit(mv);
                Ok(Some(mv))
            }
            None => {
                log::info!("{ai} resigns");
                self.status = GameStatus::Won(self.human);
                Ok(None)
            }
        }
    }

    /// Take back the last move pair, returning the board to the human's turn.
    /// A finished game stays finished.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.history.is_empty() {
            return Err(GameError::NothingToUndo);
        }
        if self.board.side != self.human {
            return Err(GameError::AiToMove);
        }
        // Latest position the human moved from; normally pops the engine's
        // reply and the human move before it.
        let human = self.human;
        let idx = self
            .history
            .iter()
            .rposition(|h| h.snapshot.side == human)
            .ok_or(GameError::NothingToUndo)?;
        self.history.truncate(idx + 1);
        let entry = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.board = entry.snapshot;
        self.board.side = self.human;
        self.last_move = self.history.last().map(|h| h.mv);
        log::debug!("undo to {}", self.board.to_fen());
        Ok(())
    }

    fn commit(&mut self, mv: Move) {
        let snapshot = self.board.clone();
        let Undo { captured, .. } = self.board.make_move(mv);
        self.history.push(HistoryEntry {
            mv,
            captured,
            snapshot,
        });
        self.last_move = Some(mv);

        if captured.is_some_and(|p| p.kind == PieceKind::General) {
            let winner = self.board.side.opponent();
            log::info!("{winner} captures the general with {mv}");
            self.status = GameStatus::Won(winner);
            return;
        }
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        let side = self.board.side;
        self.status = if self.board.general_sq(side).is_none() {
            GameStatus::Won(side.opponent())
        } else if self.board.generate_moves().is_empty() {
            log::info!("{side} has no legal move");
            GameStatus::Won(side.opponent())
        } else {
            GameStatus::Ongoing
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square;

    fn quick() -> SearchParams {
        SearchParams::new()
            .max_depth(2)
            .time_limit(0)
            .tt_size_mb(1)
            .zobrist_seed(5)
    }

    #[test]
    fn test_new_game_state() {
        let mut game = Game::new(Color::Red, quick());
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(game.side_to_move(), Color::Red);
        assert_eq!(game.legal_moves().len(), 44);
        assert!(game.last_move().is_none());
    }

    #[test]
    fn test_reset_restores_opening() {
        let mut game = Game::new(Color::Red, quick());
        game.apply_human_move(square(7, 7), square(7, 4))
            .expect("central cannon is legal");
        game.reset();
        assert_eq!(game.board(), &Board::start_position());
        assert!(game.history().is_empty());
    }
}
