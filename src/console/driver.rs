//! Console session: reads commands, drives the game and prints replies.

use std::io::{self, BufRead, Write};

use super::parser::{parse_console_command, ConsoleCommand};
use crate::board::{iccs_to_square, move_to_iccs, NotationError};
use crate::game::{Game, GameError, GameStatus};

const HELP: &str = "commands: <move> | move <iccs> | undo | new | board | fen | moves | go | depth <n> | time <ms> | quit";

pub struct ConsoleSession {
    game: Game,
    quit: bool,
}

impl ConsoleSession {
    pub fn new(game: Game) -> Self {
        Self { game, quit: false }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Lines to print on startup; lets the engine open when it plays red.
    pub fn greeting(&mut self) -> Vec<String> {
        let mut out = vec![format!(
            "qishou {} - you play {}",
            env!("CARGO_PKG_VERSION"),
            self.game.human()
        )];
        out.push(self.game.board().to_string());
        if self.game.side_to_move() == self.game.ai() {
            out.extend(self.engine_turn());
        }
        out
    }

    pub fn handle_command(&mut self, cmd: ConsoleCommand) -> Vec<String> {
        let mut out = Vec::new();
        match cmd {
            ConsoleCommand::Move(text) => match self.human_move(&text) {
                Ok(()) => {
                    out.push(self.game.board().to_string());
                    if !self.game.is_over() {
                        out.extend(self.engine_turn());
                    }
                    out.extend(self.status_line());
                }
                Err(msg) => {
                    log::warn!("rejected move {text}: {msg}");
                    out.push(format!("error: {msg}"));
                }
            },
            ConsoleCommand::Go => {
                out.extend(self.engine_turn());
                out.extend(self.status_line());
            }
            ConsoleCommand::Undo => match self.game.undo() {
                Ok(()) => out.push(self.game.board().to_string()),
                Err(e) => out.push(format!("error: {e}")),
            },
            ConsoleCommand::New => {
                self.game.reset();
                out.extend(self.greeting());
            }
            ConsoleCommand::Board => out.push(self.game.board().to_string()),
            ConsoleCommand::Fen => out.push(self.game.board().to_fen()),
            ConsoleCommand::Moves => {
                let moves: Vec<String> = self
                    .game
                    .legal_moves()
                    .into_iter()
                    .map(move_to_iccs)
                    .collect();
                out.push(format!("{} legal: {}", moves.len(), moves.join(" ")));
            }
            ConsoleCommand::Depth(d) => {
                self.game.search_mut().set_max_depth(d);
                out.push(format!("depth set to {d}"));
            }
            ConsoleCommand::TimeLimit(ms) => {
                self.game.search_mut().set_time_limit(ms);
                out.push(format!("time limit set to {ms} ms"));
            }
            ConsoleCommand::Help => out.push(HELP.to_string()),
            ConsoleCommand::Quit => self.quit = true,
            ConsoleCommand::Empty => {}
            ConsoleCommand::Unknown(s) => {
                log::debug!("unknown command: {s}");
                out.push(format!("unknown command: {s} (try 'help')"));
            }
        }
        out
    }

    fn human_move(&mut self, text: &str) -> Result<(), String> {
        if text.len() != 4 || !text.is_ascii() {
            return Err(NotationError::Length(text.to_string()).to_string());
        }
        let from = iccs_to_square(&text[0..2]).map_err(|e| e.to_string())?;
        let to = iccs_to_square(&text[2..4]).map_err(|e| e.to_string())?;
        self.game
            .apply_human_move(from, to)
            .map_err(|e| e.to_string())
    }

    fn engine_turn(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        let result = self.game.play_ai_move_with_progress(|info| {
            log::info!(
                "depth {} score {} nodes {} time {}ms pv {}",
                info.depth,
                info.score,
                info.nodes,
                info.elapsed.as_millis(),
                info.best_move.map_or_else(|| "-".to_string(), move_to_iccs)
            );
        });
        match result {
            Ok(Some(mv)) => {
                out.push(format!("engine plays {mv}"));
                out.push(self.game.board().to_string());
            }
            Ok(None) => out.push("engine has no legal move".to_string()),
            Err(GameError::GameOver) => {}
            Err(e) => out.push(format!("error: {e}")),
        }
        out
    }

    fn status_line(&self) -> Option<String> {
        match self.game.status() {
            GameStatus::Ongoing => None,
            GameStatus::Won(color) if color == self.game.human() => {
                Some(format!("{color} wins - you win"))
            }
            GameStatus::Won(color) => Some(format!("{color} wins - engine wins")),
        }
    }
}

/// Handle one input line; returns the reply lines.
pub fn process_console_line(session: &mut ConsoleSession, line: &str) -> Vec<String> {
    let cmd = parse_console_command(line);
    session.handle_command(cmd)
}

/// Run the console loop over stdin/stdout until quit or end of input.
pub fn run_console_loop(game: Game) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = ConsoleSession::new(game);

    for line in session.greeting() {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        for resp in process_console_line(&mut session, &line) {
            writeln!(stdout, "{}", resp)?;
        }
        stdout.flush()?;
        if session.should_quit() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::search::SearchParams;

    fn session(human: Color) -> ConsoleSession {
        let params = SearchParams::new()
            .max_depth(1)
            .time_limit(0)
            .tt_size_mb(1)
            .zobrist_seed(3);
        ConsoleSession::new(Game::new(human, params))
    }

    #[test]
    fn test_move_triggers_engine_reply() {
        let mut s = session(Color::Red);
        let out = process_console_line(&mut s, "h2e2");
        assert!(out.iter().any(|l| l.starts_with("engine plays")));
        assert_eq!(s.game().history().len(), 2);
        assert_eq!(s.game().side_to_move(), Color::Red);
    }

    #[test]
    fn test_illegal_move_reports_error() {
        let mut s = session(Color::Red);
        let out = process_console_line(&mut s, "move a0a5");
        assert!(out[0].starts_with("error:"));
        assert!(s.game().history().is_empty());
    }

    #[test]
    fn test_engine_opens_when_human_is_black() {
        let mut s = session(Color::Black);
        let out = s.greeting();
        assert!(out.iter().any(|l| l.starts_with("engine plays")));
        assert_eq!(s.game().side_to_move(), Color::Black);
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut s = session(Color::Red);
        assert!(process_console_line(&mut s, "quit").is_empty());
        assert!(s.should_quit());
    }
}
