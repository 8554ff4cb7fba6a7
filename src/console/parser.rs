//! Console command parser

/// Line commands understood by the console front end.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ConsoleCommand {
    /// ICCS move such as "h2e2", with or without a leading "move"
    Move(String),
    Undo,
    New,
    Board,
    Fen,
    Moves,
    /// Let the engine move now
    Go,
    Depth(u8),
    TimeLimit(u64),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn looks_like_iccs(token: &str) -> bool {
    let b = token.as_bytes();
    b.len() == 4
        && b[0].is_ascii_alphabetic()
        && b[1].is_ascii_digit()
        && b[2].is_ascii_alphabetic()
        && b[3].is_ascii_digit()
}

/// Parse a console command from a line (simple tokenizer)
pub fn parse_console_command(line: &str) -> ConsoleCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return ConsoleCommand::Empty;
    };

    match head.to_ascii_lowercase().as_str() {
        "move" | "m" => match parts.get(1) {
            Some(mv) => ConsoleCommand::Move(mv.to_ascii_lowercase()),
            None => ConsoleCommand::Unknown(line.trim().to_string()),
        },
        "undo" | "u" => ConsoleCommand::Undo,
        "new" | "restart" => ConsoleCommand::New,
        "board" | "d" => ConsoleCommand::Board,
        "fen" => ConsoleCommand::Fen,
        "moves" => ConsoleCommand::Moves,
        "go" => ConsoleCommand::Go,
        "depth" => match parts.get(1).and_then(|s| s.parse().ok()) {
            Some(d) if d > 0 => ConsoleCommand::Depth(d),
            _ => ConsoleCommand::Unknown(line.trim().to_string()),
        },
        "time" => match parts.get(1).and_then(|s| s.parse().ok()) {
            Some(ms) => ConsoleCommand::TimeLimit(ms),
            None => ConsoleCommand::Unknown(line.trim().to_string()),
        },
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ if parts.len() == 1 && looks_like_iccs(head) => {
            ConsoleCommand::Move(head.to_ascii_lowercase())
        }
        _ => ConsoleCommand::Unknown(line.trim().to_string()),
    }
}
