//! qishou console entry point: play Xiangqi against the engine.

use clap::{Parser, ValueEnum};
use std::io::Write;

use qishou::search::SearchParams;
use qishou::{Color, Game};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    Red,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Color::Red,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maximum search depth in plies
    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Time budget per engine move in milliseconds (0 = depth only)
    #[arg(short, long, default_value_t = 3000)]
    time_ms: u64,

    /// Transposition table size in MB
    #[arg(long, default_value_t = 16)]
    hash_mb: usize,

    /// Side played by the human
    #[arg(long, value_enum, default_value_t = Side::Red)]
    human: Side,

    /// Start from this position instead of the opening
    #[arg(long)]
    fen: Option<String>,

    /// Fixed Zobrist seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, &args.log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    let mut params = SearchParams::new()
        .max_depth(args.depth)
        .time_limit(args.time_ms)
        .tt_size_mb(args.hash_mb);
    if let Some(seed) = args.seed {
        params = params.zobrist_seed(seed);
    }

    let human = Color::from(args.human);
    let game = match &args.fen {
        Some(fen) => match Game::from_fen(fen, human, params) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("invalid FEN: {e}");
                std::process::exit(2);
            }
        },
        None => Game::new(human, params),
    };

    if let Err(e) = qishou::console::run_console_loop(game) {
        eprintln!("console loop failed: {:?}", e);
        std::process::exit(1);
    }
}
