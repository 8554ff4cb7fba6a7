use clap::Parser;
use qishou::board::{Board, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,
}

fn main() {
    let args = Args::parse();

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let mut board = match Board::from_fen(&args.fen) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("invalid FEN: {e}");
            std::process::exit(2);
        }
    };

    let start = std::time::Instant::now();
    let nodes = if args.divide && args.depth > 0 {
        let mut total = 0;
        for mv in board.generate_moves() {
            let n = board.play(mv).perft(args.depth - 1);
            println!("{mv}: {n}");
            total += n;
        }
        total
    } else {
        board.perft(args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
}
