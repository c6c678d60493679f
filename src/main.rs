//! Gomoku: a minimax Gomoku engine on the command line.
//!
//! ## Usage
//!
//! - `gomoku` - Run the demo positions
//! - `gomoku suggest --moves "7,7 8,8"` - Engine move for the side to move
//! - `gomoku selfplay --black 1 --white 2` - Engine against engine

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use gomoku::rules::{check_win, is_draw};
use gomoku::{
    AIEngine, Board, Difficulty, MoveCoordinator, MoveEvent, Pos, SearchType, Stone,
};

/// Gomoku: minimax alpha-beta engine for the 15x15 game
#[derive(Parser)]
#[command(name = "gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the engine on a few fixed positions
    Demo,
    /// Replay moves (Black first) and print the engine's reply
    Suggest {
        /// Space-separated "row,col" moves, e.g. "7,7 8,8 7,8"
        #[arg(short, long, default_value = "")]
        moves: String,
        /// Difficulty level 1-3; anything else plays as 2
        #[arg(short, long, default_value_t = 2)]
        difficulty: i32,
    },
    /// Play the engine against itself
    Selfplay {
        /// Black's difficulty level
        #[arg(long, default_value_t = 1)]
        black: i32,
        /// White's difficulty level
        #[arg(long, default_value_t = 1)]
        white: i32,
        /// Stop after this many moves
        #[arg(long, default_value_t = 225)]
        max_moves: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    match cli.command {
        Some(Commands::Suggest { moves, difficulty }) => {
            run_suggest(&moves, Difficulty::from_level(difficulty))
        }
        Some(Commands::Selfplay {
            black,
            white,
            max_moves,
        }) => run_selfplay(
            Difficulty::from_level(black),
            Difficulty::from_level(white),
            max_moves,
        ),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Parse "r,c r,c ..." into a board, colors alternating from Black.
fn parse_moves(moves: &str) -> Result<Board> {
    let mut board = Board::new();
    for token in moves.split_whitespace() {
        let (row, col) = token
            .split_once(',')
            .ok_or_else(|| anyhow!("expected \"row,col\", got {token:?}"))?;
        let row: i32 = row.trim().parse().with_context(|| format!("bad row in {token:?}"))?;
        let col: i32 = col.trim().parse().with_context(|| format!("bad column in {token:?}"))?;
        let pos = Pos::try_new(row, col).ok_or_else(|| anyhow!("{token:?} is off the board"))?;
        board
            .place(pos, board.side_to_move())
            .with_context(|| format!("cannot play {token:?}"))?;
    }
    Ok(board)
}

fn run_suggest(moves: &str, difficulty: Difficulty) -> Result<()> {
    let board = parse_moves(moves)?;
    let color = board.side_to_move();
    println!("{board}");

    if let Some(last) = board.last_move() {
        if let Some(win) = check_win(&board, last) {
            println!("{} has already won.", win.winner);
            return Ok(());
        }
    }

    let engine = AIEngine::with_difficulty(difficulty);
    let result = engine
        .select_move(&board, color)
        .with_context(|| format!("engine found no move for {color}"))?;
    println!("{color} to move, difficulty {difficulty:?} (depth {})", engine.max_depth());
    println!("Best move: {}", result.best_move);
    println!("Score: {}", result.score);
    println!("Search type: {:?}", result.search_type);
    println!("Nodes: {}  Time: {}ms", result.nodes, result.time_ms);
    Ok(())
}

fn run_selfplay(black: Difficulty, white: Difficulty, max_moves: usize) -> Result<()> {
    let mut board = Board::new();
    let mut players = [
        MoveCoordinator::new(AIEngine::with_difficulty(black), Stone::Black),
        MoveCoordinator::new(AIEngine::with_difficulty(white), Stone::White),
    ];
    info!(?black, ?white, max_moves, "self-play started");

    let mut result = String::from("move limit reached");
    while board.history().len() < max_moves {
        let color = board.side_to_move();
        let player = &mut players[if color == Stone::Black { 0 } else { 1 }];
        player.request_move(&board);

        let pos = match player.wait() {
            Some(MoveEvent::Ready(pos)) => pos,
            Some(MoveEvent::Unavailable(err)) => {
                result = format!("{color} has no move: {err}");
                break;
            }
            Some(MoveEvent::Cancelled) | None => {
                result = format!("{color}'s search was interrupted");
                break;
            }
        };
        board
            .place(pos, color)
            .with_context(|| format!("{color} chose an illegal move {pos}"))?;
        println!("{:>3}. {color} {pos}", board.history().len());

        if let Some(win) = check_win(&board, pos) {
            result = format!("{} wins ({} to {})", win.winner, win.start, win.end);
            break;
        }
        if is_draw(&board) {
            result = String::from("draw");
            break;
        }
    }

    println!("\n{board}");
    println!("Result: {result}");
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Gomoku minimax engine\n");
    let engine = AIEngine::with_difficulty(Difficulty::Easy);
    let mut failures = 0;

    // Empty board: center
    let result = engine.select_move(&Board::new(), Stone::Black)?;
    failures += report(
        "opening at the center",
        result.best_move == Pos::CENTER && result.search_type == SearchType::Opening,
    );

    // Own four: complete it
    let board = Board::from_moves(
        [(7, 3), (7, 4), (7, 5), (7, 6)]
            .into_iter()
            .map(|(r, c)| (Pos::new(r, c), Stone::Black))
            .chain([(7, 2), (9, 9), (10, 10)].map(|(r, c)| (Pos::new(r, c), Stone::White))),
    )?;
    let result = engine.select_move(&board, Stone::Black)?;
    failures += report(
        "completing own four",
        result.best_move == Pos::new(7, 7) && result.search_type == SearchType::ImmediateWin,
    );

    // Opponent four: block it
    let board = Board::from_moves(
        [(7, 3), (7, 4), (7, 5), (7, 6)]
            .into_iter()
            .map(|(r, c)| (Pos::new(r, c), Stone::Black))
            .chain([(7, 2), (9, 9)].map(|(r, c)| (Pos::new(r, c), Stone::White))),
    )?;
    let result = engine.select_move(&board, Stone::White)?;
    failures += report("blocking opponent four", result.best_move == Pos::new(7, 7));
    println!("\n{board}");
    println!("White blocks at {}", result.best_move);

    if failures > 0 {
        return Err(anyhow!("{failures} demo check(s) failed"));
    }
    Ok(())
}

fn report(name: &str, passed: bool) -> u32 {
    println!("[{}] {name}", if passed { "PASS" } else { "FAIL" });
    u32::from(!passed)
}
