use std::io::{self, BufRead, Write};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use xiangqi_rules::game_state::game_state::GameState;
use xiangqi_rules::move_generation::perft::perft_legal;
use xiangqi_rules::utils::random_playout::random_playout;

/// Interactive xiangqi console. Reads one command per line from stdin.
#[derive(Debug, Parser)]
#[command(name = "xiangqi_rules", version)]
struct Args {
    /// Seed for the opening playout.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Random plies to play from the starting position before the prompt.
    #[arg(long, default_value_t = 0)]
    random_plies: usize,
}

const HELP: &str = "\
commands:
  <ff> <fr> <tf> <tr>   move from (file, rank) to (file, rank)
  board                 print the board
  moves                 list the moves available to the side to move
  undo                  take back the last move
  reset                 return to the starting position
  perft <depth>         count move-tree nodes from the current position (capped depth)
  quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = GameState::new_game();

    if args.random_plies > 0 {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let played = random_playout(&mut game, args.random_plies, &mut rng);
        info!(seed = args.seed, played, "started from a random position");
    }

    print_position(&game);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "failed to read stdin");
                break;
            }
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["help"] => println!("{HELP}"),
            ["board"] => print_position(&game),
            ["moves"] => {
                let moves = game.legal_moves();
                println!("{} moves", moves.len());
                for mv in moves {
                    println!("  {mv}");
                }
            }
            ["undo"] => match game.undo_move() {
                Ok(undone) => {
                    println!("undid {}", undone.mv);
                    print_position(&game);
                }
                Err(reason) => println!("error: {reason}"),
            },
            ["reset"] => {
                game = GameState::new_game();
                print_position(&game);
            }
            ["perft", depth] => match depth.parse::<u8>() {
                Ok(depth) => match perft_legal(&game, depth) {
                    Ok(counts) => println!(
                        "depth {depth}: {} nodes, {} captures",
                        counts.nodes, counts.captures
                    ),
                    Err(err) => println!("error: {err}"),
                },
                Err(_) => println!("error: depth must be a small non-negative integer"),
            },
            [ff, fr, tf, tr] => match parse_coordinates([ff, fr, tf, tr]) {
                Some([ff, fr, tf, tr]) => match game.make_move(ff, fr, tf, tr) {
                    Ok(()) => print_position(&game),
                    Err(reason) => println!("illegal ({}): {reason}", reason.name()),
                },
                None => println!("error: coordinates must be integers 0-255"),
            },
            _ => println!("unknown command, try `help`"),
        }

        stdout.flush().ok();
    }
}

fn print_position(game: &GameState) {
    let moves: Vec<String> = game.legal_moves().iter().map(ToString::to_string).collect();
    println!(
        "{}\n\n{} to move, {} legal moves:\n  {}",
        game.render(),
        game.side_to_move(),
        moves.len(),
        moves.join(", ")
    );
}

fn parse_coordinates(tokens: [&&str; 4]) -> Option<[u8; 4]> {
    let mut out = [0u8; 4];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token.parse().ok()?;
    }
    Some(out)
}
