//! Headless citytetris runner (default binary).
//!
//! `simulate` (the default) plays a seeded session with a random auto-player
//! and prints the final board, the score breakdown and the move log.
//! `replay` rebuilds a board from move-log entries and scores it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use citytetris::core::{
    build_grid, evaluate, BoardSize, GameState, Placement, Score, SessionConfig, SimpleRng,
};
use citytetris::types::{
    Intent, FULL_ROWS_WEIGHT, LONGEST_ROAD_WEIGHT, L_J_COMMUNITIES_WEIGHT, T_COMMUNITY_WEIGHT,
};

/// Upper bound on simulated ticks, in case the auto-player never tops out.
const MAX_TICKS: u64 = 2_000_000;

/// Falling-block simulation scored by how the settled pieces touch.
#[derive(Debug, Parser)]
#[command(name = "citytetris", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Board size preset; --width/--height override it.
    #[arg(long, value_enum, default_value = "normal", global = true)]
    size: SizeArg,

    /// Board width in cells.
    #[arg(long, value_name = "COLS", global = true)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long, value_name = "ROWS", global = true)]
    height: Option<u16>,

    /// Seed for the piece sequence and the auto-player; random if omitted.
    #[arg(long)]
    seed: Option<u32>,

    /// Stop the simulation after this many locked pieces.
    #[arg(long, default_value = "200", value_name = "N")]
    pieces: usize,

    /// Print the board after every lock.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a session with the random auto-player (default).
    Simulate,
    /// Rebuild a board from move-log entries such as `IR Ir`.
    Replay {
        /// Spawn pieces centered instead of at the left edge.
        #[arg(long)]
        centered: bool,

        /// Move-log entries, one per piece.
        #[arg(required = true)]
        entries: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SizeArg {
    Small,
    Normal,
}

impl From<SizeArg> for BoardSize {
    fn from(value: SizeArg) -> Self {
        match value {
            SizeArg::Small => BoardSize::Small,
            SizeArg::Normal => BoardSize::Normal,
        }
    }
}

impl Args {
    fn dimensions(&self) -> (u16, u16) {
        let (width, height) = BoardSize::from(self.size).dimensions();
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    match &args.command {
        None | Some(Command::Simulate) => simulate(&args),
        Some(Command::Replay { centered, entries }) => replay(&args, *centered, entries),
    }
}

fn simulate(args: &Args) -> Result<()> {
    let (width, height) = args.dimensions();
    let mut config = SessionConfig::new(width, height);
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    let mut game = GameState::new(config).context("invalid session configuration")?;
    game.start();
    println!("[Sim] {}x{} board, seed {}", width, height, game.seed());

    let mut player = SimpleRng::new(game.seed().rotate_left(16) ^ 0x9E37_79B9);
    let mut locked = 0;
    let mut ticks: u64 = 0;

    while !game.game_over() && locked < args.pieces && ticks < MAX_TICKS {
        let intents = auto_intents(&mut player);
        let outcome = match game.advance(&intents) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("[Sim] session stopped: {e}");
                break;
            }
        };
        ticks += 1;

        if outcome.locked.is_none() {
            continue;
        }
        locked += 1;
        if let Some(event) = game.take_last_event() {
            if args.verbose {
                println!(
                    "[Sim] locked #{} {} (total {})",
                    event.piece,
                    event.kind.symbol(),
                    event.score.total()
                );
                println!("{}", game.grid());
            }
        }
    }

    let reason = if game.game_over() { "game over" } else { "piece limit" };
    println!(
        "[Sim] {} after {} pieces, {} ticks",
        reason,
        game.grid().len(),
        ticks
    );
    println!("{}", game.grid());
    print_score("[Sim]", &game.score());
    println!("[Sim] move log: {}", game.locked_entries().join(" "));
    Ok(())
}

fn replay(args: &Args, centered: bool, entries: &[String]) -> Result<()> {
    let (width, height) = args.dimensions();
    let placement = if centered {
        Placement::Centered
    } else {
        Placement::Origin
    };

    let grid = build_grid(entries, width, height, placement)
        .context("failed to rebuild board from move log")?;
    println!("[Replay] {} pieces on a {}x{} board", grid.len(), width, height);
    println!("{grid}");
    if args.verbose {
        for (piece, entry) in grid.pieces().iter().zip(entries) {
            println!(
                "[Replay] {:<12} -> rotation {} at {:?}",
                entry,
                piece.rotation().index(),
                piece.anchor()
            );
        }
    }
    print_score("[Replay]", &evaluate(&grid).score);
    Ok(())
}

/// At most one random intent per tick; idle most of the time so gravity
/// does the rest.
fn auto_intents(rng: &mut SimpleRng) -> Vec<Intent> {
    let intent = match rng.next_range(100) {
        0..=5 => Some(Intent::MoveLeft),
        6..=11 => Some(Intent::MoveRight),
        12..=14 => Some(Intent::Rotate),
        15 => Some(Intent::HardDrop),
        _ => None,
    };
    intent.into_iter().collect()
}

fn print_score(tag: &str, score: &Score) {
    let rows = [
        ("full rows", score.full_rows, FULL_ROWS_WEIGHT),
        ("longest road", score.longest_road, LONGEST_ROAD_WEIGHT),
        ("l-j communities", score.l_j_communities, L_J_COMMUNITIES_WEIGHT),
        ("t community", score.t_community, T_COMMUNITY_WEIGHT),
    ];
    for (name, value, weight) in rows {
        println!("{tag} {name:<16} {value:>3} x {weight} = {}", value * weight);
    }
    println!("{tag} {:<16} {:>3}", "total", score.total());
}
