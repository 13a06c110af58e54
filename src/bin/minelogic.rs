//! minelogic CLI
//!
//! Plays one game on a random board and reports how far pure deduction got.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use minelogic::{Board, Game, GameConfig, HazardOracle};

/// Play a minesweeper game driven by the knowledge-base engine.
#[derive(Debug, Parser)]
#[command(name = "minelogic", version, about)]
struct Args {
    /// JSON game configuration; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rows [default: 8]
    #[arg(long)]
    height: Option<usize>,

    /// Number of columns [default: 8]
    #[arg(long)]
    width: Option<usize>,

    /// Number of hazards [default: 8]
    #[arg(long)]
    hazards: Option<usize>,

    /// RNG seed for board layout and guesses
    #[arg(long)]
    seed: Option<u64>,

    /// Disable subsumption, leaving only direct resolution
    #[arg(long)]
    no_subsumption: bool,

    /// Print the hidden board after the game
    #[arg(long)]
    show_board: bool,

    /// Print the summary and final knowledge as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<GameConfig, minelogic::MineError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(hazards) = args.hazards {
        config.hazards = hazards;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_subsumption {
        config.engine.subsumption = false;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let board = Board::random(config.bounds()?, config.hazards, &mut rng)?;
    let mut game = Game::new(board, config.engine, rng);
    let summary = game.play()?;

    if args.json {
        let out = serde_json::json!({
            "config": config,
            "summary": summary,
            "knowledge": game.knowledge().snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let bounds = game.oracle().bounds();
        println!("minelogic v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "Board: {}x{} with {} hazards",
            bounds.height(),
            bounds.width(),
            game.oracle().hazard_count()
        );
        println!("Outcome: {:?}", summary.outcome);
        println!(
            "Moves: {} ({} safe, {} guesses)",
            summary.moves, summary.safe_moves, summary.guesses
        );
        println!("Hazards proven: {}", summary.flagged);
        println!("Live statements: {}", game.knowledge().statements().len());
    }

    if args.show_board {
        println!("{}", game.oracle());
    }
    Ok(())
}
