//! # Dungeon Crawler Entry Point
//!
//! Generates a dungeon, prints its rooms as ASCII, and walks the player to a
//! requested tile of the entry room.

use clap::Parser;
use dungeon_crawler::{CrawlerError, CrawlerResult, GameState, GenerationConfig, Position, TileKind};
use log::{error, info};
use std::path::PathBuf;

/// Command line arguments for the dungeon crawler.
#[derive(Parser, Debug)]
#[command(name = "dungeon-crawler")]
#[command(about = "Generates a room graph and walks it with A* pathfinding")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rooms to generate
    #[arg(short, long)]
    rooms: Option<usize>,

    /// JSON generation config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tile in the entry room to walk to, as X,Y
    #[arg(short, long, value_parser = parse_position)]
    goal: Option<Position>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_position(text: &str) -> Result<Position, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{text}'"))?;
    let x = x.trim().parse::<i32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<i32>().map_err(|e| e.to_string())?;
    Ok(Position::new(x, y))
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .format_target(false)
        .init();

    info!("Starting dungeon crawler v{}", dungeon_crawler::VERSION);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> CrawlerResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading generation config from {}", path.display());
            GenerationConfig::load(path)?
        }
        None => GenerationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> CrawlerResult<()> {
    let config = load_config(args)?;
    info!("Generating {} rooms with seed {}", config.room_count, config.seed);

    let mut state = GameState::new(&config)?;

    for room in state.graph.rooms() {
        println!("Room {}", room.lattice());
        println!("{}", room);
    }

    let goal = match args.goal {
        Some(goal) => goal,
        None => {
            // Default to the last floor tile of the entry room
            let room = state.current_room()?;
            room.positions_of(TileKind::Floor)
                .last()
                .copied()
                .ok_or_else(|| CrawlerError::InvalidState("entry room has no floor".to_string()))?
        }
    };

    println!("Walking from {} to {}", state.player, goal);
    if !state.on_move_request(goal)? {
        println!("No path to {}", goal);
        return Ok(());
    }

    println!("{}", state.render_current_room()?);

    let mut steps = 0;
    while state.tick().is_some() {
        steps += 1;
    }
    println!("Arrived at {} after {} steps", state.player, steps);

    Ok(())
}
