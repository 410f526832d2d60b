//! # Dungeon Crawler
//!
//! Room-graph generation and grid pathfinding for a tile-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! The crate is the headless core of the game. A host application owns the
//! frame loop and the display surface and calls into the core on discrete
//! events:
//!
//! - **World**: tiles, rooms and the room graph keyed by lattice coordinate
//! - **Generation**: random-walk room placement and door linking
//! - **Pathfinding**: A* across a single room's tile grid
//! - **Game State**: a discrete-event facade (key steps, click-to-walk, ticks)
//!
//! ```
//! use dungeon_crawler::{find_path, generate_room_set, link_doors, Position};
//!
//! let mut graph = generate_room_set(4, 7);
//! link_doors(&mut graph);
//!
//! let room = graph.find_room(0, 0).unwrap();
//! let path = find_path(room, Position::new(1, 1), Position::new(1, 1)).unwrap();
//! assert_eq!(path, Some(vec![Position::new(1, 1)]));
//! ```

pub mod game;
pub mod generation;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use utils::*;

/// Core error type for the dungeon crawler.
#[derive(thiserror::Error, Debug)]
pub enum CrawlerError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A tile coordinate fell outside the room grid
    #[error("Invalid coordinate ({x}, {y}) for a {width}x{height} room")]
    InvalidCoordinate {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the crate.
pub type CrawlerResult<T> = Result<T, CrawlerError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default generation constants.
pub mod config {
    /// Tiles per room row
    pub const COLUMNS: usize = 25;

    /// Tile rows per room
    pub const ROWS: usize = 15;

    /// Rooms generated per dungeon
    pub const ROOMS: usize = 10;

    /// Floor entries in the interior tile bag
    pub const FLOOR_WEIGHT: u32 = 4;

    /// Wall entries in the interior tile bag
    pub const WALL_WEIGHT: u32 = 1;

    /// Smallest room edge that still fits a three-tile doorway
    pub const MIN_ROOM_EDGE: usize = 3;
}
