//! # Generation Module
//!
//! Procedural content generation for dungeons.
//!
//! Rooms are placed on an integer lattice by a random walk, each filled with
//! its own tile grid, and then stitched together with doorways wherever two
//! rooms sit side by side on the lattice.

pub mod doors;
pub mod dungeon;

pub use doors::*;
pub use dungeon::*;

use crate::config::{COLUMNS, FLOOR_WEIGHT, MIN_ROOM_EDGE, ROOMS, ROWS, WALL_WEIGHT};
use crate::{CrawlerError, CrawlerResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// Controls the room count, room grid dimensions and the floor/wall mix of
/// room interiors. Can be loaded from JSON; missing fields fall back to the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Number of rooms to place
    pub room_count: usize,
    /// Tile columns per room
    pub columns: usize,
    /// Tile rows per room
    pub rows: usize,
    /// Relative chance of an interior tile being Floor
    pub floor_weight: u32,
    /// Relative chance of an interior tile being Wall
    pub wall_weight: u32,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_crawler::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.room_count, 10);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            room_count: ROOMS,
            columns: COLUMNS,
            rows: ROWS,
            floor_weight: FLOOR_WEIGHT,
            wall_weight: WALL_WEIGHT,
        }
    }

    /// Creates a configuration for testing with fewer, smaller rooms.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            room_count: 4,
            columns: 9,
            rows: 7,
            floor_weight: FLOOR_WEIGHT,
            wall_weight: WALL_WEIGHT,
        }
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> CrawlerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CrawlerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that the values describe a buildable dungeon.
    pub fn validate(&self) -> CrawlerResult<()> {
        if self.columns < MIN_ROOM_EDGE || self.rows < MIN_ROOM_EDGE {
            return Err(CrawlerError::InvalidConfig(format!(
                "room grid {}x{} is smaller than {MIN_ROOM_EDGE}x{MIN_ROOM_EDGE}",
                self.columns, self.rows
            )));
        }

        if self.interior_bag()? == 0 {
            return Err(CrawlerError::InvalidConfig(
                "floor and wall weights are both zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Size of the weighted bag interior tiles are drawn from.
    pub fn interior_bag(&self) -> CrawlerResult<u32> {
        self.floor_weight.checked_add(self.wall_weight).ok_or_else(|| {
            CrawlerError::InvalidConfig(format!(
                "floor weight {} plus wall weight {} overflows",
                self.floor_weight, self.wall_weight
            ))
        })
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> CrawlerResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> CrawlerResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::{Direction, Position, RoomGraph};
    use ::pathfinding::prelude::bfs_reach;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Lattice coordinates reachable from `from` by stepping between
    /// side-by-side rooms.
    pub fn reachable_rooms(graph: &RoomGraph, from: Position) -> HashSet<Position> {
        if !graph.contains(from.x, from.y) {
            return HashSet::new();
        }

        bfs_reach(from, |lattice| {
            let lattice = *lattice;
            Direction::all()
                .into_iter()
                .map(move |direction| lattice.step(direction))
                .filter(|neighbour| graph.contains(neighbour.x, neighbour.y))
                .collect::<Vec<_>>()
        })
        .collect()
    }

    /// Validates that every room can be reached from the entry room.
    pub fn validate_connectivity(graph: &RoomGraph) -> CrawlerResult<()> {
        let entry = match graph.entry_room() {
            Some(room) => room.lattice(),
            None => return Ok(()),
        };

        let reachable = reachable_rooms(graph, entry);
        if reachable.len() != graph.len() {
            return Err(CrawlerError::GenerationFailed(format!(
                "only {} of {} rooms reachable from {}",
                reachable.len(),
                graph.len(),
                entry
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Room, RoomGraph};

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.columns, 25);
        assert_eq!(config.rows, 15);
        assert_eq!((config.floor_weight, config.wall_weight), (4, 1));
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_tiny_rooms() {
        let mut config = GenerationConfig::default();
        config.rows = 2;
        assert!(matches!(config.validate(), Err(CrawlerError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_zero_weights() {
        let mut config = GenerationConfig::default();
        config.floor_weight = 0;
        config.wall_weight = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_overflowing_weights() {
        let result = GenerationConfig::from_json_str(r#"{ "floor_weight": 4294967295, "wall_weight": 1 }"#);
        assert!(matches!(result, Err(CrawlerError::InvalidConfig(_))));

        let mut config = GenerationConfig::default();
        config.floor_weight = u32::MAX;
        config.wall_weight = 0;
        assert_eq!(config.interior_bag().unwrap(), u32::MAX);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config = GenerationConfig::from_json_str(r#"{ "seed": 9, "room_count": 3 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.room_count, 3);
        assert_eq!(config.columns, 25);

        let round_trip = serde_json::to_string(&config).unwrap();
        assert_eq!(GenerationConfig::from_json_str(&round_trip).unwrap(), config);
    }

    #[test]
    fn test_config_from_bad_json() {
        assert!(matches!(
            GenerationConfig::from_json_str("{ not json"),
            Err(CrawlerError::Serde(_))
        ));
        assert!(matches!(
            GenerationConfig::from_json_str(r#"{ "columns": 1 }"#),
            Err(CrawlerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_utils_rng_is_seeded() {
        use rand::Rng;

        let config = GenerationConfig::new(12345);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_connectivity_validation() {
        let mut graph = RoomGraph::new();
        assert!(utils::validate_connectivity(&graph).is_ok());

        graph.insert(Room::walled(Position::new(0, 0), 5, 5));
        graph.insert(Room::walled(Position::new(0, 1), 5, 5));
        assert!(utils::validate_connectivity(&graph).is_ok());

        graph.insert(Room::walled(Position::new(3, 3), 5, 5));
        assert!(matches!(
            utils::validate_connectivity(&graph),
            Err(CrawlerError::GenerationFailed(_))
        ));
        assert_eq!(utils::reachable_rooms(&graph, Position::origin()).len(), 2);
    }
}
