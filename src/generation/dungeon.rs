//! # Dungeon Generation
//!
//! Room-set generation by random lattice walk.
//!
//! The walk starts with a room at the lattice origin and keeps stepping one
//! lattice cell along a random axis in a random direction. Stepping onto an
//! occupied cell only moves the cursor; stepping onto an empty cell creates a
//! room there. Every room is therefore adjacent to the cell the walk came
//! from, which keeps the whole set connected. Cycles are possible.

use crate::generation::utils;
use crate::{
    CrawlerError, CrawlerResult, Direction, GenerationConfig, Generator, Position, Room, RoomGraph,
    TileKind,
};
use log::{debug, info};
use rand::{rngs::StdRng, Rng};
use std::collections::HashSet;

/// Generator that places rooms along a random walk over the lattice.
#[derive(Debug, Clone, Default)]
pub struct RoomWalkGenerator;

impl RoomWalkGenerator {
    /// Creates a new room-walk generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_crawler::{GenerationConfig, Generator, RoomWalkGenerator};
    /// use dungeon_crawler::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = create_rng(&config);
    /// let graph = RoomWalkGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(graph.len(), config.room_count);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Picks the next walk step: first the axis, then the sign.
    fn random_step(&self, rng: &mut StdRng) -> Direction {
        let along_x = rng.gen_bool(0.5);
        let negative = rng.gen_bool(0.5);

        match (along_x, negative) {
            (true, true) => Direction::West,
            (true, false) => Direction::East,
            (false, true) => Direction::North,
            (false, false) => Direction::South,
        }
    }

    /// Builds one room's grid: Wall border, weighted Floor/Wall interior.
    fn fill_room(&self, lattice: Position, config: &GenerationConfig, rng: &mut StdRng) -> CrawlerResult<Room> {
        let mut room = Room::walled(lattice, config.columns, config.rows);
        let bag = config.interior_bag()?;

        for y in 1..(config.rows - 1) {
            for x in 1..(config.columns - 1) {
                // Draw one slot from a bag of floor_weight Floors then wall_weight Walls
                if rng.gen_range(0..bag) >= config.floor_weight {
                    room.set_kind(Position::new(x as i32, y as i32), TileKind::Wall)?;
                }
            }
        }

        debug!(
            "Filled room at {}: {} floor, {} wall",
            lattice,
            room.count_kind(TileKind::Floor),
            room.count_kind(TileKind::Wall)
        );

        Ok(room)
    }
}

impl Generator<RoomGraph> for RoomWalkGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> CrawlerResult<RoomGraph> {
        config.validate()?;

        let mut graph = RoomGraph::new();
        if config.room_count == 0 {
            info!("Room count is zero, generated an empty dungeon");
            return Ok(graph);
        }

        let mut cursor = Position::origin();
        graph.insert(self.fill_room(cursor, config, rng)?);

        let mut steps = 0usize;
        while graph.len() < config.room_count {
            cursor = cursor.step(self.random_step(rng));
            steps += 1;

            if !graph.contains(cursor.x, cursor.y) {
                graph.insert(self.fill_room(cursor, config, rng)?);
            }
        }

        info!(
            "Generated {} rooms in {} walk steps (seed {})",
            graph.len(),
            steps,
            config.seed
        );

        Ok(graph)
    }

    fn validate(&self, content: &RoomGraph, config: &GenerationConfig) -> CrawlerResult<()> {
        if content.len() != config.room_count {
            return Err(CrawlerError::GenerationFailed(format!(
                "expected {} rooms, found {}",
                config.room_count,
                content.len()
            )));
        }

        let unique: HashSet<Position> = content.coordinates().into_iter().collect();
        if unique.len() != content.len() {
            return Err(CrawlerError::GenerationFailed(
                "rooms share a lattice coordinate".to_string(),
            ));
        }

        if let Some(entry) = content.entry_room() {
            if entry.lattice() != Position::origin() {
                return Err(CrawlerError::GenerationFailed(format!(
                    "entry room sits at {} instead of the origin",
                    entry.lattice()
                )));
            }
        }

        for room in content.rooms() {
            if room.width() != config.columns || room.height() != config.rows {
                return Err(CrawlerError::GenerationFailed(format!(
                    "room at {} is {}x{}, expected {}x{}",
                    room.lattice(),
                    room.width(),
                    room.height(),
                    config.columns,
                    config.rows
                )));
            }
        }

        utils::validate_connectivity(content)
    }

    fn generator_type(&self) -> &'static str {
        "RoomWalkGenerator"
    }
}

/// Generates `count` connected rooms with the default room dimensions.
///
/// A count of zero yields an empty graph. The same seed always produces the
/// same graph.
///
/// # Examples
///
/// ```
/// use dungeon_crawler::generate_room_set;
///
/// let graph = generate_room_set(6, 99);
/// assert_eq!(graph.len(), 6);
/// assert!(graph.find_room(0, 0).is_some());
///
/// assert!(generate_room_set(0, 99).is_empty());
/// ```
pub fn generate_room_set(count: usize, rng_seed: u64) -> RoomGraph {
    let config = GenerationConfig {
        room_count: count,
        ..GenerationConfig::new(rng_seed)
    };
    let mut rng = utils::create_rng(&config);

    // The default configuration always validates, so no error path remains
    match RoomWalkGenerator::new().generate(&config, &mut rng) {
        Ok(graph) => graph,
        Err(error) => unreachable!("default generation config rejected: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generate(config: &GenerationConfig) -> RoomGraph {
        let mut rng = utils::create_rng(config);
        RoomWalkGenerator::new().generate(config, &mut rng).unwrap()
    }

    #[test]
    fn test_generates_requested_room_count() {
        for count in [1, 2, 5, 10, 30] {
            let config = GenerationConfig {
                room_count: count,
                ..GenerationConfig::for_testing(count as u64)
            };
            let graph = generate(&config);
            assert_eq!(graph.len(), count);
            assert!(graph.find_room(0, 0).is_some());
            RoomWalkGenerator::new().validate(&graph, &config).unwrap();
        }
    }

    #[test]
    fn test_zero_rooms_is_empty() {
        let config = GenerationConfig {
            room_count: 0,
            ..GenerationConfig::for_testing(1)
        };
        let graph = generate(&config);
        assert!(graph.is_empty());
        RoomWalkGenerator::new().validate(&graph, &config).unwrap();
    }

    #[test]
    fn test_same_seed_same_graph() {
        let config = GenerationConfig::new(2024);
        assert_eq!(generate(&config), generate(&config));
        assert_eq!(generate_room_set(8, 5), generate_room_set(8, 5));
    }

    #[test]
    fn test_room_borders_are_walls() {
        let graph = generate(&GenerationConfig::for_testing(77));
        for room in graph.rooms() {
            for tile in room.tiles() {
                if room.is_border(tile.position) {
                    assert_eq!(tile.kind, TileKind::Wall);
                }
                assert_ne!(tile.kind, TileKind::Door);
            }
        }
    }

    #[test]
    fn test_interior_floor_ratio() {
        let generator = RoomWalkGenerator::new();
        let config = GenerationConfig::new(0);
        let mut rng = StdRng::seed_from_u64(31337);

        let mut floors = 0;
        let mut interior = 0;
        for i in 0..40 {
            let room = generator.fill_room(Position::new(i, 0), &config, &mut rng).unwrap();
            floors += room.count_kind(TileKind::Floor);
            interior += (config.columns - 2) * (config.rows - 2);
        }

        let ratio = floors as f64 / interior as f64;
        assert!((ratio - 0.8).abs() < 0.02, "floor ratio {ratio}");
    }

    #[test]
    fn test_all_floor_weights() {
        let generator = RoomWalkGenerator::new();
        let config = GenerationConfig {
            wall_weight: 0,
            ..GenerationConfig::for_testing(0)
        };
        let mut rng = StdRng::seed_from_u64(1);
        let room = generator.fill_room(Position::origin(), &config, &mut rng).unwrap();
        assert_eq!(room.count_kind(TileKind::Floor), (config.columns - 2) * (config.rows - 2));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GenerationConfig {
            columns: 2,
            ..GenerationConfig::for_testing(0)
        };
        let mut rng = utils::create_rng(&config);
        assert!(matches!(
            RoomWalkGenerator::new().generate(&config, &mut rng),
            Err(CrawlerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_catches_wrong_count() {
        let config = GenerationConfig::for_testing(5);
        let graph = generate(&config);
        let wrong = GenerationConfig {
            room_count: config.room_count + 1,
            ..config
        };
        assert!(RoomWalkGenerator::new().validate(&graph, &wrong).is_err());
        assert_eq!(RoomWalkGenerator::new().generator_type(), "RoomWalkGenerator");
    }
}
