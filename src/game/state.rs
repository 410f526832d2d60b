//! # Game State Module
//!
//! Discrete-event facade over the dungeon.
//!
//! The host application owns the frame loop, input devices and drawing. It
//! forwards discrete events here (a direction key, a "walk to this tile"
//! click, a movement tick) and reads back the current room and player
//! position to render them.

use crate::generation::utils::create_rng;
use crate::{
    find_path, link_doors, AutowalkState, CrawlerError, CrawlerResult, Direction,
    GenerationConfig, Generator, Position, Room, RoomGraph, RoomWalkGenerator, TileKind,
};
use log::{debug, info};
use rand::{rngs::StdRng, Rng};
use std::collections::HashMap;

/// Result of a single directional step request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player moved to a tile in the same room
    Moved(Position),
    /// The player walked through a doorway into another room
    ChangedRoom {
        /// Lattice coordinate of the room entered
        room: Position,
        /// Tile the player now stands on
        position: Position,
    },
    /// A wall, the grid edge or a missing room stopped the step
    Blocked,
    /// Keyboard movement is locked by an ongoing autowalk
    Ignored,
}

/// Dungeon, current room and player position.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Every room of the dungeon
    pub graph: RoomGraph,
    /// Lattice coordinate of the room the player is in
    pub current_lattice: Position,
    /// Player tile inside the current room
    pub player: Position,
    /// Queued click-to-walk movement
    pub autowalk: AutowalkState,
}

impl GameState {
    /// Generates a dungeon from `config`, links its doors, and spawns the
    /// player on a random Floor tile of the entry room.
    pub fn new(config: &GenerationConfig) -> CrawlerResult<Self> {
        let mut rng = create_rng(config);
        let generator = RoomWalkGenerator::new();

        let mut graph = generator.generate(config, &mut rng)?;
        generator.validate(&graph, config)?;
        link_doors(&mut graph);

        Self::new_with_graph(graph, &mut rng)
    }

    /// Wraps an existing graph and spawns the player on a random Floor tile
    /// of its entry room.
    pub fn new_with_graph(graph: RoomGraph, rng: &mut StdRng) -> CrawlerResult<Self> {
        let entry = graph
            .entry_room()
            .ok_or_else(|| CrawlerError::GenerationFailed("dungeon has no rooms".to_string()))?;

        let floors = entry.positions_of(TileKind::Floor);
        if floors.is_empty() {
            return Err(CrawlerError::GenerationFailed(format!(
                "entry room at {} has no floor to spawn on",
                entry.lattice()
            )));
        }
        let spawn = floors[rng.gen_range(0..floors.len())];
        let lattice = entry.lattice();

        info!("Player spawned at {} in room {}", spawn, lattice);
        Ok(Self {
            graph,
            current_lattice: lattice,
            player: spawn,
            autowalk: AutowalkState::new(),
        })
    }

    /// Wraps an existing graph with the player at a chosen tile of the entry room.
    pub fn new_with_player(graph: RoomGraph, player: Position) -> CrawlerResult<Self> {
        let entry = graph
            .entry_room()
            .ok_or_else(|| CrawlerError::InvalidState("dungeon has no rooms".to_string()))?;
        entry.checked_index(player)?;
        let lattice = entry.lattice();

        Ok(Self {
            graph,
            current_lattice: lattice,
            player,
            autowalk: AutowalkState::new(),
        })
    }

    /// The room the player is in.
    pub fn current_room(&self) -> CrawlerResult<&Room> {
        self.graph
            .find_room(self.current_lattice.x, self.current_lattice.y)
            .ok_or_else(|| {
                CrawlerError::InvalidState(format!("no room at lattice {}", self.current_lattice))
            })
    }

    /// Handles a single directional key press.
    ///
    /// Steps onto any non-wall tile inside the room. Standing on a doorway
    /// tile at the edge and stepping outward moves the player into the
    /// neighbouring room, on the opposite edge.
    pub fn on_key(&mut self, direction: Direction) -> CrawlerResult<MoveOutcome> {
        if self.autowalk.is_active() {
            return Ok(MoveOutcome::Ignored);
        }

        let room = self.current_room()?;
        let target = self.player.step(direction);

        if room.in_bounds(target) {
            if room.kind_at(target)? == TileKind::Wall {
                return Ok(MoveOutcome::Blocked);
            }
            self.player = target;
            debug!("Player stepped {:?} to {}", direction, target);
            return Ok(MoveOutcome::Moved(target));
        }

        if !(room.is_on_edge(self.player, direction) && room.kind_at(self.player)? == TileKind::Door) {
            return Ok(MoveOutcome::Blocked);
        }

        let next_lattice = room.lattice().step(direction);
        let next_room = match self.graph.find_room(next_lattice.x, next_lattice.y) {
            Some(room) => room,
            None => {
                debug!("Doorway at {} leads nowhere", self.player);
                return Ok(MoveOutcome::Blocked);
            }
        };

        let entry = next_room.entry_position(self.player, direction);
        next_room.checked_index(entry)?;

        info!("Player moved from room {} to room {}", self.current_lattice, next_lattice);
        self.current_lattice = next_lattice;
        self.player = entry;

        Ok(MoveOutcome::ChangedRoom {
            room: next_lattice,
            position: entry,
        })
    }

    /// Handles a "walk to this tile" request in the current room.
    ///
    /// When a path exists it replaces any walk in progress and locks keyboard
    /// movement until [`GameState::tick`] has walked it. Returns whether a
    /// path was found.
    pub fn on_move_request(&mut self, goal: Position) -> CrawlerResult<bool> {
        let room = self.current_room()?;

        match find_path(room, self.player, goal)? {
            Some(path) => {
                debug!("Walking {} tiles to {}", path.len() - 1, goal);
                // The first tile is where the player already stands
                self.autowalk.start(path.into_iter().skip(1).collect());
                Ok(true)
            }
            None => {
                debug!("No walkable route from {} to {}", self.player, goal);
                Ok(false)
            }
        }
    }

    /// Advances an ongoing walk by one tile and returns the new position.
    pub fn tick(&mut self) -> Option<Position> {
        let next = self.autowalk.next_step()?;
        self.player = next;
        Some(next)
    }

    /// ASCII view of the current room with the player drawn as `@`.
    pub fn render_current_room(&self) -> CrawlerResult<String> {
        let room = self.current_room()?;
        let mut overlay: HashMap<Position, char> =
            self.autowalk.pending.iter().map(|pos| (*pos, '*')).collect();
        overlay.insert(self.player, '@');
        Ok(room.render_with(&overlay))
    }
}
