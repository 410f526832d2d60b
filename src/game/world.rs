//! # World Representation
//!
//! Tiles, rooms and the room graph.
//!
//! A room is a fixed-size grid of tiles located at an integer lattice
//! coordinate. The room graph owns every room of a dungeon and indexes them by
//! that coordinate.

use crate::config::MIN_ROOM_EDGE;
use crate::{CrawlerError, CrawlerResult, Direction, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable ground
    Floor,
    /// Impassable
    Wall,
    /// Walkable transition point between adjacent rooms
    Door,
}

impl TileKind {
    /// Returns true if entities can walk over this kind of tile.
    pub fn is_passable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Door)
    }

    /// Single-character glyph used for ASCII dumps.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Door => '+',
        }
    }
}

/// A single grid cell of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Position within the owning room
    pub position: Position,
    /// Current kind
    pub kind: TileKind,
}

impl Tile {
    /// Creates a tile at `position`.
    pub fn new(position: Position, kind: TileKind) -> Self {
        Self { position, kind }
    }

    /// Returns true if the tile can be walked on.
    pub fn is_passable(&self) -> bool {
        self.kind.is_passable()
    }
}

/// A rectangular grid of tiles located on the dungeon lattice.
///
/// # Examples
///
/// ```
/// use dungeon_crawler::{Position, Room, TileKind};
///
/// let room = Room::walled(Position::origin(), 5, 5);
/// assert_eq!(room.kind_at(Position::new(0, 0)).unwrap(), TileKind::Wall);
/// assert_eq!(room.kind_at(Position::new(2, 2)).unwrap(), TileKind::Floor);
/// assert!(room.kind_at(Position::new(5, 0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    lattice: Position,
    columns: usize,
    rows: usize,
    /// Row-major tiles
    tiles: Vec<Tile>,
}

impl Room {
    /// Creates a room whose tiles are all Floor.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 3; such a grid cannot hold a doorway.
    pub fn new(lattice: Position, columns: usize, rows: usize) -> Self {
        assert!(
            columns >= MIN_ROOM_EDGE && rows >= MIN_ROOM_EDGE,
            "room grid must be at least {MIN_ROOM_EDGE}x{MIN_ROOM_EDGE}, got {columns}x{rows}"
        );

        let tiles = (0..rows)
            .flat_map(|y| {
                (0..columns).map(move |x| Tile::new(Position::new(x as i32, y as i32), TileKind::Floor))
            })
            .collect();

        Self {
            lattice,
            columns,
            rows,
            tiles,
        }
    }

    /// Creates a room with a Wall border and Floor interior.
    pub fn walled(lattice: Position, columns: usize, rows: usize) -> Self {
        let mut room = Self::new(lattice, columns, rows);
        for tile in room.tiles.iter_mut() {
            let (x, y) = (tile.position.x as usize, tile.position.y as usize);
            if x == 0 || y == 0 || x == columns - 1 || y == rows - 1 {
                tile.kind = TileKind::Wall;
            }
        }
        room
    }

    /// Lattice coordinate of this room.
    pub fn lattice(&self) -> Position {
        self.lattice
    }

    /// Number of tile columns.
    pub fn width(&self) -> usize {
        self.columns
    }

    /// Number of tile rows.
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Total number of tiles.
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Checks if a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.columns && (pos.y as usize) < self.rows
    }

    /// Row-major index of an in-bounds position.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.columns + pos.x as usize)
        } else {
            None
        }
    }

    /// Position of the tile stored at `index`.
    pub fn position_of(&self, index: usize) -> Position {
        self.tiles[index].position
    }

    /// Row-major index of a position, failing on out-of-bounds coordinates.
    pub fn checked_index(&self, pos: Position) -> CrawlerResult<usize> {
        self.index_of(pos).ok_or(CrawlerError::InvalidCoordinate {
            x: pos.x,
            y: pos.y,
            width: self.columns,
            height: self.rows,
        })
    }

    /// Gets the tile at a position, or None when out of bounds.
    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        self.index_of(pos).map(|index| &self.tiles[index])
    }

    /// Gets the tile at a position, failing on out-of-bounds coordinates.
    pub fn tile(&self, pos: Position) -> CrawlerResult<&Tile> {
        let index = self.checked_index(pos)?;
        Ok(&self.tiles[index])
    }

    /// Gets the kind of the tile at a position.
    pub fn kind_at(&self, pos: Position) -> CrawlerResult<TileKind> {
        self.tile(pos).map(|tile| tile.kind)
    }

    /// Gets the kind of the tile stored at `index`.
    pub fn kind_at_index(&self, index: usize) -> TileKind {
        self.tiles[index].kind
    }

    /// Overwrites the kind of the tile at a position.
    pub fn set_kind(&mut self, pos: Position, kind: TileKind) -> CrawlerResult<()> {
        let index = self.checked_index(pos)?;
        self.tiles[index].kind = kind;
        Ok(())
    }

    /// Returns true if the position is in bounds and walkable.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some_and(Tile::is_passable)
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Positions of every tile of the given kind, row-major.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Position> {
        self.tiles
            .iter()
            .filter(|tile| tile.kind == kind)
            .map(|tile| tile.position)
            .collect()
    }

    /// Counts tiles of the given kind.
    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    /// Checks if a position is on the outer ring of the grid.
    pub fn is_border(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.columns - 1
                || pos.y as usize == self.rows - 1)
    }

    /// Checks if a position lies on the edge facing `direction`.
    pub fn is_on_edge(&self, pos: Position, direction: Direction) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        match direction {
            Direction::West => pos.x == 0,
            Direction::East => pos.x as usize == self.columns - 1,
            Direction::North => pos.y == 0,
            Direction::South => pos.y as usize == self.rows - 1,
        }
    }

    /// The three doorway positions on the edge facing `direction`,
    /// centred on the edge midpoint.
    pub fn doorway(&self, direction: Direction) -> [Position; 3] {
        let last_column = (self.columns - 1) as i32;
        let last_row = (self.rows - 1) as i32;
        let mid_row = (self.rows / 2) as i32;
        let mid_column = (self.columns / 2) as i32;

        match direction {
            Direction::West => [-1, 0, 1].map(|d| Position::new(0, mid_row + d)),
            Direction::East => [-1, 0, 1].map(|d| Position::new(last_column, mid_row + d)),
            Direction::South => [-1, 0, 1].map(|d| Position::new(mid_column + d, last_row)),
            Direction::North => [-1, 0, 1].map(|d| Position::new(mid_column + d, 0)),
        }
    }

    /// Turns the doorway facing `direction` into Door tiles.
    pub fn open_doorway(&mut self, direction: Direction) {
        for pos in self.doorway(direction) {
            let index = pos.y as usize * self.columns + pos.x as usize;
            self.tiles[index].kind = TileKind::Door;
        }
    }

    /// Where a walker arriving from `direction` lands in this room, keeping
    /// the coordinate along the shared edge.
    pub fn entry_position(&self, leaving_from: Position, direction: Direction) -> Position {
        match direction {
            Direction::West => Position::new((self.columns - 1) as i32, leaving_from.y),
            Direction::East => Position::new(0, leaving_from.y),
            Direction::North => Position::new(leaving_from.x, (self.rows - 1) as i32),
            Direction::South => Position::new(leaving_from.x, 0),
        }
    }

    /// Renders the grid with optional overlay glyphs.
    pub fn render_with(&self, overlay: &HashMap<Position, char>) -> String {
        let mut out = String::with_capacity((self.columns + 1) * self.rows);
        for row in self.tiles.chunks(self.columns) {
            for tile in row {
                out.push(
                    overlay
                        .get(&tile.position)
                        .copied()
                        .unwrap_or_else(|| tile.kind.glyph()),
                );
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&HashMap::new()))
    }
}

/// Every room of a dungeon, indexed by lattice coordinate.
///
/// Rooms keep their creation order; the first room inserted is the entry room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: Vec<Room>,
    index: HashMap<Position, usize>,
}

impl RoomGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns true if the graph holds no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Adds a room at its lattice coordinate.
    ///
    /// # Panics
    ///
    /// Panics if a room already occupies that coordinate.
    pub fn insert(&mut self, room: Room) {
        let lattice = room.lattice();
        assert!(
            !self.index.contains_key(&lattice),
            "duplicate room at lattice {lattice}"
        );
        self.index.insert(lattice, self.rooms.len());
        self.rooms.push(room);
    }

    /// Checks if a room exists at the lattice coordinate.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index.contains_key(&Position::new(x, y))
    }

    /// Looks up the room at a lattice coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_crawler::{Position, Room, RoomGraph};
    ///
    /// let mut graph = RoomGraph::new();
    /// graph.insert(Room::walled(Position::origin(), 5, 5));
    ///
    /// assert!(graph.find_room(0, 0).is_some());
    /// assert!(graph.find_room(1, 0).is_none());
    /// ```
    pub fn find_room(&self, x: i32, y: i32) -> Option<&Room> {
        self.index
            .get(&Position::new(x, y))
            .map(|&index| &self.rooms[index])
    }

    /// Mutable lookup of the room at a lattice coordinate.
    pub fn find_room_mut(&mut self, x: i32, y: i32) -> Option<&mut Room> {
        match self.index.get(&Position::new(x, y)) {
            Some(&index) => Some(&mut self.rooms[index]),
            None => None,
        }
    }

    /// The first room inserted, if any.
    pub fn entry_room(&self) -> Option<&Room> {
        self.rooms.first()
    }

    /// Rooms in creation order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Lattice coordinates in creation order.
    pub fn coordinates(&self) -> Vec<Position> {
        self.rooms.iter().map(|room| room.lattice()).collect()
    }

    /// Directions from `lattice` towards rooms that exist in the graph.
    pub fn neighbour_directions(&self, lattice: Position) -> Vec<Direction> {
        Direction::all()
            .into_iter()
            .filter(|direction| self.index.contains_key(&lattice.step(*direction)))
            .collect()
    }
}

/// Looks up the room at a lattice coordinate.
pub fn find_room(graph: &RoomGraph, x: i32, y: i32) -> Option<&Room> {
    graph.find_room(x, y)
}
