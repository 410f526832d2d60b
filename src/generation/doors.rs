//! # Door Linking
//!
//! Opens doorways between rooms that are neighbours on the lattice.

use crate::{Direction, Room, RoomGraph, TileKind};
use log::debug;

/// Opens a three-tile doorway on every room edge that faces another room.
///
/// The doorway is centred on the edge midpoint and overrides whatever tile
/// kind was there. Edges without a neighbouring room are left untouched.
/// Because adjacency is symmetric, both sides of every shared boundary get a
/// doorway.
///
/// # Examples
///
/// ```
/// use dungeon_crawler::{link_doors, Position, Room, RoomGraph, TileKind};
///
/// let mut graph = RoomGraph::new();
/// graph.insert(Room::walled(Position::new(0, 0), 7, 5));
/// graph.insert(Room::walled(Position::new(1, 0), 7, 5));
/// link_doors(&mut graph);
///
/// let west = graph.find_room(0, 0).unwrap();
/// assert_eq!(west.kind_at(Position::new(6, 2)).unwrap(), TileKind::Door);
/// assert_eq!(west.kind_at(Position::new(0, 2)).unwrap(), TileKind::Wall);
/// ```
pub fn link_doors(graph: &mut RoomGraph) {
    let plans: Vec<_> = graph
        .rooms()
        .map(|room| (room.lattice(), graph.neighbour_directions(room.lattice())))
        .collect();

    let mut opened = 0usize;
    for (lattice, directions) in plans {
        let room = match graph.find_room_mut(lattice.x, lattice.y) {
            Some(room) => room,
            None => continue,
        };

        for direction in directions {
            room.open_doorway(direction);
            opened += room.doorway(direction).len();
            debug!("Opened {:?} doorway in room {}", direction, lattice);
        }
    }

    debug!("Linked {} door tiles across {} rooms", opened, graph.len());
}

/// Directions in which `room` has an open doorway.
pub fn doorway_directions(room: &Room) -> Vec<Direction> {
    Direction::all()
        .into_iter()
        .filter(|direction| {
            room.doorway(*direction)
                .iter()
                .all(|pos| room.kind_at(*pos).map_or(false, |kind| kind == TileKind::Door))
        })
        .collect()
}
