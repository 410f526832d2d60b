//! # Pathfinding Algorithms
//!
//! A* search across a single room's tile grid.
//!
//! Search bookkeeping (g/h/f scores, predecessors, open and closed
//! membership) lives in a scratch table created for each call, so the room is
//! only ever borrowed immutably and no state survives between searches.

use crate::{axis_delta_difference, CrawlerResult, Position, Room};
use log::debug;

/// Per-tile search bookkeeping.
#[derive(Debug, Clone, Copy)]
struct NodeScore {
    /// Cost from the start; `u32::MAX` stands for unreached
    g: u32,
    h: u32,
    f: u32,
    came_from: Option<usize>,
    in_open: bool,
    in_closed: bool,
}

impl NodeScore {
    const UNVISITED: NodeScore = NodeScore {
        g: u32::MAX,
        h: 0,
        f: 0,
        came_from: None,
        in_open: false,
        in_closed: false,
    };
}

/// Finds a walkable path from `start` to `goal` inside `room`.
///
/// The returned path includes both endpoints, so `start == goal` yields a
/// single-element path. Only Floor and Door tiles are entered; a Wall goal
/// is never reached. `Ok(None)` means no route exists.
///
/// Among equally scored frontier tiles the one discovered first is expanded
/// first, and neighbours are discovered in up, down, left, right order, so
/// results are fully deterministic.
///
/// # Errors
///
/// Returns [`crate::CrawlerError::InvalidCoordinate`] if `start` or `goal` lies
/// outside the grid.
///
/// # Examples
///
/// ```
/// use dungeon_crawler::{find_path, Position, Room};
///
/// let room = Room::walled(Position::origin(), 5, 5);
/// let path = find_path(&room, Position::new(1, 1), Position::new(3, 3))
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(path.len(), 5);
/// assert_eq!(path.first(), Some(&Position::new(1, 1)));
/// assert_eq!(path.last(), Some(&Position::new(3, 3)));
/// ```
pub fn find_path(room: &Room, start: Position, goal: Position) -> CrawlerResult<Option<Vec<Position>>> {
    let start_index = room.checked_index(start)?;
    let goal_index = room.checked_index(goal)?;

    let mut scores = vec![NodeScore::UNVISITED; room.area()];
    let mut open: Vec<usize> = Vec::new();

    let seed = &mut scores[start_index];
    seed.g = 0;
    seed.h = axis_delta_difference(start, goal);
    seed.f = seed.g + seed.h;
    seed.in_open = true;
    open.push(start_index);

    let mut expanded = 0usize;

    while !open.is_empty() {
        // Linear scan; strict comparison keeps the earliest entry on ties
        let mut best_slot = 0;
        for slot in 1..open.len() {
            if scores[open[slot]].f < scores[open[best_slot]].f {
                best_slot = slot;
            }
        }

        let current = open.remove(best_slot);
        scores[current].in_open = false;
        scores[current].in_closed = true;
        expanded += 1;

        if current == goal_index {
            let path = reconstruct_path(room, &scores, current);
            debug!(
                "Path {} -> {} found: {} tiles, {} expanded",
                start,
                goal,
                path.len(),
                expanded
            );
            return Ok(Some(path));
        }

        let current_pos = room.position_of(current);
        let current_g = scores[current].g;

        for neighbour_pos in current_pos.cardinal_adjacent_positions() {
            let neighbour = match room.index_of(neighbour_pos) {
                Some(index) => index,
                None => continue,
            };

            if scores[neighbour].in_closed || !room.kind_at_index(neighbour).is_passable() {
                continue;
            }

            let tentative_g = current_g + axis_delta_difference(current_pos, neighbour_pos);
            let score = &mut scores[neighbour];
            if tentative_g < score.g {
                score.came_from = Some(current);
                score.g = tentative_g;
                score.h = axis_delta_difference(neighbour_pos, goal);
                score.f = score.g + score.h;

                if !score.in_open {
                    score.in_open = true;
                    open.push(neighbour);
                }
            }
        }
    }

    debug!("No path {} -> {} after {} expansions", start, goal, expanded);
    Ok(None)
}

/// Walks predecessor links back from `end` and returns the path start-first.
fn reconstruct_path(room: &Room, scores: &[NodeScore], end: usize) -> Vec<Position> {
    let mut path = vec![room.position_of(end)];
    let mut current = end;

    while let Some(previous) = scores[current].came_from {
        path.push(room.position_of(previous));
        current = previous;
    }

    path.reverse();
    path
}
