//! Integration tests for walking between rooms through linked doorways.

use dungeon_crawler::{
    find_path, CrawlerResult, Direction, GameState, GenerationConfig, MoveOutcome, Position,
};
use std::collections::{HashSet, VecDeque};

/// Open-floor rooms so every doorway is reachable from every other.
fn open_floor_config(seed: u64, rooms: usize) -> GenerationConfig {
    GenerationConfig {
        room_count: rooms,
        wall_weight: 0,
        ..GenerationConfig::new(seed)
    }
}

/// Clicks the middle doorway tile facing `direction`, walks there, and steps through.
fn walk_through_doorway(state: &mut GameState, direction: Direction) -> CrawlerResult<MoveOutcome> {
    let doorway = state.current_room()?.doorway(direction)[1];
    assert!(state.on_move_request(doorway)?, "doorway {doorway} unreachable");
    while state.tick().is_some() {}
    assert_eq!(state.player, doorway);
    state.on_key(direction)
}

#[test]
fn test_walk_into_neighbouring_room() -> CrawlerResult<()> {
    let mut state = GameState::new(&open_floor_config(98765, 6))?;

    let direction = state.graph.neighbour_directions(Position::origin())[0];
    let outcome = walk_through_doorway(&mut state, direction)?;

    let expected_room = Position::origin().step(direction);
    match outcome {
        MoveOutcome::ChangedRoom { room, position } => {
            assert_eq!(room, expected_room);
            assert_eq!(state.current_lattice, expected_room);
            // Arrived on the facing doorway of the new room
            let room = state.current_room()?;
            assert!(room.doorway(direction.opposite()).contains(&position));
        }
        other => panic!("expected a room change, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_every_room_is_reachable_on_foot() -> CrawlerResult<()> {
    let config = open_floor_config(54321, 12);
    let state = GameState::new(&config)?;

    let mut visited = HashSet::from([state.current_lattice]);
    let mut queue = VecDeque::from([state.clone()]);

    while let Some(explorer) = queue.pop_front() {
        let lattice = explorer.current_lattice;
        for direction in explorer.graph.neighbour_directions(lattice) {
            let mut walker = explorer.clone();
            match walk_through_doorway(&mut walker, direction)? {
                MoveOutcome::ChangedRoom { room, .. } => {
                    if visited.insert(room) {
                        queue.push_back(walker);
                    }
                }
                other => panic!("doorway {direction:?} of {lattice} gave {other:?}"),
            }
        }
    }

    assert_eq!(visited.len(), config.room_count);
    Ok(())
}

#[test]
fn test_paths_stay_inside_current_room() -> CrawlerResult<()> {
    let state = GameState::new(&GenerationConfig::new(2468))?;
    let room = state.current_room()?;

    let goals = room.positions_of(dungeon_crawler::TileKind::Floor);
    for goal in goals.iter().step_by(7) {
        if let Some(path) = find_path(room, state.player, *goal)? {
            assert_eq!(path.first(), Some(&state.player));
            assert_eq!(path.last(), Some(goal));
            assert!(path.iter().all(|pos| room.is_passable(*pos)));
            assert!(path.windows(2).all(|pair| pair[0].manhattan_distance(pair[1]) == 1));
        }
    }

    Ok(())
}

#[test]
fn test_outer_edge_doorways_lead_nowhere() -> CrawlerResult<()> {
    let mut state = GameState::new(&open_floor_config(1357, 1))?;

    // No neighbours, so no doorways: walking into any edge is blocked
    for direction in Direction::all() {
        let doorway = state.current_room()?.doorway(direction)[1];
        let inside = doorway.step(direction.opposite());
        assert!(state.on_move_request(inside)?);
        while state.tick().is_some() {}
        assert_eq!(state.on_key(direction)?, MoveOutcome::Blocked);
        assert_eq!(state.current_lattice, Position::origin());
    }

    Ok(())
}
