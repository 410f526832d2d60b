//! Performance tests for generation and pathfinding

use dungeon_crawler::{
    find_path, generate_room_set, link_doors, CrawlerResult, Position, Room, TileKind,
};
use std::time::Instant;

#[test]
fn test_pathfinding_performance() -> CrawlerResult<()> {
    // Large room with a comb of walls to force detours
    let mut room = Room::walled(Position::origin(), 60, 60);
    for x in (4..56).step_by(4) {
        let gap = if (x / 4) % 2 == 0 { 1 } else { 58 };
        for y in 1..59 {
            if y != gap {
                room.set_kind(Position::new(x, y), TileKind::Wall)?;
            }
        }
    }

    let start = Instant::now();
    let iterations = 20;

    for _ in 0..iterations {
        let path = find_path(&room, Position::new(1, 1), Position::new(58, 58))?;
        assert!(path.is_some());
    }

    let elapsed = start.elapsed();
    let avg_search_time = elapsed / iterations;

    println!("Average search time: {:?}", avg_search_time);

    // Generous bound so unoptimized builds pass too
    assert!(
        avg_search_time.as_millis() < 250,
        "Pathfinding too slow: {:?}",
        avg_search_time
    );

    Ok(())
}

#[test]
fn test_room_click_performance() -> CrawlerResult<()> {
    let mut graph = generate_room_set(10, 12345);
    link_doors(&mut graph);

    let start = Instant::now();
    let mut searches = 0u32;

    // Every click target in every room from a fixed corner
    for room in graph.rooms() {
        for goal in room.positions_of(TileKind::Floor) {
            let _ = find_path(room, Position::new(1, 1), goal)?;
            searches += 1;
        }
    }

    let elapsed = start.elapsed();
    let avg_search_time = elapsed / searches.max(1);

    println!("{} searches, average {:?}", searches, avg_search_time);

    assert!(
        avg_search_time.as_millis() < 10,
        "Room searches too slow: {:?}",
        avg_search_time
    );

    Ok(())
}

#[test]
fn test_generation_performance() {
    let start = Instant::now();
    let iterations = 20;

    for seed in 0..iterations {
        let mut graph = generate_room_set(50, seed);
        link_doors(&mut graph);
        assert_eq!(graph.len(), 50);
    }

    let elapsed = start.elapsed();
    let avg_generation_time = elapsed / iterations as u32;

    println!("Average 50-room generation time: {:?}", avg_generation_time);

    assert!(
        avg_generation_time.as_millis() < 500,
        "Generation too slow: {:?}",
        avg_generation_time
    );
}
