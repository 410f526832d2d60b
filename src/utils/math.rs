//! # Grid Mathematics
//!
//! Distance functions shared by the pathfinder.

use crate::Position;

/// Distance estimate used by the pathfinder for both its heuristic and its
/// step cost: the absolute difference between the axis deltas.
///
/// It is zero for any pair on a shared diagonal, so it undercounts the walking
/// distance on open ground. A single orthogonal step always costs exactly 1.
///
/// # Examples
///
/// ```
/// use dungeon_crawler::{axis_delta_difference, Position};
///
/// assert_eq!(axis_delta_difference(Position::new(0, 0), Position::new(3, 1)), 2);
/// assert_eq!(axis_delta_difference(Position::new(0, 0), Position::new(4, 4)), 0);
/// assert_eq!(axis_delta_difference(Position::new(2, 2), Position::new(2, 3)), 1);
/// ```
pub fn axis_delta_difference(a: Position, b: Position) -> u32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    (dx - dy).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric() {
        let a = Position::new(1, 7);
        let b = Position::new(6, 2);
        assert_eq!(axis_delta_difference(a, b), axis_delta_difference(b, a));
    }

    #[test]
    fn test_orthogonal_step_costs_one() {
        let center = Position::new(4, 4);
        for neighbour in center.cardinal_adjacent_positions() {
            assert_eq!(axis_delta_difference(center, neighbour), 1);
        }
    }

    #[test]
    fn test_never_exceeds_manhattan() {
        for x in -5..=5 {
            for y in -5..=5 {
                let pos = Position::new(x, y);
                assert!(axis_delta_difference(Position::origin(), pos) <= Position::origin().manhattan_distance(pos));
            }
        }
    }

    #[test]
    fn test_same_position_is_zero() {
        let pos = Position::new(3, 9);
        assert_eq!(axis_delta_difference(pos, pos), 0);
    }
}
