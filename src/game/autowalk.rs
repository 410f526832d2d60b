//! # Autowalk Module
//!
//! Follows a computed path one tile per tick.

use crate::Position;
use std::collections::VecDeque;

/// Queue of tiles the player still has to walk through.
///
/// While a walk is active, keyboard movement is locked; it unlocks on the
/// first tick that finds the queue empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutowalkState {
    /// Tiles left to visit, next first
    pub pending: VecDeque<Position>,
    /// Final tile of the current walk
    pub target: Option<Position>,
    /// Whether a walk is in progress
    pub active: bool,
}

impl AutowalkState {
    /// Creates an idle autowalk state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any ongoing walk with `path`.
    pub fn start(&mut self, path: Vec<Position>) {
        self.target = path.last().copied();
        self.pending = path.into();
        self.active = true;
    }

    /// Returns true while keyboard movement should be ignored.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tiles still queued.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Pops the next tile, or finishes the walk when none are left.
    pub fn next_step(&mut self) -> Option<Position> {
        if !self.active {
            return None;
        }

        match self.pending.pop_front() {
            Some(pos) => Some(pos),
            None => {
                self.target = None;
                self.active = false;
                None
            }
        }
    }
}
