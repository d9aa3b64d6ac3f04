//! Event System
//!
//! The simulation never calls audio or effects directly. Each tick it pushes
//! events into a queue; the host drains the queue once per frame and routes
//! every event to whichever sinks care about it.
//!
//! Example flow:
//! 1. Collision resolution sees a spike contact → `Died { cause: Spike }`
//! 2. Audio sink plays the damage cue
//! 3. Particle pool emits a red burst at the death position

use super::math::Vec2;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Spike,
    /// Dropped below the bottom of the world
    Fall,
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A jump request was honored
    Jumped { position: Vec2 },
    /// A dash request was honored
    Dashed { position: Vec2 },
    /// The player came down on a surface
    Landed { position: Vec2, impact_speed: f64 },
    /// A collectible was picked up
    Collected { position: Vec2, score: u32 },
    /// The player died
    Died { position: Vec2, cause: DeathCause },
    LevelComplete { level: u32, score: u32 },
    GameOver { level: u32 },
    Won { total_score: u32 },
}
