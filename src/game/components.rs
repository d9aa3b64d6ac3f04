//! Game Components
//!
//! The shared physics component (`Body`) and the entity kinds that embed it.
//! Components are plain data structs - the per-tick behavior lives in the
//! player, collision and session systems.

use serde::{Serialize, Deserialize};
use super::math::Vec2;

/// Platform wobble advance per tick (radians)
pub const PLATFORM_PHASE_STEP: f64 = 0.02;

/// Vertical spike oscillation amplitude (world units)
pub const SPIKE_AMPLITUDE: f64 = 3.0;

// =============================================================================
// Bounds
// =============================================================================

/// Axis-aligned bounding box in world space (+y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Aabb {
    pub fn new(position: Vec2, width: f64, height: f64) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x + width,
            bottom: position.y + height,
        }
    }

    /// Strict overlap test: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }
}

// =============================================================================
// Physics
// =============================================================================

/// Shared physics component embedded by every entity kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f64,
    pub height: f64,
    pub on_ground: bool,
    /// Position before the last integration step. Collision resolution uses
    /// it to tell which side a contact came from.
    pub prev_position: Vec2,
}

impl Body {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let position = Vec2::new(x, y);
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
            on_ground: false,
            prev_position: position,
        }
    }

    /// Current bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.width, self.height)
    }

    /// Bounds before the last integration step
    pub fn prev_aabb(&self) -> Aabb {
        Aabb::new(self.prev_position, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.aabb().center()
    }

    /// One explicit Euler step: gravity into velocity, velocity into position.
    /// Clears `on_ground`; collision resolution re-asserts it on landing.
    pub fn integrate(&mut self, gravity: f64) {
        self.prev_position = self.position;
        self.velocity.y += gravity;
        self.position += self.velocity;
        self.on_ground = false;
    }

    /// Move without touching `prev_position` (teleports, spawn placement)
    pub fn place(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x, y);
        self.prev_position = self.position;
    }
}

// =============================================================================
// Platforms
// =============================================================================

/// What a platform does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    /// Drawn differently; static like `Normal`
    Moving,
    /// Kills the player on contact, oscillates vertically
    Spike,
    /// Completes the level on contact
    Goal,
    CollectibleMarker,
}

impl PlatformKind {
    /// Solid kinds push the player out; hazards and goals only report contact.
    pub fn is_solid(&self) -> bool {
        !matches!(self, PlatformKind::Spike | PlatformKind::Goal)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform {
    pub body: Body,
    pub kind: PlatformKind,
    pub original_y: f64,
    /// Oscillation phase (radians)
    pub phase: f64,
}

impl Platform {
    pub fn new(x: f64, y: f64, width: f64, height: f64, kind: PlatformKind) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            kind,
            original_y: y,
            phase: 0.0,
        }
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        if self.kind == PlatformKind::Spike {
            self.body.position.y = self.original_y + phase.sin() * SPIKE_AMPLITUDE;
        }
        self
    }

    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }

    /// Advance the wobble. Only spikes actually move.
    pub fn update(&mut self) {
        self.phase += PLATFORM_PHASE_STEP;
        if self.kind == PlatformKind::Spike {
            self.body.position.y = self.original_y + self.phase.sin() * SPIKE_AMPLITUDE;
        }
    }
}

// =============================================================================
// Collectibles
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collectible {
    pub body: Body,
    pub collected: bool,
}

impl Collectible {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self {
            body: Body::new(x, y, size, size),
            collected: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }
}
