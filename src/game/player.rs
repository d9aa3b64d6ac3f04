//! Player state machine
//!
//! The player's state is a set of orthogonal flags rather than one enum:
//! grounded vs airborne (`body.on_ground`), dash-ready vs cooling down
//! (`dash_cooldown <= 0`) and alive vs dead. Requests that are not allowed
//! in the current state (jumping in mid-air, dashing on cooldown) are
//! silently ignored.

use serde::{Serialize, Deserialize};
use crate::config::GameConfig;
use super::components::Body;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(&self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Per-player movement tuning, copied out of `GameConfig` at spawn
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Movement {
    pub gravity: f64,
    pub friction: f64,
    pub speed: f64,
    pub jump_power: f64,
    pub dash_power: f64,
    pub dash_cooldown: i32,
}

impl From<&GameConfig> for Movement {
    fn from(config: &GameConfig) -> Self {
        Self {
            gravity: config.gravity,
            friction: config.friction,
            speed: config.player_speed,
            jump_power: config.jump_power,
            dash_power: config.dash_power,
            dash_cooldown: config.dash_cooldown_ticks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub score: u32,
    /// Ticks until the next dash. Ready once it reaches zero or below.
    pub dash_cooldown: i32,
    pub alive: bool,
    pub direction: Facing,
    pub is_jumping: bool,
    pub is_dashing: bool,
    pub movement: Movement,
}

impl Player {
    pub fn new(x: f64, y: f64, width: f64, height: f64, movement: Movement) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            score: 0,
            dash_cooldown: 0,
            alive: true,
            direction: Facing::Right,
            is_jumping: false,
            is_dashing: false,
            movement,
        }
    }

    /// Spawn a fresh player at the configured spawn point
    pub fn spawn(config: &GameConfig) -> Self {
        let (x, y) = config.spawn_point();
        Self::new(x, y, config.player_width, config.player_height, Movement::from(config))
    }

    pub fn can_dash(&self) -> bool {
        self.dash_cooldown <= 0
    }

    /// Held movement input: sets horizontal velocity and facing.
    pub fn walk(&mut self, facing: Facing) {
        self.body.velocity.x = facing.sign() * self.movement.speed;
        self.direction = facing;
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.body.on_ground {
            return false;
        }
        self.body.velocity.y = -self.movement.jump_power;
        self.body.on_ground = false;
        self.is_jumping = true;
        true
    }

    /// Dash in the given direction if the cooldown has elapsed.
    /// Returns whether the dash happened.
    pub fn dash(&mut self, facing: Facing) -> bool {
        if !self.can_dash() {
            return false;
        }
        self.body.velocity.x = facing.sign() * self.movement.dash_power;
        self.dash_cooldown = self.movement.dash_cooldown;
        self.is_dashing = true;
        true
    }

    /// Per-tick update: integrate, tick the cooldown, apply friction.
    pub fn update(&mut self) {
        self.body.integrate(self.movement.gravity);
        self.dash_cooldown -= 1;
        self.body.velocity.x *= self.movement.friction;

        if self.dash_cooldown < 0 {
            self.is_dashing = false;
        }
    }

    /// Collision resolution put the player on a surface
    pub fn land(&mut self) {
        self.body.on_ground = true;
        self.is_jumping = false;
    }

    /// One-way transition. Returns true only on the tick the player dies.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::spawn(&GameConfig::default())
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut p = player();
        p.body.velocity.y = 3.0;

        assert!(!p.jump());
        assert_eq!(p.body.velocity.y, 3.0);
        assert!(!p.is_jumping);

        p.body.on_ground = true;
        assert!(p.jump());
        assert_eq!(p.body.velocity.y, -12.0);
        assert!(!p.body.on_ground);
        assert!(p.is_jumping);

        // Second press in the air is ignored
        assert!(!p.jump());
        assert_eq!(p.body.velocity.y, -12.0);
    }

    #[test]
    fn test_dash_respects_cooldown() {
        let mut p = player();

        assert!(p.dash(Facing::Left));
        assert_eq!(p.body.velocity.x, -15.0);
        assert_eq!(p.dash_cooldown, 30);
        assert!(p.is_dashing);

        p.body.velocity.x = 2.0;
        assert!(!p.dash(Facing::Right));
        assert_eq!(p.body.velocity.x, 2.0);
        assert_eq!(p.dash_cooldown, 30);
    }

    #[test]
    fn test_cooldown_counts_down_past_zero() {
        let mut p = player();
        p.dash(Facing::Right);

        for _ in 0..30 {
            p.update();
        }
        assert_eq!(p.dash_cooldown, 0);
        assert!(p.can_dash());
        assert!(p.is_dashing);

        p.update();
        assert_eq!(p.dash_cooldown, -1);
        assert!(!p.is_dashing);

        assert!(p.dash(Facing::Right));
        assert_eq!(p.dash_cooldown, 30);
    }

    #[test]
    fn test_friction_after_movement() {
        let mut p = player();
        let x0 = p.body.position.x;

        // Held input moves at full speed, friction only shows once input stops
        p.walk(Facing::Right);
        p.update();
        assert_eq!(p.body.position.x, x0 + 5.0);
        assert_eq!(p.body.velocity.x, 5.0 * 0.85);

        p.walk(Facing::Right);
        p.update();
        assert_eq!(p.body.position.x, x0 + 10.0);

        p.update();
        assert_eq!(p.body.position.x, x0 + 10.0 + 4.25);
        assert!((p.body.velocity.x - 4.25 * 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_walk_sets_direction() {
        let mut p = player();
        p.walk(Facing::Left);
        assert_eq!(p.direction, Facing::Left);
        assert_eq!(p.body.velocity.x, -5.0);
    }

    #[test]
    fn test_kill_is_one_way() {
        let mut p = player();
        assert!(p.kill());
        assert!(!p.alive);
        assert!(!p.kill());
        assert!(!p.alive);
    }
}
