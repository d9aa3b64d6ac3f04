//! Collision System
//!
//! Player-vs-platform resolution. Every platform whose AABB overlaps the
//! player is handled by kind first: spikes kill, goals are sensors checked later,
//! everything else is solid and pushes the player out.
//!
//! For solid platforms the contact side is classified from the player's
//! velocity at the start of resolution and its bounds before the tick's
//! integration step. Vertical cases are checked before horizontal ones, so
//! a corner hit resolves as a landing or head bump rather than a side push.

use super::components::{Aabb, Platform, PlatformKind};
use super::math::Vec2;
use super::player::Player;

/// How a single (player, solid platform) contact was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Moving down onto the top face
    Landing,
    /// Moving up into the bottom face
    HeadBump,
    /// Moving right into the left face
    LeftSide,
    /// Moving left into the right face
    RightSide,
    /// Already overlapping on both axes last tick; nothing to push against
    Embedded,
}

/// Everything resolution learned this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    /// A landing put the player on a surface
    pub landed: bool,
    /// Downward speed absorbed by the landing
    pub impact_speed: f64,
    /// The player died on a spike this tick
    pub spiked: bool,
}

/// Decide which face of `platform` the player came through.
pub fn classify(prev: &Aabb, platform: &Aabb, velocity: Vec2) -> Contact {
    if velocity.y > 0.0 && prev.bottom <= platform.top {
        Contact::Landing
    } else if velocity.y < 0.0 && prev.top >= platform.bottom {
        Contact::HeadBump
    } else if prev.right <= platform.left {
        Contact::LeftSide
    } else if prev.left >= platform.right {
        Contact::RightSide
    } else {
        Contact::Embedded
    }
}

/// Resolve the player against every platform, in level order.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) -> CollisionReport {
    let mut report = CollisionReport::default();
    let velocity = player.body.velocity;
    let prev = player.body.prev_aabb();

    for platform in platforms {
        let bounds = platform.aabb();
        if !player.body.aabb().overlaps(&bounds) {
            continue;
        }

        match platform.kind {
            PlatformKind::Spike => {
                if player.kill() {
                    report.spiked = true;
                }
                continue;
            }
            PlatformKind::Goal => continue,
            _ => {}
        }

        match classify(&prev, &bounds, velocity) {
            Contact::Landing => {
                player.body.position.y = bounds.top - player.body.height;
                player.body.velocity.y = 0.0;
                player.land();
                report.landed = true;
                report.impact_speed = report.impact_speed.max(velocity.y);
            }
            Contact::HeadBump => {
                player.body.position.y = bounds.bottom;
                player.body.velocity.y = 0.0;
            }
            Contact::LeftSide => {
                player.body.position.x = bounds.left - player.body.width;
            }
            Contact::RightSide => {
                player.body.position.x = bounds.right;
            }
            Contact::Embedded => {}
        }
    }

    report
}

/// Keep the player inside the horizontal world extent.
pub fn clamp_to_world(player: &mut Player, world_width: f64) {
    if player.body.position.x < 0.0 {
        player.body.position.x = 0.0;
    }
    if player.body.position.x + player.body.width > world_width {
        player.body.position.x = world_width - player.body.width;
    }
}

/// Kill the player once it drops below the world. Returns true on the tick
/// the fall kills it.
pub fn check_fall(player: &mut Player, world_height: f64) -> bool {
    player.body.position.y > world_height && player.kill()
}

/// Goal overlap for an alive player
pub fn reached_goal(player: &Player, platforms: &[Platform]) -> bool {
    player.alive
        && platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Goal)
            .any(|goal| player.body.aabb().overlaps(&goal.aabb()))
}
