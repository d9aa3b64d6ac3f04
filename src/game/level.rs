//! Level construction
//!
//! Levels 1-3 are hand-authored coordinate tables. Any later level is laid
//! out from a seeded RNG: a stack of platforms climbing toward the top of the
//! world with collectibles scattered along a fixed height. Every level gets a
//! full-width ground first and a goal platform last.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};
use crate::config::GameConfig;
use super::components::{Collectible, Platform, PlatformKind};
use super::components::PlatformKind::{Normal, Spike};
use super::math::Vec2;

/// Collectibles sit this far above the platform they belong to
const COLLECTIBLE_LIFT: f64 = 20.0;

/// (x, y, width, height, kind)
type PlatformDef = (f64, f64, f64, f64, PlatformKind);

const LEVEL_1_PLATFORMS: &[PlatformDef] = &[
    (150.0, 480.0, 150.0, 30.0, Normal),
    (350.0, 420.0, 150.0, 30.0, Normal),
    (550.0, 360.0, 150.0, 30.0, Normal),
    (750.0, 300.0, 150.0, 30.0, Normal),
];

const LEVEL_1_COLLECTIBLES: &[(f64, f64)] = &[
    (150.0 + 75.0, 480.0 - COLLECTIBLE_LIFT),
    (350.0 + 75.0, 420.0 - COLLECTIBLE_LIFT),
    (550.0 + 75.0, 360.0 - COLLECTIBLE_LIFT),
    (750.0 + 75.0, 300.0 - COLLECTIBLE_LIFT),
];

const LEVEL_2_PLATFORMS: &[PlatformDef] = &[
    (100.0, 450.0, 100.0, 30.0, Normal),
    (300.0, 380.0, 100.0, 30.0, Normal),
    (500.0, 320.0, 100.0, 30.0, Normal),
    (700.0, 380.0, 100.0, 30.0, Normal),
    (300.0, 200.0, 400.0, 30.0, Normal),
    (450.0, 290.0, 100.0, 20.0, Spike),
];

const LEVEL_2_COLLECTIBLES: &[(f64, f64)] = &[
    (100.0 + 50.0, 450.0 - COLLECTIBLE_LIFT),
    (300.0 + 50.0, 380.0 - COLLECTIBLE_LIFT),
    (500.0 + 50.0, 320.0 - COLLECTIBLE_LIFT),
    (700.0 + 50.0, 380.0 - COLLECTIBLE_LIFT),
    (300.0 + 200.0, 200.0 - COLLECTIBLE_LIFT),
    (500.0, 200.0 - COLLECTIBLE_LIFT),
];

const LEVEL_3_PLATFORMS: &[PlatformDef] = &[
    (50.0, 500.0, 80.0, 30.0, Normal),
    (200.0, 420.0, 80.0, 30.0, Normal),
    (350.0, 340.0, 80.0, 30.0, Normal),
    (500.0, 260.0, 80.0, 30.0, Normal),
    (650.0, 330.0, 80.0, 30.0, Normal),
    (800.0, 240.0, 80.0, 30.0, Normal),
    (400.0, 200.0, 200.0, 20.0, Spike),
];

const LEVEL_3_COLLECTIBLES: &[(f64, f64)] = &[
    (50.0 + 40.0, 500.0 - COLLECTIBLE_LIFT),
    (200.0 + 40.0, 420.0 - COLLECTIBLE_LIFT),
    (350.0 + 40.0, 340.0 - COLLECTIBLE_LIFT),
    (500.0 + 40.0, 260.0 - COLLECTIBLE_LIFT),
    (650.0 + 40.0, 330.0 - COLLECTIBLE_LIFT),
    (800.0 + 40.0, 240.0 - COLLECTIBLE_LIFT),
    (450.0, 180.0 - COLLECTIBLE_LIFT),
    (550.0, 180.0 - COLLECTIBLE_LIFT),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 1-based
    pub index: u32,
    /// Ground first, goal last
    pub platforms: Vec<Platform>,
    /// Active (uncollected) collectibles only
    pub collectibles: Vec<Collectible>,
    pub goal_position: Vec2,
    pub time_limit: f64,
}

impl Level {
    /// Build level `index`. `seed` drives spike phases and random layouts;
    /// the same (index, seed) always yields the same level.
    pub fn generate(index: u32, seed: u64, config: &GameConfig) -> Self {
        let index = index.max(1);
        let mut rng = StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));

        let mut level = Level {
            index,
            platforms: Vec::new(),
            collectibles: Vec::new(),
            goal_position: Vec2::ZERO,
            time_limit: config.time_limit(index),
        };

        level.platforms.push(Platform::new(
            0.0,
            config.world_height - config.ground_height,
            config.world_width,
            config.ground_height,
            Normal,
        ));

        match index {
            1 => level.add_authored(LEVEL_1_PLATFORMS, LEVEL_1_COLLECTIBLES, config, &mut rng),
            2 => level.add_authored(LEVEL_2_PLATFORMS, LEVEL_2_COLLECTIBLES, config, &mut rng),
            3 => level.add_authored(LEVEL_3_PLATFORMS, LEVEL_3_COLLECTIBLES, config, &mut rng),
            _ => level.add_random(config, &mut rng),
        }

        level.goal_position = Vec2::new(config.world_width - 100.0, config.world_height - 120.0);
        level.platforms.push(Platform::new(
            level.goal_position.x,
            level.goal_position.y,
            config.goal_width,
            config.goal_height,
            PlatformKind::Goal,
        ));

        level
    }

    fn add_authored(
        &mut self,
        platforms: &[PlatformDef],
        collectibles: &[(f64, f64)],
        config: &GameConfig,
        rng: &mut StdRng,
    ) {
        for &(x, y, w, h, kind) in platforms {
            let phase = rng.gen_range(0.0..std::f64::consts::TAU);
            self.platforms.push(Platform::new(x, y, w, h, kind).with_phase(phase));
        }
        for &(x, y) in collectibles {
            self.collectibles.push(Collectible::new(x, y, config.collectible_size));
        }
    }

    fn add_random(&mut self, config: &GameConfig, rng: &mut StdRng) {
        let max_x = (config.world_width - 150.0).max(1.0);
        for i in 0..config.random_platform_count {
            let x = rng.gen_range(0.0..max_x);
            let y = config.world_height - 150.0 - i as f64 * config.random_platform_spacing;
            self.platforms.push(Platform::new(
                x,
                y,
                config.random_platform_width,
                config.random_platform_height,
                Normal,
            ));
        }

        let y = config.world_height - 100.0;
        for _ in 0..config.random_collectible_count {
            let x = rng.gen_range(0.0..config.world_width);
            self.collectibles.push(Collectible::new(x, y, config.collectible_size));
        }
    }

    /// Advance platform wobble
    pub fn update(&mut self) {
        for platform in &mut self.platforms {
            platform.update();
        }
    }

    pub fn goal(&self) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.kind == PlatformKind::Goal)
    }
}
