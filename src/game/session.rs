//! Game session
//!
//! `GameSession` owns everything a run needs: the current level, the player,
//! the session state and the event queue the host drains each frame. The
//! host calls `tick()` once per fixed step with a snapshot of the logical
//! controls; UI commands (start, pause, retry, ...) are plain methods that
//! report whether they applied.
//!
//! Within a tick the phases run in a fixed order, each consuming what the
//! previous one produced:
//! 1. input (walk, jump, dash)
//! 2. physics (player integration, platform wobble)
//! 3. collision (platforms, world clamp, fall)
//! 4. collectibles, goal, time limit

use crate::config::GameConfig;
use super::collision::{check_fall, clamp_to_world, reached_goal, resolve_platforms};
use super::event::{DeathCause, EventQueue, GameEvent};
use super::level::Level;
use super::math::Vec2;
use super::player::{Facing, Player};

/// Which screen the session is on. Only `Playing` advances the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    Won,
}

/// Logical controls for one tick. `left`/`right` are held; `jump`/`dash` are
/// presses that happened since the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
}

pub struct GameSession {
    pub state: SessionState,
    /// 1-based
    pub current_level: u32,
    pub level: Level,
    pub player: Player,
    /// Banked score of completed levels
    pub total_score: u32,
    pub events: EventQueue<GameEvent>,
    elapsed_ticks: u64,
    config: GameConfig,
    seed: u64,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let level = Level::generate(1, seed, &config);
        let player = Player::spawn(&config);
        Self {
            state: SessionState::Menu,
            current_level: 1,
            level,
            player,
            total_score: 0,
            events: EventQueue::new(),
            elapsed_ticks: 0,
            config,
            seed,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_ticks as f64 / self.config.ticks_per_second.max(1) as f64
    }

    pub fn is_final_level(&self) -> bool {
        self.current_level >= self.config.max_levels
    }

    /// Seconds left on the clock, never negative
    pub fn time_remaining(&self) -> f64 {
        (self.level.time_limit - self.elapsed_seconds()).max(0.0)
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Advance one fixed step. Does nothing unless the session is `Playing`.
    pub fn tick(&mut self, controls: &Controls) {
        if self.state != SessionState::Playing {
            return;
        }
        self.elapsed_ticks += 1;

        let was_grounded = self.player.body.on_ground;
        self.apply_controls(controls);

        self.player.update();
        self.level.update();

        let report = resolve_platforms(&mut self.player, &self.level.platforms);
        if report.spiked {
            self.player_died(DeathCause::Spike, self.player.body.center());
        }
        if report.landed && !was_grounded {
            let aabb = self.player.body.aabb();
            self.events.send(GameEvent::Landed {
                position: Vec2::new(aabb.center().x, aabb.bottom),
                impact_speed: report.impact_speed,
            });
        }

        clamp_to_world(&mut self.player, self.config.world_width);
        if check_fall(&mut self.player, self.config.world_height) {
            let x = self.player.body.center().x;
            self.player_died(DeathCause::Fall, Vec2::new(x, self.config.world_height));
        }

        self.collect();

        if reached_goal(&self.player, &self.level.platforms) {
            self.complete_level();
        } else if self.config.end_run_on_death && !self.player.alive {
            self.game_over();
        } else if self.elapsed_seconds() > self.level.time_limit {
            self.game_over();
        }
    }

    fn apply_controls(&mut self, controls: &Controls) {
        if !self.player.alive {
            return;
        }
        if controls.left {
            self.player.walk(Facing::Left);
        }
        if controls.right {
            self.player.walk(Facing::Right);
        }
        if controls.jump && self.player.jump() {
            self.events.send(GameEvent::Jumped { position: self.player.body.center() });
        }
        if controls.dash && self.player.dash(self.player.direction) {
            self.events.send(GameEvent::Dashed { position: self.player.body.center() });
        }
    }

    fn player_died(&mut self, cause: DeathCause, position: Vec2) {
        tracing::debug!("Player died ({:?}) on level {}", cause, self.current_level);
        self.events.send(GameEvent::Died { position, cause });
    }

    /// Pick up every active collectible touching an alive player
    fn collect(&mut self) {
        if !self.player.alive {
            return;
        }

        let player_box = self.player.body.aabb();
        let score = self.config.collectible_score;
        for collectible in &mut self.level.collectibles {
            if collectible.collected || !player_box.overlaps(&collectible.aabb()) {
                continue;
            }
            collectible.collected = true;
            self.player.score += score;
            self.events.send(GameEvent::Collected {
                position: collectible.body.center(),
                score: self.player.score,
            });
        }
        self.level.collectibles.retain(|c| !c.collected);
    }

    fn complete_level(&mut self) {
        let score = self.player.score;
        self.total_score += score;
        self.events.send(GameEvent::LevelComplete { level: self.current_level, score });
        tracing::info!(
            "Level {} complete: score {} in {:.1}s",
            self.current_level,
            score,
            self.elapsed_seconds()
        );

        if self.is_final_level() {
            self.win();
        } else {
            self.state = SessionState::LevelComplete;
        }
    }

    fn game_over(&mut self) {
        self.state = SessionState::GameOver;
        self.events.send(GameEvent::GameOver { level: self.current_level });
        tracing::info!("Game over on level {}", self.current_level);
    }

    fn win(&mut self) {
        self.state = SessionState::Won;
        self.events.send(GameEvent::Won { total_score: self.total_score });
        tracing::info!("All {} levels complete, total score {}", self.config.max_levels, self.total_score);
    }

    /// Build the current level from scratch with a fresh player
    fn load_level(&mut self) {
        self.level = Level::generate(self.current_level, self.seed, &self.config);
        self.player = Player::spawn(&self.config);
        self.elapsed_ticks = 0;
        self.state = SessionState::Playing;
        tracing::info!(
            "Level {} started ({}s limit)",
            self.current_level,
            self.level.time_limit
        );
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// New run from level 1. Not available mid-level.
    pub fn start_game(&mut self) -> bool {
        if matches!(self.state, SessionState::Playing | SessionState::Paused) {
            tracing::debug!("start_game ignored in {:?}", self.state);
            return false;
        }
        self.current_level = 1;
        self.total_score = 0;
        tracing::info!("Starting new game (seed {})", self.seed);
        self.load_level();
        true
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            other => {
                tracing::debug!("toggle_pause ignored in {:?}", other);
                return false;
            }
        };
        true
    }

    /// Rebuild the current level while playing or paused
    pub fn restart_level(&mut self) -> bool {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            tracing::debug!("restart_level ignored in {:?}", self.state);
            return false;
        }
        self.load_level();
        true
    }

    /// Replay the level just finished or failed
    pub fn retry_level(&mut self) -> bool {
        if !matches!(self.state, SessionState::GameOver | SessionState::LevelComplete) {
            tracing::debug!("retry_level ignored in {:?}", self.state);
            return false;
        }
        if self.state == SessionState::LevelComplete {
            // The replayed score will be banked again on completion
            self.total_score = self.total_score.saturating_sub(self.player.score);
        }
        self.load_level();
        true
    }

    /// Advance after a completed level; past the final level this is a win.
    pub fn next_level(&mut self) -> bool {
        if self.state != SessionState::LevelComplete {
            tracing::debug!("next_level ignored in {:?}", self.state);
            return false;
        }
        if self.is_final_level() {
            self.win();
        } else {
            self.current_level += 1;
            self.load_level();
        }
        true
    }

    pub fn go_to_menu(&mut self) -> bool {
        if self.state == SessionState::Menu {
            return false;
        }
        self.state = SessionState::Menu;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{Collectible, Platform, PlatformKind};

    fn session() -> GameSession {
        let mut s = GameSession::new(GameConfig::default(), 1234);
        assert!(s.start_game());
        s
    }

    fn idle() -> Controls {
        Controls::default()
    }

    /// Drop the player straight into the goal (900..980, 480..520)
    fn teleport_to_goal(s: &mut GameSession) {
        s.player.body.place(920.0, 470.0);
    }

    #[test]
    fn test_start_game_from_menu() {
        let mut s = GameSession::new(GameConfig::default(), 1);
        assert_eq!(s.state, SessionState::Menu);

        assert!(s.start_game());
        assert_eq!(s.state, SessionState::Playing);
        assert_eq!(s.elapsed_seconds(), 0.0);
        assert_eq!(s.current_level, 1);
        assert_eq!(s.level.index, 1);
        assert_eq!(s.player.body.position, Vec2::new(50.0, 500.0));

        // Not while a level is running
        assert!(!s.start_game());
    }

    #[test]
    fn test_tick_only_runs_while_playing() {
        let mut s = GameSession::new(GameConfig::default(), 1);
        let before = s.player.body.position;
        s.tick(&idle());
        assert_eq!(s.elapsed_ticks(), 0);
        assert_eq!(s.player.body.position, before);

        s.start_game();
        s.tick(&idle());
        assert!(s.toggle_pause());
        assert_eq!(s.state, SessionState::Paused);

        let paused_at = s.player.body.position;
        s.tick(&idle());
        assert_eq!(s.elapsed_ticks(), 1);
        assert_eq!(s.player.body.position, paused_at);

        assert!(s.toggle_pause());
        s.tick(&idle());
        assert_eq!(s.elapsed_ticks(), 2);
    }

    #[test]
    fn test_on_ground_is_never_stale() {
        let mut s = session();
        for _ in 0..30 {
            s.tick(&idle());
        }
        assert!(s.player.body.on_ground);
        s.tick(&idle());
        assert!(s.player.body.on_ground);

        // Support removed: the next tick must not carry on_ground over
        s.level.platforms.clear();
        s.tick(&idle());
        assert!(!s.player.body.on_ground);
    }

    #[test]
    fn test_input_precedes_physics() {
        let mut s = session();
        let x0 = s.player.body.position.x;

        s.tick(&Controls { right: true, dash: true, ..idle() });

        // Dash replaced the walk velocity before integration, then friction
        assert_eq!(s.player.body.position.x, x0 + 15.0);
        assert_eq!(s.player.body.velocity.x, 15.0 * 0.85);
        assert!(s.events.iter().any(|e| matches!(e, GameEvent::Dashed { .. })));

        // Cooldown blocks the second press
        s.events.clear();
        s.tick(&Controls { dash: true, ..idle() });
        assert!(s.events.is_empty());
    }

    /// Hold right and jump from each surface once far enough along it
    fn autopilot(player: &Player) -> Controls {
        const JUMP_FROM: [(f64, f64); 4] = [(560.0, 80.0), (480.0, 250.0), (420.0, 450.0), (360.0, 650.0)];
        let bottom = player.body.aabb().bottom;
        let left = player.body.position.x;
        let jump = player.body.on_ground
            && JUMP_FROM.iter().any(|&(surface, from)| bottom == surface && left >= from);
        Controls { right: true, jump, ..Controls::default() }
    }

    #[test]
    fn test_level_1_walkthrough() {
        let mut s = session();

        for _ in 0..3000 {
            let controls = autopilot(&s.player);
            s.tick(&controls);
            if s.state != SessionState::Playing {
                break;
            }
        }

        assert_eq!(s.state, SessionState::LevelComplete);
        assert!(s.player.alive);
        assert_eq!(s.player.score, 400);
        assert!(s.level.collectibles.is_empty());
        assert_eq!(s.total_score, 400);

        let goal = s.level.goal().map(|g| g.aabb());
        assert!(goal.is_some_and(|g| s.player.body.aabb().overlaps(&g)));

        let events: Vec<_> = s.events.drain().collect();
        let pickups = events.iter().filter(|e| matches!(e, GameEvent::Collected { .. })).count();
        let jumps = events.iter().filter(|e| matches!(e, GameEvent::Jumped { .. })).count();
        assert_eq!(pickups, 4);
        assert_eq!(jumps, 4);
        assert_eq!(events.last(), Some(&GameEvent::LevelComplete { level: 1, score: 400 }));
    }

    #[test]
    fn test_time_limit_game_over() {
        let mut s = session();

        // 65s at 60 ticks/s: still playing at exactly the limit
        for _ in 0..3900 {
            s.tick(&idle());
        }
        assert_eq!(s.state, SessionState::Playing);

        s.tick(&idle());
        assert_eq!(s.state, SessionState::GameOver);
        assert!(s.events.iter().any(|e| *e == GameEvent::GameOver { level: 1 }));

        // Frozen afterwards
        s.tick(&idle());
        assert_eq!(s.elapsed_ticks(), 3901);
    }

    #[test]
    fn test_dead_player_cannot_complete_level() {
        let mut s = session();
        teleport_to_goal(&mut s);
        s.player.kill();

        s.tick(&idle());
        assert_eq!(s.state, SessionState::Playing);
        assert_eq!(s.total_score, 0);
    }

    #[test]
    fn test_spike_inside_goal_kills_first() {
        let mut s = session();
        let goal = s.level.goal().map(|g| g.body.position).unwrap_or(Vec2::ZERO);
        s.level.platforms.insert(0, Platform::new(goal.x, goal.y, 80.0, 40.0, PlatformKind::Spike));
        teleport_to_goal(&mut s);

        s.tick(&idle());
        assert!(!s.player.alive);
        assert_eq!(s.state, SessionState::Playing);
        assert!(s
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Died { cause: DeathCause::Spike, .. })));
    }

    #[test]
    fn test_collectible_awarded_once() {
        let mut s = session();
        s.level.collectibles = vec![Collectible::new(55.0, 510.0, 15.0)];

        s.tick(&idle());
        assert_eq!(s.player.score, 100);
        assert!(s.level.collectibles.is_empty());

        for _ in 0..10 {
            s.tick(&idle());
        }
        assert_eq!(s.player.score, 100);
    }

    #[test]
    fn test_dead_player_collects_nothing() {
        let mut s = session();
        s.level.collectibles = vec![Collectible::new(55.0, 510.0, 15.0)];
        s.player.kill();

        s.tick(&idle());
        assert_eq!(s.player.score, 0);
        assert_eq!(s.level.collectibles.len(), 1);
    }

    #[test]
    fn test_fall_kills_but_run_continues() {
        let mut s = session();
        s.level.platforms.retain(|p| p.kind == PlatformKind::Goal);

        let mut died = 0;
        for _ in 0..120 {
            s.tick(&idle());
            died += s
                .events
                .drain()
                .filter(|e| matches!(e, GameEvent::Died { cause: DeathCause::Fall, .. }))
                .count();
        }
        assert!(!s.player.alive);
        assert_eq!(died, 1);
        assert_eq!(s.state, SessionState::Playing);
    }

    #[test]
    fn test_end_run_on_death() {
        let config = GameConfig { end_run_on_death: true, ..GameConfig::default() };
        let mut s = GameSession::new(config, 9);
        s.start_game();
        s.player.kill();

        s.tick(&idle());
        assert_eq!(s.state, SessionState::GameOver);
    }

    #[test]
    fn test_level_progression_to_won() {
        let mut s = session();

        for level in 1..=3 {
            assert_eq!(s.current_level, level);
            teleport_to_goal(&mut s);
            s.tick(&idle());

            if level < 3 {
                assert_eq!(s.state, SessionState::LevelComplete);
                assert!(s.next_level());
                assert_eq!(s.elapsed_ticks(), 0);
                assert_eq!(s.player.score, 0);
            }
        }

        // Final goal goes straight to Won
        assert_eq!(s.state, SessionState::Won);
        assert!(!s.next_level());
        assert!(s.events.iter().any(|e| matches!(e, GameEvent::Won { .. })));

        assert!(s.start_game());
        assert_eq!(s.current_level, 1);
        assert_eq!(s.total_score, 0);
    }

    #[test]
    fn test_retry_and_restart() {
        let mut s = session();
        s.tick(&Controls { right: true, ..idle() });

        assert!(!s.retry_level());
        assert!(s.restart_level());
        assert_eq!(s.elapsed_ticks(), 0);
        assert_eq!(s.player.body.position, Vec2::new(50.0, 500.0));

        for _ in 0..3901 {
            s.tick(&idle());
        }
        assert_eq!(s.state, SessionState::GameOver);
        assert!(!s.restart_level());
        assert!(!s.toggle_pause());
        assert!(s.retry_level());
        assert_eq!(s.state, SessionState::Playing);
        assert_eq!(s.current_level, 1);
    }

    #[test]
    fn test_menu() {
        let mut s = session();
        assert!(s.go_to_menu());
        assert!(!s.go_to_menu());
        assert!(!s.toggle_pause());
        assert!(s.start_game());
    }
}
