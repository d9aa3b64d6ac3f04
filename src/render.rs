//! Drawing
//!
//! Read-only view of the app: nothing here mutates simulation state. The
//! world is laid out in fixed 1000x600 world units and letterboxed into
//! whatever window size the host has.

use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use crate::app::{App, SettingsScreen, PLAYER_COLOR};
use crate::game::{Collectible, GameSession, ParticlePool, Platform, PlatformKind, SessionState};
use crate::storage::Storage;

const SKY_TOP: Color = Color::new(0.039, 0.122, 0.180, 1.0);
const SKY_BOTTOM: Color = Color::new(0.102, 0.227, 0.322, 1.0);
const GRID_COLOR: Color = Color::new(0.4, 0.494, 0.918, 0.05);
const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const MUTED_COLOR: Color = Color::new(0.6, 0.6, 0.65, 1.0);
const ACCENT_COLOR: Color = Color::new(0.0, 0.83, 1.0, 1.0);
const OVERLAY_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.6);

/// Grid line spacing (world units)
const GRID_STEP: f64 = 50.0;

fn rgb(c: [u8; 3], alpha: f32) -> Color {
    Color::new(c[0] as f32 / 255.0, c[1] as f32 / 255.0, c[2] as f32 / 255.0, alpha)
}

fn platform_color(kind: PlatformKind) -> Color {
    match kind {
        PlatformKind::Normal => rgb([0x66, 0x7e, 0xea], 1.0),
        PlatformKind::Moving => rgb([0xff, 0xaa, 0x00], 1.0),
        PlatformKind::Spike => rgb([0xff, 0x00, 0x55], 1.0),
        PlatformKind::Goal => rgb([0x00, 0xff, 0x88], 1.0),
        PlatformKind::CollectibleMarker => rgb([0xff, 0xff, 0x00], 1.0),
    }
}

/// World-to-screen mapping with letterboxing
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl View {
    pub fn fit(world_w: f64, world_h: f64, screen_w: f32, screen_h: f32) -> Self {
        let scale = (screen_w / world_w as f32).min(screen_h / world_h as f32);
        Self {
            scale,
            offset_x: (screen_w - world_w as f32 * scale) / 2.0,
            offset_y: (screen_h - world_h as f32 * scale) / 2.0,
        }
    }

    pub fn x(&self, x: f64) -> f32 {
        self.offset_x + x as f32 * self.scale
    }

    pub fn y(&self, y: f64) -> f32 {
        self.offset_y + y as f32 * self.scale
    }

    pub fn len(&self, v: f64) -> f32 {
        v as f32 * self.scale
    }
}

// =============================================================================
// Background
// =============================================================================

struct Star {
    x: f64,
    y: f64,
    size: f32,
    opacity: f32,
    twinkle_speed: f32,
}

/// Fixed star positions, twinkling over time
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(seed: u64, world_w: f64, world_h: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..50)
            .map(|_| Star {
                x: rng.gen_range(0.0..world_w),
                y: rng.gen_range(0.0..world_h),
                size: rng.gen_range(0.0..1.5),
                opacity: rng.gen_range(0.5..1.0),
                twinkle_speed: rng.gen_range(0.005..0.025),
            })
            .collect();
        Self { stars }
    }

    fn draw(&self, view: &View, time: f64) {
        for star in &self.stars {
            let twinkle = ((time * 60.0) as f32 * star.twinkle_speed).sin() * 0.3;
            let alpha = (star.opacity + twinkle).clamp(0.2, 1.0);
            draw_circle(
                view.x(star.x),
                view.y(star.y),
                (star.size * view.scale).max(0.5),
                Color::new(1.0, 1.0, 1.0, alpha),
            );
        }
    }
}

fn draw_background(view: &View, world_w: f64, world_h: f64) {
    clear_background(BLACK);

    // Vertical gradient in bands
    const BANDS: usize = 24;
    let band_h = world_h / BANDS as f64;
    for i in 0..BANDS {
        let t = i as f32 / (BANDS - 1) as f32;
        let color = Color::new(
            SKY_TOP.r + (SKY_BOTTOM.r - SKY_TOP.r) * t,
            SKY_TOP.g + (SKY_BOTTOM.g - SKY_TOP.g) * t,
            SKY_TOP.b + (SKY_BOTTOM.b - SKY_TOP.b) * t,
            1.0,
        );
        let y = i as f64 * band_h;
        draw_rectangle(view.x(0.0), view.y(y), view.len(world_w), view.len(band_h) + 1.0, color);
    }
}

fn draw_grid(view: &View, world_w: f64, world_h: f64) {
    let mut x = 0.0;
    while x < world_w {
        draw_line(view.x(x), view.y(0.0), view.x(x), view.y(world_h), 1.0, GRID_COLOR);
        x += GRID_STEP;
    }
}

// =============================================================================
// Entities
// =============================================================================

fn draw_platform(view: &View, platform: &Platform) {
    let b = &platform.body;
    let (x, y, w, h) = (view.x(b.position.x), view.y(b.position.y), view.len(b.width), view.len(b.height));
    let color = platform_color(platform.kind);

    draw_rectangle(x, y, w, h, color);
    // Light top half, dark bottom half
    draw_rectangle(x, y, w, h / 2.0, Color::new(1.0, 1.0, 1.0, 0.1));
    draw_rectangle(x, y + h / 2.0, w, h / 2.0, Color::new(0.0, 0.0, 0.0, 0.1));
    draw_rectangle_lines(x, y, w, h, 2.0, Color::new(1.0, 1.0, 1.0, 0.4));

    if platform.kind == PlatformKind::Spike {
        let mut i = 0.0;
        while i < b.width {
            let left = view.x(b.position.x + i);
            draw_triangle(
                vec2(left, y),
                vec2(left + view.len(7.0), y - view.len(8.0)),
                vec2(left + view.len(14.0), y),
                color,
            );
            i += 15.0;
        }
    }
}

fn draw_collectible(view: &View, collectible: &Collectible, index: usize, time: f64) {
    let phase = time * 3.0 + index as f64 * 1.7;
    let center = collectible.body.center();
    let cx = view.x(center.x);
    let cy = view.y(center.y + phase.sin() * 3.0);
    let rotation = (time * 4.8 + index as f64) as f32 * 57.3;

    draw_circle(cx, cy, view.len(12.0), Color::new(1.0, 1.0, 0.0, 0.2));
    draw_poly(cx, cy, 6, view.len(8.0), rotation, Color::new(1.0, 1.0, 0.0, 1.0));
    draw_poly_lines(cx, cy, 6, view.len(8.0), rotation, 1.5, WHITE);
    draw_circle(cx, cy - view.len(2.0), view.len(2.0), Color::new(1.0, 1.0, 0.6, 1.0));
}

fn draw_player(view: &View, session: &GameSession, time: f64) {
    let player = &session.player;
    if !player.alive {
        return;
    }

    let body = &player.body;
    let center = body.center();
    let (cx, cy) = (view.x(center.x), view.y(center.y));
    let color = rgb(PLAYER_COLOR, 0.9);

    if player.is_dashing {
        for i in 0..3 {
            draw_circle_lines(cx, cy, view.len(20.0 + i as f64 * 10.0), 2.0, rgb(PLAYER_COLOR, 0.3));
        }
    }

    draw_rectangle(view.x(body.position.x), view.y(body.position.y), view.len(body.width), view.len(body.height), color);

    // Eyes bob a little while alive
    let bounce = ((time * 6.0 * std::f64::consts::PI).sin() * 2.0) as f32 * view.scale;
    let look = player.direction.sign() as f32;
    let eye_y = cy + view.len(-10.0) + bounce;
    for side in [-1.0f32, 1.0] {
        let ex = cx + view.len(8.0) * side;
        draw_circle(ex, eye_y, view.len(5.0), WHITE);
        draw_circle(ex + view.len(1.0) * look, eye_y, view.len(2.0), BLACK);
    }
    let mouth_y = cy + view.len(7.0) + bounce;
    draw_line(cx - view.len(4.0), mouth_y, cx + view.len(4.0), mouth_y, 2.0, WHITE);

    let score = player.score.to_string();
    let size = 14.0 * view.scale.max(0.5);
    let dims = measure_text(&score, None, size as u16, 1.0);
    draw_text(&score, cx - dims.width / 2.0, view.y(body.position.y - 15.0), size, ACCENT_COLOR);
}

fn draw_particles(view: &View, particles: &ParticlePool) {
    for p in particles.iter_alive() {
        let fade = p.fade();
        draw_circle(
            view.x(p.position.x),
            view.y(p.position.y),
            view.len(p.size as f64 * fade as f64),
            rgb(p.color, fade),
        );
    }
}

// =============================================================================
// HUD and overlays
// =============================================================================

fn draw_hud(view: &View, session: &GameSession) {
    let size = 20.0;
    let y = view.y(0.0) + 28.0;
    draw_text(&format!("Level {}", session.current_level), view.x(0.0) + 16.0, y, size, TEXT_COLOR);
    draw_text(
        &format!("Time: {}s / {}s", session.elapsed_seconds().floor(), session.level.time_limit),
        view.x(0.0) + 160.0,
        y,
        size,
        TEXT_COLOR,
    );
    draw_text(&format!("Score: {}", session.player.score), view.x(0.0) + 400.0, y, size, TEXT_COLOR);
}

fn draw_centered(text: &str, cx: f32, y: f32, size: f32, color: Color) {
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, cx - dims.width / 2.0, y, size, color);
}

/// Dimmed panel with a title and lines of text
fn draw_panel(view: &View, world_w: f64, world_h: f64, title: &str, lines: &[String]) {
    draw_rectangle(view.x(0.0), view.y(0.0), view.len(world_w), view.len(world_h), OVERLAY_COLOR);

    let cx = view.x(world_w / 2.0);
    let mut y = view.y(world_h / 2.0) - 60.0;
    draw_centered(title, cx, y, 48.0, ACCENT_COLOR);
    y += 50.0;
    for line in lines {
        draw_centered(line, cx, y, 22.0, TEXT_COLOR);
        y += 30.0;
    }
}

fn draw_state_overlay(view: &View, session: &GameSession, sound_on: bool) {
    let config = session.config();
    let (w, h) = (config.world_width, config.world_height);
    let sound = format!("M: sound {}", if sound_on { "on" } else { "off" });

    match session.state {
        SessionState::Playing => {}
        SessionState::Menu => draw_panel(view, w, h, "PLATFORM DASH", &[
            "Reach the green goal before time runs out".to_string(),
            "ENTER: start    TAB: controls".to_string(),
            sound,
        ]),
        SessionState::Paused => draw_panel(view, w, h, "Paused", &[
            "P: resume    R: restart    ESC: menu".to_string(),
        ]),
        SessionState::LevelComplete => draw_panel(view, w, h, "Level Complete!", &[
            format!("Level {} Complete!", session.current_level),
            format!("Score: {}", session.player.score),
            format!("Time: {}s", session.elapsed_seconds().floor()),
            "ENTER: next level    ESC: menu".to_string(),
        ]),
        SessionState::GameOver => draw_panel(view, w, h, "Time's Up!", &[
            "You ran out of time!".to_string(),
            "ENTER: try again    ESC: menu".to_string(),
        ]),
        SessionState::Won => draw_panel(view, w, h, "Game Won!", &[
            "Congratulations! You completed all levels!".to_string(),
            format!("Total score: {}", session.total_score),
            "ENTER: play again    ESC: menu".to_string(),
        ]),
    }
}

fn draw_settings<S: Storage>(view: &View, app: &App<S>, screen: &SettingsScreen, time: f64) {
    let config = app.session.config();
    draw_panel(view, config.world_width, config.world_height, "Controls", &[]);

    let cx = view.x(config.world_width / 2.0);
    let mut y = view.y(config.world_height / 2.0);
    for (i, (action, key)) in SettingsScreen::rows(&app.keys).into_iter().enumerate() {
        let listening = screen.listening == Some(action);
        let color = if listening { ACCENT_COLOR } else { TEXT_COLOR };
        draw_text(&format!("{}. {}", i + 1, action.label()), cx - 160.0, y, 22.0, color);
        draw_text(&key, cx + 80.0, y, 22.0, color);
        y += 30.0;
    }

    if let Some(status) = screen.status_at(time) {
        draw_centered(status, cx, y + 10.0, 20.0, ACCENT_COLOR);
    }
    draw_centered(
        "1-4: rebind    BACKSPACE: reset    TAB/ESC: close",
        cx,
        y + 50.0,
        18.0,
        MUTED_COLOR,
    );
}

/// Draw one complete frame
pub fn draw_frame<S: Storage>(app: &App<S>, stars: &Starfield, sound_on: bool, time: f64) {
    let session = &app.session;
    let config = session.config();
    let (w, h) = (config.world_width, config.world_height);
    let view = View::fit(w, h, screen_width(), screen_height());

    draw_background(&view, w, h);
    stars.draw(&view, time);
    draw_grid(&view, w, h);

    if session.state != SessionState::Menu {
        for platform in &session.level.platforms {
            draw_platform(&view, platform);
        }
        for (i, collectible) in session.level.collectibles.iter().enumerate() {
            draw_collectible(&view, collectible, i, time);
        }
        draw_player(&view, session, time);
        draw_particles(&view, &app.particles);
        draw_hud(&view, session);
    }

    match &app.settings {
        Some(screen) => draw_settings(&view, app, screen, time),
        None => draw_state_overlay(&view, session, sound_on),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_letterboxes() {
        // Wider than 5:3: bars left and right
        let view = View::fit(1000.0, 600.0, 2000.0, 900.0);
        assert_eq!(view.scale, 1.5);
        assert_eq!(view.offset_x, 250.0);
        assert_eq!(view.offset_y, 0.0);
        assert_eq!(view.x(1000.0), 1750.0);

        let view = View::fit(1000.0, 600.0, 500.0, 600.0);
        assert_eq!(view.scale, 0.5);
        assert_eq!(view.offset_y, 150.0);
    }

    #[test]
    fn test_starfield_is_seeded() {
        let a = Starfield::new(11, 1000.0, 600.0);
        let b = Starfield::new(11, 1000.0, 600.0);
        assert_eq!(a.stars.len(), 50);
        for (s, t) in a.stars.iter().zip(&b.stars) {
            assert_eq!((s.x, s.y), (t.x, t.y));
            assert!((0.0..1000.0).contains(&s.x) && (0.0..600.0).contains(&s.y));
            assert!((0.5..1.0).contains(&s.opacity));
        }
    }
}
