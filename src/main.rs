//! Platform Dash: a small 2D platformer
//!
//! Reach the green goal before time runs out, grabbing gems on the way and
//! keeping clear of spikes. The simulation in `game` is pure and tick-driven;
//! this file only hosts it in a macroquad window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod audio;
mod config;
mod game;
mod input;
mod render;
mod storage;

use macroquad::prelude::*;
use app::{App, Command, SettingsScreen};
use audio::GameAudio;
use config::GameConfig;
use input::{Action, InputState};
use render::Starfield;

const CONFIG_PATH: &str = "config.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Platform Dash v{}", VERSION),
        window_width: 1000,
        window_height: 600,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(not(target_arch = "wasm32"))]
fn open_storage() -> storage::LocalStorage {
    storage::LocalStorage::in_config_dir()
}

#[cfg(target_arch = "wasm32")]
fn open_storage() -> storage::WebStorage {
    storage::WebStorage::new()
}

/// First host command pressed this frame
fn host_command<S: storage::Storage>(app: &App<S>) -> Option<Command> {
    const CODES: [(KeyCode, &str); 6] = [
        (KeyCode::Enter, "Enter"),
        (KeyCode::P, "p"),
        (KeyCode::R, "r"),
        (KeyCode::Escape, "Escape"),
        (KeyCode::Tab, "Tab"),
        (KeyCode::M, "m"),
    ];
    CODES
        .iter()
        .filter(|(code, _)| is_key_pressed(*code))
        .find_map(|(_, key)| app.host_command(key))
}

/// Number keys 1-4 pick the action to rebind
fn rebind_choice() -> Option<Action> {
    [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4]
        .into_iter()
        .zip(Action::ALL)
        .find(|(code, _)| is_key_pressed(*code))
        .map(|(_, action)| action)
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging first, before anything can panic
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);
    #[cfg(not(target_arch = "wasm32"))]
    init_logging();

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    tracing::info!("Platform Dash v{} (seed {})", VERSION, seed);

    let stars = Starfield::new(seed, config.world_width, config.world_height);
    let mut app = App::new(config, seed, open_storage());
    let mut audio = GameAudio::load().await;

    loop {
        let now = get_time();

        // A pending rebind swallows the next key press, host keys included
        let listening = app.settings.as_ref().is_some_and(|s| s.listening.is_some());
        if listening {
            if let Some(capture) = InputState::captured_key() {
                if let Some(screen) = app.settings.as_mut() {
                    screen.capture(capture, &mut app.keys, now);
                }
            }
        } else {
            if let Some(command) = host_command(&app) {
                app.command(command, &mut audio);
            }
            if let Some(screen) = app.settings.as_mut() {
                settings_keys(screen, &mut app.keys, now);
            }
        }

        if app.settings.is_none() {
            app.input.poll(app.keys.bindings());
        }

        app.advance(get_frame_time() as f64, &mut audio);
        render::draw_frame(&app, &stars, audio.enabled, now);

        next_frame().await;
    }
}

fn settings_keys<S: storage::Storage>(
    screen: &mut SettingsScreen,
    keys: &mut storage::KeyBindingStore<S>,
    now: f64,
) {
    if let Some(action) = rebind_choice() {
        screen.listen(action, now);
    } else if is_key_pressed(KeyCode::Backspace) {
        screen.reset(keys, now);
    }
}
