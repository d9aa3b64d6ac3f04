//! Application state
//!
//! Glue between the macroquad host and the simulation: host commands, the
//! key-rebinding screen, the fixed-step clock, and routing of drained game
//! events to audio cues and particle bursts. Everything that does not need a
//! live window is plain data so it can be tested directly.

use crate::audio::{AudioCue, AudioSink};
use crate::config::GameConfig;
use crate::game::{
    Burst, DeathCause, FrameClock, GameEvent, GameSession, ParticlePool, SessionState,
    Vec2,
};
use crate::input::{display_name, Action, BindingError, InputState, KeyCapture};
use crate::storage::{KeyBindingStore, Storage};

/// Player body color, reused for its dash trail
pub const PLAYER_COLOR: [u8; 3] = [0x00, 0xd4, 0xff];

/// Landings softer than this make no dust
const LAND_DUST_SPEED: f64 = 2.0;

/// How long settings status messages stay up (seconds)
const STATUS_SECONDS: f64 = 1.0;

/// Host-level commands, independent of the key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start / next level / retry, whichever applies
    Confirm,
    Pause,
    Restart,
    Menu,
    OpenSettings,
    ToggleSound,
}

/// Host command keys by key identifier. "Escape" and "Tab" are never
/// bindable; the others can be claimed by an action.
pub const HOST_KEYS: [(&str, Command); 6] = [
    ("Enter", Command::Confirm),
    ("p", Command::Pause),
    ("r", Command::Restart),
    ("Escape", Command::Menu),
    ("Tab", Command::OpenSettings),
    ("m", Command::ToggleSound),
];

// =============================================================================
// Event routing
// =============================================================================

/// Sound for an event, if any
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::Jumped { .. } => Some(AudioCue::Jump),
        GameEvent::Dashed { .. } => Some(AudioCue::Dash),
        GameEvent::Collected { .. } => Some(AudioCue::Collectible),
        GameEvent::Died { cause: DeathCause::Spike, .. } => Some(AudioCue::Damage),
        GameEvent::LevelComplete { .. } => Some(AudioCue::LevelComplete),
        GameEvent::GameOver { .. } => Some(AudioCue::Damage),
        GameEvent::Died { cause: DeathCause::Fall, .. }
        | GameEvent::Landed { .. }
        | GameEvent::Won { .. } => None,
    }
}

/// Particle burst for an event, if any
pub fn burst_for(event: &GameEvent) -> Option<(Vec2, Burst)> {
    match *event {
        GameEvent::Dashed { position } => Some((position, Burst::dash(PLAYER_COLOR))),
        GameEvent::Landed { position, impact_speed } if impact_speed > LAND_DUST_SPEED => {
            Some((position, Burst::land()))
        }
        GameEvent::Collected { position, .. } => Some((position, Burst::collect())),
        GameEvent::Died { position, cause: DeathCause::Spike } => Some((position, Burst::spike())),
        GameEvent::Died { position, cause: DeathCause::Fall } => Some((position, Burst::fall())),
        _ => None,
    }
}

/// Fire every effect for one event
pub fn dispatch(event: &GameEvent, audio: &mut impl AudioSink, particles: &mut ParticlePool) {
    if let Some(cue) = cue_for(event) {
        audio.play(cue);
    }
    if let Some((position, burst)) = burst_for(event) {
        particles.emit_burst(position, burst);
    }
}

// =============================================================================
// Settings screen
// =============================================================================

/// Transient message under the key list
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub until: f64,
}

/// Key-rebinding screen state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsScreen {
    /// Action waiting for a key press
    pub listening: Option<Action>,
    pub status: Option<Status>,
}

impl SettingsScreen {
    pub fn listen(&mut self, action: Action, now: f64) {
        self.listening = Some(action);
        self.set_status("Press any key...", now);
    }

    fn set_status(&mut self, text: &str, now: f64) {
        self.status = Some(Status { text: text.to_string(), until: now + STATUS_SECONDS });
    }

    /// Bind the captured key to the action being listened for
    pub fn capture<S: Storage>(&mut self, capture: KeyCapture, keys: &mut KeyBindingStore<S>, now: f64) {
        let Some(action) = self.listening.take() else {
            return;
        };

        let result = match capture {
            KeyCapture::Bindable(key) => keys.set_key(action, key),
            KeyCapture::Unbindable(code) => Err(BindingError::NotBindable(format!("{:?}", code))),
        };

        let text = match result {
            Ok(()) => "Key set!",
            Err(BindingError::InUse { .. }) => "Key in use!",
            Err(BindingError::NotBindable(_)) => "Invalid key!",
        };
        if let Err(e) = result {
            tracing::debug!("Rebind of {} rejected: {}", action, e);
        }
        self.set_status(text, now);
    }

    pub fn reset<S: Storage>(&mut self, keys: &mut KeyBindingStore<S>, now: f64) {
        self.listening = None;
        if let Err(e) = keys.reset() {
            tracing::warn!("Could not save key bindings: {}", e);
        }
        self.set_status("Keys reset!", now);
    }

    /// Status text still on screen at `now`
    pub fn status_at(&self, now: f64) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| now < s.until || self.listening.is_some())
            .map(|s| s.text.as_str())
    }

    /// (action label, key label) rows for display
    pub fn rows<S: Storage>(keys: &KeyBindingStore<S>) -> Vec<(Action, String)> {
        keys.bindings()
            .iter()
            .map(|(action, key)| (action, display_name(key)))
            .collect()
    }
}

// =============================================================================
// App
// =============================================================================

pub struct App<S: Storage> {
    pub session: GameSession,
    pub keys: KeyBindingStore<S>,
    pub particles: ParticlePool,
    /// Open when `Some`
    pub settings: Option<SettingsScreen>,
    pub input: InputState,
    clock: FrameClock,
}

impl<S: Storage> App<S> {
    pub fn new(config: GameConfig, seed: u64, storage: S) -> Self {
        let clock = FrameClock::new(config.ticks_per_second);
        Self {
            session: GameSession::new(config, seed),
            keys: KeyBindingStore::load(storage),
            particles: ParticlePool::new(seed.wrapping_add(1)),
            settings: None,
            input: InputState::new(),
            clock,
        }
    }

    /// Command for a pressed host key. While playing, a key bound to an action
    /// belongs to the action and issues no command.
    pub fn host_command(&self, key: &str) -> Option<Command> {
        if self.session.state == SessionState::Playing
            && self.settings.is_none()
            && self.keys.bindings().action_for(key).is_some()
        {
            return None;
        }
        HOST_KEYS.iter().find(|(id, _)| *id == key).map(|(_, command)| *command)
    }

    /// Apply a host command. Returns whether anything changed.
    pub fn command(&mut self, command: Command, audio: &mut impl SoundToggle) -> bool {
        // Only leaving or sound work behind the settings screen
        if self.settings.is_some()
            && matches!(command, Command::Confirm | Command::Pause | Command::Restart)
        {
            return false;
        }

        let session = &mut self.session;
        let applied = match command {
            Command::Confirm => match session.state {
                SessionState::Menu | SessionState::Won => session.start_game(),
                SessionState::LevelComplete => session.next_level(),
                SessionState::GameOver => session.retry_level(),
                SessionState::Playing | SessionState::Paused => false,
            },
            Command::Pause => session.toggle_pause(),
            Command::Restart => session.restart_level(),
            Command::Menu => {
                if self.settings.take().is_some() {
                    true
                } else {
                    session.go_to_menu()
                }
            }
            Command::OpenSettings => {
                if session.state == SessionState::Playing {
                    session.toggle_pause();
                }
                match self.settings {
                    Some(_) => self.settings = None,
                    None => self.settings = Some(SettingsScreen::default()),
                }
                true
            }
            Command::ToggleSound => {
                let on = audio.toggle_sound();
                tracing::info!("Sound {}", if on { "on" } else { "off" });
                true
            }
        };

        if applied && matches!(command, Command::Confirm | Command::Restart | Command::Menu) {
            self.particles.clear();
            self.input.clear();
            self.clock.reset();
        }
        applied
    }

    /// Run however many fixed ticks `frame_seconds` is worth, then route the
    /// events they produced.
    pub fn advance(&mut self, frame_seconds: f64, audio: &mut impl AudioSink) {
        if self.session.state != SessionState::Playing || self.settings.is_some() {
            self.clock.reset();
            return;
        }

        let ticks = self.clock.advance(frame_seconds);
        for _ in 0..ticks {
            let controls = self.input.controls();
            self.session.tick(&controls);
            self.particles.update();
            if self.session.state != SessionState::Playing {
                break;
            }
        }

        let events: Vec<GameEvent> = self.session.events.drain().collect();
        for event in &events {
            dispatch(event, audio, &mut self.particles);
        }
    }
}

/// The part of the audio backend `App::command` needs
pub trait SoundToggle {
    /// Flip sound on/off, returning the new state
    fn toggle_sound(&mut self) -> bool;
}

impl SoundToggle for crate::audio::GameAudio {
    fn toggle_sound(&mut self) -> bool {
        self.toggle()
    }
}
