//! Game Foundation Module
//!
//! The platformer simulation. Everything in here is host-independent: no
//! drawing, no audio, no key codes. The host feeds `Controls` into
//! `GameSession::tick` at a fixed rate and reacts to the drained events.
//!
//! Key concepts:
//! - Body: shared physics component embedded by player, platforms and collectibles
//! - Level: platforms, collectibles and a goal, authored or generated
//! - Session: state machine that runs the per-tick phases in order
//! - Event: decoupled notifications for audio and particles

pub mod math;
pub mod components;
pub mod player;
pub mod collision;
pub mod level;
pub mod event;
pub mod particles;
pub mod session;
pub mod runtime;

// Re-export main types
pub use math::Vec2;
pub use components::{Collectible, Platform, PlatformKind};
pub use event::{DeathCause, GameEvent};
pub use particles::{Burst, ParticlePool};
pub use session::{Controls, GameSession, SessionState};
pub use runtime::FrameClock;
