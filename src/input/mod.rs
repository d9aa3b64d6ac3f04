//! Input handling
//!
//! Provides an action-based input system over the keyboard. Actions are
//! bound to key identifiers by `KeyBindings`; `InputState` polls macroquad
//! and hands the simulation one `Controls` snapshot per tick.

mod actions;
pub mod bindings;
mod state;

pub use actions::*;
pub use bindings::{display_name, is_bindable, BindingError, KeyBindings};
pub use state::*;
