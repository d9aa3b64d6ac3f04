//! Game action definitions
//!
//! The simulation only ever sees these four logical actions. Which physical
//! key triggers each one is decided by `KeyBindings`.

use std::fmt;

/// All rebindable game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Left,
    Right,
    Dash,
}

impl Action {
    /// Every action, in settings-screen order
    pub const ALL: [Action; 4] = [Action::Jump, Action::Left, Action::Right, Action::Dash];

    /// Stable name used in saved bindings and status messages
    pub fn name(&self) -> &'static str {
        match self {
            Action::Jump => "jump",
            Action::Left => "left",
            Action::Right => "right",
            Action::Dash => "dash",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Label for the settings screen
    pub fn label(&self) -> &'static str {
        match self {
            Action::Jump => "Jump",
            Action::Left => "Move Left",
            Action::Right => "Move Right",
            Action::Dash => "Dash",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
