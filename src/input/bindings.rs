//! Key bindings
//!
//! Maps each `Action` to one physical key identifier. Identifiers are plain
//! strings ("a".."z", " ", "Enter", "ArrowUp", "Shift", ...) so the saved
//! file stays readable and host-independent. Translating identifiers to
//! macroquad key codes happens in `input::state`.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use super::Action;

/// Every key identifier that may be bound to an action
pub const BINDABLE_KEYS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m",
    "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
    " ", "Enter", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight",
    "Shift", "Control", "Alt",
];

/// Why a rebind was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("key {0:?} cannot be bound")]
    NotBindable(String),
    #[error("key {key:?} is already bound to {action}")]
    InUse { key: String, action: Action },
}

pub fn is_bindable(key: &str) -> bool {
    BINDABLE_KEYS.contains(&key)
}

/// Short upper-case label for a key identifier
pub fn display_name(key: &str) -> String {
    match key {
        " " => "SPACE".to_string(),
        "Enter" => "ENTER".to_string(),
        "ArrowUp" => "UP".to_string(),
        "ArrowDown" => "DOWN".to_string(),
        "ArrowLeft" => "LEFT".to_string(),
        "ArrowRight" => "RIGHT".to_string(),
        "Shift" => "SHIFT".to_string(),
        "Control" => "CTRL".to_string(),
        "Alt" => "ALT".to_string(),
        other => other.to_uppercase(),
    }
}

/// One key per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: String,
    pub left: String,
    pub right: String,
    pub dash: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: "w".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            dash: " ".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn get(&self, action: Action) -> &str {
        match action {
            Action::Jump => &self.jump,
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Dash => &self.dash,
        }
    }

    fn slot_mut(&mut self, action: Action) -> &mut String {
        match action {
            Action::Jump => &mut self.jump,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Dash => &mut self.dash,
        }
    }

    /// Which action (if any) currently owns `key`. Case-insensitive.
    pub fn action_for(&self, key: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&a| self.get(a).eq_ignore_ascii_case(key))
    }

    /// Rebind `action` to `key`. On error nothing changes.
    pub fn set_key(&mut self, action: Action, key: &str) -> Result<(), BindingError> {
        if !is_bindable(key) {
            return Err(BindingError::NotBindable(key.to_string()));
        }

        let owner = Action::ALL
            .into_iter()
            .filter(|&a| a != action)
            .find(|&a| self.get(a).eq_ignore_ascii_case(key));
        if let Some(owner) = owner {
            return Err(BindingError::InUse { key: key.to_string(), action: owner });
        }

        *self.slot_mut(action) = key.to_string();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, &str)> {
        Action::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(Action::Jump), "w");
        assert_eq!(keys.get(Action::Left), "a");
        assert_eq!(keys.get(Action::Right), "d");
        assert_eq!(keys.get(Action::Dash), " ");
    }

    #[test]
    fn test_duplicate_rejected_and_unchanged() {
        let mut keys = KeyBindings::default();
        let before = keys.clone();

        let result = keys.set_key(Action::Dash, "a");
        assert_eq!(
            result,
            Err(BindingError::InUse { key: "a".to_string(), action: Action::Left })
        );
        assert_eq!(keys, before);
        assert_eq!(keys.get(Action::Left), "a");
        assert_eq!(keys.get(Action::Dash), " ");
    }

    #[test]
    fn test_duplicate_check_ignores_case() {
        let mut keys = KeyBindings::default();
        keys.left = "A".to_string();
        assert!(matches!(keys.set_key(Action::Jump, "a"), Err(BindingError::InUse { .. })));
    }

    #[test]
    fn test_rebinding_same_action_to_its_own_key() {
        let mut keys = KeyBindings::default();
        assert_eq!(keys.set_key(Action::Left, "a"), Ok(()));
        assert_eq!(keys.set_key(Action::Jump, "ArrowUp"), Ok(()));
        assert_eq!(keys.get(Action::Jump), "ArrowUp");
        assert_eq!(keys.action_for("arrowup"), Some(Action::Jump));
    }

    #[test]
    fn test_not_bindable() {
        let mut keys = KeyBindings::default();
        for key in ["Escape", "1", "F5", "", "A"] {
            assert_eq!(
                keys.set_key(Action::Jump, key),
                Err(BindingError::NotBindable(key.to_string()))
            );
        }
        assert_eq!(keys, KeyBindings::default());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name(" "), "SPACE");
        assert_eq!(display_name("Control"), "CTRL");
        assert_eq!(display_name("ArrowLeft"), "LEFT");
        assert_eq!(display_name("q"), "Q");
    }
}
