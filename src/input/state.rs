//! Input state management
//!
//! Polls the keyboard (macroquad) once per frame and turns the bound keys
//! into a `Controls` snapshot per simulation tick. A frame can run zero or
//! several ticks, so presses are latched until a tick consumes them: a jump
//! pressed on a frame that runs no tick is not lost, and a frame that runs
//! three ticks does not jump three times.

use macroquad::prelude::{get_last_key_pressed, is_key_down, is_key_pressed, KeyCode};
use crate::game::Controls;
use super::{Action, KeyBindings};

/// macroquad key codes for a key identifier. Modifiers match either side.
pub fn key_codes(key: &str) -> Vec<KeyCode> {
    let code = match key {
        " " => KeyCode::Space,
        "Enter" => return vec![KeyCode::Enter, KeyCode::KpEnter],
        "ArrowUp" => KeyCode::Up,
        "ArrowDown" => KeyCode::Down,
        "ArrowLeft" => KeyCode::Left,
        "ArrowRight" => KeyCode::Right,
        "Shift" => return vec![KeyCode::LeftShift, KeyCode::RightShift],
        "Control" => return vec![KeyCode::LeftControl, KeyCode::RightControl],
        "Alt" => return vec![KeyCode::LeftAlt, KeyCode::RightAlt],
        letter => match letter_code(letter) {
            Some(code) => code,
            None => return Vec::new(),
        },
    };
    vec![code]
}

fn letter_code(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }
    Some(match c {
        'a' => KeyCode::A, 'b' => KeyCode::B, 'c' => KeyCode::C, 'd' => KeyCode::D,
        'e' => KeyCode::E, 'f' => KeyCode::F, 'g' => KeyCode::G, 'h' => KeyCode::H,
        'i' => KeyCode::I, 'j' => KeyCode::J, 'k' => KeyCode::K, 'l' => KeyCode::L,
        'm' => KeyCode::M, 'n' => KeyCode::N, 'o' => KeyCode::O, 'p' => KeyCode::P,
        'q' => KeyCode::Q, 'r' => KeyCode::R, 's' => KeyCode::S, 't' => KeyCode::T,
        'u' => KeyCode::U, 'v' => KeyCode::V, 'w' => KeyCode::W, 'x' => KeyCode::X,
        'y' => KeyCode::Y, 'z' => KeyCode::Z,
        _ => return None,
    })
}

/// Key identifier for a pressed key code, used when capturing a rebind.
/// Keys outside the bindable set map to `None`.
pub fn key_id(code: KeyCode) -> Option<&'static str> {
    Some(match code {
        KeyCode::A => "a", KeyCode::B => "b", KeyCode::C => "c", KeyCode::D => "d",
        KeyCode::E => "e", KeyCode::F => "f", KeyCode::G => "g", KeyCode::H => "h",
        KeyCode::I => "i", KeyCode::J => "j", KeyCode::K => "k", KeyCode::L => "l",
        KeyCode::M => "m", KeyCode::N => "n", KeyCode::O => "o", KeyCode::P => "p",
        KeyCode::Q => "q", KeyCode::R => "r", KeyCode::S => "s", KeyCode::T => "t",
        KeyCode::U => "u", KeyCode::V => "v", KeyCode::W => "w", KeyCode::X => "x",
        KeyCode::Y => "y", KeyCode::Z => "z",
        KeyCode::Space => " ",
        KeyCode::Enter | KeyCode::KpEnter => "Enter",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::LeftShift | KeyCode::RightShift => "Shift",
        KeyCode::LeftControl | KeyCode::RightControl => "Control",
        KeyCode::LeftAlt | KeyCode::RightAlt => "Alt",
        _ => return None,
    })
}

/// A key press seen while waiting for a rebind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCapture {
    Bindable(&'static str),
    Unbindable(KeyCode),
}

/// Press latch independent of the keyboard backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlLatch {
    left: bool,
    right: bool,
    jump: bool,
    dash: bool,
}

impl ControlLatch {
    /// Record this frame's keyboard state
    pub fn record(&mut self, held_left: bool, held_right: bool, jump_pressed: bool, dash_pressed: bool) {
        self.left = held_left;
        self.right = held_right;
        self.jump |= jump_pressed;
        self.dash |= dash_pressed;
    }

    /// Controls for the next tick; consumes latched presses
    pub fn take(&mut self) -> Controls {
        let controls = Controls {
            left: self.left,
            right: self.right,
            jump: self.jump,
            dash: self.dash,
        };
        self.jump = false;
        self.dash = false;
        controls
    }

    /// Drop pending presses (screen change, pause)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Keyboard state routed through the current bindings
#[derive(Debug, Default)]
pub struct InputState {
    latch: ControlLatch,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame before running ticks
    pub fn poll(&mut self, bindings: &KeyBindings) {
        let down = |action: Action| key_codes(bindings.get(action)).into_iter().any(is_key_down);
        let pressed = |action: Action| key_codes(bindings.get(action)).into_iter().any(is_key_pressed);

        self.latch.record(
            down(Action::Left),
            down(Action::Right),
            pressed(Action::Jump),
            pressed(Action::Dash),
        );
    }

    /// Controls for one tick
    pub fn controls(&mut self) -> Controls {
        self.latch.take()
    }

    pub fn clear(&mut self) {
        self.latch.clear();
    }

    /// The key pressed this frame, if any (rebinding capture)
    pub fn captured_key() -> Option<KeyCapture> {
        get_last_key_pressed().map(|code| match key_id(code) {
            Some(key) => KeyCapture::Bindable(key),
            None => KeyCapture::Unbindable(code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::bindings::BINDABLE_KEYS;

    #[test]
    fn test_every_bindable_key_maps_both_ways() {
        for &key in BINDABLE_KEYS {
            let codes = key_codes(key);
            assert!(!codes.is_empty(), "{key:?}");
            for code in codes {
                assert_eq!(key_id(code), Some(key));
            }
        }
        assert!(key_codes("Escape").is_empty());
        assert_eq!(key_id(KeyCode::Escape), None);
    }

    #[test]
    fn test_uppercase_letter_still_maps() {
        assert_eq!(key_codes("W"), vec![KeyCode::W]);
    }

    #[test]
    fn test_press_consumed_by_one_tick() {
        let mut latch = ControlLatch::default();
        latch.record(false, true, true, false);

        let first = latch.take();
        assert!(first.jump && first.right);

        // Held keys persist across ticks within the frame, presses do not
        let second = latch.take();
        assert!(!second.jump && second.right);
    }

    #[test]
    fn test_press_survives_frame_without_tick() {
        let mut latch = ControlLatch::default();
        latch.record(false, false, false, true);
        latch.record(false, false, false, false);
        assert!(latch.take().dash);
    }
}
