use crate::input::event_codes::{KEY_CAPSLOCK, KEY_LEFTSHIFT, KEY_RIGHTSHIFT};
use crate::input::{InputEvent, KeyState};

/// Caps lock and shift state, tracked across the key events of one dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub caps_lock: bool,
    pub shift_held: bool,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the state from a key event. Events for other keys leave it untouched.
    pub fn update(&mut self, ev: &InputEvent) {
        match (ev.code, ev.state()) {
            (KEY_CAPSLOCK, Some(KeyState::Pressed)) => self.caps_lock ^= true,
            (KEY_LEFTSHIFT | KEY_RIGHTSHIFT, Some(KeyState::Pressed)) => self.shift_held = true,
            (KEY_LEFTSHIFT | KEY_RIGHTSHIFT, Some(KeyState::Released)) => self.shift_held = false,
            _ => {}
        }
    }
}

/// Whether `code` is either shift key.
pub(crate) fn is_shift(code: u16) -> bool {
    matches!(code, KEY_LEFTSHIFT | KEY_RIGHTSHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event_codes::{EV_KEY, KEY_A};

    fn key(code: u16, value: i32) -> InputEvent {
        InputEvent {
            secs: 0,
            micros: 0,
            kind: EV_KEY,
            code,
            value,
        }
    }

    #[test]
    fn caps_lock_toggles_on_press_only() {
        let mut state = ModifierState::new();

        state.update(&key(KEY_CAPSLOCK, 1));
        assert!(state.caps_lock);
        state.update(&key(KEY_CAPSLOCK, 2));
        state.update(&key(KEY_CAPSLOCK, 0));
        assert!(state.caps_lock);
        state.update(&key(KEY_CAPSLOCK, 1));
        assert!(!state.caps_lock);
    }

    #[test]
    fn shift_follows_press_and_release() {
        let mut state = ModifierState::new();

        state.update(&key(KEY_LEFTSHIFT, 1));
        assert!(state.shift_held);
        state.update(&key(KEY_LEFTSHIFT, 2));
        assert!(state.shift_held);
        state.update(&key(KEY_RIGHTSHIFT, 0));
        assert!(!state.shift_held);
        state.update(&key(KEY_RIGHTSHIFT, 1));
        assert!(state.shift_held);
    }

    #[test]
    fn repeat_does_not_set_shift() {
        let mut state = ModifierState::new();

        state.update(&key(KEY_RIGHTSHIFT, 2));
        assert!(!state.shift_held);
    }

    #[test]
    fn other_keys_leave_state_alone() {
        let mut state = ModifierState {
            caps_lock: true,
            shift_held: true,
        };

        for value in [0, 1, 2, 42] {
            state.update(&key(KEY_A, value));
        }
        state.update(&key(KEY_LEFTSHIFT, 42));

        assert_eq!(
            state,
            ModifierState {
                caps_lock: true,
                shift_held: true,
            }
        );
    }

    #[test]
    fn shift_codes() {
        assert!(is_shift(KEY_LEFTSHIFT));
        assert!(is_shift(KEY_RIGHTSHIFT));
        assert!(!is_shift(KEY_CAPSLOCK));
        assert!(!is_shift(KEY_A));
    }
}
