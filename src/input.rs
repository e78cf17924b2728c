//! Keyboard state
//!
//! Written by key events between frames, read once per frame as a
//! [`TickInput`] snapshot. Jump is latched on the press edge so holding the
//! key (or OS key repeat) never produces more than one jump.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" | " " => Some(Key::Jump),
            _ => None,
        }
    }
}

/// Held keys plus the pending jump press
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
    jump_held: bool,
    jump_pressed: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. `repeat` is the DOM auto-repeat flag.
    pub fn press(&mut self, key: Key, repeat: bool) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => {
                if !self.jump_held && !repeat {
                    self.jump_pressed = true;
                }
                self.jump_held = true;
            }
        }
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Jump => self.jump_held = false,
        }
    }

    /// Drop everything. Key sources call this when the window loses focus.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Jump => self.jump_held,
        }
    }

    /// Input for the next frame; consumes the pending jump press
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: std::mem::take(&mut self.jump_pressed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom_key("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Jump));
        assert_eq!(Key::from_dom_key(" "), Some(Key::Jump));
        assert_eq!(Key::from_dom_key("r"), None);
        assert_eq!(Key::from_dom_key("ArrowDown"), None);
    }

    #[test]
    fn test_jump_latched_once_per_press() {
        let mut keys = KeyState::new();
        keys.press(Key::Jump, false);
        assert!(keys.snapshot().jump);
        // Still held: no second jump
        assert!(!keys.snapshot().jump);
        keys.press(Key::Jump, true);
        assert!(!keys.snapshot().jump);

        keys.release(Key::Jump);
        keys.press(Key::Jump, false);
        assert!(keys.snapshot().jump);
    }

    #[test]
    fn test_tap_between_frames_still_jumps() {
        let mut keys = KeyState::new();
        keys.press(Key::Jump, false);
        keys.release(Key::Jump);
        let input = keys.snapshot();
        assert!(input.jump);
        assert!(!keys.is_held(Key::Jump));
    }

    #[test]
    fn test_held_directions() {
        let mut keys = KeyState::new();
        keys.press(Key::Left, false);
        keys.press(Key::Right, false);
        let input = keys.snapshot();
        assert!(input.left && input.right && !input.jump);

        keys.release(Key::Left);
        let input = keys.snapshot();
        assert!(!input.left && input.right);

        keys.clear();
        assert_eq!(keys.snapshot(), TickInput::default());
    }
}
