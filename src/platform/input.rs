//! Keyboard state and edge detection

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "Enter" | " " => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Anything that can report key state
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;

    /// Window closed or equivalent
    fn quit_requested(&mut self) -> bool {
        false
    }
}

/// Plain key-down flags, updated by event handlers or scripted by tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub enter: bool,
    pub escape: bool,
    /// Sticky quit flag (window close)
    pub closed: bool,
}

impl KeySnapshot {
    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Up => self.up = down,
            Key::Down => self.down = down,
            Key::Enter => self.enter = down,
            Key::Escape => self.escape = down,
        }
    }
}

impl InputSource for KeySnapshot {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Enter => self.enter,
            Key::Escape => self.escape,
        }
    }

    fn quit_requested(&mut self) -> bool {
        self.closed
    }
}

/// Turns level key state into per-frame `TickInput`, firing Enter/Escape
/// only on the frame they go down
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    enter_was_down: bool,
    escape_was_down: bool,
}

impl InputLatch {
    pub fn sample(&mut self, source: &mut impl InputSource) -> TickInput {
        let enter = source.is_key_down(Key::Enter);
        let escape = source.is_key_down(Key::Escape);
        let confirm = enter && !self.enter_was_down;
        let escape_pressed = escape && !self.escape_was_down;
        self.enter_was_down = enter;
        self.escape_was_down = escape;

        TickInput {
            keys: KeySnapshot {
                left: source.is_key_down(Key::Left),
                right: source.is_key_down(Key::Right),
                up: source.is_key_down(Key::Up),
                down: source.is_key_down(Key::Down),
                ..Default::default()
            },
            confirm,
            quit: escape_pressed || source.quit_requested(),
            autopilot: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_fires_once_per_press() {
        let mut latch = InputLatch::default();
        let mut keys = KeySnapshot::default();

        keys.set(Key::Enter, true);
        assert!(latch.sample(&mut keys).confirm);
        assert!(!latch.sample(&mut keys).confirm);

        keys.set(Key::Enter, false);
        assert!(!latch.sample(&mut keys).confirm);
        keys.set(Key::Enter, true);
        assert!(latch.sample(&mut keys).confirm);
    }

    #[test]
    fn test_quit_on_escape_or_close() {
        let mut latch = InputLatch::default();
        let mut keys = KeySnapshot::default();
        assert!(!latch.sample(&mut keys).quit);

        keys.set(Key::Escape, true);
        assert!(latch.sample(&mut keys).quit);

        let mut closed = KeySnapshot {
            closed: true,
            ..Default::default()
        };
        assert!(InputLatch::default().sample(&mut closed).quit);
    }

    #[test]
    fn test_arrows_are_levels() {
        let mut latch = InputLatch::default();
        let mut keys = KeySnapshot::default();
        keys.set(Key::Left, true);
        keys.set(Key::Down, true);
        for _ in 0..3 {
            let input = latch.sample(&mut keys);
            assert!(input.keys.left && input.keys.down);
            assert!(!input.keys.right && !input.keys.up);
        }
    }

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom_key("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_dom_key("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_dom_key("q"), None);
    }
}
