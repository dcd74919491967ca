use serde::{Deserialize, Serialize};

/// Debounced key codes reported by the keypad driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit7,
    Digit8,
    Digit9,
    Menu,
    Star,
    Exit,
}

/// Polled "current key" source; `None` means nothing pressed this tick.
pub trait Keypad {
    fn current_key(&mut self) -> Option<Key>;
}

/// Hold threshold before a key starts auto-repeating.
pub const KEY_HOLD_MS: u32 = 500;

/// Edge produced from one keypad poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub is_new: bool,
    pub is_held: bool,
}

/// Derives new-press and held-repeat edges from raw polled key state.
#[derive(Debug, Default)]
pub struct KeyTracker {
    last_key: Option<Key>,
    press_started_ms: u32,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one poll result at `now_ms` and reports the resulting edge, if
    /// any. Release (key -> None) produces no event.
    pub fn update(&mut self, key: Option<Key>, now_ms: u32) -> Option<KeyEvent> {
        if key != self.last_key && key.is_some() {
            self.press_started_ms = now_ms;
        }
        let is_new = key != self.last_key;
        let is_held = key == self.last_key
            && key.is_some()
            && now_ms.wrapping_sub(self.press_started_ms) >= KEY_HOLD_MS;
        self.last_key = key;

        match key {
            Some(key) if is_new || is_held => Some(KeyEvent {
                key,
                is_new,
                is_held,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_is_a_new_edge() {
        let mut tracker = KeyTracker::new();
        let event = tracker.update(Some(Key::Up), 0).unwrap();
        assert!(event.is_new);
        assert!(!event.is_held);
    }

    #[test]
    fn short_hold_produces_no_repeat() {
        let mut tracker = KeyTracker::new();
        tracker.update(Some(Key::Up), 0);
        assert!(tracker.update(Some(Key::Up), 499).is_none());
    }

    #[test]
    fn long_hold_repeats_until_release() {
        let mut tracker = KeyTracker::new();
        tracker.update(Some(Key::Digit3), 0);
        let event = tracker.update(Some(Key::Digit3), 500).unwrap();
        assert!(event.is_held);
        assert!(!event.is_new);
        assert!(tracker.update(None, 600).is_none());
        // A fresh press restarts the hold timer.
        let event = tracker.update(Some(Key::Digit3), 700).unwrap();
        assert!(event.is_new);
    }
}
