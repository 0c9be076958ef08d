//! Input management system
//!
//! Keyboard state derived from the platform's event stream. The manager keeps
//! two views of the keyboard: keys held down right now (for continuous actions
//! such as walking) and keys that went down during the current frame (for
//! one-shot actions such as toggling a door).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::application::AppEvent;

/// Keyboard state for the current frame
#[derive(Debug, Clone, Default)]
pub struct InputManager {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: forget which keys were pressed during the previous one
    pub fn begin_frame(&mut self) {
        self.pressed_this_frame.clear();
    }

    /// Fold one event into the keyboard state
    pub fn handle_event(&mut self, event: &AppEvent) {
        match *event {
            AppEvent::KeyPressed(key) => self.handle_key_input(key, true),
            AppEvent::KeyReleased(key) => self.handle_key_input(key, false),
            AppEvent::WindowUnfocused => self.held.clear(),
            _ => {}
        }
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            // Auto-repeat delivers extra presses for a held key; only the first counts
            if self.held.insert(key) {
                self.pressed_this_frame.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Whether `key` is currently down
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether `key` went down during this frame
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_this_frame.contains(&key)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// E key
    E,
    /// Q key
    Q,
    /// S key
    S,
    /// W key
    W,
    /// 1 key on the main row
    Num1,
    /// 2 key on the main row
    Num2,
    /// 3 key on the main row
    Num3,
    /// Space key
    Space,
    /// Left control key
    LControl,
    /// Escape key
    Escape,
}
