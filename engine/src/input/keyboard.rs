//! Keyboard Input Module
//!
//! Tracks the held state of the character's movement keys. Decoupled from
//! any windowing system: the host maps its own key events onto [`KeyCode`].

use serde::{Deserialize, Serialize};

/// Generic key codes for character control, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    ShiftLeft,
    ShiftRight,
    /// Catch-all for unhandled keys
    Unknown,
}

/// Per-frame boolean input for the character controller.
///
/// Left/right turn the character (tank controls); they never strafe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterInput {
    /// W / ArrowUp - move along facing
    pub forward: bool,
    /// S / ArrowDown - move against facing
    pub backward: bool,
    /// A / ArrowLeft - turn left
    pub left: bool,
    /// D / ArrowRight - turn right
    pub right: bool,
    /// Shift - run
    pub run: bool,
    /// Space - jump
    pub jump: bool,
}

impl CharacterInput {
    /// Create an input state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state based on key press/release.
    ///
    /// Returns `true` if the key is bound to a character action.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::W | KeyCode::ArrowUp => &mut self.forward,
            KeyCode::S | KeyCode::ArrowDown => &mut self.backward,
            KeyCode::A | KeyCode::ArrowLeft => &mut self.left,
            KeyCode::D | KeyCode::ArrowRight => &mut self.right,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => &mut self.run,
            KeyCode::Space => &mut self.jump,
            KeyCode::Unknown => return false,
        };
        *slot = pressed;
        true
    }

    /// Whether forward or backward translation is requested.
    pub fn is_translating(&self) -> bool {
        self.forward_axis() != 0
    }

    /// Forward/backward direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Turn direction (-1, 0, or 1); positive turns left (counter-clockwise yaw).
    pub fn turn_axis(&self) -> i32 {
        (self.left as i32) - (self.right as i32)
    }

    /// Release every key.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
