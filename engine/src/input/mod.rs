//! Input Module
//!
//! Platform-agnostic input state consumed once per frame by the simulation:
//! held movement keys for the character and orbit drag state for the camera.
//!
//! # Example
//!
//! ```rust
//! use hillside_engine::input::{InputState, KeyCode};
//!
//! let mut input = InputState::new();
//! input.keys.handle_key(KeyCode::W, true);
//! input.orbit.begin_drag();
//! input.orbit.accumulate_yaw(0.1);
//! assert!(input.keys.forward);
//! ```

pub mod keyboard;
pub mod orbit;

pub use keyboard::{CharacterInput, KeyCode};
pub use orbit::OrbitInput;

/// Combined input state for the character and the camera.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: CharacterInput,
    pub orbit: OrbitInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release all keys and end any drag.
    pub fn reset(&mut self) {
        self.keys.reset();
        self.orbit.end_drag();
    }
}
