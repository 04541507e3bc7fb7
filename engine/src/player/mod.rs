//! Player Module
//!
//! Character movement and the grounded/airborne jump state machine.
//!
//! # Components
//!
//! - [`CharacterController`] - Tank-style movement with terrain-adaptive jumping
//!   - Jump force scales with the terrain type under the character
//!   - Grounded characters stay snapped to the ground every tick
//! - [`CharacterTransform`] - Per-tick snapshot consumed by the camera and renderers

pub mod character_controller;

pub use character_controller::{
    BASE_JUMP_FORCE, CharacterConfig, CharacterController, CharacterState, CharacterTransform,
    GRAVITY, GROUND_HEIGHT_OFFSET, JUMP_COOLDOWN, JumpState, MAX_DELTA_TIME, MAX_SNAP_DELTA,
    MAX_STEP_LENGTH,
};
