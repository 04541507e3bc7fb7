//! Hillside Engine Library
//!
//! Terrain ground queries, character movement and a follow camera for a
//! procedurally generated hillside world.
//! Window-system and renderer agnostic: consumers receive positions,
//! transforms and vertex buffers, and draw them however they like.
//!
//! # Modules
//!
//! - [`world`] - Analytic height field, terrain classification, map bounds, fixed-interval timers
//! - [`physics`] - Terrain surface registry and raycast-with-fallback ground queries
//! - [`player`] - Character controller with terrain-adaptive jumping
//! - [`camera`] - Follow camera with manual orbit override
//! - [`input`] - Platform-agnostic key and orbit-drag state
//! - [`game`] - Scene, terrain meshing, ground snapping and the simulation loop
//!
//! # Example
//!
//! ```
//! use hillside_engine::game::{SimConfig, Simulation};
//! use hillside_engine::input::{InputState, KeyCode};
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! let mut input = InputState::new();
//! input.keys.handle_key(KeyCode::W, true);
//!
//! for _ in 0..60 {
//!     let transform = sim.tick(1.0 / 60.0, &mut input);
//!     assert!(transform.position.is_finite());
//! }
//! ```

pub mod camera;
pub mod input;
pub mod logging;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{HeightField, SpaceMode, TerrainClassifier, TerrainType, clamp_to_map};
// Re-export commonly used input types
pub use input::{CharacterInput, InputState, KeyCode, OrbitInput};
// Re-export player and camera types
pub use camera::CameraFollowController;
pub use player::{CharacterController, CharacterTransform, JumpState};
