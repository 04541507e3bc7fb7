//! Game Module
//!
//! Contains game-specific systems that build on top of the engine.

pub mod config;
pub mod scene;
pub mod simulation;
pub mod systems;
pub mod terrain;

pub use config::{ConfigError, SimConfig};
pub use scene::{
    CollisionComponent, EntityId, EntityRole, GroundSnapComponent, ObjectSnapCache, Scene,
    SceneEntity,
};
pub use simulation::{Simulation, SimulationSummary};
pub use systems::{GroundSnapConfig, ObjectGroundSnapSystem, SweepStats};
pub use terrain::{TerrainChunkConfig, TerrainMesh, TerrainVertex, generate_terrain};
