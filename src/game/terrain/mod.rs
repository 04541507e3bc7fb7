//! Terrain Module
//!
//! Renderable terrain geometry generated from the shared height field.

pub mod mesh;

pub use mesh::{TerrainChunkConfig, TerrainMesh, TerrainVertex, generate_terrain};
