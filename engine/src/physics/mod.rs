//! Physics module
//!
//! Ground resolution for characters and scene objects. There is no rigid-body
//! solver here: the only physical question answered is where the ground is.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**
//!
//! # Submodules
//!
//! - [`collision`] - Ray-AABB (slab) and ray-triangle (Möller–Trumbore) tests
//! - [`surface`] - Terrain surfaces and the rebuildable [`TerrainRegistry`]
//! - [`ground`] - [`GroundQuery`] trait and the raycast-with-fallback [`GroundQueryService`]

pub mod collision;
pub mod ground;
pub mod surface;

pub use collision::{Aabb, ray_aabb_intersect, ray_triangle_intersect};
pub use ground::{FlatGround, GroundQuery, GroundQueryService, NORMAL_SAMPLE_EPSILON, RAY_ORIGIN_HEIGHT};
pub use surface::{TerrainRegistry, TerrainSurface};
