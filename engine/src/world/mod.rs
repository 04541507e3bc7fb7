//! World Module
//!
//! Terrain elevation, terrain classification, world boundaries, and the
//! fixed-cadence timers used by throttled world maintenance.
//!
//! ## Units
//! 1 unit = 1 meter. Elevation is evaluated in `f64`; positions are `f32` (glam).

pub mod bounds;
pub mod height_field;
pub mod interval;
pub mod terrain_type;

pub use bounds::{PositionError, SpaceMode, WorldBounds, clamp_to_map, validate_position};
pub use height_field::{HeightField, HeightFieldParams, HillTerm, MountainBump, RiverChannel, RiverValley};
pub use interval::FixedInterval;
pub use terrain_type::{DEFAULT_JUMP_MULTIPLIER, TerrainClassifier, TerrainType, UnknownTerrainType};
