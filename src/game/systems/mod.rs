//! Game systems: self-contained modules that own state and logic.

pub mod ground_snap_system;

pub use ground_snap_system::{GroundSnapConfig, ObjectGroundSnapSystem, SweepStats};
