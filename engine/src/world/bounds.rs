//! World Bounds Module
//!
//! Indoor/outdoor space mode and the rectangular boundary a character is
//! kept inside. Only X and Z are clamped; Y is left to ground snapping.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors raised when a caller hands in an unusable position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionError {
    /// One or more coordinates is NaN or infinite.
    NonFinite(Vec3),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::NonFinite(p) => {
                write!(f, "non-finite position ({}, {}, {})", p.x, p.y, p.z)
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Reject NaN/infinite coordinates. Finite positions pass through unchanged;
/// range is handled by [`WorldBounds::clamp`].
pub fn validate_position(pos: Vec3) -> Result<Vec3, PositionError> {
    if pos.is_finite() {
        Ok(pos)
    } else {
        Err(PositionError::NonFinite(pos))
    }
}

/// Whether the simulation is running in a small room or the open world.
///
/// Movement speed, boundary size, and camera behavior all key off this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpaceMode {
    Indoor,
    #[default]
    Outdoor,
}

/// Half-extents of the walkable square for each space mode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    /// Outdoor map bounds (-outdoor_extent to +outdoor_extent)
    pub outdoor_extent: f32,
    /// Indoor room bounds (-indoor_extent to +indoor_extent)
    pub indoor_extent: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            outdoor_extent: 80.0,
            indoor_extent: 8.0,
        }
    }
}

impl WorldBounds {
    /// Half-extent for the given mode.
    pub fn extent(&self, mode: SpaceMode) -> f32 {
        match mode {
            SpaceMode::Indoor => self.indoor_extent,
            SpaceMode::Outdoor => self.outdoor_extent,
        }
    }

    /// Clamp a position to the boundary for `mode`.
    ///
    /// Clamps X and Z independently; Y is preserved.
    pub fn clamp(&self, pos: Vec3, mode: SpaceMode) -> Vec3 {
        clamp_to_map(pos, self.extent(mode))
    }
}

/// Clamp a position to a square map of half-extent `bounds`.
pub fn clamp_to_map(pos: Vec3, bounds: f32) -> Vec3 {
    Vec3::new(
        pos.x.clamp(-bounds, bounds),
        pos.y,
        pos.z.clamp(-bounds, bounds),
    )
}
