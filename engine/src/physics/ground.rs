//! Ground Query Service
//!
//! Resolves ground height and surface normal at a world position.
//!
//! A downward ray from high above the position is cast against the terrain
//! registry, so the answer matches the rendered terrain. When the registry is
//! empty, or the ray misses every surface, the analytic height field answers
//! instead.

use std::cell::Cell;

use glam::Vec3;
use log::warn;

use super::surface::TerrainRegistry;
use crate::world::HeightField;

/// Height the downward ground ray starts from.
pub const RAY_ORIGIN_HEIGHT: f32 = 200.0;

/// Horizontal offset used for finite-difference surface normals.
pub const NORMAL_SAMPLE_EPSILON: f32 = 0.1;

/// Anything that can answer "how high is the ground here?".
///
/// Character and object snapping only depend on this trait, so tests can
/// substitute a flat or scripted ground.
pub trait GroundQuery {
    /// Ground height below `position` (only X and Z are used).
    fn ground_height(&self, position: Vec3) -> f64;

    /// Upward surface normal at `position` from three height samples.
    fn surface_normal(&self, position: Vec3) -> Vec3 {
        let e = NORMAL_SAMPLE_EPSILON;
        let h_center = self.ground_height(position) as f32;
        let h_dx = self.ground_height(position + Vec3::new(e, 0.0, 0.0)) as f32;
        let h_dz = self.ground_height(position + Vec3::new(0.0, 0.0, e)) as f32;

        let tangent_x = Vec3::new(e, h_dx - h_center, 0.0);
        let tangent_z = Vec3::new(0.0, h_dz - h_center, e);

        tangent_z.cross(tangent_x).normalize_or(Vec3::Y)
    }
}

/// Raycast-first ground query with analytic fallback.
///
/// Borrows the height field and registry from the owning world context; build
/// one per frame (or per test) and drop it when done.
#[derive(Debug)]
pub struct GroundQueryService<'a> {
    height_field: &'a HeightField,
    registry: Option<&'a TerrainRegistry>,
    raycasts: Cell<u64>,
}

impl<'a> GroundQueryService<'a> {
    /// Create a service that raycasts against `registry` before falling back.
    pub fn new(height_field: &'a HeightField, registry: &'a TerrainRegistry) -> Self {
        Self {
            height_field,
            registry: Some(registry),
            raycasts: Cell::new(0),
        }
    }

    /// Create a service that only evaluates the analytic height field.
    pub fn analytic(height_field: &'a HeightField) -> Self {
        Self {
            height_field,
            registry: None,
            raycasts: Cell::new(0),
        }
    }

    /// Number of registry raycasts performed by this service.
    pub fn raycast_count(&self) -> u64 {
        self.raycasts.get()
    }

    pub fn height_field(&self) -> &HeightField {
        self.height_field
    }

    fn raycast(&self, x: f32, z: f32) -> Option<f32> {
        let registry = self.registry.filter(|r| !r.is_empty())?;
        self.raycasts.set(self.raycasts.get() + 1);
        registry.raycast_down(x, z, RAY_ORIGIN_HEIGHT)
    }
}

impl GroundQuery for GroundQueryService<'_> {
    fn ground_height(&self, position: Vec3) -> f64 {
        if !position.x.is_finite() || !position.z.is_finite() {
            warn!("ground query at non-finite position {position:?}; using sea level");
            return 0.0;
        }

        match self.raycast(position.x, position.z) {
            Some(y) => y as f64,
            None => self
                .height_field
                .ground_height(position.x as f64, position.z as f64),
        }
    }
}

/// Ground at a constant height everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround(pub f64);

impl GroundQuery for FlatGround {
    fn ground_height(&self, _position: Vec3) -> f64 {
        self.0
    }
}
