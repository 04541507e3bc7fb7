//! Terrain Surface Registry
//!
//! Renderable terrain geometry flattened into world-space triangles so the
//! ground query can raycast against what is actually drawn.
//!
//! The registry is an explicit value owned by the world context and rebuilt
//! on a throttled cadence; it is never global state.

use glam::Vec3;
use log::warn;

use super::collision::{Aabb, ray_aabb_intersect, ray_triangle_intersect};

/// A triangle mesh tagged as terrain.
#[derive(Debug, Clone)]
pub struct TerrainSurface {
    label: String,
    triangles: Vec<[Vec3; 3]>,
    bounds: Aabb,
}

impl TerrainSurface {
    /// Build a surface from indexed world-space vertices.
    ///
    /// Triangles referencing an out-of-range index are dropped. Returns `None`
    /// when no valid triangle remains.
    pub fn from_indexed(label: impl Into<String>, vertices: &[Vec3], indices: &[u32]) -> Option<Self> {
        let label = label.into();
        let mut dropped = 0usize;
        let triangles: Vec<[Vec3; 3]> = indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let fetch = |i: u32| vertices.get(i as usize).copied();
                match (fetch(tri[0]), fetch(tri[1]), fetch(tri[2])) {
                    (Some(a), Some(b), Some(c)) => Some([a, b, c]),
                    _ => {
                        dropped += 1;
                        None
                    }
                }
            })
            .collect();

        if dropped > 0 {
            warn!("terrain surface '{label}': dropped {dropped} triangles with invalid indices");
        }

        Self::from_triangles(label, triangles)
    }

    /// Build a surface from world-space triangles.
    pub fn from_triangles(label: impl Into<String>, triangles: Vec<[Vec3; 3]>) -> Option<Self> {
        let bounds = Aabb::from_points(triangles.iter().flatten().copied())?;
        Some(Self {
            label: label.into(),
            triangles,
            bounds,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Cast a ray straight down from `(x, origin_y, z)`; returns the highest hit Y.
    pub fn raycast_down(&self, x: f32, z: f32, origin_y: f32) -> Option<f32> {
        let origin = Vec3::new(x, origin_y, z);
        ray_aabb_intersect(origin, Vec3::NEG_Y, &self.bounds)?;

        self.triangles
            .iter()
            .filter_map(|tri| ray_triangle_intersect(origin, Vec3::NEG_Y, tri))
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| origin_y - t)
    }
}

/// The current set of terrain surfaces, replaced wholesale on refresh.
#[derive(Debug, Clone, Default)]
pub struct TerrainRegistry {
    surfaces: Vec<TerrainSurface>,
    generation: u64,
}

impl TerrainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registry contents.
    pub fn refresh<I>(&mut self, surfaces: I)
    where
        I: IntoIterator<Item = TerrainSurface>,
    {
        self.surfaces.clear();
        self.surfaces.extend(surfaces);
        self.generation += 1;
    }

    /// Remove every surface; queries fall back to the analytic height field.
    pub fn clear(&mut self) {
        self.refresh(std::iter::empty());
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of refreshes applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surfaces(&self) -> &[TerrainSurface] {
        &self.surfaces
    }

    /// Highest hit Y across all surfaces for a downward ray at (x, z).
    pub fn raycast_down(&self, x: f32, z: f32, origin_y: f32) -> Option<f32> {
        self.surfaces
            .iter()
            .filter_map(|s| s.raycast_down(x, z, origin_y))
            .max_by(|a, b| a.total_cmp(b))
    }
}
