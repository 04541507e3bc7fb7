//! Terrain Mesh Generation
//!
//! Chunked grid meshes sampled from the shared [`HeightField`], so the
//! rendered surface and the analytic physics fallback describe the same
//! ground. Vertex colours come from the terrain type at each vertex.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::{GroundQuery, GroundQueryService, TerrainSurface};
use crate::world::{HeightField, TerrainClassifier};

/// Vertex layout handed to renderers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 36]);

/// How the world is cut into mesh chunks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainChunkConfig {
    /// Half-width of the square area covered by chunks
    pub extent: f32,
    /// Side length of one chunk (meters)
    pub chunk_size: f32,
    /// Grid cells per chunk side
    pub resolution: u32,
}

impl Default for TerrainChunkConfig {
    fn default() -> Self {
        Self {
            extent: 80.0,
            chunk_size: 20.0,
            resolution: 20,
        }
    }
}

impl TerrainChunkConfig {
    /// Chunks per side of the covered square.
    pub fn chunks_per_side(&self) -> u32 {
        if self.chunk_size <= 0.0 || self.extent <= 0.0 {
            return 0;
        }
        ((self.extent * 2.0) / self.chunk_size).ceil() as u32
    }

    /// Minimum (x, z) corner of every chunk, row by row.
    pub fn chunk_origins(&self) -> Vec<(f32, f32)> {
        let n = self.chunks_per_side();
        let mut origins = Vec::with_capacity((n * n) as usize);
        for cz in 0..n {
            for cx in 0..n {
                origins.push((
                    -self.extent + cx as f32 * self.chunk_size,
                    -self.extent + cz as f32 * self.chunk_size,
                ));
            }
        }
        origins
    }
}

/// One chunk of terrain geometry.
#[derive(Clone, Debug, Default)]
pub struct TerrainMesh {
    pub label: String,
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Mesh one square chunk whose minimum corner is `(origin_x, origin_z)`.
    pub fn generate_chunk(
        field: &HeightField,
        classifier: &TerrainClassifier,
        origin_x: f32,
        origin_z: f32,
        config: &TerrainChunkConfig,
    ) -> Self {
        let resolution = config.resolution.max(1);
        let grid_count = resolution + 1;
        let cell_size = config.chunk_size / resolution as f32;
        let ground = GroundQueryService::analytic(field);

        let mut vertices = Vec::with_capacity((grid_count * grid_count) as usize);
        for gz in 0..grid_count {
            for gx in 0..grid_count {
                let x = origin_x + gx as f32 * cell_size;
                let z = origin_z + gz as f32 * cell_size;
                let position = Vec3::new(x, 0.0, z);

                let y = ground.ground_height(position) as f32;
                let normal = ground.surface_normal(position);
                let terrain = classifier.classify(field.elevation(x as f64, z as f64));

                vertices.push(TerrainVertex {
                    position: [x, y, z],
                    normal: normal.to_array(),
                    color: terrain.color(),
                });
            }
        }

        let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
        for gz in 0..resolution {
            for gx in 0..resolution {
                let i00 = gz * grid_count + gx;
                let i10 = gz * grid_count + (gx + 1);
                let i01 = (gz + 1) * grid_count + gx;
                let i11 = (gz + 1) * grid_count + (gx + 1);

                indices.extend_from_slice(&[i00, i01, i10, i10, i01, i11]);
            }
        }

        Self {
            label: format!("terrain_chunk_{origin_x:.0}_{origin_z:.0}"),
            vertices,
            indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice::<TerrainVertex, u8>(&self.vertices)
    }

    /// World-space collision surface for the terrain registry.
    pub fn to_surface(&self) -> Option<TerrainSurface> {
        let positions: Vec<Vec3> = self
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .collect();
        TerrainSurface::from_indexed(self.label.clone(), &positions, &self.indices)
    }
}

/// Mesh every chunk described by `config`.
pub fn generate_terrain(
    field: &HeightField,
    classifier: &TerrainClassifier,
    config: &TerrainChunkConfig,
) -> Vec<TerrainMesh> {
    config
        .chunk_origins()
        .into_iter()
        .map(|(x, z)| TerrainMesh::generate_chunk(field, classifier, x, z, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TerrainType;

    fn small_config() -> TerrainChunkConfig {
        TerrainChunkConfig {
            extent: 10.0,
            chunk_size: 10.0,
            resolution: 4,
        }
    }

    #[test]
    fn test_chunk_layout() {
        let config = small_config();
        assert_eq!(config.chunks_per_side(), 2);
        assert_eq!(
            config.chunk_origins(),
            vec![(-10.0, -10.0), (0.0, -10.0), (-10.0, 0.0), (0.0, 0.0)]
        );
        assert_eq!(TerrainChunkConfig::default().chunks_per_side(), 8);
    }

    #[test]
    fn test_chunk_geometry_counts() {
        let field = HeightField::new();
        let mesh =
            TerrainMesh::generate_chunk(&field, &TerrainClassifier::new(), 0.0, 0.0, &small_config());
        assert_eq!(mesh.vertices.len(), 25);
        assert_eq!(mesh.triangle_count(), 32);
        assert_eq!(mesh.vertex_bytes().len(), 25 * 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_vertices_follow_height_field() {
        let field = HeightField::new();
        let mesh =
            TerrainMesh::generate_chunk(&field, &TerrainClassifier::new(), 10.0, -15.0, &small_config());
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let expected = field.ground_height(x as f64, z as f64) as f32;
            assert_eq!(y, expected);
            assert!(y >= 0.0);
        }
    }

    #[test]
    fn test_ocean_vertices_are_water_coloured() {
        let field = HeightField::new();
        let mesh =
            TerrainMesh::generate_chunk(&field, &TerrainClassifier::new(), -40.0, 0.0, &small_config());
        assert!(mesh.vertices.iter().all(|v| v.color == TerrainType::Water.color()));
    }

    #[test]
    fn test_surface_conversion() {
        let field = HeightField::new();
        let mesh =
            TerrainMesh::generate_chunk(&field, &TerrainClassifier::new(), 0.0, 0.0, &small_config());
        let surface = mesh.to_surface().unwrap();
        assert_eq!(surface.triangle_count(), 32);
        assert_eq!(surface.label(), mesh.label);
    }
}
