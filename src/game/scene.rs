//! Scene Entities
//!
//! The world's entity list with explicit optional components instead of a
//! loose metadata bag. An entity's [`EntityRole`] says what it is; the
//! [`GroundSnapComponent`] and [`CollisionComponent`] say what systems care
//! about it.

use std::fmt;

use glam::Vec3;
use log::debug;

use crate::physics::TerrainSurface;
use crate::world::{PositionError, validate_position};

/// Stable handle to a scene entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Last (x, z) an object was snapped at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObjectSnapCache {
    last_snapped: Option<(f32, f32)>,
}

impl ObjectSnapCache {
    pub fn last_snapped(&self) -> Option<(f32, f32)> {
        self.last_snapped
    }

    /// Whether (x, z) lies less than `threshold` from the cached position.
    pub fn is_fresh(&self, x: f32, z: f32, threshold: f32) -> bool {
        match self.last_snapped {
            Some((cx, cz)) => {
                let (dx, dz) = (x - cx, z - cz);
                dx * dx + dz * dz < threshold * threshold
            }
            None => false,
        }
    }

    pub fn record(&mut self, x: f32, z: f32) {
        self.last_snapped = Some((x, z));
    }
}

/// Keeps an object resting on the ground.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroundSnapComponent {
    /// Height of the object origin above the ground
    pub height_offset: f32,
    pub cache: ObjectSnapCache,
}

impl GroundSnapComponent {
    pub fn new(height_offset: f32) -> Self {
        Self {
            height_offset,
            cache: ObjectSnapCache::default(),
        }
    }
}

/// Simple cylinder collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionComponent {
    pub radius: f32,
}

/// What an entity is.
#[derive(Clone, Debug)]
pub enum EntityRole {
    /// Renderable ground geometry, registered for ground raycasts
    Terrain { surface: TerrainSurface },
    /// A walking character; grounded characters get smoothed snapping
    Character { height_offset: f32, airborne: bool },
    /// Any other object (decoration, pickups)
    Prop,
}

#[derive(Clone, Debug)]
pub struct SceneEntity {
    pub id: EntityId,
    pub name: String,
    pub position: Vec3,
    pub role: EntityRole,
    pub ground_snap: Option<GroundSnapComponent>,
    pub collision: Option<CollisionComponent>,
    /// Unready entities are ignored by every system
    pub ready: bool,
}

impl SceneEntity {
    /// Create a ready entity. The id is assigned by [`Scene::spawn`].
    pub fn new(name: impl Into<String>, position: Vec3, role: EntityRole) -> Self {
        Self {
            id: EntityId(0),
            name: name.into(),
            position,
            role,
            ground_snap: None,
            collision: None,
            ready: true,
        }
    }

    pub fn with_ground_snap(mut self, height_offset: f32) -> Self {
        self.ground_snap = Some(GroundSnapComponent::new(height_offset));
        self
    }

    pub fn with_collision(mut self, radius: f32) -> Self {
        self.collision = Some(CollisionComponent { radius });
        self
    }

    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    pub fn is_terrain(&self) -> bool {
        matches!(self.role, EntityRole::Terrain { .. })
    }

    pub fn is_character(&self) -> bool {
        matches!(self.role, EntityRole::Character { .. })
    }

    pub fn needs_ground_snap(&self) -> bool {
        self.ground_snap.is_some()
    }

    pub fn is_collidable(&self) -> bool {
        self.collision.is_some()
    }

    pub fn collision_radius(&self) -> Option<f32> {
        self.collision.map(|c| c.radius)
    }

    /// Height offset used when snapping this entity, if it snaps at all.
    pub fn height_offset(&self) -> Option<f32> {
        match (&self.role, &self.ground_snap) {
            (EntityRole::Character { height_offset, .. }, _) => Some(*height_offset),
            (_, Some(snap)) => Some(snap.height_offset),
            _ => None,
        }
    }
}

/// Owned list of scene entities.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    entities: Vec<SceneEntity>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity and return its id.
    ///
    /// Entities with a non-finite position are rejected.
    pub fn spawn(&mut self, mut entity: SceneEntity) -> Result<EntityId, PositionError> {
        validate_position(entity.position)?;

        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        debug!("Spawned '{}' {}", entity.name, id);
        self.entities.push(entity);
        Ok(id)
    }

    /// Remove an entity. Returns `None` for unknown ids.
    pub fn despawn(&mut self, id: EntityId) -> Option<SceneEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        let entity = self.entities.remove(index);
        debug!("Despawned '{}' {}", entity.name, id);
        Some(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Mark an entity ready or unready. Returns `false` for unknown ids.
    pub fn set_ready(&mut self, id: EntityId, ready: bool) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.ready = ready;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneEntity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Surfaces of every ready terrain entity, for the terrain registry.
    pub fn terrain_surfaces(&self) -> impl Iterator<Item = TerrainSurface> + '_ {
        self.entities
            .iter()
            .filter(|e| e.ready)
            .filter_map(|e| match &e.role {
                EntityRole::Terrain { surface } => Some(surface.clone()),
                _ => None,
            })
    }
}
