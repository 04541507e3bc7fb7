//! Simulation
//!
//! The world context. Owns the height field, the scene, the terrain registry,
//! the character controller, the follow camera and the ground snap system,
//! and advances them together once per frame:
//!
//! 1. Rebuild the terrain registry when its interval elapses
//! 2. Update the controlled character against the ground query service
//! 3. Mirror the character into its scene entity
//! 4. Run the ground snap sweep when its interval elapses
//! 5. Update the follow camera from the published transform
//!
//! Everything runs on the caller's thread; there is no background work.

use glam::Vec3;
use log::{debug, info, warn};
use serde::Serialize;

use crate::camera::{CameraFollowController, CameraFollowState};
use crate::game::config::{ConfigError, SimConfig};
use crate::game::scene::{EntityId, EntityRole, Scene, SceneEntity};
use crate::game::systems::{ObjectGroundSnapSystem, SweepStats};
use crate::game::terrain::{TerrainMesh, generate_terrain};
use crate::input::InputState;
use crate::physics::{GroundQuery, GroundQueryService, TerrainRegistry};
use crate::player::{CharacterController, CharacterTransform, JumpState};
use crate::world::{
    FixedInterval, HeightField, PositionError, SpaceMode, TerrainClassifier, TerrainType,
};

/// End-of-run report written by the headless driver.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationSummary {
    pub frames: u64,
    pub elapsed_seconds: f64,
    pub mode: SpaceMode,
    pub character: CharacterTransform,
    pub terrain_under_character: TerrainType,
    pub camera: CameraFollowState,
    pub registry_surfaces: usize,
    pub registry_refreshes: u64,
    pub snap_sweeps: u64,
    pub raycasts: u64,
}

pub struct Simulation {
    config: SimConfig,
    height_field: HeightField,
    classifier: TerrainClassifier,
    terrain_meshes: Vec<TerrainMesh>,
    scene: Scene,
    registry: TerrainRegistry,
    controller: CharacterController,
    camera: CameraFollowController,
    snap_system: ObjectGroundSnapSystem,
    registry_timer: FixedInterval,
    character_id: EntityId,
    character_missing: bool,
    last_sweep: Option<SweepStats>,
    frames: u64,
    elapsed: f64,
    raycasts: u64,
}

impl Simulation {
    /// Build the world: mesh the terrain, register it, spawn the character.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let height_field = HeightField::with_params(config.height_field.clone());
        let classifier = TerrainClassifier::default();
        let terrain_meshes = generate_terrain(&height_field, &classifier, &config.terrain);

        let mut scene = Scene::new();
        for mesh in &terrain_meshes {
            let Some(surface) = mesh.to_surface() else {
                continue;
            };
            scene
                .spawn(SceneEntity::new(mesh.label.clone(), Vec3::ZERO, EntityRole::Terrain { surface }))
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        let mut controller = CharacterController::new(config.character, height_field.clone())
            .with_classifier(classifier);
        controller.set_mode(config.mode);

        let character_id = scene
            .spawn(
                SceneEntity::new(
                    "character",
                    config.spawn,
                    EntityRole::Character {
                        height_offset: config.character.height_offset,
                        airborne: false,
                    },
                )
                .with_collision(0.4),
            )
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut registry = TerrainRegistry::new();
        registry.refresh(scene.terrain_surfaces());

        {
            let ground = GroundQueryService::new(&height_field, &registry);
            controller
                .teleport(config.spawn, &ground)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        let mut camera = CameraFollowController::new(config.camera);
        camera.set_mode(config.mode);
        camera.snap_to(&controller.transform());

        info!(
            "Simulation ready: {:?}, {} terrain chunks, {} triangles registered",
            config.mode,
            terrain_meshes.len(),
            registry.surfaces().iter().map(|s| s.triangle_count()).sum::<usize>()
        );

        let mut snap_system = ObjectGroundSnapSystem::new(config.ground_snap);
        snap_system.set_driven(character_id);

        let mut sim = Self {
            snap_system,
            registry_timer: FixedInterval::new(config.registry_refresh_interval),
            config,
            height_field,
            classifier,
            terrain_meshes,
            scene,
            registry,
            controller,
            camera,
            character_id,
            character_missing: false,
            last_sweep: None,
            frames: 0,
            elapsed: 0.0,
            raycasts: 0,
        };
        sim.sync_character_entity();
        Ok(sim)
    }

    /// Advance one frame.
    ///
    /// # Arguments
    /// * `delta_time` - Seconds since the previous frame
    /// * `input` - Key and orbit state; the orbit yaw delta is consumed
    ///
    /// # Returns
    /// The character transform published this frame.
    pub fn tick(&mut self, delta_time: f32, input: &mut InputState) -> CharacterTransform {
        let dt = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        self.frames += 1;
        self.elapsed += dt as f64;

        if self.registry_timer.tick(dt) {
            self.refresh_registry();
        }

        let ground = GroundQueryService::new(&self.height_field, &self.registry);

        let character_ready = self
            .scene
            .get(self.character_id)
            .is_some_and(|entity| entity.ready);
        let transform = if character_ready {
            if self.character_missing {
                debug!("Character entity {} available again", self.character_id);
                self.character_missing = false;
            }
            self.controller.update(dt, &input.keys, &ground)
        } else {
            if !self.character_missing {
                warn!(
                    "Character entity {} missing or not ready; skipping its update",
                    self.character_id
                );
                self.character_missing = true;
            }
            self.controller.transform()
        };

        if let Some(entity) = self.scene.get_mut(self.character_id) {
            entity.position = transform.position;
            if let EntityRole::Character { airborne, .. } = &mut entity.role {
                *airborne = transform.jump_state == JumpState::Airborne;
            }
        }

        if let Some(stats) = self.snap_system.update(dt, &mut self.scene, &ground) {
            self.last_sweep = Some(stats);
        }

        self.camera.update(&transform, &mut input.orbit);

        self.raycasts += ground.raycast_count();
        transform
    }

    /// Rebuild the terrain registry from the scene's ready terrain entities.
    pub fn refresh_registry(&mut self) {
        self.registry.refresh(self.scene.terrain_surfaces());
        debug!(
            "Terrain registry refreshed: {} surfaces (generation {})",
            self.registry.len(),
            self.registry.generation()
        );
    }

    /// Switch indoor/outdoor for the character and camera.
    pub fn set_mode(&mut self, mode: SpaceMode) {
        self.config.mode = mode;
        self.controller.set_mode(mode);
        self.camera.set_mode(mode);
        self.sync_character_entity();
    }

    pub fn mode(&self) -> SpaceMode {
        self.config.mode
    }

    /// Move the character onto the ground at `position`.
    pub fn teleport_character(&mut self, position: Vec3) -> Result<(), PositionError> {
        let ground = GroundQueryService::new(&self.height_field, &self.registry);
        let result = self.controller.teleport(position, &ground);
        self.raycasts += ground.raycast_count();
        self.sync_character_entity();
        result
    }

    /// Spawn a prop that rests on the ground.
    pub fn spawn_prop(
        &mut self,
        name: &str,
        position: Vec3,
        height_offset: f32,
        collision_radius: Option<f32>,
    ) -> Result<EntityId, PositionError> {
        let mut entity =
            SceneEntity::new(name, position, EntityRole::Prop).with_ground_snap(height_offset);
        if let Some(radius) = collision_radius {
            entity = entity.with_collision(radius);
        }
        self.scene.spawn(entity)
    }

    /// Ground height at `position` (registry raycast, analytic fallback).
    pub fn ground_height(&mut self, position: Vec3) -> f64 {
        let ground = GroundQueryService::new(&self.height_field, &self.registry);
        let height = ground.ground_height(position);
        self.raycasts += ground.raycast_count();
        height
    }

    /// Terrain type at `position`, classified from the signed elevation.
    pub fn terrain_type(&self, position: Vec3) -> TerrainType {
        self.classifier
            .classify(self.height_field.elevation(position.x as f64, position.z as f64))
    }

    pub fn jump_multiplier(&self, terrain: TerrainType) -> f64 {
        self.classifier.jump_multiplier(terrain)
    }

    /// Jump multiplier for a terrain name; unknown names yield the default.
    pub fn jump_multiplier_by_name(&self, name: &str) -> f64 {
        self.classifier.jump_multiplier_by_name(name)
    }

    pub fn transform(&self) -> CharacterTransform {
        self.controller.transform()
    }

    pub fn camera_state(&self) -> &CameraFollowState {
        self.camera.state()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    pub fn terrain_meshes(&self) -> &[TerrainMesh] {
        &self.terrain_meshes
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn registry(&self) -> &TerrainRegistry {
        &self.registry
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CharacterController {
        &mut self.controller
    }

    pub fn character_id(&self) -> EntityId {
        self.character_id
    }

    pub fn last_sweep(&self) -> Option<SweepStats> {
        self.last_sweep
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Registry raycasts performed by every ground query so far.
    pub fn raycast_count(&self) -> u64 {
        self.raycasts
    }

    pub fn summary(&self) -> SimulationSummary {
        let character = self.controller.transform();
        SimulationSummary {
            frames: self.frames,
            elapsed_seconds: self.elapsed,
            mode: self.config.mode,
            character,
            terrain_under_character: self.terrain_type(character.position),
            camera: *self.camera.state(),
            registry_surfaces: self.registry.len(),
            registry_refreshes: self.registry_timer.fired_count(),
            snap_sweeps: self.snap_system.sweep_count(),
            raycasts: self.raycasts,
        }
    }

    fn sync_character_entity(&mut self) {
        let transform = self.controller.transform();
        if let Some(entity) = self.scene.get_mut(self.character_id) {
            entity.position = transform.position;
        }
    }
}
