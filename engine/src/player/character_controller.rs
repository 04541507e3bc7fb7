//! Character Controller
//!
//! Tank-style character movement over the shared terrain.
//!
//! # Movement Model
//!
//! - Left/Right turn the character at a fixed angular rate
//! - Forward/Backward translate along the facing direction
//! - Outdoor speed 5.0 m/s, indoor 3.0 m/s, x1.8 while running
//! - Horizontal position is clamped to the map (±80 outdoor, ±8 indoor)
//!
//! # Jump State Machine
//!
//! ```text
//!            jump pressed, cooldown <= 0
//!  Grounded ───────────────────────────────► Airborne
//!     ▲                                        │
//!     └──── falling and at/below ground ───────┘
//! ```
//!
//! Jump force is `12.0 * multiplier`, where the multiplier comes from the
//! terrain type under the character at the moment the jump triggers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hillside_engine::player::{CharacterController, CharacterConfig};
//! use hillside_engine::physics::GroundQueryService;
//!
//! let mut controller = CharacterController::new(CharacterConfig::default(), height_field.clone());
//! let ground = GroundQueryService::new(&height_field, &registry);
//!
//! // Each frame:
//! let transform = controller.update(delta_time, &input.keys, &ground);
//! ```

use glam::{Quat, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::input::CharacterInput;
use crate::physics::GroundQuery;
use crate::world::{
    HeightField, PositionError, SpaceMode, TerrainClassifier, TerrainType, WorldBounds,
    validate_position,
};

/// Base jump velocity before the terrain multiplier, in m/s
pub const BASE_JUMP_FORCE: f32 = 12.0;

/// Downward acceleration while airborne, in m/s^2
pub const GRAVITY: f32 = 25.0;

/// Seconds before another jump may trigger
pub const JUMP_COOLDOWN: f32 = 1.0;

/// Height of the character origin above the ground surface
pub const GROUND_HEIGHT_OFFSET: f32 = 0.5;

/// Largest vertical correction applied by grounded snapping
pub const MAX_SNAP_DELTA: f32 = 3.0;

/// Longest frame the controller will integrate in one step
pub const MAX_DELTA_TIME: f32 = 0.1;

/// Longest horizontal move checked against the snap bound at once, in m
pub const MAX_STEP_LENGTH: f32 = 0.25;

/// Tunable movement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Turn rate in radians per second
    pub angular_rate: f32,
    /// Walk speed outdoors, m/s
    pub outdoor_speed: f32,
    /// Walk speed indoors, m/s
    pub indoor_speed: f32,
    /// Speed multiplier while the run modifier is held
    pub run_multiplier: f32,
    /// Walk-cycle phase advance per second while walking
    pub walk_cycle_rate: f32,
    /// Walk-cycle phase advance per second while running
    pub run_cycle_rate: f32,
    pub base_jump_force: f32,
    pub gravity: f32,
    pub jump_cooldown: f32,
    pub height_offset: f32,
    pub max_snap_delta: f32,
    pub bounds: WorldBounds,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            angular_rate: 2.0,
            outdoor_speed: 5.0,
            indoor_speed: 3.0,
            run_multiplier: 1.8,
            walk_cycle_rate: 8.0,
            run_cycle_rate: 12.0,
            base_jump_force: BASE_JUMP_FORCE,
            gravity: GRAVITY,
            jump_cooldown: JUMP_COOLDOWN,
            height_offset: GROUND_HEIGHT_OFFSET,
            max_snap_delta: MAX_SNAP_DELTA,
            bounds: WorldBounds::default(),
        }
    }
}

impl CharacterConfig {
    /// Linear speed for the given space mode and run modifier.
    pub fn linear_speed(&self, mode: SpaceMode, running: bool) -> f32 {
        let base = match mode {
            SpaceMode::Indoor => self.indoor_speed,
            SpaceMode::Outdoor => self.outdoor_speed,
        };
        if running {
            base * self.run_multiplier
        } else {
            base
        }
    }
}

/// Vertical movement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpState {
    #[default]
    Grounded,
    Airborne,
}

/// Full mutable state of the controlled character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub position: Vec3,
    /// Facing angle around +Y in radians; forward is `(sin yaw, 0, cos yaw)`
    pub yaw: f32,
    pub vertical_velocity: f32,
    pub jump_state: JumpState,
    /// Seconds until the next jump may trigger (never negative)
    pub jump_cooldown: f32,
    pub is_running: bool,
    /// Accumulated walk-cycle phase; zero while standing still
    pub walk_cycle_phase: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            vertical_velocity: 0.0,
            jump_state: JumpState::Grounded,
            jump_cooldown: 0.0,
            is_running: false,
            walk_cycle_phase: 0.0,
        }
    }
}

impl CharacterState {
    pub fn is_grounded(&self) -> bool {
        self.jump_state == JumpState::Grounded
    }

    /// Unit forward vector for the current yaw.
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::Z
    }

    /// Limb swing angle for animation: `sin(phase) * amplitude`.
    ///
    /// Zero whenever the character is not translating.
    pub fn limb_swing(&self, amplitude: f32) -> f32 {
        self.walk_cycle_phase.sin() * amplitude
    }
}

/// Snapshot published once per tick for renderers and cameras.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterTransform {
    pub position: Vec3,
    pub yaw: f32,
    pub is_moving: bool,
    pub jump_state: JumpState,
    pub vertical_velocity: f32,
}

impl CharacterTransform {
    pub fn is_jumping(&self) -> bool {
        self.jump_state == JumpState::Airborne
    }
}

/// Per-tick character movement, jump and grounding.
#[derive(Debug, Clone)]
pub struct CharacterController {
    state: CharacterState,
    config: CharacterConfig,
    mode: SpaceMode,
    height_field: HeightField,
    classifier: TerrainClassifier,
    is_moving: bool,
}

impl CharacterController {
    /// Create a controller standing at the origin.
    ///
    /// # Arguments
    /// * `config` - Movement tuning
    /// * `height_field` - Field used to classify the terrain under a jump
    pub fn new(config: CharacterConfig, height_field: HeightField) -> Self {
        Self {
            state: CharacterState::default(),
            config,
            mode: SpaceMode::default(),
            height_field,
            classifier: TerrainClassifier::default(),
            is_moving: false,
        }
    }

    /// Replace the terrain classifier used for jump multipliers.
    pub fn with_classifier(mut self, classifier: TerrainClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CharacterState {
        &mut self.state
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn mode(&self) -> SpaceMode {
        self.mode
    }

    /// Switch indoor/outdoor. The position is re-clamped to the new bounds.
    pub fn set_mode(&mut self, mode: SpaceMode) {
        if self.mode != mode {
            debug!("Character space mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.state.position = self.config.bounds.clamp(self.state.position, mode);
    }

    /// Place the character on the ground at `position`, standing still.
    ///
    /// Non-finite positions are rejected; finite ones are clamped to the map
    /// and their `y` replaced by the ground height plus the height offset.
    pub fn teleport(
        &mut self,
        position: Vec3,
        ground: &dyn GroundQuery,
    ) -> Result<(), PositionError> {
        let position = validate_position(position)?;
        let mut position = self.config.bounds.clamp(position, self.mode);
        position.y = ground.ground_height(position) as f32 + self.config.height_offset;

        self.state.position = position;
        self.state.vertical_velocity = 0.0;
        self.state.jump_state = JumpState::Grounded;
        self.state.walk_cycle_phase = 0.0;
        self.is_moving = false;
        Ok(())
    }

    /// Release the character in mid-air at `position` with zero vertical velocity.
    pub fn drop_at(&mut self, position: Vec3) -> Result<(), PositionError> {
        let position = validate_position(position)?;
        self.state.position = self.config.bounds.clamp(position, self.mode);
        self.state.vertical_velocity = 0.0;
        self.state.jump_state = JumpState::Airborne;
        Ok(())
    }

    /// Terrain type and jump multiplier at world (x, z).
    pub fn terrain_at(&self, x: f32, z: f32) -> (TerrainType, f64) {
        let terrain = self
            .classifier
            .classify(self.height_field.elevation(x as f64, z as f64));
        (terrain, self.classifier.jump_multiplier(terrain))
    }

    /// The transform as of the last update.
    pub fn transform(&self) -> CharacterTransform {
        CharacterTransform {
            position: self.state.position,
            yaw: self.state.yaw,
            is_moving: self.is_moving,
            jump_state: self.state.jump_state,
            vertical_velocity: self.state.vertical_velocity,
        }
    }

    /// Advance one tick.
    ///
    /// # Arguments
    /// * `delta_time` - Seconds since the last update (clamped to `MAX_DELTA_TIME`)
    /// * `input` - Current movement intents
    /// * `ground` - Ground height source
    ///
    /// # Returns
    /// The published transform for this tick.
    pub fn update(
        &mut self,
        delta_time: f32,
        input: &CharacterInput,
        ground: &dyn GroundQuery,
    ) -> CharacterTransform {
        let dt = if delta_time.is_finite() {
            delta_time.clamp(0.0, MAX_DELTA_TIME)
        } else {
            0.0
        };

        let step = self.apply_turn(dt, input);

        if input.jump && self.state.is_grounded() && self.state.jump_cooldown <= 0.0 {
            self.translate(step);
            self.trigger_jump();
        } else {
            self.state.jump_cooldown = (self.state.jump_cooldown - dt).max(0.0);
            match self.state.jump_state {
                JumpState::Airborne => {
                    self.translate(step);
                    self.integrate_airborne(dt, ground);
                }
                JumpState::Grounded => self.walk_grounded(step, ground),
            }
        }

        self.transform()
    }

    /// Turn, advance the walk cycle, and return this tick's horizontal step.
    fn apply_turn(&mut self, dt: f32, input: &CharacterInput) -> Vec3 {
        let config = self.config;
        let state = &mut self.state;

        state.yaw += input.turn_axis() as f32 * config.angular_rate * dt;
        state.is_running = input.run;

        self.is_moving = input.is_translating();
        if !self.is_moving {
            state.walk_cycle_phase = 0.0;
            return Vec3::ZERO;
        }

        let cycle_rate = if state.is_running {
            config.run_cycle_rate
        } else {
            config.walk_cycle_rate
        };
        state.walk_cycle_phase += dt * cycle_rate;

        let speed = config.linear_speed(self.mode, state.is_running);
        let step = state.forward() * (input.forward_axis() as f32 * speed * dt);
        Vec3::new(step.x, 0.0, step.z)
    }

    fn translate(&mut self, step: Vec3) {
        self.state.position.x += step.x;
        self.state.position.z += step.z;
        self.state.position = self.config.bounds.clamp(self.state.position, self.mode);
    }

    /// Move along the ground in pieces no longer than `MAX_STEP_LENGTH`.
    ///
    /// The snap bound is judged per piece, so the slopes a character can
    /// climb do not depend on the frame time.
    fn walk_grounded(&mut self, step: Vec3, ground: &dyn GroundQuery) {
        let pieces = (step.length() / MAX_STEP_LENGTH).ceil().max(1.0) as u32;
        let piece = step / pieces as f32;

        for _ in 0..pieces {
            let previous = self.state.position;
            self.translate(piece);
            if self.state.jump_state == JumpState::Airborne {
                continue;
            }
            if self.settle_grounded(previous, ground) {
                break;
            }
        }
    }

    fn trigger_jump(&mut self) {
        let (terrain, multiplier) = self.terrain_at(self.state.position.x, self.state.position.z);
        self.state.vertical_velocity = self.config.base_jump_force * multiplier as f32;
        self.state.jump_state = JumpState::Airborne;
        self.state.jump_cooldown = self.config.jump_cooldown;
        debug!(
            "Jump on {} (x{:.1}), vertical velocity {:.2}",
            terrain, multiplier, self.state.vertical_velocity
        );
    }

    fn integrate_airborne(&mut self, dt: f32, ground: &dyn GroundQuery) {
        let state = &mut self.state;
        state.vertical_velocity -= self.config.gravity * dt;
        state.position.y += state.vertical_velocity * dt;

        let floor = ground.ground_height(state.position) as f32 + self.config.height_offset;
        if state.vertical_velocity < 0.0 && state.position.y <= floor {
            state.position.y = floor;
            state.vertical_velocity = 0.0;
            state.jump_state = JumpState::Grounded;
            debug!(
                "Landed at ({:.2}, {:.2}, {:.2})",
                state.position.x, state.position.y, state.position.z
            );
        }
    }

    /// Keep a grounded character on the surface.
    ///
    /// Small height changes snap exactly. Ground that drops away by more than
    /// the snap bound starts a fall; ground that rises by more than it blocks
    /// the horizontal step. Returns `true` when the step was blocked.
    fn settle_grounded(&mut self, previous: Vec3, ground: &dyn GroundQuery) -> bool {
        let offset = self.config.height_offset;
        let max_delta = self.config.max_snap_delta;

        let target = ground.ground_height(self.state.position) as f32 + offset;
        let delta = target - self.state.position.y;
        if delta.abs() <= max_delta {
            self.state.position.y = target;
            return false;
        }

        if delta < 0.0 {
            self.state.jump_state = JumpState::Airborne;
            self.state.vertical_velocity = 0.0;
            debug!("Ground dropped {:.2} m, falling", -delta);
            return false;
        }

        let moved = self.state.position.x != previous.x || self.state.position.z != previous.z;
        if moved {
            self.state.position.x = previous.x;
            self.state.position.z = previous.z;
            self.state.position.y = ground.ground_height(self.state.position) as f32 + offset;
            true
        } else {
            // Geometry rose underneath without any horizontal movement
            self.state.position.y = target;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::FlatGround;

    fn controller() -> CharacterController {
        CharacterController::new(CharacterConfig::default(), HeightField::new())
    }

    fn forward() -> CharacterInput {
        CharacterInput {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_speed_outdoor() {
        let mut c = controller();
        let ground = FlatGround(0.0);
        c.teleport(Vec3::ZERO, &ground).unwrap();
        for _ in 0..10 {
            c.update(0.1, &forward(), &ground);
        }
        assert!((c.state().position.z - 5.0).abs() < 1e-4);
        assert!(c.state().position.x.abs() < 1e-4);
    }

    #[test]
    fn test_run_speed_indoor() {
        let mut c = controller();
        c.set_mode(SpaceMode::Indoor);
        let ground = FlatGround(0.0);
        c.teleport(Vec3::ZERO, &ground).unwrap();
        let input = CharacterInput {
            forward: true,
            run: true,
            ..Default::default()
        };
        c.update(0.1, &input, &ground);
        assert!((c.state().position.z - 0.54).abs() < 1e-4);
    }

    #[test]
    fn test_turn_left_increases_yaw() {
        let mut c = controller();
        let input = CharacterInput {
            left: true,
            ..Default::default()
        };
        c.update(0.05, &input, &FlatGround(0.0));
        assert!((c.state().yaw - 0.1).abs() < 1e-6);
        assert!(!c.transform().is_moving);
    }

    #[test]
    fn test_delta_time_is_clamped() {
        let mut c = controller();
        let ground = FlatGround(0.0);
        c.update(5.0, &forward(), &ground);
        assert!((c.state().position.z - 0.5).abs() < 1e-4);
        c.update(f32::NAN, &forward(), &ground);
        assert!((c.state().position.z - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_jump_cooldown_blocks_second_jump() {
        let mut c = controller();
        let ground = FlatGround(0.0);
        c.teleport(Vec3::ZERO, &ground).unwrap();
        let jump = CharacterInput {
            jump: true,
            ..Default::default()
        };
        c.update(0.016, &jump, &ground);
        assert_eq!(c.state().jump_state, JumpState::Airborne);
        assert_eq!(c.state().jump_cooldown, 1.0);

        // Land, then press again before the cooldown expires
        let mut t = 0.0;
        while c.state().jump_state == JumpState::Airborne && t < 5.0 {
            c.update(0.016, &CharacterInput::default(), &ground);
            t += 0.016;
        }
        assert!(c.state().is_grounded());
        assert!(c.state().jump_cooldown > 0.0);
        c.update(0.016, &jump, &ground);
        assert!(c.state().is_grounded());
    }

    #[test]
    fn test_walk_cycle_resets_when_idle() {
        let mut c = controller();
        let ground = FlatGround(0.0);
        c.update(0.1, &forward(), &ground);
        assert!((c.state().walk_cycle_phase - 0.8).abs() < 1e-5);
        assert!(c.state().limb_swing(0.5).abs() > 0.0);
        c.update(0.1, &CharacterInput::default(), &ground);
        assert_eq!(c.state().walk_cycle_phase, 0.0);
        assert_eq!(c.state().limb_swing(0.5), 0.0);
    }

    #[test]
    fn test_ledge_starts_fall() {
        let mut c = controller();
        c.teleport(Vec3::ZERO, &FlatGround(10.0)).unwrap();
        c.update(0.016, &CharacterInput::default(), &FlatGround(2.0));
        assert_eq!(c.state().jump_state, JumpState::Airborne);
        assert_eq!(c.state().vertical_velocity, 0.0);
    }

    #[test]
    fn test_teleport_rejects_nan() {
        let mut c = controller();
        let before = *c.state();
        let err = c.teleport(Vec3::new(f32::NAN, 0.0, 0.0), &FlatGround(0.0));
        assert!(err.is_err());
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn test_teleport_clamps_to_map() {
        let mut c = controller();
        c.teleport(Vec3::new(500.0, 0.0, -500.0), &FlatGround(1.0)).unwrap();
        let p = c.state().position;
        assert_eq!((p.x, p.y, p.z), (80.0, 1.5, -80.0));
    }
}
