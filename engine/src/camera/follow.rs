//! Camera Follow Controller
//!
//! Third-person follow camera with a manual orbit override.
//!
//! While the orbit input reports an active drag, the drag owns the camera: the
//! yaw delta rotates the camera around the character and accumulates into
//! `manual_yaw_offset`. After release, the offset decays geometrically each
//! tick (quickly while the character moves, slowly while it stands) and the
//! camera eases back behind the character.

use glam::{Quat, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::input::OrbitInput;
use crate::player::CharacterTransform;
use crate::world::SpaceMode;

/// Offsets smaller than this snap to zero.
pub const YAW_OFFSET_EPSILON: f32 = 1e-4;

/// Indoor-only limits that keep the camera inside a small room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraClamp {
    /// Maximum horizontal distance from the character
    pub max_distance: f32,
    /// Lowest camera height above the character origin
    pub min_height: f32,
    /// Highest camera height above the character origin
    pub max_height: f32,
}

/// Follow placement and smoothing for one space mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowProfile {
    /// Horizontal distance behind the character
    pub distance: f32,
    /// Height above the character
    pub height: f32,
    /// Per-tick lerp strength while the character moves
    pub moving_lerp: f32,
    /// Per-tick lerp strength while the character stands
    pub idle_lerp: f32,
    /// Per-tick yaw offset decay while the character moves
    pub moving_decay: f32,
    pub clamp: Option<CameraClamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraFollowConfig {
    pub outdoor: FollowProfile,
    pub indoor: FollowProfile,
    /// Per-tick yaw offset decay while the character stands (either mode)
    pub idle_decay: f32,
    /// Vertical lift of the look target above the character origin
    pub target_lift: f32,
}

impl Default for CameraFollowConfig {
    fn default() -> Self {
        Self {
            outdoor: FollowProfile {
                distance: 8.0,
                height: 4.0,
                moving_lerp: 0.1,
                idle_lerp: 0.05,
                moving_decay: 0.9,
                clamp: None,
            },
            indoor: FollowProfile {
                distance: 4.0,
                height: 2.5,
                moving_lerp: 0.15,
                idle_lerp: 0.08,
                moving_decay: 0.95,
                clamp: Some(CameraClamp {
                    max_distance: 6.0,
                    min_height: 1.0,
                    max_height: 4.0,
                }),
            },
            idle_decay: 0.995,
            target_lift: 1.0,
        }
    }
}

impl CameraFollowConfig {
    pub fn profile(&self, mode: SpaceMode) -> &FollowProfile {
        match mode {
            SpaceMode::Indoor => &self.indoor,
            SpaceMode::Outdoor => &self.outdoor,
        }
    }
}

/// Smoothed camera pose plus the manual orbit blend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraFollowState {
    pub position: Vec3,
    pub target: Vec3,
    pub manual_yaw_offset: f32,
    pub manual_drag_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CameraFollowController {
    state: CameraFollowState,
    config: CameraFollowConfig,
    mode: SpaceMode,
    initialized: bool,
}

impl CameraFollowController {
    pub fn new(config: CameraFollowConfig) -> Self {
        Self {
            state: CameraFollowState::default(),
            config,
            mode: SpaceMode::default(),
            initialized: false,
        }
    }

    pub fn state(&self) -> &CameraFollowState {
        &self.state
    }

    pub fn config(&self) -> &CameraFollowConfig {
        &self.config
    }

    pub fn mode(&self) -> SpaceMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SpaceMode) {
        self.mode = mode;
    }

    /// Set the manual yaw offset directly (e.g. restoring a saved view).
    pub fn set_manual_yaw_offset(&mut self, offset: f32) {
        self.state.manual_yaw_offset = offset;
    }

    /// Camera position the follow logic is steering toward.
    ///
    /// `position - R(yaw + offset) * (0, -height, distance)`, i.e. behind and
    /// above the character along its facing.
    pub fn desired_position(&self, character: &CharacterTransform) -> Vec3 {
        let profile = self.config.profile(self.mode);
        let rotation = Quat::from_rotation_y(character.yaw + self.state.manual_yaw_offset);
        let offset = rotation * Vec3::new(0.0, -profile.height, profile.distance);
        character.position - offset
    }

    pub fn desired_target(&self, character: &CharacterTransform) -> Vec3 {
        character.position + Vec3::Y * self.config.target_lift
    }

    /// Place the camera at its desired pose immediately, without smoothing.
    pub fn snap_to(&mut self, character: &CharacterTransform) {
        self.state.position = self.desired_position(character);
        self.state.target = self.desired_target(character);
        self.apply_clamp(character.position);
        self.initialized = true;
    }

    /// Advance one tick.
    ///
    /// # Arguments
    /// * `character` - Transform published by the character controller this tick
    /// * `orbit` - Orbit drag state; its accumulated yaw delta is consumed
    ///
    /// # Returns
    /// The camera state after this tick.
    pub fn update(
        &mut self,
        character: &CharacterTransform,
        orbit: &mut OrbitInput,
    ) -> CameraFollowState {
        if !self.initialized {
            self.snap_to(character);
        }

        if orbit.is_dragging() {
            if !self.state.manual_drag_active {
                debug!("Camera orbit drag started");
            }
            self.state.manual_drag_active = true;
            self.orbit(character.position, orbit.consume_yaw());
            return self.state;
        }

        if self.state.manual_drag_active {
            debug!(
                "Camera orbit drag released, yaw offset {:.3}",
                self.state.manual_yaw_offset
            );
            self.state.manual_drag_active = false;
        }

        self.decay_offset(character.is_moving);
        self.follow(character);
        self.state
    }

    /// Rotate the current camera around the character. No automatic positioning.
    fn orbit(&mut self, pivot: Vec3, yaw_delta: f32) {
        if yaw_delta == 0.0 || !yaw_delta.is_finite() {
            return;
        }
        let rotation = Quat::from_rotation_y(yaw_delta);
        self.state.position = pivot + rotation * (self.state.position - pivot);
        self.state.manual_yaw_offset += yaw_delta;
    }

    fn decay_offset(&mut self, is_moving: bool) {
        let factor = if is_moving {
            self.config.profile(self.mode).moving_decay
        } else {
            self.config.idle_decay
        };
        self.state.manual_yaw_offset *= factor;
        if self.state.manual_yaw_offset.abs() < YAW_OFFSET_EPSILON {
            self.state.manual_yaw_offset = 0.0;
        }
    }

    fn follow(&mut self, character: &CharacterTransform) {
        let profile = *self.config.profile(self.mode);
        let strength = if character.is_moving {
            profile.moving_lerp
        } else {
            profile.idle_lerp
        };

        let desired_position = self.desired_position(character);
        let desired_target = self.desired_target(character);
        self.state.position = self.state.position.lerp(desired_position, strength);
        self.state.target = self.state.target.lerp(desired_target, strength);
        self.apply_clamp(character.position);
    }

    fn apply_clamp(&mut self, anchor: Vec3) {
        let Some(clamp) = self.config.profile(self.mode).clamp else {
            return;
        };

        let mut offset = self.state.position - anchor;
        let horizontal = Vec3::new(offset.x, 0.0, offset.z);
        let distance = horizontal.length();
        if distance > clamp.max_distance {
            let scaled = horizontal * (clamp.max_distance / distance);
            offset.x = scaled.x;
            offset.z = scaled.z;
        }
        offset.y = offset.y.clamp(clamp.min_height, clamp.max_height);
        self.state.position = anchor + offset;
    }
}
