//! Camera Module
//!
//! Follow camera for the controlled character. Window-system agnostic: it only
//! produces a camera position and look target per tick.

pub mod follow;

pub use follow::{
    CameraClamp, CameraFollowConfig, CameraFollowController, CameraFollowState, FollowProfile,
    YAW_OFFSET_EPSILON,
};
