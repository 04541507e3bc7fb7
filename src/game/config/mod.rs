//! Config Module
//!
//! Centralized configuration for the simulation.

pub mod sim_config;

pub use sim_config::{ConfigError, SimConfig};
