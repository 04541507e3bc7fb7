//! Object ground snapping system.
//!
//! Keeps characters and ground-snapped props resting on the terrain without
//! paying for a ground query per object per frame. Sweeps run on a fixed
//! cadence; grounded characters are eased toward the ground every sweep
//! unless a controller owns their height (see
//! [`ObjectGroundSnapSystem::set_driven`]), while props are only re-queried when they have moved and only on every
//! Nth sweep.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::game::scene::{EntityId, EntityRole, Scene};
use crate::physics::GroundQuery;
use crate::world::FixedInterval;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSnapConfig {
    /// Seconds between sweeps
    pub sweep_interval: f32,
    /// Props are recomputed only on sweeps where `index % N == 0`
    pub prop_recompute_every: u32,
    /// Props that moved less than this distance keep their height
    pub cache_threshold: f32,
    /// Fraction of the remaining height error closed per sweep for characters
    pub character_smoothing: f32,
    /// Corrections larger than this are ignored for characters
    pub max_snap_delta: f32,
}

impl Default for GroundSnapConfig {
    fn default() -> Self {
        Self {
            sweep_interval: 0.2,
            prop_recompute_every: 10,
            cache_threshold: 0.1,
            character_smoothing: 0.3,
            max_snap_delta: 3.0,
        }
    }
}

/// What one sweep did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    pub characters_smoothed: u32,
    pub props_snapped: u32,
    /// Props within the cache threshold of their last snap
    pub props_cached: u32,
    /// Props that moved but waited for a recompute sweep
    pub props_deferred: u32,
    /// Unready or non-finite entities
    pub entities_skipped: u32,
}

/// Throttled sweep over the scene.
pub struct ObjectGroundSnapSystem {
    config: GroundSnapConfig,
    timer: FixedInterval,
    sweep_index: u64,
    driven: Vec<EntityId>,
}

impl ObjectGroundSnapSystem {
    pub fn new(config: GroundSnapConfig) -> Self {
        Self {
            config,
            timer: FixedInterval::new(config.sweep_interval),
            sweep_index: 0,
            driven: Vec::new(),
        }
    }

    /// Mark a character whose height is owned by a controller.
    ///
    /// The controller snaps it exactly every tick, so sweeps leave it alone.
    pub fn set_driven(&mut self, id: EntityId) {
        if !self.driven.contains(&id) {
            self.driven.push(id);
        }
    }

    pub fn config(&self) -> &GroundSnapConfig {
        &self.config
    }

    /// Number of sweeps run so far.
    pub fn sweep_count(&self) -> u64 {
        self.sweep_index
    }

    /// Advance the sweep timer; runs a sweep when it fires.
    ///
    /// Returns the sweep's stats, or `None` when no sweep was due.
    pub fn update(
        &mut self,
        delta_time: f32,
        scene: &mut Scene,
        ground: &dyn GroundQuery,
    ) -> Option<SweepStats> {
        if self.timer.tick(delta_time) {
            Some(self.sweep(scene, ground))
        } else {
            None
        }
    }

    /// Run one sweep immediately.
    pub fn sweep(&mut self, scene: &mut Scene, ground: &dyn GroundQuery) -> SweepStats {
        let every = self.config.prop_recompute_every.max(1) as u64;
        let recompute_props = self.sweep_index % every == 0;
        self.sweep_index += 1;

        let mut stats = SweepStats::default();

        for entity in scene.iter_mut() {
            if !entity.ready || !entity.position.is_finite() {
                stats.entities_skipped += 1;
                continue;
            }

            match entity.role {
                EntityRole::Terrain { .. } => continue,
                EntityRole::Character {
                    height_offset,
                    airborne,
                } => {
                    if airborne || self.driven.contains(&entity.id) {
                        continue;
                    }
                    let target = ground.ground_height(entity.position) as f32 + height_offset;
                    let delta = target - entity.position.y;
                    if delta != 0.0 && delta.abs() <= self.config.max_snap_delta {
                        entity.position.y += delta * self.config.character_smoothing;
                        stats.characters_smoothed += 1;
                    }
                    continue;
                }
                EntityRole::Prop => {}
            }

            let Some(snap) = entity.ground_snap.as_mut() else {
                continue;
            };

            let (x, z) = (entity.position.x, entity.position.z);
            if snap.cache.is_fresh(x, z, self.config.cache_threshold) {
                stats.props_cached += 1;
                continue;
            }
            if !recompute_props {
                stats.props_deferred += 1;
                continue;
            }

            entity.position.y = ground.ground_height(entity.position) as f32 + snap.height_offset;
            snap.cache.record(x, z);
            stats.props_snapped += 1;
        }

        trace!(
            "Ground snap sweep {}: {} characters smoothed, {} props snapped, {} cached, {} deferred",
            self.sweep_index,
            stats.characters_smoothed,
            stats.props_snapped,
            stats.props_cached,
            stats.props_deferred
        );

        stats
    }
}
