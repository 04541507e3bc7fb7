//! Height Field Module
//!
//! Analytic terrain elevation shared by physics queries and terrain mesh generation.
//!
//! The surface is composed of three layers:
//! - Rolling hills: a broad sin/cos swell plus two higher-frequency hill terms
//! - Radial mountain bumps that rise linearly toward their centres
//! - River valleys carved along two sinusoidal channels
//!
//! Everything west of `x = -20` or south of `z = 20` is ocean and is pushed to
//! at most `-3`. The signed value is used for terrain classification; walkable
//! ground queries go through [`HeightField::ground_height`], which floors at 0.

use serde::{Deserialize, Serialize};

/// One `sin(x * freq_x) * cos(z * freq_z) * amplitude` hill term.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HillTerm {
    pub freq_x: f64,
    pub freq_z: f64,
    pub amplitude: f64,
}

impl HillTerm {
    #[inline]
    fn sample(&self, x: f64, z: f64) -> f64 {
        (x * self.freq_x).sin() * (z * self.freq_z).cos() * self.amplitude
    }
}

/// A radial bump: inside `radius`, adds `(radius - distance) * gain`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MountainBump {
    pub center_x: f64,
    pub center_z: f64,
    pub radius: f64,
    pub gain: f64,
}

impl MountainBump {
    #[inline]
    fn sample(&self, x: f64, z: f64) -> f64 {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        let distance = (dx * dx + dz * dz).sqrt();
        if distance < self.radius {
            (self.radius - distance) * self.gain
        } else {
            0.0
        }
    }
}

/// Shape of a river channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RiverChannel {
    /// Distance `|sin(x * frequency) * amplitude - z|`
    AlongX { frequency: f64, amplitude: f64 },
    /// Distance `|cos(z * frequency) * amplitude - x + shift|`
    AlongZ {
        frequency: f64,
        amplitude: f64,
        shift: f64,
    },
}

/// A carved river valley with linear falloff out to `width`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiverValley {
    pub channel: RiverChannel,
    /// Distance from the channel line at which carving stops
    pub width: f64,
    /// Depth carved on the channel line itself
    pub depth: f64,
}

impl RiverValley {
    /// Distance of (x, z) from the river's centre line (not Euclidean).
    #[inline]
    fn channel_distance(&self, x: f64, z: f64) -> f64 {
        match self.channel {
            RiverChannel::AlongX {
                frequency,
                amplitude,
            } => ((x * frequency).sin() * amplitude - z).abs(),
            RiverChannel::AlongZ {
                frequency,
                amplitude,
                shift,
            } => ((z * frequency).cos() * amplitude - x + shift).abs(),
        }
    }

    #[inline]
    fn carve(&self, x: f64, z: f64) -> f64 {
        let distance = self.channel_distance(x, z);
        if distance < self.width {
            (1.0 - distance / self.width) * self.depth
        } else {
            0.0
        }
    }
}

/// Tunable parameters of the analytic height field.
///
/// `Default` is the canonical world formula. Every other value in the crate
/// (meshes, ground queries, classification) derives from one instance of this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightFieldParams {
    pub hills: Vec<HillTerm>,
    pub mountains: Vec<MountainBump>,
    pub rivers: Vec<RiverValley>,
    /// Points with `x < ocean_west_x` are ocean
    pub ocean_west_x: f64,
    /// Points with `z > ocean_south_z` are ocean
    pub ocean_south_z: f64,
    /// Ocean elevation ceiling
    pub ocean_max_elevation: f64,
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            hills: vec![
                HillTerm {
                    freq_x: 0.1,
                    freq_z: 0.1,
                    amplitude: 2.0,
                },
                HillTerm {
                    freq_x: 0.8,
                    freq_z: 0.6,
                    amplitude: 3.0,
                },
                HillTerm {
                    freq_x: 1.2,
                    freq_z: 0.9,
                    amplitude: 2.0,
                },
            ],
            mountains: vec![
                MountainBump {
                    center_x: 15.0,
                    center_z: -10.0,
                    radius: 8.0,
                    gain: 6.0,
                },
                MountainBump {
                    center_x: -18.0,
                    center_z: 15.0,
                    radius: 6.0,
                    gain: 8.0,
                },
            ],
            rivers: vec![
                RiverValley {
                    channel: RiverChannel::AlongX {
                        frequency: 0.3,
                        amplitude: 5.0,
                    },
                    width: 2.0,
                    depth: 3.0,
                },
                RiverValley {
                    channel: RiverChannel::AlongZ {
                        frequency: 0.2,
                        amplitude: 6.0,
                        shift: 10.0,
                    },
                    width: 2.5,
                    depth: 2.5,
                },
            ],
            ocean_west_x: -20.0,
            ocean_south_z: 20.0,
            ocean_max_elevation: -3.0,
        }
    }
}

/// Pure analytic terrain elevation.
///
/// Holds no mutable state; identical inputs always produce bit-identical outputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightField {
    params: HeightFieldParams,
}

impl HeightField {
    /// Create the canonical height field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a height field from custom parameters.
    pub fn with_params(params: HeightFieldParams) -> Self {
        Self { params }
    }

    /// Get the parameters this field evaluates.
    pub fn params(&self) -> &HeightFieldParams {
        &self.params
    }

    /// Signed elevation at world (x, z).
    ///
    /// Negative values are below sea level and classify as sand or water.
    pub fn elevation(&self, x: f64, z: f64) -> f64 {
        let p = &self.params;

        let mut height: f64 = p.hills.iter().map(|h| h.sample(x, z)).sum();
        height += p.mountains.iter().map(|m| m.sample(x, z)).sum::<f64>();
        height -= p.rivers.iter().map(|r| r.carve(x, z)).sum::<f64>();

        if self.is_ocean(x, z) {
            height = height.min(p.ocean_max_elevation);
        }

        height
    }

    /// Walkable ground height at world (x, z); never negative.
    #[inline]
    pub fn ground_height(&self, x: f64, z: f64) -> f64 {
        self.elevation(x, z).max(0.0)
    }

    /// Whether (x, z) lies in the ocean region.
    #[inline]
    pub fn is_ocean(&self, x: f64, z: f64) -> bool {
        x < self.params.ocean_west_x || z > self.params.ocean_south_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_is_deterministic() {
        let field = HeightField::new();
        for i in -50..50 {
            let x = i as f64 * 1.37;
            let z = i as f64 * -0.91;
            assert_eq!(
                field.elevation(x, z).to_bits(),
                field.elevation(x, z).to_bits()
            );
        }
    }

    #[test]
    fn test_origin_has_no_hill_contribution() {
        // sin(0) zeroes every hill term; neither mountain reaches the origin
        let field = HeightField::new();
        let e = field.elevation(0.0, 0.0);
        // River 1 passes through the origin and carves its full depth
        assert!((e - (-3.0)).abs() < 1e-9);
        assert_eq!(field.ground_height(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_mountain_peak_is_tallest_at_center() {
        let field = HeightField::new();
        let peak = field.elevation(15.0, -10.0);
        let flank = field.elevation(19.0, -10.0);
        assert!(peak > 40.0);
        assert!(peak > flank);
    }

    #[test]
    fn test_ocean_clamp() {
        let field = HeightField::new();
        for i in 0..40 {
            let z = -20.0 + i as f64;
            assert!(field.elevation(-25.0, z) <= -3.0);
            assert!(field.elevation(z, 25.0) <= -3.0);
        }
        assert_eq!(field.ground_height(-25.0, 0.0), 0.0);
    }

    #[test]
    fn test_river_carving_lowers_terrain() {
        let mut params = HeightFieldParams::default();
        let carved = HeightField::with_params(params.clone());
        params.rivers.clear();
        let uncarved = HeightField::with_params(params);

        // On river 1's channel line at x = 3: z = sin(0.9) * 5
        let x = 3.0;
        let z = (x * 0.3_f64).sin() * 5.0;
        assert!(carved.elevation(x, z) < uncarved.elevation(x, z));
        // Far from both channels nothing is carved
        assert_eq!(carved.elevation(10.0, -15.0), uncarved.elevation(10.0, -15.0));
    }

    #[test]
    fn test_params_roundtrip_through_json() {
        let params = HeightFieldParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let parsed: HeightFieldParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
