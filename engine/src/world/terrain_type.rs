//! Terrain Classification
//!
//! Maps signed elevation to a terrain type and each terrain type to the
//! jump force multiplier a character standing on it receives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multiplier used for anything that does not name a known terrain type.
pub const DEFAULT_JUMP_MULTIPLIER: f64 = 1.0;

/// Discrete terrain category derived from elevation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Water,
    Sand,
    Grass,
    Dirt,
    Rock,
}

impl TerrainType {
    /// All terrain types, lowest elevation band first.
    pub const ALL: [TerrainType; 5] = [
        TerrainType::Water,
        TerrainType::Sand,
        TerrainType::Grass,
        TerrainType::Dirt,
        TerrainType::Rock,
    ];

    /// Lowercase name, as used by configuration and scripting callers.
    pub fn name(&self) -> &'static str {
        match self {
            TerrainType::Water => "water",
            TerrainType::Sand => "sand",
            TerrainType::Grass => "grass",
            TerrainType::Dirt => "dirt",
            TerrainType::Rock => "rock",
        }
    }

    /// Base vertex colour for terrain meshes (linear RGB).
    pub fn color(&self) -> [f32; 3] {
        match self {
            TerrainType::Water => [0.12, 0.30, 0.45],
            TerrainType::Sand => [0.76, 0.70, 0.50],
            TerrainType::Grass => [0.22, 0.45, 0.16],
            TerrainType::Dirt => [0.40, 0.30, 0.20],
            TerrainType::Rock => [0.45, 0.43, 0.41],
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a terrain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTerrainType(pub String);

impl fmt::Display for UnknownTerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown terrain type: {}", self.0)
    }
}

impl std::error::Error for UnknownTerrainType {}

impl FromStr for TerrainType {
    type Err = UnknownTerrainType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerrainType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTerrainType(s.to_string()))
    }
}

/// Elevation thresholds and jump multipliers.
///
/// Each threshold is the exclusive upper bound of its band:
/// `< water_below` is water, `< sand_below` is sand, and so on; anything
/// at or above `dirt_below` is rock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainClassifier {
    pub water_below: f64,
    pub sand_below: f64,
    pub grass_below: f64,
    pub dirt_below: f64,
}

impl Default for TerrainClassifier {
    fn default() -> Self {
        Self {
            water_below: -1.0,
            sand_below: 0.5,
            grass_below: 2.0,
            dirt_below: 4.0,
        }
    }
}

impl TerrainClassifier {
    /// Create a classifier with the standard thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a signed elevation.
    pub fn classify(&self, elevation: f64) -> TerrainType {
        if elevation < self.water_below {
            TerrainType::Water
        } else if elevation < self.sand_below {
            TerrainType::Sand
        } else if elevation < self.grass_below {
            TerrainType::Grass
        } else if elevation < self.dirt_below {
            TerrainType::Dirt
        } else {
            TerrainType::Rock
        }
    }

    /// Jump force multiplier for a terrain type.
    pub fn jump_multiplier(&self, terrain: TerrainType) -> f64 {
        match terrain {
            TerrainType::Water => 0.3,
            TerrainType::Sand => 0.7,
            TerrainType::Grass => 1.0,
            TerrainType::Dirt => 1.1,
            TerrainType::Rock => 1.3,
        }
    }

    /// Jump multiplier looked up by name; unknown names get [`DEFAULT_JUMP_MULTIPLIER`].
    pub fn jump_multiplier_by_name(&self, name: &str) -> f64 {
        name.parse::<TerrainType>()
            .map(|t| self.jump_multiplier(t))
            .unwrap_or(DEFAULT_JUMP_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_are_exclusive() {
        let c = TerrainClassifier::new();
        assert_eq!(c.classify(-1.0), TerrainType::Sand);
        assert_eq!(c.classify(0.5), TerrainType::Grass);
        assert_eq!(c.classify(2.0), TerrainType::Dirt);
        assert_eq!(c.classify(4.0), TerrainType::Rock);
        assert_eq!(c.classify(-50.0), TerrainType::Water);
        assert_eq!(c.classify(1000.0), TerrainType::Rock);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Rock".parse::<TerrainType>(), Ok(TerrainType::Rock));
        assert_eq!(" water ".parse::<TerrainType>(), Ok(TerrainType::Water));
        assert!("lava".parse::<TerrainType>().is_err());
    }

    #[test]
    fn test_named_multiplier_falls_back() {
        let c = TerrainClassifier::new();
        assert_eq!(c.jump_multiplier_by_name("dirt"), 1.1);
        assert_eq!(c.jump_multiplier_by_name("lava"), DEFAULT_JUMP_MULTIPLIER);
        assert_eq!(c.jump_multiplier_by_name(""), DEFAULT_JUMP_MULTIPLIER);
    }

    #[test]
    fn test_display_matches_name() {
        for t in TerrainType::ALL {
            assert_eq!(t.to_string(), t.name());
        }
    }
}
