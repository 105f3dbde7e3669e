//! Generation parameters, loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::COORDINATE_LIMIT;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for the run's single random source.
    pub seed: u64,
    /// Largest allowed Euclidean distance between a placement's origin and the root origin.
    pub max_distance: f64,
    /// Cap on accepted placements, hub included.
    pub max_segments: usize,
    /// Candidates tried against one frontier entry point before it is abandoned.
    pub max_tries_per_entrance: usize,
    /// Bound on frontier visits for a single run.
    pub max_iterations: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_distance: 128.0,
            max_segments: 40,
            max_tries_per_entrance: 6,
            max_iterations: 10_000,
        }
    }
}

impl GenerationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_segments == 0 {
            return Err(ConfigError::ZeroSegmentCap);
        }
        if self.max_tries_per_entrance == 0 {
            return Err(ConfigError::ZeroTries);
        }
        if !(0.0..=f64::from(COORDINATE_LIMIT)).contains(&self.max_distance) {
            return Err(ConfigError::InvalidMaxDistance(self.max_distance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = GenerationConfig::from_toml_str("seed = 42\nmax_segments = 10\n")
            .expect("partial config should parse");
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_segments, 10);
        assert_eq!(config.max_distance, GenerationConfig::default().max_distance);
        assert_eq!(config.max_tries_per_entrance, 6);
    }

    #[test]
    fn empty_document_is_the_default_config() {
        assert_eq!(GenerationConfig::from_toml_str("").ok(), Some(GenerationConfig::default()));
    }

    #[test]
    fn invalid_limits_are_rejected() {
        assert!(matches!(
            GenerationConfig::from_toml_str("max_segments = 0"),
            Err(ConfigError::ZeroSegmentCap)
        ));
        assert!(matches!(
            GenerationConfig::from_toml_str("max_tries_per_entrance = 0"),
            Err(ConfigError::ZeroTries)
        ));
        assert!(matches!(
            GenerationConfig::from_toml_str("max_distance = -1.0"),
            Err(ConfigError::InvalidMaxDistance(_))
        ));
        assert!(matches!(
            GenerationConfig::from_toml_str("max_distance = \"far\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn distance_bound_must_stay_inside_the_coordinate_range() {
        let at_limit =
            GenerationConfig { max_distance: f64::from(COORDINATE_LIMIT), ..Default::default() };
        assert!(at_limit.validate().is_ok());

        for max_distance in [f64::from(COORDINATE_LIMIT) + 1.0, f64::NAN, f64::INFINITY, -0.5] {
            let config = GenerationConfig { max_distance, ..GenerationConfig::default() };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxDistance(_))));
        }
    }

    #[test]
    fn integer_distance_is_accepted() {
        let config =
            GenerationConfig::from_toml_str("max_distance = 100").expect("integer distance");
        assert_eq!(config.max_distance, 100.0);
    }
}
