//! Generator configuration.
//!
//! Map size, seed and compositor tuning, loadable from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use crate::pipeline::Pipeline;
use crate::steps::CompositeStep;

/// Parameters for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // === Map ===
    /// Map width in cells
    pub width: usize,
    /// Map height in cells
    pub height: usize,
    /// Generation seed (None = random)
    pub seed: Option<u64>,

    // === Compositor ===
    /// Region rotation in degrees
    pub rotation_angle: f64,
    /// Minimum side length of a partition rectangle
    pub region_min_dimension: i32,

    // === Cave ===
    /// Probability of a wall in the initial noise (0.0 - 1.0)
    pub cave_fill_probability: f64,
    /// Number of smoothing passes
    pub cave_smoothing_passes: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 25,
            seed: None,

            rotation_angle: 45.0,
            region_min_dimension: 8,

            cave_fill_probability: 0.45,
            cave_smoothing_passes: 4,
        }
    }
}

impl GeneratorConfig {
    /// Reads and parses a TOML settings file.
    ///
    /// Keys missing from the file keep their default values. Parse failures
    /// surface as `InvalidData`.
    pub fn read_from<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Settings from `path`, or the defaults when it cannot be used.
    ///
    /// A missing file is expected and only noted; an unreadable or
    /// malformed one is logged as a warning.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::read_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                Self::default()
            },
            Err(e) => {
                warn!("Ignoring config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Writes the settings as pretty TOML, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        let requested = self.clone();

        self.width = self.width.clamp(1, 4096);
        self.height = self.height.clamp(1, 4096);

        if !self.rotation_angle.is_finite() {
            self.rotation_angle = 0.0;
        }
        self.rotation_angle = self.rotation_angle.rem_euclid(360.0);
        self.region_min_dimension = self.region_min_dimension.clamp(2, 256);

        self.cave_fill_probability = if self.cave_fill_probability.is_nan() {
            0.45
        } else {
            self.cave_fill_probability.clamp(0.0, 1.0)
        };
        self.cave_smoothing_passes = self.cave_smoothing_passes.min(32);

        if *self != requested {
            warn!("Config values out of range were clamped");
        }
    }

    /// Compositor configured from these settings.
    #[must_use]
    pub fn composite_step(&self) -> CompositeStep {
        CompositeStep::with_cave(self.cave_fill_probability, self.cave_smoothing_passes)
            .with_rotation(self.rotation_angle)
            .with_min_region_dimension(self.region_min_dimension)
    }

    /// The standard pipeline: a single compositor writing
    /// [`CompositeStep::DEFAULT_TAG`].
    #[must_use]
    pub fn build_pipeline(&self) -> Pipeline {
        let pipeline = Pipeline::new(self.width, self.height).add_step(self.composite_step());
        match self.seed {
            Some(seed) => pipeline.with_seed(seed),
            None => pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use warren_common::Grid;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!((config.width, config.height), (80, 25));
        assert_eq!(config.seed, None);
        assert_eq!(config.region_min_dimension, 8);
        assert_eq!(config.cave_smoothing_passes, 4);
    }

    #[test]
    fn test_config_validation() {
        let mut config = GeneratorConfig {
            width: 0,
            rotation_angle: -90.0,
            region_min_dimension: 0,
            cave_fill_probability: 3.0,
            cave_smoothing_passes: 1000,
            ..GeneratorConfig::default()
        };

        config.validate();

        assert_eq!(config.width, 1);
        assert!((config.rotation_angle - 270.0).abs() < 1e-9);
        assert_eq!(config.region_min_dimension, 2);
        assert!((config.cave_fill_probability - 1.0).abs() < 1e-9);
        assert_eq!(config.cave_smoothing_passes, 32);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("warren.toml");

        let config = GeneratorConfig {
            width: 120,
            seed: Some(12345),
            rotation_angle: 30.0,
            ..GeneratorConfig::default()
        };
        config.save_to(&config_path).expect("Failed to save config");

        let loaded = GeneratorConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "width = 40\nseed = 9\n").expect("write");

        let loaded = GeneratorConfig::load_from(&config_path);
        assert_eq!(loaded.width, 40);
        assert_eq!(loaded.seed, Some(9));
        assert_eq!(loaded.height, 25);
    }

    #[test]
    fn test_config_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "width = \"wide\"").expect("write");

        assert_eq!(GeneratorConfig::load_from(&config_path), GeneratorConfig::default());
    }

    #[test]
    fn test_read_from_reports_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("absent.toml");
        let err = GeneratorConfig::read_from(&missing).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let broken = temp_dir.path().join("broken.toml");
        fs::write(&broken, "height = [1, 2]").expect("write");
        let err = GeneratorConfig::read_from(&broken).expect_err("bad value");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = GeneratorConfig::load_from("/nonexistent/path/warren.toml");
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_build_pipeline() {
        let config = GeneratorConfig {
            width: 24,
            height: 12,
            seed: Some(4),
            ..GeneratorConfig::default()
        };
        let mut pipeline = config.build_pipeline();
        assert_eq!(pipeline.seed(), Some(4));
        assert_eq!(pipeline.step_names().collect::<Vec<_>>(), ["composite"]);

        let context = pipeline.run().expect("run");
        let map = context
            .get::<Grid<bool>>(Some(CompositeStep::DEFAULT_TAG))
            .expect("composite grid");
        assert_eq!(map.extent(), (24, 12));
    }
}
