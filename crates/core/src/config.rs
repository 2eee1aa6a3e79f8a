//! Tunable generation and run-session settings, persisted as a JSON file.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mapgen::WeightedTable;
use crate::session::RunRules;
use crate::types::CollectibleKind;

pub const CONFIG_FORMAT_VERSION: u32 = 1;

pub const DEFAULT_COLLECTIBLE_WEIGHTS: [CollectibleWeight; 4] = [
    CollectibleWeight { kind: CollectibleKind::Namaz, weight: 40 },
    CollectibleWeight { kind: CollectibleKind::Tesbih, weight: 35 },
    CollectibleWeight { kind: CollectibleKind::Zikir, weight: 20 },
    CollectibleWeight { kind: CollectibleKind::Kuran, weight: 5 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectibleWeight {
    pub kind: CollectibleKind,
    pub weight: u32,
}

/// Half-open speed interval in cells per second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    pub fn as_range(self) -> Range<f64> {
        self.min..self.max
    }

    fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min < self.max
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub collectible_weights: Vec<CollectibleWeight>,
    pub horizontal_patrol_speed: SpeedRange,
    pub vertical_patrol_speed: SpeedRange,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            collectible_weights: DEFAULT_COLLECTIBLE_WEIGHTS.to_vec(),
            horizontal_patrol_speed: SpeedRange { min: 0.8, max: 1.2 },
            vertical_patrol_speed: SpeedRange { min: 0.6, max: 1.0 },
        }
    }
}

impl GenerationConfig {
    /// Sampler over the configured weights, falling back to the default table when the
    /// configured one has no positive weight.
    pub fn collectible_table(&self) -> Option<WeightedTable<CollectibleKind>> {
        WeightedTable::new(self.collectible_weights.iter().map(|entry| (entry.kind, entry.weight)))
            .or_else(|| {
                WeightedTable::new(
                    DEFAULT_COLLECTIBLE_WEIGHTS.iter().map(|entry| (entry.kind, entry.weight)),
                )
            })
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.collectible_weights.iter().all(|entry| entry.weight == 0) {
            return Err(ConfigLoadError::Invalid {
                field: "generation.collectible_weights",
                message: "at least one weight must be positive".to_string(),
            });
        }
        for (field, range) in [
            ("generation.horizontal_patrol_speed", self.horizontal_patrol_speed),
            ("generation.vertical_patrol_speed", self.vertical_patrol_speed),
        ] {
            if !range.is_valid() {
                return Err(ConfigLoadError::Invalid {
                    field,
                    message: format!("expected 0 < min < max, got {}..{}", range.min, range.max),
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeConfigFile {
    pub format_version: u32,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub rules: RunRules,
}

impl Default for MazeConfigFile {
    fn default() -> Self {
        Self {
            format_version: CONFIG_FORMAT_VERSION,
            generation: GenerationConfig::default(),
            rules: RunRules::default(),
        }
    }
}

impl MazeConfigFile {
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Reads, parses, and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path).map_err(ConfigLoadError::Io)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| ConfigLoadError::Parse { message: e.to_string() })?;
        if config.format_version != CONFIG_FORMAT_VERSION {
            return Err(ConfigLoadError::UnsupportedVersion { found: config.format_version });
        }
        config.generation.validate()?;
        config.rules.validate()?;
        Ok(config)
    }
}

/// Describes why a config file was rejected.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file is not valid JSON for the config schema.
    Parse { message: String },
    /// The file was written by an incompatible version.
    UnsupportedVersion { found: u32 },
    /// A field parsed but holds an unusable value.
    Invalid { field: &'static str, message: String },
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse { message } => write!(f, "invalid config JSON: {message}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported config format version {found}, expected {CONFIG_FORMAT_VERSION}")
            }
            Self::Invalid { field, message } => write!(f, "invalid config field {field}: {message}"),
        }
    }
}

impl Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn config_file_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("maze.json");
        let mut config = MazeConfigFile::default();
        config.generation.collectible_weights =
            vec![CollectibleWeight { kind: CollectibleKind::Kuran, weight: 1 }];
        config.rules.lives = 5;

        config.write_atomic(&path).expect("write");
        let loaded = MazeConfigFile::load(&path).expect("load");
        assert_eq!(config, loaded);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let loaded = MazeConfigFile::from_json(r#"{ "format_version": 1 }"#).expect("load");
        assert_eq!(loaded, MazeConfigFile::default());

        let partial = MazeConfigFile::from_json(
            r#"{ "format_version": 1, "generation": { "collectible_weights": [
                { "kind": "zikir", "weight": 3 } ] } }"#,
        )
        .expect("load");
        assert_eq!(partial.generation.collectible_weights.len(), 1);
        assert_eq!(partial.generation.horizontal_patrol_speed, SpeedRange { min: 0.8, max: 1.2 });
    }

    #[test]
    fn rejects_unusable_values() {
        let zero_weights = r#"{ "format_version": 1, "generation": { "collectible_weights": [
            { "kind": "namaz", "weight": 0 } ] } }"#;
        assert!(matches!(
            MazeConfigFile::from_json(zero_weights),
            Err(ConfigLoadError::Invalid { field: "generation.collectible_weights", .. })
        ));

        let inverted = r#"{ "format_version": 1, "generation": {
            "vertical_patrol_speed": { "min": 1.0, "max": 0.5 } } }"#;
        assert!(matches!(
            MazeConfigFile::from_json(inverted),
            Err(ConfigLoadError::Invalid { field: "generation.vertical_patrol_speed", .. })
        ));

        assert!(matches!(
            MazeConfigFile::from_json(r#"{ "format_version": 9 }"#),
            Err(ConfigLoadError::UnsupportedVersion { found: 9 })
        ));
        assert!(matches!(MazeConfigFile::from_json("{"), Err(ConfigLoadError::Parse { .. })));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempdir().expect("tempdir");
        let error = MazeConfigFile::load(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(error, ConfigLoadError::Io(_)));
        assert!(error.to_string().starts_with("config I/O error"));
    }

    #[test]
    fn empty_weight_table_falls_back_to_defaults() {
        let config = GenerationConfig { collectible_weights: Vec::new(), ..Default::default() };
        let table = config.collectible_table().expect("default table");
        assert_eq!(table.total_weight(), 100);
    }
}
