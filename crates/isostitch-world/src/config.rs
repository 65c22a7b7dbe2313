use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::field::FieldConfig;

/// Map layout and meshing parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Voxels per chunk edge.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default = "default_iso_level")]
    pub iso_level: f32,
    /// Chunk count along x, y, z.
    #[serde(default = "default_map_size")]
    pub map_size: [u32; 3],
    /// Added to every world position before the field is sampled.
    #[serde(default)]
    pub offset: [f32; 3],
    /// Divide world positions by `map_size` before applying `offset`.
    #[serde(default)]
    pub normalize_by_map_size: bool,
    /// Worker threads; 0 picks the available parallelism.
    #[serde(default)]
    pub threads: usize,
}

fn default_resolution() -> usize {
    8
}
fn default_iso_level() -> f32 {
    0.5
}
fn default_map_size() -> [u32; 3] {
    [2, 2, 2]
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            iso_level: default_iso_level(),
            map_size: default_map_size(),
            offset: [0.0; 3],
            normalize_by_map_size: false,
            threads: 0,
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 2 {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if self.map_size.contains(&0) {
            return Err(ConfigError::EmptyMap(self.map_size));
        }
        Ok(())
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.map_size.iter().map(|&n| n as usize).product()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IsostitchConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub field: FieldConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidResolution(usize),
    EmptyMap([u32; 3]),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::InvalidResolution(r) => {
                write!(f, "resolution must be at least 2, got {}", r)
            }
            ConfigError::EmptyMap(s) => {
                write!(f, "map size must be non-zero on every axis, got {:?}", s)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Parses and validates a config document.
pub fn from_toml_str(s: &str) -> Result<IsostitchConfig, ConfigError> {
    let cfg: IsostitchConfig = toml::from_str(s)?;
    cfg.map.validate()?;
    Ok(cfg)
}

pub fn load_config_from_path(path: &Path) -> Result<IsostitchConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    from_toml_str(&s)
}
