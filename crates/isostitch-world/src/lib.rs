//! Map sizing, density fields, and configuration loading.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod config;
pub mod field;

pub use chunk_coord::ChunkCoord;
pub use config::{
    ConfigError, IsostitchConfig, MapConfig, from_toml_str, load_config_from_path,
};
pub use field::{
    DensityField, FieldConfig, Fractal, LayeredNoiseField, PerlinProductField, PlaneField, SphereField,
};
