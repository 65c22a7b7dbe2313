//! Chunk map ownership and the parallel sample/march pipeline.
#![forbid(unsafe_code)]

mod map;
mod pipeline;

use isostitch_chunk::ChunkError;
use isostitch_mesh_cpu::MeshError;
use isostitch_world::{ChunkCoord, ConfigError};

pub use map::{ChunkMap, ChunkSlot};
pub use pipeline::{JobOut, MapMeshes, MeshPipeline, SamplePass};

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Chunk(ChunkError),
    ThreadPool(String),
    /// Marching was asked for before the chunk was sampled.
    Unsampled { coord: ChunkCoord },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::Config(e) => write!(f, "invalid map config: {}", e),
            RuntimeError::Chunk(e) => write!(f, "chunk allocation failed: {}", e),
            RuntimeError::ThreadPool(msg) => write!(f, "failed to start worker pool: {}", msg),
            RuntimeError::Unsampled { coord } => write!(
                f,
                "chunk ({},{},{}) marched before sampling",
                coord.cx, coord.cy, coord.cz
            ),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Config(e) => Some(e),
            RuntimeError::Chunk(e) => Some(e),
            RuntimeError::ThreadPool(_) | RuntimeError::Unsampled { .. } => None,
        }
    }
}

impl From<ConfigError> for RuntimeError {
    fn from(e: ConfigError) -> Self {
        RuntimeError::Config(e)
    }
}

impl From<ChunkError> for RuntimeError {
    fn from(e: ChunkError) -> Self {
        RuntimeError::Chunk(e)
    }
}

impl From<MeshError> for RuntimeError {
    fn from(e: MeshError) -> Self {
        match e {
            MeshError::Unsampled { coord } => RuntimeError::Unsampled { coord },
        }
    }
}
