//! CPU marching cubes with seam stitching across forward chunk neighbors.
#![forbid(unsafe_code)]

mod build;
mod chunk;
mod constants;
pub mod cube;
mod march;
mod neighbors;
pub mod seam;
pub mod tables;

use isostitch_world::ChunkCoord;

pub use build::{MarchParams, build_chunk_mesh};
pub use chunk::{ChunkMeshCPU, MarchStats, Triangle};
pub use constants::DENSITY_EPSILON;
pub use cube::{CubeCorners, CubeOutcome, EdgeCrossing, cube_index, interpolate_edge, triangulate_cube};
pub use march::march_interior;
pub use neighbors::{ChunkNeighbors, Neighbor};
pub use seam::{CornerSource, SeamCase, corner_source, stitch_seams};
pub use tables::{CORNER_OFFSETS, EDGE_CORNERS, TRI_TABLE, edge_corners, triangle_edges};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// A chunk (or a neighbor it reads) still holds placeholder densities.
    Unsampled { coord: ChunkCoord },
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::Unsampled { coord } => write!(
                f,
                "chunk ({},{},{}) has not been sampled",
                coord.cx, coord.cy, coord.cz
            ),
        }
    }
}

impl std::error::Error for MeshError {}
