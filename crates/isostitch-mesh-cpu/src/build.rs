use std::time::Instant;

use isostitch_chunk::VoxelGrid;
use isostitch_geom::Aabb;
use isostitch_world::MapConfig;

use crate::MeshError;
use crate::chunk::ChunkMeshCPU;
use crate::march::march_interior;
use crate::neighbors::{ChunkNeighbors, Neighbor};
use crate::seam::stitch_seams;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchParams {
    pub iso_level: f32,
}

impl Default for MarchParams {
    fn default() -> Self {
        Self { iso_level: 0.5 }
    }
}

impl From<&MapConfig> for MarchParams {
    fn from(cfg: &MapConfig) -> Self {
        Self {
            iso_level: cfg.iso_level,
        }
    }
}

/// Meshes one sampled chunk: interior cubes, then the seams shared with its
/// forward neighbors. The chunk and every present neighbor must be sampled.
pub fn build_chunk_mesh(
    grid: &VoxelGrid,
    neighbors: &ChunkNeighbors<'_>,
    iso: f32,
) -> Result<ChunkMeshCPU, MeshError> {
    let t0 = Instant::now();
    if !grid.is_sampled() {
        return Err(MeshError::Unsampled { coord: grid.coord });
    }
    if let Some(n) = Neighbor::FORWARD
        .iter()
        .filter_map(|&n| neighbors.get(n))
        .find(|n| !n.is_sampled())
    {
        return Err(MeshError::Unsampled { coord: n.coord });
    }
    let mut triangles = Vec::new();
    let mut stats = march_interior(grid, iso, &mut triangles);
    stats.merge(stitch_seams(grid, neighbors, iso, &mut triangles));

    let mut bbox = Aabb::empty();
    for t in &triangles {
        for p in t.vertices() {
            bbox.include(p);
        }
    }
    let ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::debug!(
        "meshed chunk ({},{},{}) tris={} interior={} seam={} skipped={} clamped={} ms={}",
        grid.coord.cx,
        grid.coord.cy,
        grid.coord.cz,
        triangles.len(),
        stats.interior_cubes,
        stats.seam_cubes,
        stats.seam_cubes_skipped,
        stats.clamped_edges,
        ms
    );
    Ok(ChunkMeshCPU {
        coord: grid.coord,
        triangles,
        bbox,
        stats,
    })
}
