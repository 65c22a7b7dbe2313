use isostitch_chunk::{Voxel, VoxelGrid};

use crate::chunk::{MarchStats, Triangle};
use crate::cube::{CubeCorners, triangulate_cube};
use crate::tables::CORNER_OFFSETS;

/// Marches every cube whose eight corners lie inside `grid`.
pub fn march_interior(grid: &VoxelGrid, iso: f32, out: &mut Vec<Triangle>) -> MarchStats {
    let mut stats = MarchStats::default();
    let last = grid.resolution() - 1;
    let mut corners: CubeCorners = [Voxel::default(); 8];
    for x in 0..last {
        for y in 0..last {
            for z in 0..last {
                for (k, [dx, dy, dz]) in CORNER_OFFSETS.iter().copied().enumerate() {
                    corners[k] = grid.get_local(x + dx, y + dy, z + dz);
                }
                let outcome = triangulate_cube(&corners, iso, out);
                stats.interior_cubes += 1;
                stats.clamped_edges += outcome.clamped_edges();
            }
        }
    }
    stats
}
