use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, unbounded};
use isostitch_chunk::sample_voxel_grid;
use isostitch_geom::Vec3;
use isostitch_mesh_cpu::{ChunkMeshCPU, MarchParams, MarchStats, Triangle, build_chunk_mesh};
use isostitch_world::{ChunkCoord, DensityField, MapConfig};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::RuntimeError;
use crate::map::ChunkMap;

/// Result of one chunk's marching job.
pub struct JobOut {
    pub index: usize,
    pub coord: ChunkCoord,
    pub mesh: ChunkMeshCPU,
    pub t_mesh_ms: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SamplePass {
    pub chunks: usize,
    pub min_density: f32,
    pub max_density: f32,
    pub elapsed_ms: u32,
}

/// Meshes for a whole map, in flat-index order.
pub struct MapMeshes {
    pub chunks: Vec<ChunkMeshCPU>,
    pub stats: MarchStats,
    pub t_sample_ms: u32,
    pub t_march_ms: u32,
}

impl MapMeshes {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.chunks.iter().map(|c| c.triangle_count()).sum()
    }

    #[inline]
    pub fn seam_cubes_skipped(&self) -> usize {
        self.stats.seam_cubes_skipped
    }

    /// Every chunk's triangles in world space, chunk by chunk.
    pub fn world_triangles(&self, origin: Vec3) -> Vec<Triangle> {
        let mut out = Vec::with_capacity(self.triangle_count());
        for c in &self.chunks {
            out.extend(c.world_triangles(origin));
        }
        out
    }
}

/// Two-phase mesher: sample every chunk, then march every chunk. Marching a
/// chunk reads its forward neighbors, so phase 2 starts only after phase 1
/// has finished for the whole map.
pub struct MeshPipeline {
    pool: ThreadPool,
    threads: usize,
    params: MarchParams,
}

impl MeshPipeline {
    /// `threads == 0` uses the available parallelism.
    pub fn new(threads: usize, params: MarchParams) -> Result<Self, RuntimeError> {
        let threads = if threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            threads
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("isostitch-mesh-{i}"))
            .build()
            .map_err(|e| RuntimeError::ThreadPool(e.to_string()))?;
        Ok(Self {
            pool,
            threads,
            params,
        })
    }

    pub fn from_config(cfg: &MapConfig) -> Result<Self, RuntimeError> {
        Self::new(cfg.threads, MarchParams::from(cfg))
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Phase 1 only: re-evaluates every voxel, keeping chunk identity and
    /// neighbor links.
    pub fn resample(&self, map: &mut ChunkMap, field: &dyn DensityField) -> SamplePass {
        let t0 = Instant::now();
        let sampling = *map.sampling();
        let ranges: Vec<(f32, f32)> = self.pool.install(|| {
            map.slots
                .par_iter_mut()
                .map(|slot| {
                    let s = sample_voxel_grid(&mut slot.grid, field, &sampling);
                    (s.min_density, s.max_density)
                })
                .collect()
        });
        let (min_density, max_density) = ranges.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), &(a, b)| (lo.min(a), hi.max(b)),
        );
        let elapsed_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        log::info!(
            "sampled {} chunks range=[{:.4},{:.4}] in {}ms",
            ranges.len(),
            min_density,
            max_density,
            elapsed_ms
        );
        SamplePass {
            chunks: ranges.len(),
            min_density,
            max_density,
            elapsed_ms,
        }
    }

    /// Phase 2 only. Fails without marching anything if any chunk of the
    /// map has not been sampled.
    pub fn march(&self, map: &ChunkMap) -> Result<(Vec<ChunkMeshCPU>, u32), RuntimeError> {
        ensure_sampled(map)?;
        let t0 = Instant::now();
        let iso = self.params.iso_level;
        let chunks = self.pool.install(|| {
            (0..map.len())
                .into_par_iter()
                .map(|i| build_chunk_mesh(&map.slot(i).grid, &map.neighbors_of(i), iso))
                .collect::<Result<Vec<_>, _>>()
        })?;
        let elapsed_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        Ok((chunks, elapsed_ms))
    }

    /// Samples and meshes the whole map.
    pub fn run(
        &self,
        map: &mut ChunkMap,
        field: &dyn DensityField,
    ) -> Result<MapMeshes, RuntimeError> {
        let pass = self.resample(map, field);
        let (chunks, t_march_ms) = self.march(map)?;
        let mut stats = MarchStats::default();
        for c in &chunks {
            stats.merge(c.stats);
        }
        let meshes = MapMeshes {
            chunks,
            stats,
            t_sample_ms: pass.elapsed_ms,
            t_march_ms,
        };
        log::info!(
            "meshed {} chunks tris={} seam={} skipped={} clamped={} sample={}ms march={}ms",
            meshes.chunks.len(),
            meshes.triangle_count(),
            stats.seam_cubes,
            stats.seam_cubes_skipped,
            stats.clamped_edges,
            meshes.t_sample_ms,
            meshes.t_march_ms
        );
        Ok(meshes)
    }

    /// Streams per-chunk meshes as workers finish, in completion order.
    /// The channel closes once every chunk has been sent. Fails up front,
    /// spawning nothing, if any chunk has not been sampled.
    pub fn spawn_march(&self, map: Arc<ChunkMap>) -> Result<Receiver<JobOut>, RuntimeError> {
        ensure_sampled(&map)?;
        let (tx, rx) = unbounded::<JobOut>();
        let iso = self.params.iso_level;
        for index in 0..map.len() {
            let map = Arc::clone(&map);
            let tx = tx.clone();
            self.pool.spawn(move || {
                let t0 = Instant::now();
                let slot = map.slot(index);
                match build_chunk_mesh(&slot.grid, &map.neighbors_of(index), iso) {
                    Ok(mesh) => {
                        let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
                        let _ = tx.send(JobOut {
                            index,
                            coord: slot.grid.coord,
                            mesh,
                            t_mesh_ms,
                        });
                    }
                    Err(e) => log::error!("mesh job {} failed: {}", index, e),
                }
            });
        }
        Ok(rx)
    }
}

fn ensure_sampled(map: &ChunkMap) -> Result<(), RuntimeError> {
    match map.first_unsampled() {
        Some(coord) => Err(RuntimeError::Unsampled { coord }),
        None => Ok(()),
    }
}
