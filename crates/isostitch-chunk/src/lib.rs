//! Voxel grids and per-chunk density sampling.
#![forbid(unsafe_code)]

use std::time::Instant;

use isostitch_geom::Vec3;
use isostitch_world::{ChunkCoord, DensityField, MapConfig};

/// One sample point. `position` is chunk-local and already scaled by the
/// voxel size, so it lies in `[0, 1)` on every axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Voxel {
    pub position: Vec3,
    pub density: f32,
}

#[derive(Clone, Debug)]
pub struct VoxelGrid {
    pub coord: ChunkCoord,
    resolution: usize,
    voxel_size: f32,
    sampled: bool,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Allocates a `resolution^3` grid with positions laid out and densities
    /// zeroed. Fails for resolutions below 2, which cannot hold a single cube.
    pub fn new(coord: ChunkCoord, resolution: usize) -> Result<Self, ChunkError> {
        if resolution < 2 {
            return Err(ChunkError::InvalidResolution { resolution });
        }
        let voxel_size = 1.0 / resolution as f32;
        let mut voxels = Vec::with_capacity(resolution * resolution * resolution);
        for x in 0..resolution {
            for y in 0..resolution {
                for z in 0..resolution {
                    voxels.push(Voxel {
                        position: Vec3::new(x as f32, y as f32, z as f32) * voxel_size,
                        density: 0.0,
                    });
                }
            }
        }
        Ok(Self {
            coord,
            resolution,
            voxel_size,
            sampled: false,
            voxels,
        })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        z + y * self.resolution + x * self.resolution * self.resolution
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[self.idx(x, y, z)]
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Voxels in `idx` order. Read-only: densities change only through
    /// [`sample_voxel_grid`].
    #[inline]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    #[inline]
    pub fn is_sampled(&self) -> bool {
        self.sampled
    }
}

/// How chunk-local positions map to field positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampling {
    pub offset: Vec3,
    pub map_size: Vec3,
    pub normalize_by_map_size: bool,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            map_size: Vec3::ONE,
            normalize_by_map_size: false,
        }
    }
}

impl Sampling {
    pub fn from_map_config(cfg: &MapConfig) -> Self {
        let [sx, sy, sz] = cfg.map_size;
        Self {
            offset: Vec3::from(cfg.offset),
            map_size: Vec3::new(sx as f32, sy as f32, sz as f32),
            normalize_by_map_size: cfg.normalize_by_map_size,
        }
    }

    #[inline]
    pub fn world_position(&self, coord: ChunkCoord, local: Vec3) -> Vec3 {
        let mut p = coord.as_vec3() + local;
        if self.normalize_by_map_size {
            p = Vec3::new(
                p.x / self.map_size.x,
                p.y / self.map_size.y,
                p.z / self.map_size.z,
            );
        }
        p + self.offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleStats {
    pub voxels: usize,
    pub min_density: f32,
    pub max_density: f32,
    pub elapsed_ms: u32,
}

/// Evaluates the field once per voxel and stores the densities in place.
pub fn sample_voxel_grid(
    grid: &mut VoxelGrid,
    field: &dyn DensityField,
    sampling: &Sampling,
) -> SampleStats {
    let t0 = Instant::now();
    let coord = grid.coord;
    let mut min_density = f32::INFINITY;
    let mut max_density = f32::NEG_INFINITY;
    for v in grid.voxels.iter_mut() {
        let world = sampling.world_position(coord, v.position);
        let d = field.density(world);
        v.density = d;
        min_density = min_density.min(d);
        max_density = max_density.max(d);
    }
    grid.sampled = true;
    let elapsed_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::trace!(
        "sampled chunk ({},{},{}) voxels={} range=[{:.4},{:.4}] ms={}",
        coord.cx,
        coord.cy,
        coord.cz,
        grid.voxels.len(),
        min_density,
        max_density,
        elapsed_ms
    );
    SampleStats {
        voxels: grid.voxels.len(),
        min_density,
        max_density,
        elapsed_ms,
    }
}

#[derive(Clone, Debug)]
pub struct ChunkGenerateResult {
    pub grid: VoxelGrid,
    pub stats: SampleStats,
}

pub fn generate_voxel_grid(
    coord: ChunkCoord,
    resolution: usize,
    field: &dyn DensityField,
    sampling: &Sampling,
) -> Result<ChunkGenerateResult, ChunkError> {
    let mut grid = VoxelGrid::new(coord, resolution)?;
    let stats = sample_voxel_grid(&mut grid, field, sampling);
    Ok(ChunkGenerateResult { grid, stats })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkError {
    InvalidResolution { resolution: usize },
}

impl std::fmt::Display for ChunkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkError::InvalidResolution { resolution } => {
                write!(f, "voxel resolution must be at least 2, got {}", resolution)
            }
        }
    }
}

impl std::error::Error for ChunkError {}
