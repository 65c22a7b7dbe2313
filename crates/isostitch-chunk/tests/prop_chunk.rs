use std::sync::atomic::{AtomicUsize, Ordering};

use isostitch_chunk::{Sampling, VoxelGrid, generate_voxel_grid, sample_voxel_grid};
use isostitch_geom::Vec3;
use isostitch_world::{ChunkCoord, DensityField};
use proptest::prelude::*;

fn res() -> impl Strategy<Value = usize> {
    2usize..=8
}

fn small_i32() -> impl Strategy<Value = i32> {
    -1_000i32..=1_000
}

struct Counting<F> {
    inner: F,
    calls: AtomicUsize,
}

impl<F: Fn(Vec3) -> f32 + Send + Sync> DensityField for Counting<F> {
    fn density(&self, p: Vec3) -> f32 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (self.inner)(p)
    }
}

proptest! {
    // idx maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(cx in small_i32(), cz in small_i32(), r in res()) {
        let grid = VoxelGrid::new(ChunkCoord::new(cx, 0, cz), r).unwrap();
        let expect = r * r * r;
        prop_assert_eq!(grid.len(), expect);
        let mut seen = vec![false; expect];
        for x in 0..r { for y in 0..r { for z in 0..r {
            let i = grid.idx(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // Local positions are integer coordinates scaled by the voxel size.
    #[test]
    fn positions_follow_voxel_size(r in res()) {
        let grid = VoxelGrid::new(ChunkCoord::new(0, 0, 0), r).unwrap();
        let s = grid.voxel_size();
        prop_assert_eq!(s, 1.0 / r as f32);
        for x in 0..r { for y in 0..r { for z in 0..r {
            let v = grid.get_local(x, y, z);
            prop_assert_eq!(v.position, Vec3::new(x as f32, y as f32, z as f32) * s);
            prop_assert!(v.position.x < 1.0 && v.position.y < 1.0 && v.position.z < 1.0);
        }}}
    }

    // The field runs exactly once per voxel and sees coord + local + offset.
    #[test]
    fn sampling_calls_field_once_per_voxel(
        cx in small_i32(), cy in small_i32(), cz in small_i32(),
        r in res(),
        ox in -4.0f32..4.0,
    ) {
        let field = Counting { inner: |p: Vec3| p.x, calls: AtomicUsize::new(0) };
        let sampling = Sampling { offset: Vec3::new(ox, 0.0, 0.0), ..Sampling::default() };
        let out = generate_voxel_grid(ChunkCoord::new(cx, cy, cz), r, &field, &sampling).unwrap();
        prop_assert_eq!(field.calls.load(Ordering::Relaxed), r * r * r);
        prop_assert_eq!(out.stats.voxels, r * r * r);
        prop_assert!(out.grid.is_sampled());
        for v in out.grid.voxels() {
            let expect = cx as f32 + v.position.x + ox;
            prop_assert_eq!(v.density, expect);
            prop_assert!(v.density >= out.stats.min_density && v.density <= out.stats.max_density);
        }
    }

    // Re-sampling with the same field reproduces every density bit for bit.
    #[test]
    fn resampling_is_deterministic(cx in small_i32(), r in res()) {
        let field = |p: Vec3| (p.x * 1.7).sin() * (p.y * 0.3 + p.z).cos();
        let sampling = Sampling::default();
        let mut grid = VoxelGrid::new(ChunkCoord::new(cx, 1, -2), r).unwrap();
        sample_voxel_grid(&mut grid, &field, &sampling);
        let first: Vec<u32> = grid.voxels().iter().map(|v| v.density.to_bits()).collect();
        sample_voxel_grid(&mut grid, &field, &sampling);
        let second: Vec<u32> = grid.voxels().iter().map(|v| v.density.to_bits()).collect();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn normalization_divides_before_offset() {
    let sampling = Sampling {
        offset: Vec3::new(1.0, 0.0, 0.0),
        map_size: Vec3::new(2.0, 4.0, 1.0),
        normalize_by_map_size: true,
    };
    let p = sampling.world_position(ChunkCoord::new(1, 2, 0), Vec3::new(0.5, 0.0, 0.25));
    assert_eq!(p, Vec3::new(1.75, 0.5, 0.25));
}

#[test]
fn fresh_grid_is_unsampled() {
    let grid = VoxelGrid::new(ChunkCoord::new(0, 0, 0), 2).unwrap();
    assert!(!grid.is_sampled());
    assert!(grid.voxels().iter().all(|v| v.density == 0.0));
}

#[test]
fn voxel_view_matches_local_reads() {
    let field = |p: Vec3| p.x - 2.0 * p.y + 3.0 * p.z;
    let out = generate_voxel_grid(ChunkCoord::new(1, 0, 2), 4, &field, &Sampling::default()).unwrap();
    let grid = &out.grid;
    let voxels = grid.voxels();
    assert_eq!(voxels.len(), 4 * 4 * 4);
    assert_eq!(voxels.len(), grid.len());
    for x in 0..4 {
        for y in 0..4 {
            for z in 0..4 {
                assert_eq!(voxels[grid.idx(x, y, z)], grid.get_local(x, y, z));
            }
        }
    }
}
