//! Boundary cubes that borrow corners from forward neighbor chunks.
//!
//! A cube whose base sits on the last voxel layer of an axis reaches one voxel
//! past the chunk. Those corners come from layer 0 of the neighbor in that
//! direction, with the crossed position components pinned to the chunk's far
//! face so the cube stays in this chunk's local space.

use isostitch_chunk::{Voxel, VoxelGrid};

use crate::chunk::{MarchStats, Triangle};
use crate::constants::SEAM_FACE;
use crate::cube::{CubeCorners, triangulate_cube};
use crate::neighbors::{ChunkNeighbors, Neighbor};
use crate::tables::CORNER_OFFSETS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeamCase {
    NoSeam,
    X,
    Y,
    Z,
    XY,
    YZ,
    XZ,
    XYZ,
}

impl SeamCase {
    /// Stitching order: faces, then edges, then the corner cube.
    pub const STITCH_ORDER: [SeamCase; 7] = [
        SeamCase::X,
        SeamCase::Y,
        SeamCase::Z,
        SeamCase::XY,
        SeamCase::YZ,
        SeamCase::XZ,
        SeamCase::XYZ,
    ];

    /// Which axes of `base` sit on the last voxel layer.
    #[inline]
    pub fn classify(base: [usize; 3], resolution: usize) -> SeamCase {
        let last = resolution - 1;
        let mut mask = 0u8;
        for (axis, &v) in base.iter().enumerate() {
            if v >= last {
                mask |= 1 << axis;
            }
        }
        SeamCase::from_mask(mask)
    }

    #[inline]
    const fn from_mask(mask: u8) -> SeamCase {
        match Neighbor::from_mask(mask) {
            Neighbor::This => SeamCase::NoSeam,
            Neighbor::X => SeamCase::X,
            Neighbor::Y => SeamCase::Y,
            Neighbor::Z => SeamCase::Z,
            Neighbor::XY => SeamCase::XY,
            Neighbor::YZ => SeamCase::YZ,
            Neighbor::XZ => SeamCase::XZ,
            Neighbor::XYZ => SeamCase::XYZ,
        }
    }

    /// Overflow mask: bit 0 = x, bit 1 = y, bit 2 = z.
    #[inline]
    pub const fn axes(self) -> u8 {
        match self {
            SeamCase::NoSeam => 0b000,
            SeamCase::X => 0b001,
            SeamCase::Y => 0b010,
            SeamCase::Z => 0b100,
            SeamCase::XY => 0b011,
            SeamCase::YZ => 0b110,
            SeamCase::XZ => 0b101,
            SeamCase::XYZ => 0b111,
        }
    }

    /// Neighbors a cube of this case reads from.
    pub fn required(self) -> impl Iterator<Item = Neighbor> {
        let axes = self.axes();
        Neighbor::FORWARD
            .into_iter()
            .filter(move |n| (n.mask() & !axes) == 0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerSource {
    pub neighbor: Neighbor,
    /// Voxel index inside `neighbor`; 0 on every crossed axis.
    pub local: [usize; 3],
    /// Axes whose position component is pinned to the far face.
    pub overwrite: u8,
}

/// Where corner `offset` of the cube at `base` is read from.
#[inline]
pub fn corner_source(case: SeamCase, base: [usize; 3], offset: [usize; 3]) -> CornerSource {
    let axes = case.axes();
    let mut crossed = 0u8;
    let mut local = [0usize; 3];
    for axis in 0..3 {
        if offset[axis] == 1 && axes & (1 << axis) != 0 {
            crossed |= 1 << axis;
            local[axis] = 0;
        } else {
            local[axis] = base[axis] + offset[axis];
        }
    }
    CornerSource {
        neighbor: Neighbor::from_mask(crossed),
        local,
        overwrite: crossed,
    }
}

fn axis_range(case: SeamCase, axis: usize, last: usize) -> std::ops::Range<usize> {
    if case.axes() & (1 << axis) != 0 {
        last..last + 1
    } else {
        0..last
    }
}

fn gather_corners(
    grid: &VoxelGrid,
    neighbors: &ChunkNeighbors<'_>,
    case: SeamCase,
    base: [usize; 3],
) -> Option<CubeCorners> {
    let mut corners: CubeCorners = [Voxel::default(); 8];
    for (k, offset) in CORNER_OFFSETS.iter().copied().enumerate() {
        let src = corner_source(case, base, offset);
        let source = match src.neighbor {
            Neighbor::This => grid,
            n => neighbors.get(n)?,
        };
        let [lx, ly, lz] = src.local;
        let mut v = source.get_local(lx, ly, lz);
        if src.overwrite & 0b001 != 0 {
            v.position.x = SEAM_FACE;
        }
        if src.overwrite & 0b010 != 0 {
            v.position.y = SEAM_FACE;
        }
        if src.overwrite & 0b100 != 0 {
            v.position.z = SEAM_FACE;
        }
        corners[k] = v;
    }
    Some(corners)
}

/// Marches every boundary cube whose neighbors are all present.
///
/// Cases run in [`SeamCase::STITCH_ORDER`], each in x, y, z nesting. Cubes
/// that need an absent neighbor are skipped and counted.
pub fn stitch_seams(
    grid: &VoxelGrid,
    neighbors: &ChunkNeighbors<'_>,
    iso: f32,
    out: &mut Vec<Triangle>,
) -> MarchStats {
    let mut stats = MarchStats::default();
    let res = grid.resolution();
    let last = res - 1;
    let neighbors = neighbors.compatible_with(grid);
    for case in SeamCase::STITCH_ORDER {
        let xs = axis_range(case, 0, last);
        let ys = axis_range(case, 1, last);
        let zs = axis_range(case, 2, last);
        let cubes = xs.len() * ys.len() * zs.len();
        if case.required().any(|n| neighbors.get(n).is_none()) {
            log::trace!(
                "chunk ({},{},{}) skips {} {:?} seam cubes: neighbor missing",
                grid.coord.cx,
                grid.coord.cy,
                grid.coord.cz,
                cubes,
                case
            );
            stats.seam_cubes_skipped += cubes;
            continue;
        }
        for x in xs.clone() {
            for y in ys.clone() {
                for z in zs.clone() {
                    let Some(corners) = gather_corners(grid, &neighbors, case, [x, y, z]) else {
                        stats.seam_cubes_skipped += 1;
                        continue;
                    };
                    let outcome = triangulate_cube(&corners, iso, out);
                    stats.seam_cubes += 1;
                    stats.clamped_edges += outcome.clamped_edges();
                }
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_marks_last_layer_axes() {
        assert_eq!(SeamCase::classify([0, 0, 0], 4), SeamCase::NoSeam);
        assert_eq!(SeamCase::classify([3, 1, 2], 4), SeamCase::X);
        assert_eq!(SeamCase::classify([0, 3, 3], 4), SeamCase::YZ);
        assert_eq!(SeamCase::classify([3, 3, 3], 4), SeamCase::XYZ);
    }

    #[test]
    fn required_neighbors_are_subsets_of_axes() {
        let xz: Vec<Neighbor> = SeamCase::XZ.required().collect();
        assert_eq!(xz, vec![Neighbor::X, Neighbor::Z, Neighbor::XZ]);
        assert_eq!(SeamCase::XYZ.required().count(), 7);
        assert_eq!(SeamCase::NoSeam.required().count(), 0);
    }

    #[test]
    fn corner_sources_for_xy_edge() {
        let base = [3, 3, 1];
        // Corner 0 stays home.
        let c0 = corner_source(SeamCase::XY, base, CORNER_OFFSETS[0]);
        assert_eq!(c0.neighbor, Neighbor::This);
        assert_eq!(c0.local, [3, 3, 1]);
        // Corner 2 crosses x only.
        let c2 = corner_source(SeamCase::XY, base, CORNER_OFFSETS[2]);
        assert_eq!(c2.neighbor, Neighbor::X);
        assert_eq!(c2.local, [0, 3, 2]);
        assert_eq!(c2.overwrite, 0b001);
        // Corner 6 crosses x and y.
        let c6 = corner_source(SeamCase::XY, base, CORNER_OFFSETS[6]);
        assert_eq!(c6.neighbor, Neighbor::XY);
        assert_eq!(c6.local, [0, 0, 2]);
        // Corner 5 crosses y only.
        let c5 = corner_source(SeamCase::XY, base, CORNER_OFFSETS[5]);
        assert_eq!(c5.neighbor, Neighbor::Y);
        assert_eq!(c5.local, [3, 0, 2]);
    }
}
