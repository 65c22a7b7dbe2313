//! Single-cube classification and triangulation.

use std::cmp::Ordering;

use isostitch_chunk::Voxel;
use isostitch_geom::Vec3;

use crate::chunk::Triangle;
use crate::constants::{CORNER_COUNT, DENSITY_EPSILON, EDGE_COUNT};
use crate::tables::{edge_corners, triangle_edges};

/// Eight corner samples in table order.
pub type CubeCorners = [Voxel; CORNER_COUNT];

/// Bit `k` is set iff corner `k` lies strictly above `iso`.
#[inline]
pub fn cube_index(corners: &CubeCorners, iso: f32) -> u8 {
    let mut idx = 0u8;
    for (k, c) in corners.iter().enumerate() {
        if c.density > iso {
            idx |= 1 << k;
        }
    }
    idx
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCrossing {
    pub point: Vec3,
    /// The interpolation parameter fell back to the midpoint or was clamped.
    pub clamped: bool,
}

#[inline]
fn position_order(a: Vec3, b: Vec3) -> Ordering {
    a.x.total_cmp(&b.x)
        .then(a.y.total_cmp(&b.y))
        .then(a.z.total_cmp(&b.z))
}

/// Point where the iso-surface crosses the segment `a`-`b`.
///
/// Endpoints are put in position order first, so two cubes sharing an edge
/// compute the same bits for it. Near-equal densities give the midpoint and
/// out-of-range parameters are clamped onto the segment.
pub fn interpolate_edge(a: Voxel, b: Voxel, iso: f32) -> EdgeCrossing {
    let (a, b) = if position_order(b.position, a.position) == Ordering::Less {
        (b, a)
    } else {
        (a, b)
    };
    let delta = b.density - a.density;
    let (t, clamped) = if !(delta.abs() >= DENSITY_EPSILON) {
        (0.5, true)
    } else {
        let t = (iso - a.density) / delta;
        if !t.is_finite() {
            (0.5, true)
        } else if !(0.0..=1.0).contains(&t) {
            (t.clamp(0.0, 1.0), true)
        } else {
            (t, false)
        }
    };
    EdgeCrossing {
        point: Vec3::lerp(a.position, b.position, t),
        clamped,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeOutcome {
    /// Every corner at or below the isovalue.
    Empty,
    /// Every corner above the isovalue.
    Full,
    Surface {
        triangles: usize,
        clamped_edges: usize,
    },
}

impl CubeOutcome {
    #[inline]
    pub fn triangles(self) -> usize {
        match self {
            CubeOutcome::Surface { triangles, .. } => triangles,
            _ => 0,
        }
    }

    #[inline]
    pub fn clamped_edges(self) -> usize {
        match self {
            CubeOutcome::Surface { clamped_edges, .. } => clamped_edges,
            _ => 0,
        }
    }
}

/// Appends this cube's triangles to `out` in table order.
pub fn triangulate_cube(corners: &CubeCorners, iso: f32, out: &mut Vec<Triangle>) -> CubeOutcome {
    let index = cube_index(corners, iso);
    match index {
        0 => return CubeOutcome::Empty,
        255 => return CubeOutcome::Full,
        _ => {}
    }
    let mut crossings: [Option<EdgeCrossing>; EDGE_COUNT] = [None; EDGE_COUNT];
    let mut clamped_edges = 0;
    let mut point_on = |edge: i8| -> Vec3 {
        let e = edge as usize;
        if let Some(c) = crossings[e] {
            return c.point;
        }
        let (ca, cb) = edge_corners(e);
        let c = interpolate_edge(corners[ca], corners[cb], iso);
        if c.clamped {
            clamped_edges += 1;
        }
        crossings[e] = Some(c);
        c.point
    };
    let edges = triangle_edges(index);
    for tri in edges.chunks_exact(3) {
        let a = point_on(tri[0]);
        let b = point_on(tri[1]);
        let c = point_on(tri[2]);
        out.push(Triangle { a, b, c });
    }
    CubeOutcome::Surface {
        triangles: edges.len() / 3,
        clamped_edges,
    }
}
