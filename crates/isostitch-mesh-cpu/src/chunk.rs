use isostitch_geom::{Aabb, Vec3};
use isostitch_world::ChunkCoord;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    #[inline]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    #[inline]
    pub fn area(&self) -> f32 {
        (self.b - self.a).cross(self.c - self.a).length() * 0.5
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarchStats {
    pub interior_cubes: usize,
    pub seam_cubes: usize,
    /// Boundary cubes dropped because a forward neighbor was absent.
    pub seam_cubes_skipped: usize,
    pub clamped_edges: usize,
}

impl MarchStats {
    #[inline]
    pub fn merge(&mut self, other: MarchStats) {
        self.interior_cubes += other.interior_cubes;
        self.seam_cubes += other.seam_cubes;
        self.seam_cubes_skipped += other.seam_cubes_skipped;
        self.clamped_edges += other.clamped_edges;
    }
}

#[derive(Debug)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    /// Chunk-local triangles, interior cubes first.
    pub triangles: Vec<Triangle>,
    pub bbox: Aabb,
    pub stats: MarchStats,
}

impl ChunkMeshCPU {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangles moved to world space: `coord + local + origin`.
    pub fn world_triangles(&self, origin: Vec3) -> Vec<Triangle> {
        let base = self.coord.as_vec3();
        self.triangles
            .iter()
            .map(|t| Triangle {
                a: base + t.a + origin,
                b: base + t.b + origin,
                c: base + t.c + origin,
            })
            .collect()
    }
}
