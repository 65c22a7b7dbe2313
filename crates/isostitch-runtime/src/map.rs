use hashbrown::HashMap;
use isostitch_chunk::{ChunkError, Sampling, VoxelGrid};
use isostitch_mesh_cpu::{ChunkNeighbors, Neighbor};
use isostitch_world::{ChunkCoord, MapConfig};

use crate::RuntimeError;

/// One chunk plus its forward links, stored as arena indices.
#[derive(Clone, Debug)]
pub struct ChunkSlot {
    pub grid: VoxelGrid,
    /// Indexed by [`Neighbor::slot`].
    pub neighbors: [Option<usize>; 7],
}

impl ChunkSlot {
    #[inline]
    pub fn link(&self, which: Neighbor) -> Option<usize> {
        which.slot().and_then(|i| self.neighbors[i])
    }
}

/// Dense box of chunks starting at the origin, laid out x-major with z
/// varying fastest.
pub struct ChunkMap {
    size: [usize; 3],
    resolution: usize,
    sampling: Sampling,
    pub(crate) slots: Vec<ChunkSlot>,
    lookup: HashMap<ChunkCoord, usize>,
}

impl ChunkMap {
    pub fn new(cfg: &MapConfig) -> Result<Self, RuntimeError> {
        cfg.validate()?;
        let size = cfg.map_size.map(|n| n as usize);
        let mut map = Self::allocate(size, cfg.resolution, Sampling::from_map_config(cfg))?;
        map.wire_neighbors();
        log::debug!(
            "allocated {} chunks ({}x{}x{}) at resolution {}",
            map.slots.len(),
            size[0],
            size[1],
            size[2],
            cfg.resolution
        );
        Ok(map)
    }

    fn allocate(size: [usize; 3], resolution: usize, sampling: Sampling) -> Result<Self, ChunkError> {
        let [sx, sy, sz] = size;
        let mut slots = Vec::with_capacity(sx * sy * sz);
        let mut lookup = HashMap::with_capacity(sx * sy * sz);
        for x in 0..sx {
            for y in 0..sy {
                for z in 0..sz {
                    let coord = ChunkCoord::new(x as i32, y as i32, z as i32);
                    lookup.insert(coord, slots.len());
                    slots.push(ChunkSlot {
                        grid: VoxelGrid::new(coord, resolution)?,
                        neighbors: [None; 7],
                    });
                }
            }
        }
        Ok(Self {
            size,
            resolution,
            sampling,
            slots,
            lookup,
        })
    }

    // Visiting chunk `i`, hand `i` to every earlier chunk that has it as a
    // forward neighbor.
    fn wire_neighbors(&mut self) {
        let [_, sy, sz] = self.size;
        let plane = sy * sz;
        for i in 0..self.slots.len() {
            let ChunkCoord { cx, cy, cz } = self.coord_of(i);
            let (x, y, z) = (cx > 0, cy > 0, cz > 0);
            if z {
                self.set_link(i - 1, Neighbor::Z, i);
                if y {
                    self.set_link(i - sz - 1, Neighbor::YZ, i);
                    if x {
                        self.set_link(i - plane - sz - 1, Neighbor::XYZ, i);
                    }
                }
                if x {
                    self.set_link(i - plane - 1, Neighbor::XZ, i);
                }
            }
            if y {
                self.set_link(i - sz, Neighbor::Y, i);
                if x {
                    self.set_link(i - plane - sz, Neighbor::XY, i);
                }
            }
            if x {
                self.set_link(i - plane, Neighbor::X, i);
            }
        }
    }

    #[inline]
    fn set_link(&mut self, from: usize, which: Neighbor, to: usize) {
        if let Some(s) = which.slot() {
            self.slots[from].neighbors[s] = Some(to);
        }
    }

    /// Borrowed forward neighbor grids of the chunk at `index`.
    pub fn neighbors_of(&self, index: usize) -> ChunkNeighbors<'_> {
        let links = &self.slots[index].neighbors;
        let mut grids: [Option<&VoxelGrid>; 7] = [None; 7];
        for (g, link) in grids.iter_mut().zip(links.iter()) {
            *g = link.map(|j| &self.slots[j].grid);
        }
        ChunkNeighbors::from_slots(grids)
    }

    #[inline]
    pub fn flat_index(&self, coord: ChunkCoord) -> Option<usize> {
        self.lookup.get(&coord).copied()
    }

    #[inline]
    pub fn coord_of(&self, index: usize) -> ChunkCoord {
        let [_, sy, sz] = self.size;
        let z = index % sz;
        let y = (index / sz) % sy;
        let x = index / (sz * sy);
        ChunkCoord::new(x as i32, y as i32, z as i32)
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&VoxelGrid> {
        self.flat_index(coord).map(|i| &self.slots[i].grid)
    }

    #[inline]
    pub fn slot(&self, index: usize) -> &ChunkSlot {
        &self.slots[index]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkSlot> {
        self.slots.iter()
    }

    #[inline]
    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    /// True once every chunk has been sampled at least once.
    pub fn is_sampled(&self) -> bool {
        self.first_unsampled().is_none()
    }

    /// Coordinate of the first chunk, in flat order, still holding
    /// placeholder densities.
    pub fn first_unsampled(&self) -> Option<ChunkCoord> {
        self.slots
            .iter()
            .find(|s| !s.grid.is_sampled())
            .map(|s| s.grid.coord)
    }
}
