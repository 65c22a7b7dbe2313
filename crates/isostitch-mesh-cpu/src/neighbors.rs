use isostitch_chunk::VoxelGrid;

/// Grid a cube corner is read from: the chunk itself or one of its seven
/// forward neighbors (positive offsets on the named axes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighbor {
    This,
    X,
    Y,
    Z,
    XY,
    YZ,
    XZ,
    XYZ,
}

impl Neighbor {
    /// Forward neighbors in slot order.
    pub const FORWARD: [Neighbor; 7] = [
        Neighbor::X,
        Neighbor::Y,
        Neighbor::Z,
        Neighbor::XY,
        Neighbor::YZ,
        Neighbor::XZ,
        Neighbor::XYZ,
    ];

    /// Axis mask to neighbor: bit 0 = x, bit 1 = y, bit 2 = z.
    #[inline]
    pub const fn from_mask(mask: u8) -> Neighbor {
        match mask & 0b111 {
            0b000 => Neighbor::This,
            0b001 => Neighbor::X,
            0b010 => Neighbor::Y,
            0b100 => Neighbor::Z,
            0b011 => Neighbor::XY,
            0b110 => Neighbor::YZ,
            0b101 => Neighbor::XZ,
            _ => Neighbor::XYZ,
        }
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        match self {
            Neighbor::This => 0b000,
            Neighbor::X => 0b001,
            Neighbor::Y => 0b010,
            Neighbor::Z => 0b100,
            Neighbor::XY => 0b011,
            Neighbor::YZ => 0b110,
            Neighbor::XZ => 0b101,
            Neighbor::XYZ => 0b111,
        }
    }

    /// Chunk offset `(dx, dy, dz)` of this neighbor.
    #[inline]
    pub const fn direction(self) -> (i32, i32, i32) {
        let m = self.mask();
        ((m & 1) as i32, ((m >> 1) & 1) as i32, ((m >> 2) & 1) as i32)
    }

    /// Index into the forward slot array; `None` for `This`.
    #[inline]
    pub const fn slot(self) -> Option<usize> {
        match self {
            Neighbor::This => None,
            Neighbor::X => Some(0),
            Neighbor::Y => Some(1),
            Neighbor::Z => Some(2),
            Neighbor::XY => Some(3),
            Neighbor::YZ => Some(4),
            Neighbor::XZ => Some(5),
            Neighbor::XYZ => Some(6),
        }
    }
}

/// Borrowed forward neighbors of one chunk.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkNeighbors<'a> {
    slots: [Option<&'a VoxelGrid>; 7],
}

impl<'a> ChunkNeighbors<'a> {
    #[inline]
    pub const fn empty() -> Self {
        Self { slots: [None; 7] }
    }

    #[inline]
    pub fn from_slots(slots: [Option<&'a VoxelGrid>; 7]) -> Self {
        Self { slots }
    }

    #[inline]
    pub fn with(mut self, which: Neighbor, grid: &'a VoxelGrid) -> Self {
        if let Some(i) = which.slot() {
            self.slots[i] = Some(grid);
        }
        self
    }

    /// `None` for `This` and for absent neighbors.
    #[inline]
    pub fn get(&self, which: Neighbor) -> Option<&'a VoxelGrid> {
        which.slot().and_then(|i| self.slots[i])
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    pub fn isolated(&self) -> bool {
        self.count() == 0
    }

    /// Drops neighbors whose resolution differs from `grid`; their voxels
    /// cannot be indexed with this chunk's coordinates.
    pub fn compatible_with(&self, grid: &VoxelGrid) -> ChunkNeighbors<'a> {
        let mut out = *self;
        for (i, slot) in out.slots.iter_mut().enumerate() {
            let Some(n) = *slot else { continue };
            if n.resolution() != grid.resolution() {
                log::warn!(
                    "neighbor {:?} of chunk ({},{},{}) has resolution {} (expected {}); ignoring",
                    Neighbor::FORWARD[i],
                    grid.coord.cx,
                    grid.coord.cy,
                    grid.coord.cz,
                    n.resolution(),
                    grid.resolution()
                );
                *slot = None;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_round_trips_for_every_neighbor() {
        for n in Neighbor::FORWARD {
            assert_eq!(Neighbor::from_mask(n.mask()), n);
            assert_eq!(Neighbor::FORWARD[n.slot().unwrap()], n);
        }
        assert_eq!(Neighbor::from_mask(0), Neighbor::This);
        assert_eq!(Neighbor::XZ.direction(), (1, 0, 1));
    }
}
