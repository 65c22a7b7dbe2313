use isostitch_mesh_cpu::Neighbor;
use isostitch_runtime::ChunkMap;
use isostitch_world::MapConfig;
use proptest::prelude::*;

fn extent() -> impl Strategy<Value = u32> {
    1u32..=4
}

proptest! {
    // A forward link exists exactly when a chunk sits at coord + direction,
    // and then points at that chunk.
    #[test]
    fn links_match_coordinates(sx in extent(), sy in extent(), sz in extent()) {
        let cfg = MapConfig { resolution: 2, map_size: [sx, sy, sz], ..MapConfig::default() };
        let map = ChunkMap::new(&cfg).unwrap();
        prop_assert_eq!(map.len(), (sx * sy * sz) as usize);
        for i in 0..map.len() {
            let c = map.coord_of(i);
            let slot = map.slot(i);
            let neighbors = map.neighbors_of(i);
            for n in Neighbor::FORWARD {
                let (dx, dy, dz) = n.direction();
                let expect = map.flat_index(c.offset(dx, dy, dz));
                prop_assert_eq!(slot.link(n), expect);
                match (neighbors.get(n), expect) {
                    (Some(g), Some(j)) => prop_assert_eq!(g.coord, map.coord_of(j)),
                    (None, None) => {}
                    other => prop_assert!(false, "neighbor mismatch {:?}", other.1),
                }
            }
        }
    }

    // Only the far corner chunk of the box is without forward neighbors.
    #[test]
    fn only_far_corner_is_isolated(sx in extent(), sy in extent(), sz in extent()) {
        let cfg = MapConfig { resolution: 2, map_size: [sx, sy, sz], ..MapConfig::default() };
        let map = ChunkMap::new(&cfg).unwrap();
        let isolated: Vec<usize> = (0..map.len()).filter(|&i| map.neighbors_of(i).isolated()).collect();
        prop_assert_eq!(isolated, vec![map.len() - 1]);
    }
}
