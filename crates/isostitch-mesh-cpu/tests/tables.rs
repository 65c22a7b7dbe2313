use isostitch_mesh_cpu::{CORNER_OFFSETS, EDGE_CORNERS, TRI_TABLE, edge_corners, triangle_edges};

#[test]
fn every_entry_is_an_edge_or_terminator() {
    for (case, row) in TRI_TABLE.iter().enumerate() {
        let edges = triangle_edges(case as u8);
        assert_eq!(edges.len() % 3, 0, "case {case} length {}", edges.len());
        assert!(edges.iter().all(|&e| (0..12).contains(&e)), "case {case}");
        assert!(
            row[edges.len()..].iter().all(|&e| e == -1),
            "case {case} has entries after its terminator"
        );
    }
}

#[test]
fn edges_join_distinct_adjacent_corners() {
    for edge in 0..EDGE_CORNERS.len() {
        let (a, b) = edge_corners(edge);
        assert!(a < 8 && b < 8 && a != b);
        let oa = CORNER_OFFSETS[a];
        let ob = CORNER_OFFSETS[b];
        let differing = (0..3).filter(|&i| oa[i] != ob[i]).count();
        assert_eq!(differing, 1, "edge {edge} joins {oa:?} and {ob:?}");
    }
}

#[test]
fn corner_offsets_cover_the_unit_cube_once() {
    let mut seen = [false; 8];
    for [dx, dy, dz] in CORNER_OFFSETS {
        let bit = dx | (dy << 1) | (dz << 2);
        assert!(!seen[bit]);
        seen[bit] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

// Each used edge must separate an above corner from a below corner.
#[test]
fn triangulated_edges_are_sign_changes() {
    for case in 1u16..255 {
        let case = case as u8;
        for &e in triangle_edges(case) {
            let (a, b) = edge_corners(e as usize);
            let above_a = case & (1 << a) != 0;
            let above_b = case & (1 << b) != 0;
            assert_ne!(above_a, above_b, "case {case} edge {e}");
        }
    }
}

#[test]
fn only_trivial_cases_are_empty() {
    for case in 0u16..=255 {
        let empty = triangle_edges(case as u8).is_empty();
        assert_eq!(empty, case == 0 || case == 255, "case {case}");
    }
}
