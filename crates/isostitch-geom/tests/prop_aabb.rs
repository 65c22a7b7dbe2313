use isostitch_geom::{Aabb, Vec3};
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = Vec3> {
    (-1e3f32..1e3, -1e3f32..1e3, -1e3f32..1e3).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Every included point stays inside the grown box.
    #[test]
    fn include_contains_all_points(points in prop::collection::vec(arb_point(), 1..32)) {
        let mut bb = Aabb::empty();
        for &p in &points {
            bb.include(p);
        }
        prop_assert!(!bb.is_empty());
        for &p in &points {
            prop_assert!(bb.contains(p));
        }
    }

    // Growth order does not matter.
    #[test]
    fn include_is_order_independent(points in prop::collection::vec(arb_point(), 1..32)) {
        let mut fwd = Aabb::empty();
        let mut rev = Aabb::empty();
        for &p in &points {
            fwd.include(p);
        }
        for &p in points.iter().rev() {
            rev.include(p);
        }
        prop_assert_eq!(fwd, rev);
    }

    #[test]
    fn extent_is_nonnegative(points in prop::collection::vec(arb_point(), 1..16)) {
        let mut bb = Aabb::empty();
        for &p in &points {
            bb.include(p);
        }
        let e = bb.extent();
        prop_assert!(e.x >= 0.0 && e.y >= 0.0 && e.z >= 0.0);
    }
}
