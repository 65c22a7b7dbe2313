use isostitch_geom::{Aabb, Vec3};

#[test]
fn lerp_midpoint() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(2.0, 4.0, -6.0);
    assert_eq!(Vec3::lerp(a, b, 0.5), Vec3::new(1.0, 2.0, -3.0));
}

#[test]
fn is_finite_rejects_nan_and_inf() {
    assert!(Vec3::new(1.0, 2.0, 3.0).is_finite());
    assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
    assert!(!Vec3::new(0.0, f32::INFINITY, 0.0).is_finite());
}

#[test]
fn empty_aabb_has_zero_extent() {
    let bb = Aabb::empty();
    assert!(bb.is_empty());
    assert_eq!(bb.extent(), Vec3::ZERO);
    assert!(!bb.contains(Vec3::ZERO));
}

#[test]
fn single_point_aabb_is_degenerate_not_empty() {
    let mut bb = Aabb::empty();
    bb.include(Vec3::new(0.25, 0.5, 0.75));
    assert!(!bb.is_empty());
    assert_eq!(bb.min, bb.max);
    assert_eq!(bb.extent(), Vec3::ZERO);
}

#[test]
fn array_round_trip() {
    let v = Vec3::from([1.0, -2.0, 3.5]);
    let arr: [f32; 3] = v.into();
    assert_eq!(arr, [1.0, -2.0, 3.5]);
}

#[test]
fn neg_flips_every_component() {
    let v = Vec3::new(1.0, -2.0, 3.0);
    assert_eq!(-v, Vec3::new(-1.0, 2.0, -3.0));
}
