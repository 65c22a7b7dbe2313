use isostitch_geom::Vec3;
use isostitch_world::{ChunkCoord, DensityField, FieldConfig, Fractal, LayeredNoiseField, PerlinProductField};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = i32> {
    -10_000i32..=10_000
}

fn pos() -> impl Strategy<Value = Vec3> {
    (-64.0f32..64.0, -64.0f32..64.0, -64.0f32..64.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn offset_then_back_is_identity(cx in coord(), cy in coord(), cz in coord(), d in -8i32..=8) {
        let c = ChunkCoord::new(cx, cy, cz);
        prop_assert_eq!(c.offset(d, -d, d).offset(-d, d, -d), c);
        let t: (i32, i32, i32) = c.into();
        prop_assert_eq!(ChunkCoord::from(t), c);
    }

    #[test]
    fn perlin_product_is_bounded(seed in -1000i32..1000, p in pos()) {
        let f = PerlinProductField::new(seed);
        let d = f.density(p);
        prop_assert!(d.is_finite());
        prop_assert!((0.0..=1.0).contains(&d));
    }

    #[test]
    fn layered_is_bounded_and_seeded(seed in -1000i32..1000, p in pos(), g in 0.0f32..1.0) {
        let a = LayeredNoiseField::new(seed, Fractal::default(), g, 0.0);
        let b = LayeredNoiseField::new(seed, Fractal::default(), g, 0.0);
        let d = a.density(p);
        prop_assert!((0.0..=1.0).contains(&d));
        prop_assert_eq!(d.to_bits(), b.density(p).to_bits());
    }

    // Built fields agree with the concrete types they stand for.
    #[test]
    fn built_plane_matches_definition(h in -10.0f32..10.0, p in pos()) {
        let f = FieldConfig::Plane { height: h }.build();
        prop_assert_eq!(f.density(p), p.y - h);
    }
}
