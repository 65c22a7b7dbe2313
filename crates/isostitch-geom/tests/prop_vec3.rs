use isostitch_geom::Vec3;
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn vapprox_abs_rel(a: Vec3, b: Vec3, atol: f32, rtol: f32) -> bool {
    approx_abs_rel(a.x, b.x, atol, rtol)
        && approx_abs_rel(a.y, b.y, atol, rtol)
        && approx_abs_rel(a.z, b.z, atol, rtol)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e3)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    #[test]
    fn vec3_sub_then_add_restores(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox_abs_rel((a - b) + b, a, 1e-3, 1e-5));
    }

    #[test]
    fn vec3_cross_is_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        let scale = a.length() * b.length() * c.length();
        prop_assert!(c.dot(a).abs() <= 1e-3 + 1e-4 * scale);
        prop_assert!(c.dot(b).abs() <= 1e-3 + 1e-4 * scale);
    }

    // Endpoints are exact at t = 0 and t = 1.
    #[test]
    fn lerp_hits_endpoints(a in arb_vec3(), b in arb_vec3()) {
        prop_assert_eq!(Vec3::lerp(a, b, 0.0), a);
        prop_assert!(vapprox_abs_rel(Vec3::lerp(a, b, 1.0), b, 1e-3, 1e-5));
    }

    #[test]
    fn lerp_stays_inside_component_bounds(a in arb_vec3(), b in arb_vec3(), t in 0.0f32..=1.0) {
        let p = Vec3::lerp(a, b, t);
        let lo = a.min(b);
        let hi = a.max(b);
        let eps = 1e-3;
        prop_assert!(p.x >= lo.x - eps && p.x <= hi.x + eps);
        prop_assert!(p.y >= lo.y - eps && p.y <= hi.y + eps);
        prop_assert!(p.z >= lo.z - eps && p.z <= hi.z + eps);
    }

    #[test]
    fn distance_is_symmetric_and_nonnegative(a in arb_vec3(), b in arb_vec3()) {
        let d1 = a.distance(b);
        let d2 = b.distance(a);
        prop_assert!(d1 >= 0.0);
        prop_assert!(approx_abs_rel(d1, d2, 1e-4, 1e-5));
    }

    #[test]
    fn normalized_has_unit_length(v in arb_vec3()) {
        prop_assume!(v.length() > 1e-3);
        prop_assert!(approx(v.normalized().length(), 1.0, 1e-4));
    }
}
