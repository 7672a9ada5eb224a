use super::*;
use proptest::prelude::*;

struct Points {
    a: Vect2,
    b: Vect2,
    c: Vect2,
    d: Vect2,
    e: Vect2,
}

//            |     C
//           1+     +
//            |
//      A     |E    B
// -----+-----+-----+-----
//     -1     |     1
//      D     |
//      +   -1+
fn points() -> Points {
    Points {
        a: Vect2::new(-1.0, 0.0),
        b: Vect2::new(1.0, 0.0),
        c: Vect2::new(1.0, 1.0),
        d: Vect2::new(-1.0, -1.0),
        e: Vect2::new(0.0, 0.0),
    }
}

fn unit_square(centre: Vect2) -> Vec<Vect2> {
    vec![
        centre + Vect2::new(0.5, 0.5),
        centre + Vect2::new(-0.5, 0.5),
        centre + Vect2::new(-0.5, -0.5),
        centre + Vect2::new(0.5, -0.5),
    ]
}

#[test]
fn triplet_orientation_fixture() {
    let p = points();
    assert_eq!(triplet_orientation(p.c, p.b, p.a), 1);
    assert_eq!(triplet_orientation(p.c, p.d, p.a), 1);
    assert_eq!(triplet_orientation(p.b, p.d, p.a), 1);

    assert_eq!(triplet_orientation(p.a, p.b, p.c), -1);
    assert_eq!(triplet_orientation(p.e, p.b, p.c), -1);
    assert_eq!(triplet_orientation(p.d, p.b, p.e), -1);

    assert_eq!(triplet_orientation(p.a, p.e, p.b), 0);
    assert_eq!(triplet_orientation(p.d, p.e, p.c), 0);
}

#[test]
fn on_segment_fixture() {
    let p = points();
    assert!(on_segment(p.a, p.e, p.b));
    assert!(!on_segment(p.a, p.b, p.e));
    assert!(on_segment(p.d, p.e, p.c));
    assert!(!on_segment(p.e, p.d, p.c));
    // shared endpoint
    assert!(on_segment(p.a, p.b, p.b));
    // inside the bounding box but off the line
    assert!(!on_segment(p.d, Vect2::new(0.0, -0.5), p.c));
}

#[test]
fn segments_cross_fixture() {
    let p = points();
    assert!(segments_cross(p.a, p.b, p.c, p.d));
    assert!(segments_cross(p.e, p.b, p.c, p.d));
    assert!(!segments_cross(p.a, p.d, p.b, p.c));
}

#[test]
fn segments_cross_collinear_cases() {
    let a = Vect2::new(0.0, 0.0);
    let b = Vect2::new(2.0, 0.0);
    // overlapping collinear
    let (c, d) = (Vect2::new(1.0, 0.0), Vect2::new(3.0, 0.0));
    assert!(segments_cross(a, b, c, d));
    // collinear, disjoint
    let (c, d) = (Vect2::new(3.0, 0.0), Vect2::new(4.0, 0.0));
    assert!(!segments_cross(a, b, c, d));
    // zero-length segment on the other segment
    let p = Vect2::new(1.0, 0.0);
    assert!(segments_cross(a, b, p, p));
}

#[test]
fn polygon_contains_both_windings() {
    let sq = unit_square(Vect2::zero());
    assert!(polygon_contains(&sq, Vect2::new(0.1, -0.2)));
    assert!(polygon_contains(&sq, Vect2::new(0.5, 0.0)));
    assert!(!polygon_contains(&sq, Vect2::new(0.6, 0.0)));
    let rev: Vec<_> = sq.iter().rev().copied().collect();
    assert!(polygon_contains(&rev, Vect2::new(0.1, -0.2)));
    assert!(!polygon_contains(&rev, Vect2::new(0.0, 0.7)));
}

#[test]
fn polygons_intersect_cases() {
    let a = unit_square(Vect2::zero());
    assert!(polygons_intersect(&a, &unit_square(Vect2::new(0.5, 0.5))));
    assert!(!polygons_intersect(&a, &unit_square(Vect2::new(1.5, 0.0))));
    // nested without any edge crossing
    let small: Vec<_> = a.iter().map(|&v| v * 0.2).collect();
    assert!(polygons_intersect(&a, &small));
    assert!(polygons_intersect(&small, &a));
}

#[test]
fn vect2_ops_elementwise() {
    let u = Vect2::new(1.5, -2.0);
    let v = Vect2::new(-0.5, 4.0);
    assert_eq!(u + v, Vect2::new(1.0, 2.0));
    assert_eq!(u - v, Vect2::new(2.0, -6.0));
    assert_eq!(u * v, Vect2::new(-0.75, -8.0));
    assert_eq!(u * 2.0, Vect2::new(3.0, -4.0));
    assert_eq!(Vect3::new(1.0, 2.0, 2.0).norm(), 3.0);
}

#[test]
fn positive_modulo_wraps_into_unit_cell() {
    let v = Vect2::new(-0.25, 1.75).positive_modulo(1.0);
    assert!((v.x - 0.75).abs() < 1e-15);
    assert!((v.y - 0.75).abs() < 1e-15);
    let w = Vect2::new(-1e-18, 0.0).positive_modulo(1.0);
    assert!(w.x >= 0.0 && w.x < 1.0);
}

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        prop::num::f64::ANY,
        Just(f64::NAN),
        Just(f64::INFINITY),
        -1e6..1e6f64,
    ]
}

proptest! {
    #[test]
    fn norm_matches_definition(x in any_f64(), y in any_f64()) {
        let v = Vect2::new(x, y);
        if x.is_nan() || y.is_nan() {
            prop_assert!(v.norm().is_nan());
            prop_assert!(v.norm_sq().is_nan());
        } else {
            prop_assert_eq!(v.norm_sq(), x * x + y * y);
            prop_assert_eq!(v.norm(), (x * x + y * y).sqrt());
        }
    }

    #[test]
    fn arithmetic_propagates_nan(x in any_f64(), y in any_f64()) {
        let v1 = Vect2::new(x, y);
        let v2 = Vect2::new(y, x);
        let sum = v1 + v2;
        if (x + y).is_nan() {
            prop_assert!(sum.x.is_nan() && sum.y.is_nan());
        } else {
            prop_assert_eq!(sum.x, x + y);
        }
        let prod = v1 * v2;
        if (x * y).is_nan() {
            prop_assert!(prod.x.is_nan() && prod.y.is_nan());
        } else {
            prop_assert_eq!(prod.y, y * x);
        }
    }

    #[test]
    fn orientation_antisymmetric(
        px in -10.0..10.0f64, py in -10.0..10.0f64,
        qx in -10.0..10.0f64, qy in -10.0..10.0f64,
        rx in -10.0..10.0f64, ry in -10.0..10.0f64,
    ) {
        let (p, q, r) = (Vect2::new(px, py), Vect2::new(qx, qy), Vect2::new(rx, ry));
        prop_assert_eq!(triplet_orientation(p, q, r), -triplet_orientation(r, q, p));
    }

    #[test]
    fn orientation_zero_on_integer_lines(
        x0 in -50i32..50, y0 in -50i32..50,
        dx in -5i32..5, dy in -5i32..5,
        s in 1i32..4, t in 1i32..4,
    ) {
        let p = Vect2::new(x0 as f64, y0 as f64);
        let q = Vect2::new((x0 + s * dx) as f64, (y0 + s * dy) as f64);
        let r = Vect2::new((x0 + (s + t) * dx) as f64, (y0 + (s + t) * dy) as f64);
        prop_assert_eq!(triplet_orientation(p, q, r), 0);
    }

    #[test]
    fn segments_cross_symmetric(
        ax in -3i32..3, ay in -3i32..3, bx in -3i32..3, by in -3i32..3,
        cx in -3i32..3, cy in -3i32..3, dx in -3i32..3, dy in -3i32..3,
    ) {
        // Integer coordinates keep every orientation exact.
        let a = Vect2::new(ax as f64, ay as f64);
        let b = Vect2::new(bx as f64, by as f64);
        let c = Vect2::new(cx as f64, cy as f64);
        let d = Vect2::new(dx as f64, dy as f64);
        let base = segments_cross(a, b, c, d);
        prop_assert_eq!(base, segments_cross(c, d, a, b));
        prop_assert_eq!(base, segments_cross(b, a, c, d));
        prop_assert_eq!(base, segments_cross(a, b, d, c));
    }
}
