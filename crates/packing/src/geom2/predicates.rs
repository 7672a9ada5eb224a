//! Orientation, segment and convex-polygon predicates.

use super::types::Vect2;

#[inline]
fn sign(val: f64) -> i32 {
    (0.0 < val) as i32 - (val < 0.0) as i32
}

/// Orientation of the ordered triplet `(p, q, r)`.
///
/// Returns `1` for a clockwise turn, `-1` for counter-clockwise and `0` when
/// the points are collinear. Clockwise is taken in screen coordinates, so
/// `(1,1) → (1,0) → (-1,0)` is clockwise.
#[inline]
pub fn triplet_orientation(p: Vect2, q: Vect2, r: Vect2) -> i32 {
    sign((q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y))
}

/// `b` inside the axis-aligned bounding box of `a` and `c`.
#[inline]
fn within_bounds(a: Vect2, b: Vect2, c: Vect2) -> bool {
    b.x <= a.x.max(c.x) && b.x >= a.x.min(c.x) && b.y <= a.y.max(c.y) && b.y >= a.y.min(c.y)
}

/// True when `b` lies on the closed segment `a–c`.
#[inline]
pub fn on_segment(a: Vect2, b: Vect2, c: Vect2) -> bool {
    triplet_orientation(a, b, c) == 0 && within_bounds(a, b, c)
}

/// True when the closed segments `a–b` and `c–d` share at least one point.
pub fn segments_cross(a: Vect2, b: Vect2, c: Vect2, d: Vect2) -> bool {
    let o1 = triplet_orientation(a, b, c);
    let o2 = triplet_orientation(a, b, d);
    let o3 = triplet_orientation(c, d, a);
    let o4 = triplet_orientation(c, d, b);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    // Collinear cases: an endpoint of one segment lies on the other. The
    // orientation above already established collinearity, so only the
    // bounding box remains to be checked.
    (o1 == 0 && within_bounds(a, c, b))
        || (o2 == 0 && within_bounds(a, d, b))
        || (o3 == 0 && within_bounds(c, a, d))
        || (o4 == 0 && within_bounds(c, b, d))
}

/// Point containment for a convex polygon of either winding. Boundary points
/// count as contained.
pub fn polygon_contains(polygon: &[Vect2], point: Vect2) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut seen_cw = false;
    let mut seen_ccw = false;
    for (k, &p) in polygon.iter().enumerate() {
        let q = polygon[(k + 1) % polygon.len()];
        match triplet_orientation(p, q, point) {
            1 => seen_cw = true,
            -1 => seen_ccw = true,
            _ => {}
        }
        if seen_cw && seen_ccw {
            return false;
        }
    }
    true
}

/// Two closed convex polygons share at least one point.
///
/// Boundary crossings are found with `segments_cross` on every edge pair; the
/// containment fallback catches one polygon lying strictly inside the other.
pub fn polygons_intersect(a: &[Vect2], b: &[Vect2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let mut a_prev = a[a.len() - 1];
    for &a_cur in a {
        let mut b_prev = b[b.len() - 1];
        for &b_cur in b {
            if segments_cross(a_prev, a_cur, b_prev, b_cur) {
                return true;
            }
            b_prev = b_cur;
        }
        a_prev = a_cur;
    }
    polygon_contains(b, a[0]) || polygon_contains(a, b[0])
}
