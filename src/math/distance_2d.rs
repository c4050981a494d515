use super::{Point2, TOLERANCE};

/// Projects `p` onto the segment `a`→`b`.
///
/// Returns `(t, distance)` where `t` is clamped to `[0, 1]`. A zero-length
/// segment projects every point onto `a` (`t = 0`).
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> (f64, f64) {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        return (0.0, (p - a).norm());
    }

    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let closest = a + d * t;
    (t, (p - closest).norm())
}

/// Returns the minimum distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    project_onto_segment(p, a, b).1
}
