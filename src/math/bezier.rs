//! Bezier evaluation and De Casteljau subdivision.

use super::{lerp, Point2};

/// Control polygon of a cubic Bezier: start, two controls, end.
pub type CubicPoints = [Point2; 4];

/// Control polygon of a quadratic Bezier: start, control, end.
pub type QuadPoints = [Point2; 3];

/// Evaluates a cubic Bezier at `t` using the Bernstein form.
#[must_use]
pub fn cubic_point(c: &CubicPoints, t: f64) -> Point2 {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let d = 3.0 * mt * t * t;
    let e = t * t * t;
    Point2::new(
        a * c[0].x + b * c[1].x + d * c[2].x + e * c[3].x,
        a * c[0].y + b * c[1].y + d * c[2].y + e * c[3].y,
    )
}

/// Evaluates a quadratic Bezier at `t`.
#[must_use]
pub fn quad_point(c: &QuadPoints, t: f64) -> Point2 {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let d = t * t;
    Point2::new(
        a * c[0].x + b * c[1].x + d * c[2].x,
        a * c[0].y + b * c[1].y + d * c[2].y,
    )
}

/// Splits a cubic at `t` into `(left, right)`.
///
/// `left[3] == right[0]` is the on-curve split point; `left[0]` and
/// `right[3]` are the original endpoints, copied exactly.
#[must_use]
pub fn split_cubic(c: &CubicPoints, t: f64) -> (CubicPoints, CubicPoints) {
    let p01 = lerp(&c[0], &c[1], t);
    let p12 = lerp(&c[1], &c[2], t);
    let p23 = lerp(&c[2], &c[3], t);
    let p0112 = lerp(&p01, &p12, t);
    let p1223 = lerp(&p12, &p23, t);
    let mid = lerp(&p0112, &p1223, t);
    ([c[0], p01, p0112, mid], [mid, p1223, p23, c[3]])
}

/// Splits a quadratic at `t` into `(left, right)`.
#[must_use]
pub fn split_quad(c: &QuadPoints, t: f64) -> (QuadPoints, QuadPoints) {
    let p01 = lerp(&c[0], &c[1], t);
    let p12 = lerp(&c[1], &c[2], t);
    let mid = lerp(&p01, &p12, t);
    ([c[0], p01, mid], [mid, p12, c[2]])
}
