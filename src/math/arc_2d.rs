//! Elliptical arc math for SVG-style arcs.
//!
//! Path data describes arcs by their endpoints, radii, x-axis rotation and two
//! flags. Sampling and splitting need the center parameterization instead:
//! `P(θ) = c + R(φ)·(rx·cos θ, ry·sin θ)` for `θ` from `theta1` to
//! `theta1 + dtheta`.
use std::f64::consts::{PI, TAU};

use super::{Matrix2, Point2, Vector2, TOLERANCE};

/// An elliptical arc in center parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: Point2,
    /// Radii after out-of-range correction.
    pub rx: f64,
    pub ry: f64,
    /// X-axis rotation in radians.
    pub phi: f64,
    /// Start angle in radians.
    pub theta1: f64,
    /// Signed sweep in radians; positive follows the sweep-flag direction.
    pub dtheta: f64,
}

impl CenterArc {
    /// Evaluates the arc at the normalized parameter `s ∈ [0, 1]`.
    #[must_use]
    pub fn point_at(&self, s: f64) -> Point2 {
        let theta = self.theta1 + s * self.dtheta;
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_t, cos_t) = theta.sin_cos();
        Point2::new(
            self.center.x + self.rx * cos_phi * cos_t - self.ry * sin_phi * sin_t,
            self.center.y + self.rx * sin_phi * cos_t + self.ry * cos_phi * sin_t,
        )
    }

    /// Whether the sub-arc from `s0` to `s1` spans more than half a turn.
    #[must_use]
    pub fn is_large(&self, s0: f64, s1: f64) -> bool {
        ((s1 - s0) * self.dtheta).abs() > PI
    }
}

/// Converts SVG endpoint arc parameters to center form.
///
/// Returns `None` for arcs that degenerate to a straight line (coincident
/// endpoints or a zero radius).
#[must_use]
pub fn endpoint_to_center(
    from: &Point2,
    to: &Point2,
    rx: f64,
    ry: f64,
    x_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<CenterArc> {
    if (to - from).norm() < TOLERANCE {
        return None;
    }
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx < TOLERANCE || ry < TOLERANCE {
        return None;
    }

    let phi = x_rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: midpoint-relative start point in the ellipse frame.
    let dx2 = (from.x - to.x) * 0.5;
    let dy2 = (from.y - to.y) * 0.5;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Scale radii up when no ellipse of the given size reaches both endpoints.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let k = lambda.sqrt();
        rx *= k;
        ry *= k;
    }

    // Step 2: center in the ellipse frame.
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = if den.abs() < TOLERANCE {
        0.0
    } else {
        sign * (num / den).max(0.0).sqrt()
    };
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    // Step 3: back to user space.
    let center = Point2::new(
        cos_phi * cxp - sin_phi * cyp + (from.x + to.x) * 0.5,
        sin_phi * cxp + cos_phi * cyp + (from.y + to.y) * 0.5,
    );

    // Step 4: angles.
    let u = Vector2::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Vector2::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = vector_angle(&Vector2::new(1.0, 0.0), &u);
    let mut dtheta = vector_angle(&u, &v) % TAU;
    if !sweep && dtheta > 0.0 {
        dtheta -= TAU;
    } else if sweep && dtheta < 0.0 {
        dtheta += TAU;
    }

    Some(CenterArc {
        center,
        rx,
        ry,
        phi,
        theta1,
        dtheta,
    })
}

/// Signed angle from `u` to `v`.
fn vector_angle(u: &Vector2, v: &Vector2) -> f64 {
    let cross = u.x * v.y - u.y * v.x;
    let dot = u.dot(v);
    cross.atan2(dot)
}

/// Maps an ellipse `(rx, ry, rotation)` through the scale `diag(kx, ky)`.
///
/// Returns the new `(rx, ry, rotation_deg)`. Axis-aligned ellipses keep their
/// rotation; rotated ones are re-derived from the SVD of the mapped axes. The
/// sweep flag is not handled here: it flips when `kx * ky < 0`.
#[must_use]
pub fn scale_ellipse(rx: f64, ry: f64, rotation_deg: f64, kx: f64, ky: f64) -> (f64, f64, f64) {
    let phi = rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    if sin_phi.abs() < TOLERANCE {
        return (rx * kx.abs(), ry * ky.abs(), rotation_deg);
    }
    if cos_phi.abs() < TOLERANCE {
        return (rx * ky.abs(), ry * kx.abs(), rotation_deg);
    }

    // Columns are the images of the two semi-axis vectors.
    let m = Matrix2::new(
        kx * rx * cos_phi,
        -kx * ry * sin_phi,
        ky * rx * sin_phi,
        ky * ry * cos_phi,
    );
    let svd = m.svd(true, false);
    let Some(u) = svd.u else {
        return (rx * kx.abs(), ry * ky.abs(), rotation_deg);
    };
    let sigma = svd.singular_values;
    let rotation = u[(1, 0)].atan2(u[(0, 0)]).to_degrees();
    (sigma[0], sigma[1], rotation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn semicircle_center_and_sweep() {
        // Upper half of the circle of radius 5 centered at (5, 0), sweep flag set.
        let arc = endpoint_to_center(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            5.0,
            5.0,
            0.0,
            false,
            true,
        )
        .unwrap();
        assert_abs_diff_eq!(arc.center, Point2::new(5.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(arc.dtheta.abs(), PI, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.point_at(0.0), Point2::new(0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(arc.point_at(1.0), Point2::new(10.0, 0.0), epsilon = 1e-9);
        let mid = arc.point_at(0.5);
        assert_abs_diff_eq!((mid - arc.center).norm(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn small_radii_are_scaled_up() {
        let arc = endpoint_to_center(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            1.0,
            1.0,
            0.0,
            false,
            true,
        )
        .unwrap();
        assert_abs_diff_eq!(arc.rx, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.ry, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_arcs_are_lines() {
        let p = Point2::new(1.0, 1.0);
        assert!(endpoint_to_center(&p, &p, 5.0, 5.0, 0.0, false, true).is_none());
        assert!(
            endpoint_to_center(&p, &Point2::new(2.0, 2.0), 0.0, 5.0, 0.0, false, true).is_none()
        );
    }

    #[test]
    fn large_arc_flag_picks_long_way() {
        let from = Point2::new(0.0, 0.0);
        let to = Point2::new(10.0, 0.0);
        let small = endpoint_to_center(&from, &to, 10.0, 10.0, 0.0, false, true).unwrap();
        let large = endpoint_to_center(&from, &to, 10.0, 10.0, 0.0, true, true).unwrap();
        assert!(small.dtheta.abs() < PI);
        assert!(large.dtheta.abs() > PI);
        assert!(large.is_large(0.0, 1.0));
        assert!(!large.is_large(0.0, 0.25));
    }

    #[test]
    fn scale_axis_aligned_ellipse() {
        let (rx, ry, rot) = scale_ellipse(2.0, 3.0, 0.0, 2.0, -1.0);
        assert_abs_diff_eq!(rx, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ry, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rot, 0.0, epsilon = 1e-12);

        let (rx, ry, rot) = scale_ellipse(2.0, 3.0, 90.0, 2.0, 5.0);
        assert_abs_diff_eq!(rx, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ry, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rot, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn uniform_scale_of_rotated_ellipse_keeps_shape() {
        let (rx, ry, rot) = scale_ellipse(4.0, 2.0, 30.0, 3.0, 3.0);
        let (big, small) = if rx > ry { (rx, ry) } else { (ry, rx) };
        assert_abs_diff_eq!(big, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(small, 6.0, epsilon = 1e-9);
        // Major axis direction is 30° modulo a half turn.
        let major = if rx > ry { rot } else { rot + 90.0 };
        let diff = (major - 30.0).rem_euclid(180.0);
        assert!(diff < 1e-6 || 180.0 - diff < 1e-6, "major axis at {major}");
    }
}
