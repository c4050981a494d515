pub mod arc_2d;
pub mod bezier;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2x2 matrix, used for linear parts of affine maps.
pub type Matrix2 = nalgebra::Matrix2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for deciding that two points coincide.
pub const POINT_EPSILON: f64 = 1e-9;

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Returns `true` if the two points are within [`POINT_EPSILON`] of each other.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    (b - a).norm() < POINT_EPSILON
}

/// Axis-aligned bounds of a point set as `(min, max)`, or `None` when empty.
#[must_use]
pub fn bounding_box<'a, I>(points: I) -> Option<(Point2, Point2)>
where
    I: IntoIterator<Item = &'a Point2>,
{
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let (mut min, mut max) = (first, first);
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lerp_midpoint() {
        let m = lerp(&Point2::new(0.0, 0.0), &Point2::new(10.0, -4.0), 0.5);
        assert!((m.x - 5.0).abs() < TOLERANCE);
        assert!((m.y + 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn bounding_box_of_points() {
        let pts = [
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ];
        let (min, max) = bounding_box(&pts).unwrap();
        assert_eq!(min, Point2::new(-2.0, -1.0));
        assert_eq!(max, Point2::new(4.0, 5.0));
    }

    #[test]
    fn bounding_box_empty() {
        assert!(bounding_box(&Vec::<Point2>::new()).is_none());
    }
}
