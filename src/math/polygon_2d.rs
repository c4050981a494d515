use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise (in a y-up frame), negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateSegment` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::DegenerateSegment { x: a.x, y: a.y }.into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Returns the ring without its closing duplicate, and whether one was present.
///
/// Polygons sampled from paths repeat their first point at the end; the
/// offset and repair routines work on the implicit ring instead.
#[must_use]
pub fn open_ring(points: &[Point2]) -> (&[Point2], bool) {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && super::points_coincide(first, last) => {
            (&points[..points.len() - 1], true)
        }
        _ => (points, false),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_square_ccw() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&unit_square_ccw());
        assert!((area - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square_ccw();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn segment_direction_normalizes() {
        let d = segment_direction(&Point2::new(1.0, 1.0), &Point2::new(4.0, 5.0)).unwrap();
        assert!((d.x - 0.6).abs() < TOLERANCE);
        assert!((d.y - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn segment_direction_zero_length_is_error() {
        let err = segment_direction(&Point2::new(2.0, 3.0), &Point2::new(2.0, 3.0));
        assert!(matches!(
            err,
            Err(crate::ContourError::Geometry(
                GeometryError::DegenerateSegment { .. }
            ))
        ));
    }

    #[test]
    fn open_ring_strips_closing_duplicate() {
        let mut pts = unit_square_ccw();
        pts.push(pts[0]);
        let (ring, closed) = open_ring(&pts);
        assert!(closed);
        assert_eq!(ring.len(), 4);

        let pts = unit_square_ccw();
        let (ring, closed) = open_ring(&pts);
        assert!(!closed);
        assert_eq!(ring.len(), 4);
    }
}
