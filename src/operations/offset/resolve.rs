use tracing::{debug, trace, warn};

use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::polygon_2d::{open_ring, signed_area_2d};
use crate::math::{points_coincide, Point2};

/// A crossing between two non-adjacent edges of a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Index of the first edge (`ring[first] → ring[first + 1]`).
    pub first: usize,
    /// Index of the second edge; always greater than `first + 1`.
    pub second: usize,
    pub point: Point2,
}

/// Finds the first crossing of two non-adjacent edges of an implicitly
/// closed ring, scanning edge pairs `(i, j)` with `i < j` in order.
///
/// Non-adjacent edges that merely touch, including at a shared vertex,
/// count as crossing. The ring must not repeat a point consecutively; a
/// zero-length edge would touch both of its neighbours' neighbours.
#[must_use]
pub fn find_first_crossing(ring: &[Point2]) -> Option<Crossing> {
    let n = ring.len();
    if n < 4 {
        return None;
    }

    for i in 0..n {
        let a0 = &ring[i];
        let a1 = &ring[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &ring[j];
            let b1 = &ring[(j + 1) % n];
            let point = segment_segment_intersect_2d(a0, a1, b0, b1)
                .map(|(point, _, _)| point)
                .or_else(|| shared_vertex(a0, a1, b0, b1));
            if let Some(point) = point {
                return Some(Crossing {
                    first: i,
                    second: j,
                    point,
                });
            }
        }
    }
    None
}

/// A vertex the two edges have in common. Covers touches the intersection
/// test misses, such as collinear edges meeting end to end.
fn shared_vertex(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<Point2> {
    [a0, a1]
        .into_iter()
        .find(|a| points_coincide(a, b0) || points_coincide(a, b1))
        .copied()
}

/// Whether any two non-adjacent edges of the polygon cross or touch. A
/// closing duplicate of the first point and repeated points are ignored.
#[must_use]
pub fn has_crossings(points: &[Point2]) -> bool {
    find_first_crossing(&dedupe(open_ring(points).0.to_vec())).is_some()
}

/// Repairs a self-intersecting polygon by splicing out loops.
///
/// Repeated points are dropped first. At each crossing or touch the ring
/// splits into two loops; the one that keeps the polygon's winding survives
/// (the larger one if both or neither do). The scan restarts on the spliced ring until no crossing remains. Every splice
/// removes at least one vertex; the loop is still capped at `n²` steps.
#[derive(Debug)]
pub struct ResolveIntersections {
    points: Vec<Point2>,
}

impl ResolveIntersections {
    /// Creates a new repair operation.
    #[must_use]
    pub fn new(points: &[Point2]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    /// Executes the repair. The result repeats its first point at the end iff
    /// the input did.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let (ring, closed) = open_ring(&self.points);
        let mut ring = dedupe(ring.to_vec());
        let winding = if signed_area_2d(&ring) < 0.0 { -1.0 } else { 1.0 };
        let cap = ring.len() * ring.len();
        let mut steps = 0;

        while let Some(crossing) = find_first_crossing(&ring) {
            if steps >= cap {
                warn!(
                    steps,
                    vertices = ring.len(),
                    "self-intersection repair hit its iteration cap"
                );
                break;
            }
            steps += 1;
            ring = splice(&ring, &crossing, winding);
            trace!(
                first = crossing.first,
                second = crossing.second,
                vertices = ring.len(),
                "spliced loop"
            );
        }

        debug!(
            before = self.points.len(),
            after = ring.len(),
            steps,
            "resolved self-intersections"
        );
        if closed {
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
        }
        ring
    }
}

/// Splits `ring` at `crossing` and keeps the preferred loop.
fn splice(ring: &[Point2], crossing: &Crossing, winding: f64) -> Vec<Point2> {
    let Crossing {
        first: i,
        second: j,
        point,
    } = *crossing;

    // The run strictly between the two edges replaced by the crossing...
    let mut outer = Vec::with_capacity(ring.len());
    outer.extend_from_slice(&ring[..=i]);
    outer.push(point);
    outer.extend_from_slice(&ring[j + 1..]);
    // ...and that run closed on its own.
    let mut inner = Vec::with_capacity(j - i + 1);
    inner.push(point);
    inner.extend_from_slice(&ring[i + 1..=j]);

    let outer_area = signed_area_2d(&outer);
    let inner_area = signed_area_2d(&inner);
    let keeps = |area: f64| area * winding > 0.0;
    let take_inner = match (keeps(outer_area), keeps(inner_area)) {
        (true, false) => false,
        (false, true) => true,
        _ => inner_area.abs() > outer_area.abs(),
    };
    dedupe(if take_inner { inner } else { outer })
}

/// Drops consecutive coincident points, including a last point equal to the
/// first.
fn dedupe(mut ring: Vec<Point2>) -> Vec<Point2> {
    ring.dedup_by(|b, a| points_coincide(a, b));
    while ring.len() > 1 && points_coincide(&ring[0], &ring[ring.len() - 1]) {
        ring.pop();
    }
    ring
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    // ── crossings ──

    #[test]
    fn bowtie_has_crossing() {
        let bowtie = [p(0.0, 0.0), p(10.0, 10.0), p(10.0, 0.0), p(0.0, 10.0)];
        let crossing = find_first_crossing(&bowtie).unwrap();
        assert_eq!((crossing.first, crossing.second), (0, 2));
        assert_abs_diff_eq!(crossing.point, p(5.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn simple_polygons_have_none() {
        let square = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        assert!(find_first_crossing(&square).is_none());
        assert!(find_first_crossing(&square[..3]).is_none());
        let mut closed = square.to_vec();
        closed.push(square[0]);
        assert!(!has_crossings(&closed));
    }

    #[test]
    fn shared_vertex_is_a_crossing() {
        // Two unit squares pinched together at (1, 1).
        let ring = pinched_squares();
        let crossing = find_first_crossing(&ring).unwrap();
        assert_eq!((crossing.first, crossing.second), (1, 5));
        assert_eq!(crossing.point, p(1.0, 1.0));
        assert!(has_crossings(&ring));
    }

    #[test]
    fn repeated_neighbours_are_not_crossings() {
        let ring = [
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 10.0),
            p(0.0, 10.0),
            p(0.0, 0.0),
        ];
        assert!(!has_crossings(&ring));
    }

    // ── repair ──

    fn pinched_squares() -> Vec<Point2> {
        vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
            p(1.0, 2.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
        ]
    }

    #[test]
    fn pinch_keeps_one_lobe() {
        let fixed = ResolveIntersections::new(&pinched_squares()).execute();
        assert_eq!(
            fixed,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
        );
        assert!(!has_crossings(&fixed));
    }

    #[test]
    fn bowtie_reduces_to_triangle() {
        let bowtie = [p(0.0, 0.0), p(10.0, 10.0), p(10.0, 0.0), p(0.0, 10.0)];
        let fixed = ResolveIntersections::new(&bowtie).execute();
        assert_eq!(fixed.len(), 3);
        assert!(!has_crossings(&fixed));
        assert_abs_diff_eq!(fixed[1], p(5.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn reversed_loop_is_removed() {
        // Counter-clockwise square whose bottom edge has a small clockwise
        // loop, like an inward offset of a sharp notch.
        let ring = [
            p(0.0, 0.0),
            p(6.0, 0.0),
            p(6.0, -1.0),
            p(4.0, -1.0),
            p(4.0, 1.0),
            p(10.0, 1.0),
            p(10.0, 10.0),
            p(0.0, 10.0),
        ];
        let fixed = ResolveIntersections::new(&ring).execute();
        assert!(!has_crossings(&fixed));
        assert!(signed_area_2d(&fixed) > 0.0);
        assert!(fixed.iter().all(|q| q.y >= -TOLERANCE));
        assert!(fixed.len() < ring.len());
    }

    #[test]
    fn closed_input_stays_closed() {
        let bowtie = [
            p(0.0, 0.0),
            p(10.0, 10.0),
            p(10.0, 0.0),
            p(0.0, 10.0),
            p(0.0, 0.0),
        ];
        let fixed = ResolveIntersections::new(&bowtie).execute();
        assert_eq!(fixed.len(), 4);
        assert_eq!(fixed.first(), fixed.last());
    }

    #[test]
    fn simple_polygon_is_untouched() {
        let square = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        assert_eq!(ResolveIntersections::new(&square).execute(), square.to_vec());
    }

    #[test]
    fn dedupe_drops_repeats() {
        let ring = dedupe(vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)]);
        assert_eq!(ring, vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]);
    }
}
