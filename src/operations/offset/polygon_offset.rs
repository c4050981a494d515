use tracing::debug;

use super::resolve::ResolveIntersections;
use crate::error::{OperationError, Result};
use crate::math::polygon_2d::{left_normal, open_ring, segment_direction, signed_area_2d};
use crate::math::Point2;

/// Offsets every vertex of a polygon perpendicular to the chord through its
/// neighbours, away from (`outward`) or into the interior.
///
/// This is a per-vertex offset without miter joins: sharp corners move by
/// `distance` along their bisector and may fold over, which
/// [`ResolveIntersections`] then repairs. The input may repeat its first
/// point at the end; the output does so too in that case.
#[derive(Debug)]
pub struct PolygonOffset {
    points: Vec<Point2>,
    distance: f64,
    outward: bool,
}

impl PolygonOffset {
    /// Creates a new polygon offset operation.
    #[must_use]
    pub fn new(points: &[Point2], distance: f64, outward: bool) -> Self {
        Self {
            points: points.to_vec(),
            distance,
            outward,
        }
    }

    /// Executes the offset followed by self-intersection repair.
    ///
    /// # Errors
    ///
    /// See [`PolygonOffset::raw_offset`].
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let raw = self.raw_offset()?;
        Ok(ResolveIntersections::new(&raw).execute())
    }

    /// Offsets the vertices without repairing self-intersections.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for fewer than 3 distinct
    /// vertices and `GeometryError::DegenerateSegment` when a vertex's two
    /// neighbours coincide.
    pub fn raw_offset(&self) -> Result<Vec<Point2>> {
        let (ring, closed) = open_ring(&self.points);
        let n = ring.len();
        if n < 3 {
            return Err(OperationError::InvalidInput(
                "at least 3 vertices required for polygon offset".to_owned(),
            )
            .into());
        }

        let winding = if signed_area_2d(ring) < 0.0 { -1.0 } else { 1.0 };
        // Left normals of a counter-clockwise ring point inside.
        let side = if self.outward { -winding } else { winding };

        let mut result = Vec::with_capacity(self.points.len());
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];

            let chord = next - prev;
            let local = if chord.dot(&(cur - prev)) < 0.0 { -1.0 } else { 1.0 };
            let perp = left_normal(segment_direction(&prev, &next)?);
            result.push(cur + perp * (self.distance * side * local));
        }
        if closed {
            result.push(result[0]);
        }

        debug!(
            vertices = n,
            distance = self.distance,
            outward = self.outward,
            "raw polygon offset"
        );
        Ok(result)
    }
}
