use tracing::trace;

use super::{MeasuredPath, PathSampler};
use crate::error::Result;
use crate::math::{lerp, Point2, TOLERANCE};
use crate::path::Path;

/// Measures paths by flattening every curved segment into a polyline.
///
/// Movetos are zero-length jumps: they add a vertex without adding length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatteningSampler {
    /// Straight pieces per curved segment.
    pub subdivisions: usize,
}

impl Default for FlatteningSampler {
    fn default() -> Self {
        Self { subdivisions: 64 }
    }
}

impl FlatteningSampler {
    /// Flattens an already parsed path.
    #[must_use]
    pub fn flatten(&self, path: &Path) -> FlattenedPath {
        let n = self.subdivisions.max(1);
        let mut points = Vec::new();
        let mut lengths = Vec::new();
        let mut total = 0.0;
        let mut push = |p: Point2, jump: bool, points: &mut Vec<Point2>| {
            if !jump {
                if let Some(&last) = points.last() {
                    total += (p - last).norm();
                }
            }
            points.push(p);
            lengths.push(total);
        };

        for cmd in path.commands() {
            match cmd.shape() {
                None => push(cmd.target(), true, &mut points),
                Some(shape) if shape.is_curved() => {
                    for i in 1..=n {
                        #[allow(clippy::cast_precision_loss)]
                        let t = i as f64 / n as f64;
                        push(shape.point_at(t), false, &mut points);
                    }
                }
                Some(_) => push(cmd.target(), false, &mut points),
            }
        }
        trace!(vertices = points.len(), "flattened path");
        FlattenedPath { points, lengths }
    }
}

impl PathSampler for FlatteningSampler {
    type Measured = FlattenedPath;

    fn measure(&self, data: &str) -> Result<FlattenedPath> {
        Ok(self.flatten(&Path::parse(data)?))
    }
}

/// A polyline with cumulative arc lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedPath {
    points: Vec<Point2>,
    /// `lengths[i]` is the arc length from the start to `points[i]`.
    lengths: Vec<f64>,
}

impl FlattenedPath {
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}

impl MeasuredPath for FlattenedPath {
    fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    fn point_at_length(&self, length: f64) -> Point2 {
        let Some(&first) = self.points.first() else {
            return Point2::origin();
        };
        let length = length.clamp(0.0, self.total_length());
        let i = self.lengths.partition_point(|&l| l < length);
        if i == 0 {
            return first;
        }
        let Some(&end) = self.points.get(i) else {
            return self.points[self.points.len() - 1];
        };
        let (l0, l1) = (self.lengths[i - 1], self.lengths[i]);
        if l1 - l0 < TOLERANCE {
            return end;
        }
        lerp(&self.points[i - 1], &end, (length - l0) / (l1 - l0))
    }
}
