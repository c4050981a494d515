use tracing::trace;

use crate::error::{GeometryError, OperationError, Result};
use crate::math::{Point2, TOLERANCE};
use crate::path::{Path, PathCommand};

/// Default sampling step along each segment.
pub const DEFAULT_STEP: f64 = 0.01;

/// Result of a nearest point query.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestHit {
    /// Index of the command whose segment holds the nearest sample.
    pub index: usize,
    /// The command at `index`.
    pub command: PathCommand,
    /// Distance from the query point to `point`.
    pub distance: f64,
    /// The nearest sampled point on the path.
    pub point: Point2,
    /// Segment parameter of `point` in `[0, 1]`.
    pub parameter: f64,
}

/// Finds the sampled point of a path nearest to a target.
///
/// Every drawable segment (all kinds except moveto) is sampled at `step`
/// increments of its parameter. The first sample reaching the minimal
/// distance wins, so ties resolve in draw order.
pub struct NearestPoint {
    target: Point2,
    step: f64,
}

impl NearestPoint {
    /// Creates a new `NearestPoint` query with the default step.
    #[must_use]
    pub fn new(target: Point2) -> Self {
        Self {
            target,
            step: DEFAULT_STEP,
        }
    }

    /// Sets the sampling step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Executes the query. Returns `None` when the path has no drawable
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if the step is not in
    /// `(0, 1]`.
    pub fn execute(&self, path: &Path) -> Result<Option<NearestHit>> {
        if !(self.step > 0.0 && self.step <= 1.0) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "step",
                value: self.step,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        // Rounding can put 1/step a hair above an integer; that is not an extra sample.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let samples = ((1.0 / self.step) - TOLERANCE).ceil().max(1.0) as usize;

        let mut best: Option<(usize, f64, Point2, f64)> = None;
        for (index, cmd) in path.commands().iter().enumerate() {
            let Some(shape) = cmd.shape() else {
                continue;
            };
            for i in 0..=samples {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / samples as f64;
                let point = shape.point_at(t);
                let distance = (point - self.target).norm();
                if best.map_or(true, |(_, d, _, _)| distance < d) {
                    best = Some((index, distance, point, t));
                }
            }
        }

        Ok(best.map(|(index, distance, point, parameter)| {
            trace!(index, distance, parameter, "nearest sample");
            NearestHit {
                index,
                command: path.commands()[index].clone(),
                distance,
                point,
                parameter,
            }
        }))
    }
}

/// Whether `a` comes no later than `b` when walking the path in draw order.
///
/// Both points are located with a [`NearestPoint`] query and compared by
/// command index, then by position within the segment.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` if the path has no drawable
/// segment.
pub fn points_in_draw_order(path: &Path, a: Point2, b: Point2) -> Result<bool> {
    let locate = |p: Point2| -> Result<(usize, f64)> {
        NearestPoint::new(p)
            .execute(path)?
            .map(|hit| (hit.index, hit.parameter))
            .ok_or_else(|| {
                OperationError::InvalidInput("path has no drawable segments".into()).into()
            })
    };
    let (ia, ta) = locate(a)?;
    let (ib, tb) = locate(b)?;
    Ok(ia < ib || (ia == ib && ta <= tb))
}
