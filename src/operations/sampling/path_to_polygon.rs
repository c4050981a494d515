use tracing::{debug, trace};

use super::{MeasuredPath, PathSampler, SamplingParams};
use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Samples a path into a closed polygon by arc length.
///
/// `max(2, ceil(precision / 100 · length))` points are taken at evenly spaced
/// arc lengths starting at 0, and the first point is repeated at the end.
#[derive(Debug)]
pub struct PathToPolygon {
    precision: f64,
}

impl PathToPolygon {
    /// Creates a new `PathToPolygon` operation.
    #[must_use]
    pub fn new(precision: f64) -> Self {
        Self { precision }
    }

    /// Executes the sampling.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::PrecisionOutOfRange` if the precision is not
    /// within `[0, 100]`, or the sampler's error if it cannot measure `data`.
    pub fn execute<S: PathSampler>(&self, data: &str, sampler: &S) -> Result<Vec<Point2>> {
        if !(0.0..=100.0).contains(&self.precision) {
            return Err(GeometryError::PrecisionOutOfRange(self.precision).into());
        }
        let measured = sampler.measure(data)?;
        let length = measured.total_length();
        let count = sample_count(self.precision, length);

        let mut points = Vec::with_capacity(count + 1);
        for i in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let at = length * i as f64 / count as f64;
            points.push(measured.point_at_length(at));
        }
        points.push(points[0]);

        trace!(length, count, "sampled path to polygon");
        Ok(points)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_count(precision: f64, length: f64) -> usize {
    let raw = (precision / 100.0 * length).ceil();
    if raw.is_finite() && raw > 2.0 {
        raw as usize
    } else {
        2
    }
}

/// Progress reported to the yield hook of [`BatchPathToPolygon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Paths converted so far.
    pub completed: usize,
    pub total: usize,
}

/// Converts many paths to polygons in batches, handing control back to the
/// caller between batches.
///
/// The batch size only decides where the hook runs; the polygons are the
/// same for every batch size.
#[derive(Debug)]
pub struct BatchPathToPolygon {
    params: SamplingParams,
}

impl BatchPathToPolygon {
    /// Creates a new batch conversion.
    #[must_use]
    pub fn new(params: SamplingParams) -> Self {
        Self { params }
    }

    /// Executes the conversion. `on_yield` runs after every batch except the
    /// last.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for a zero batch size and
    /// otherwise the first error of [`PathToPolygon::execute`]; no further
    /// paths are converted after an error.
    pub fn execute<S, D, F>(
        &self,
        paths: &[D],
        sampler: &S,
        mut on_yield: F,
    ) -> Result<Vec<Vec<Point2>>>
    where
        S: PathSampler,
        D: AsRef<str>,
        F: FnMut(BatchProgress),
    {
        if self.params.batch_size == 0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "batch_size",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }
            .into());
        }

        let op = PathToPolygon::new(self.params.precision);
        let total = paths.len();
        let mut polygons = Vec::with_capacity(total);
        for batch in paths.chunks(self.params.batch_size) {
            for data in batch {
                polygons.push(op.execute(data.as_ref(), sampler)?);
            }
            if polygons.len() < total {
                on_yield(BatchProgress {
                    completed: polygons.len(),
                    total,
                });
            }
        }

        debug!(
            paths = total,
            batch_size = self.params.batch_size,
            "converted paths to polygons"
        );
        Ok(polygons)
    }
}
