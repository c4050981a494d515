//! Arc-length sampling of paths into polygons.
//!
//! Measuring a path (total length, point at a length) is a collaborator
//! concern: hosts with their own renderer implement [`PathSampler`], and
//! [`FlatteningSampler`] provides one without any renderer.
mod flatten;
mod path_to_polygon;

pub use flatten::{FlattenedPath, FlatteningSampler};
pub use path_to_polygon::{BatchPathToPolygon, BatchProgress, PathToPolygon};

use crate::error::Result;
use crate::math::Point2;

/// A measured path that can be walked by arc length.
pub trait MeasuredPath {
    /// Total arc length; zero for an empty path.
    fn total_length(&self) -> f64;

    /// Point at arc length `length`, clamped to `[0, total_length]`.
    fn point_at_length(&self, length: f64) -> Point2;
}

/// Measures path data.
pub trait PathSampler {
    type Measured: MeasuredPath;

    /// Measures `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path data cannot be interpreted.
    fn measure(&self, data: &str) -> Result<Self::Measured>;
}

/// Parameters for sampling paths into polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// Sample density in `[0, 100]`: points per 100 units of arc length.
    pub precision: f64,
    /// Number of paths converted between two yields in batch conversion.
    pub batch_size: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            precision: 50.0,
            batch_size: 64,
        }
    }
}
