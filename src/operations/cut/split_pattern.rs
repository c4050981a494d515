use tracing::debug;

use super::blade::{BladeParams, CutBlade};
use crate::document::Document;
use crate::error::Result;
use crate::math::Point2;
use crate::path::Path;

/// Boolean polygon subtraction, supplied by the host.
pub trait BooleanEngine {
    /// Subtracts `clip` from `subject`, both given as path data, and returns
    /// the resulting path data strings.
    ///
    /// # Errors
    ///
    /// Implementations report their failures as
    /// `OperationError::Collaborator`.
    fn subtract(&self, subject: &str, clip: &str) -> Result<Vec<String>>;
}

impl<F> BooleanEngine for F
where
    F: Fn(&str, &str) -> Result<Vec<String>>,
{
    fn subtract(&self, subject: &str, clip: &str) -> Result<Vec<String>> {
        self(subject, clip)
    }
}

/// Cuts a shape along a line or curve.
///
/// The shape minus the cut blade is split into its disjoint pieces: none if
/// the blade consumed the shape, one if the cut missed or did not go
/// through, two or more otherwise.
#[derive(Debug)]
pub struct SplitPattern {
    blade: CutBlade,
}

impl SplitPattern {
    /// Creates a straight cut from `from` to `to`.
    #[must_use]
    pub fn new(from: Point2, to: Point2) -> Self {
        Self {
            blade: CutBlade::new(from, to),
        }
    }

    /// Bends the cut by `depth` at its middle.
    #[must_use]
    pub fn curved(mut self, depth: f64) -> Self {
        self.blade = self.blade.curved(depth);
        self
    }

    /// Sets the blade parameters.
    #[must_use]
    pub fn with_params(mut self, params: BladeParams) -> Self {
        self.blade = self.blade.with_params(params);
        self
    }

    /// Executes the cut and returns one path data string per piece.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`CutBlade::execute`], the engine's errors, and
    /// `ContourError::Parse` if the engine returns malformed path data.
    pub fn execute<E: BooleanEngine>(&self, path: &Path, engine: &E) -> Result<Vec<String>> {
        let blade = self.blade.execute()?;
        let results = engine.subtract(&path.to_string(), &blade.to_path_data())?;

        let mut pieces = Vec::new();
        for data in &results {
            let document = Document::parse(data)?;
            pieces.extend(
                document
                    .iter()
                    .filter(|(_, contour)| !contour.is_empty())
                    .map(|(_, contour)| contour.to_string()),
            );
        }
        debug!(
            results = results.len(),
            pieces = pieces.len(),
            "split pattern"
        );
        Ok(pieces)
    }
}
