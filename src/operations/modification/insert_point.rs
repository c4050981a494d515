use tracing::debug;

use super::split::{SplitAt, SplitCommand};
use crate::error::{OperationError, Result};
use crate::math::Point2;
use crate::operations::query::{NearestPoint, DEFAULT_STEP};
use crate::path::{CommandKind, Path, PathCommand, Resolved, Segment};

/// Inserts a vertex on the path where it passes nearest to a point.
///
/// The nearest segment is split at the nearest sample. A hit on a closing
/// segment inserts a lineto before the closepath instead, which draws the
/// same outline.
pub struct InsertPoint {
    point: Point2,
    step: f64,
}

impl InsertPoint {
    /// Creates a new `InsertPoint` operation.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            step: DEFAULT_STEP,
        }
    }

    /// Sets the sampling step of the nearest point query.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Executes the insertion and returns the index of the command that now
    /// ends at the inserted vertex.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the path has nothing to
    /// insert into, and the split errors when the nearest sample is an
    /// existing vertex.
    pub fn execute(&self, path: &mut Path) -> Result<usize> {
        let hit = NearestPoint::new(self.point)
            .with_step(self.step)
            .execute(path)?
            .ok_or_else(|| OperationError::InvalidInput("path has no drawable segments".into()))?;
        debug!(index = hit.index, distance = hit.distance, "inserting point");

        if hit.command.kind() == CommandKind::Close {
            if hit.parameter <= 0.0 || hit.parameter >= 1.0 {
                return Err(OperationError::InvalidInput(
                    "point is already a vertex of the path".into(),
                )
                .into());
            }
            let relative = hit.command.is_relative();
            let geometry = Resolved {
                start: hit.command.start(),
                target: hit.point,
                ..Resolved::default()
            };
            let line = PathCommand::encode(&Segment::Line(hit.point), &geometry, relative);
            path.commands_mut()
                .insert(hit.index, PathCommand::new(line, relative));
            path.refresh_absolute_positions();
            return Ok(hit.index);
        }

        SplitCommand::new(hit.index, SplitAt::Parameter(hit.parameter)).execute(path)?;
        Ok(hit.index)
    }
}
