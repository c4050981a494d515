use tracing::debug;

use super::{ArcParams, CommandKind, Controls, Path, PathCommand, Resolved, Segment};
use crate::error::{OperationError, PathError, Result};
use crate::math::{Point2, TOLERANCE};

impl Path {
    /// Builds a command of `kind` equivalent to the command at `index`.
    ///
    /// The result ends at the same target (projected onto the axis for
    /// horizontal and vertical lines) and keeps the original relativity.
    /// Control points carry over between related curve kinds (cubic and
    /// smooth cubic, quadratic and smooth quadratic); any other conversion
    /// starts from zero-length handles.
    ///
    /// # Errors
    ///
    /// Returns `PathError::NoPreviousCommand` for the first command,
    /// `PathError::IndexOutOfRange` for an invalid index and
    /// `OperationError::InvalidInput` when asked for a closepath.
    pub fn converted_command(&self, index: usize, kind: CommandKind) -> Result<PathCommand> {
        let cmd = self.command(index)?;
        if index == 0 {
            return Err(PathError::NoPreviousCommand { index }.into());
        }
        if kind == CommandKind::Close {
            return Err(OperationError::InvalidInput(
                "a command cannot be converted into a closepath".to_string(),
            )
            .into());
        }

        let from = cmd.kind();
        let Resolved {
            start,
            target,
            controls,
            ..
        } = *cmd.resolved();
        let same_family = from.explicit() == kind.explicit();

        let (target, controls) = match kind {
            CommandKind::HLine => (Point2::new(target.x, start.y), Controls::None),
            CommandKind::VLine => (Point2::new(start.x, target.y), Controls::None),
            CommandKind::CubicCurve | CommandKind::SmoothCubicCurve => match controls {
                Controls::Two(a, b) if same_family => (target, Controls::Two(a, b)),
                _ => (target, Controls::Two(start, target)),
            },
            CommandKind::QuadCurve | CommandKind::SmoothQuadCurve => match controls {
                Controls::One(a) if same_family => (target, Controls::One(a)),
                _ => (target, Controls::One(start)),
            },
            _ => (target, Controls::None),
        };

        let template = match (kind, cmd.segment()) {
            (CommandKind::Arc, Segment::Arc(a)) => Segment::Arc(*a),
            (CommandKind::Arc, _) => {
                let radius = (target - start).norm() * 0.5;
                Segment::Arc(ArcParams {
                    rx: radius,
                    ry: radius,
                    x_rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                    to: target,
                })
            }
            (kind, _) => blank(kind),
        };

        let geometry = Resolved {
            start,
            target,
            controls,
            reflects: None,
        };
        let relative = cmd.is_relative();
        Ok(PathCommand::new(
            PathCommand::encode(&template, &geometry, relative),
            relative,
        ))
    }

    /// Replaces the command at `index` with its conversion to `kind`.
    ///
    /// A smooth command right after it is first rewritten in explicit form so
    /// it keeps its shape.
    ///
    /// # Errors
    ///
    /// See [`Path::converted_command`].
    pub fn change_type(&mut self, index: usize, kind: CommandKind) -> Result<()> {
        let converted = self.converted_command(index, kind)?;
        let follower = self.explicit_follower(index)?;
        debug!(index, ?kind, "changing command type");
        if let Some(follower) = follower {
            self.commands_mut()[index + 1] = follower;
        }
        self.commands_mut()[index] = converted;
        self.refresh_absolute_positions();
        Ok(())
    }

    /// Removes the command at `index` and returns it.
    ///
    /// The following command is re-anchored so it keeps its absolute target
    /// and control points: a smooth follower becomes explicit, and a
    /// horizontal or vertical follower that is no longer axis aligned becomes
    /// a line.
    ///
    /// # Errors
    ///
    /// Returns `PathError::IndexOutOfRange` for an invalid index and
    /// `OperationError::InvalidInput` for the initial moveto.
    pub fn delete_command(&mut self, index: usize) -> Result<PathCommand> {
        self.check_index(index)?;
        if index == 0 {
            return Err(OperationError::InvalidInput(
                "the initial moveto cannot be deleted".to_string(),
            )
            .into());
        }

        let new_start = self.commands()[index].start();
        let follower = self
            .commands()
            .get(index + 1)
            .map(|cmd| reanchor(cmd, new_start));
        if let Some(follower) = follower {
            self.commands_mut()[index + 1] = follower;
        }
        let removed = self.commands_mut().remove(index);
        self.refresh_absolute_positions();
        debug!(index, kind = ?removed.kind(), "deleted command");
        Ok(removed)
    }

    /// Explicit form of the command after `index` when it is a smooth
    /// command (whose reflection depends on the command at `index`).
    pub(crate) fn explicit_follower(&self, index: usize) -> Result<Option<PathCommand>> {
        match self.commands().get(index + 1) {
            Some(next) if next.kind().explicit() != next.kind() => self
                .converted_command(index + 1, next.kind().explicit())
                .map(Some),
            _ => Ok(None),
        }
    }
}

/// Re-encodes `cmd` to start at `start` while keeping its absolute target
/// and control points.
fn reanchor(cmd: &PathCommand, start: Point2) -> PathCommand {
    let target = cmd.target();
    let template = match cmd.segment() {
        Segment::HLine(_) if (target.y - start.y).abs() > TOLERANCE => blank(CommandKind::Line),
        Segment::VLine(_) if (target.x - start.x).abs() > TOLERANCE => blank(CommandKind::Line),
        Segment::SmoothCubicCurve { .. } | Segment::SmoothQuadCurve(_) => {
            blank(cmd.kind().explicit())
        }
        other => *other,
    };
    let geometry = Resolved {
        start,
        ..*cmd.resolved()
    };
    let relative = cmd.is_relative();
    PathCommand::new(PathCommand::encode(&template, &geometry, relative), relative)
}

/// A command of `kind` with placeholder parameters, used as an encoding
/// template.
fn blank(kind: CommandKind) -> Segment {
    let o = Point2::origin();
    match kind {
        CommandKind::Move => Segment::Move(o),
        CommandKind::Line => Segment::Line(o),
        CommandKind::HLine => Segment::HLine(0.0),
        CommandKind::VLine => Segment::VLine(0.0),
        CommandKind::CubicCurve => Segment::CubicCurve {
            ctrl1: o,
            ctrl2: o,
            to: o,
        },
        CommandKind::SmoothCubicCurve => Segment::SmoothCubicCurve { ctrl2: o, to: o },
        CommandKind::QuadCurve => Segment::QuadCurve { ctrl: o, to: o },
        CommandKind::SmoothQuadCurve => Segment::SmoothQuadCurve(o),
        CommandKind::Arc => Segment::Arc(ArcParams {
            rx: 0.0,
            ry: 0.0,
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
            to: o,
        }),
        CommandKind::Close => Segment::Close,
    }
}
