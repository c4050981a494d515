//! Path data model: an ordered command list with cached absolute geometry.
pub mod command;
mod edit;
mod format;
pub mod grammar;
mod subpath;
mod transform;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

pub use command::{
    ArcParams, CommandKind, CommandRef, Controls, PathCommand, Resolved, Segment, SegmentShape,
};

use crate::error::{ContourError, ParseError, ParseErrorKind, PathError, Result};
use crate::math::{self, Point2};

/// An ordered sequence of path commands.
///
/// The first command is always a moveto. Every mutating method leaves the
/// absolute geometry cache refreshed; callers never observe stale
/// [`Resolved`] values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses path data.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::Parse` for malformed text.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens = grammar::parse(text)?;
        let mut commands = Vec::with_capacity(tokens.len());
        for token in tokens {
            let missing = || {
                ParseError::new(token.offset, ParseErrorKind::UnexpectedCharacter(token.letter))
            };
            let (kind, relative) = token.kind().ok_or_else(missing)?;
            let segment = Segment::from_params(kind, &token.params).ok_or_else(missing)?;
            commands.push(PathCommand::new(segment, relative));
        }
        debug!(commands = commands.len(), "parsed path data");
        let mut path = Self { commands };
        path.refresh_absolute_positions();
        Ok(path)
    }

    /// Builds a path from commands.
    ///
    /// # Errors
    ///
    /// Returns `PathError::MissingInitialMove` if the first command is not a
    /// moveto.
    pub fn from_commands(commands: Vec<PathCommand>) -> Result<Self> {
        if let Some(first) = commands.first() {
            if first.kind() != CommandKind::Move {
                return Err(PathError::MissingInitialMove {
                    found: first.kind(),
                }
                .into());
            }
        }
        let mut path = Self { commands };
        path.refresh_absolute_positions();
        Ok(path)
    }

    /// Builds a closed polygon path `M p0 L p1 … Z`.
    ///
    /// A trailing point equal to the first is dropped, since the closepath
    /// already returns there.
    #[must_use]
    pub fn from_polygon(points: &[Point2]) -> Self {
        let (ring, _) = math::polygon_2d::open_ring(points);
        let mut commands = Vec::with_capacity(ring.len() + 1);
        for (i, p) in ring.iter().enumerate() {
            let segment = if i == 0 {
                Segment::Move(*p)
            } else {
                Segment::Line(*p)
            };
            commands.push(PathCommand::absolute(segment));
        }
        if !commands.is_empty() {
            commands.push(PathCommand::absolute(Segment::Close));
        }
        let mut path = Self { commands };
        path.refresh_absolute_positions();
        path
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the command at `index`.
    ///
    /// # Errors
    ///
    /// Returns `PathError::IndexOutOfRange` for an invalid index.
    pub fn command(&self, index: usize) -> Result<&PathCommand> {
        self.commands.get(index).ok_or_else(|| {
            PathError::IndexOutOfRange {
                index,
                len: self.commands.len(),
            }
            .into()
        })
    }

    /// Appends a command.
    ///
    /// # Errors
    ///
    /// Returns `PathError::MissingInitialMove` when pushing anything but a
    /// moveto onto an empty path.
    pub fn push(&mut self, command: PathCommand) -> Result<()> {
        if self.commands.is_empty() && command.kind() != CommandKind::Move {
            return Err(PathError::MissingInitialMove {
                found: command.kind(),
            }
            .into());
        }
        self.commands.push(command);
        self.refresh_absolute_positions();
        Ok(())
    }

    /// Recomputes every command's absolute geometry in one pass.
    pub fn refresh_absolute_positions(&mut self) {
        let mut current = Point2::origin();
        let mut subpath_start = Point2::origin();
        let mut previous: Option<(CommandRef, Option<Point2>)> = None;

        for (index, cmd) in self.commands.iter_mut().enumerate() {
            let start = current;
            let base = if cmd.is_relative() {
                current.coords
            } else {
                math::Vector2::zeros()
            };
            let abs = |p: Point2| p + base;

            let (target, controls, reflects) = match *cmd.segment() {
                Segment::Move(p) => {
                    subpath_start = abs(p);
                    (subpath_start, Controls::None, None)
                }
                Segment::Line(p) => (abs(p), Controls::None, None),
                Segment::HLine(x) => (Point2::new(x + base.x, start.y), Controls::None, None),
                Segment::VLine(y) => (Point2::new(start.x, y + base.y), Controls::None, None),
                Segment::CubicCurve { ctrl1, ctrl2, to } => {
                    (abs(to), Controls::Two(abs(ctrl1), abs(ctrl2)), None)
                }
                Segment::SmoothCubicCurve { ctrl2, to } => {
                    let (ctrl1, reflects) =
                        reflect(previous, CommandKind::SmoothCubicCurve, start);
                    (abs(to), Controls::Two(ctrl1, abs(ctrl2)), reflects)
                }
                Segment::QuadCurve { ctrl, to } => (abs(to), Controls::One(abs(ctrl)), None),
                Segment::SmoothQuadCurve(to) => {
                    let (ctrl, reflects) = reflect(previous, CommandKind::SmoothQuadCurve, start);
                    (abs(to), Controls::One(ctrl), reflects)
                }
                Segment::Arc(a) => (abs(a.to), Controls::None, None),
                Segment::Close => (subpath_start, Controls::None, None),
            };

            cmd.set_resolved(Resolved {
                start,
                target,
                controls,
                reflects,
            });
            previous = Some((
                CommandRef {
                    index,
                    kind: cmd.kind(),
                },
                controls.last(),
            ));
            current = target;
        }
    }

    /// Re-encodes every command as relative (`true`) or absolute (`false`)
    /// without changing the drawn shape. Calling it twice is a no-op.
    ///
    /// The absolute geometry is carried over unchanged rather than re-derived
    /// from the new parameters, so flipping to relative and back restores
    /// the original coordinates bit for bit. A later edit that refreshes a
    /// run of relative commands sums their offsets again, which can drift by
    /// a few ulps for values such as `0.1` that floats cannot represent.
    pub fn set_relative(&mut self, relative: bool) {
        for cmd in &mut self.commands {
            if cmd.is_relative() != relative {
                let resolved = *cmd.resolved();
                let segment = PathCommand::encode(cmd.segment(), &resolved, relative);
                *cmd = PathCommand::new(segment, relative);
                cmd.set_resolved(resolved);
            }
        }
    }

    /// Bounds of all target and control points, `None` for an empty path.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        let points: Vec<Point2> = self
            .commands
            .iter()
            .flat_map(|c| std::iter::once(c.target()).chain(c.controls().iter()))
            .collect();
        math::bounding_box(&points)
    }

    pub(crate) fn commands_mut(&mut self) -> &mut Vec<PathCommand> {
        &mut self.commands
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        self.command(index).map(|_| ())
    }
}

/// Leading control point of a smooth command: the previous command's
/// trailing control point mirrored through `start` when that command is in
/// the same curve family, otherwise `start` itself.
fn reflect(
    previous: Option<(CommandRef, Option<Point2>)>,
    smooth: CommandKind,
    start: Point2,
) -> (Point2, Option<CommandRef>) {
    match previous {
        Some((prev, Some(ctrl))) if prev.kind.smooth_follower() == Some(smooth) => {
            (Point2::from(start.coords * 2.0 - ctrl.coords), Some(prev))
        }
        _ => (start, None),
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_data(false))
    }
}

impl FromStr for Path {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn targets(path: &Path) -> Vec<Point2> {
        path.commands().iter().map(PathCommand::target).collect()
    }

    // ── refresh ──

    #[test]
    fn relative_targets_accumulate() {
        let path = Path::parse("m1 1 l2 0 h3 v4 z").unwrap();
        assert_eq!(
            targets(&path),
            vec![p(1.0, 1.0), p(3.0, 1.0), p(6.0, 1.0), p(6.0, 5.0), p(1.0, 1.0)]
        );
        assert_eq!(path.commands()[2].start(), p(3.0, 1.0));
    }

    #[test]
    fn close_returns_to_active_subpath() {
        let path = Path::parse("M0 0 L5 0 Z M10 10 L20 10 Z l1 1").unwrap();
        assert_eq!(path.commands()[2].target(), p(0.0, 0.0));
        assert_eq!(path.commands()[5].target(), p(10.0, 10.0));
        assert_eq!(path.commands()[6].target(), p(11.0, 11.0));
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let path = Path::parse("M0 0 C0 10 10 10 10 0 S20 -10 20 0").unwrap();
        let s = &path.commands()[2];
        assert_eq!(s.controls(), Controls::Two(p(10.0, -10.0), p(20.0, -10.0)));
        assert_eq!(
            s.resolved().reflects,
            Some(CommandRef {
                index: 1,
                kind: CommandKind::CubicCurve
            })
        );
    }

    #[test]
    fn smooth_without_same_family_falls_back_to_start() {
        let path = Path::parse("M0 0 Q5 5 10 0 S15 5 20 0").unwrap();
        let s = &path.commands()[2];
        assert_eq!(s.controls().first(), Some(p(10.0, 0.0)));
        assert!(s.resolved().reflects.is_none());
    }

    #[test]
    fn smooth_quad_chain() {
        let path = Path::parse("M0 0 Q5 5 10 0 T20 0 T30 0").unwrap();
        assert_eq!(path.commands()[2].controls(), Controls::One(p(15.0, -5.0)));
        assert_eq!(path.commands()[3].controls(), Controls::One(p(25.0, 5.0)));
    }

    // ── construction ──

    #[test]
    fn from_commands_requires_moveto() {
        let err = Path::from_commands(vec![PathCommand::absolute(Segment::Line(p(1.0, 1.0)))]);
        assert!(matches!(
            err,
            Err(ContourError::Path(PathError::MissingInitialMove {
                found: CommandKind::Line
            }))
        ));
        assert!(Path::from_commands(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn push_refreshes() {
        let mut path = Path::new();
        assert!(path.push(PathCommand::relative(Segment::HLine(2.0))).is_err());
        path.push(PathCommand::absolute(Segment::Move(p(1.0, 1.0))))
            .unwrap();
        path.push(PathCommand::relative(Segment::HLine(2.0))).unwrap();
        assert_eq!(path.commands()[1].target(), p(3.0, 1.0));
    }

    #[test]
    fn from_polygon_drops_closing_duplicate() {
        let path = Path::from_polygon(&[p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0), p(0.0, 0.0)]);
        assert_eq!(path.to_string(), "M0,0 L4,0 L4,3 Z");
        assert!(Path::from_polygon(&[]).is_empty());
    }

    #[test]
    fn command_index_checked() {
        let path = Path::parse("M0 0 L1 1").unwrap();
        assert!(path.command(1).is_ok());
        assert!(matches!(
            path.command(2),
            Err(ContourError::Path(PathError::IndexOutOfRange { index: 2, len: 2 }))
        ));
    }

    // ── relative / absolute ──

    #[test]
    fn set_relative_round_trip_is_exact() {
        let source = "M10 20 L30 20 H50 V60 C60 70 80 70 90 60 S110 50 120 60 \
                      Q130 80 140 60 T160 60 A10 10 0 0 1 180 60 Z";
        let original = Path::parse(source).unwrap();
        let mut path = original.clone();
        path.set_relative(true);
        assert!(path.commands().iter().all(PathCommand::is_relative));
        let once = path.clone();
        path.set_relative(true);
        assert_eq!(path, once);
        path.set_relative(false);
        assert_eq!(path, original);
    }

    #[test]
    fn round_trip_is_exact_for_inexact_decimals() {
        let source = "M7.7 0.3 L1.1 2.2 C0.1 0.2 0.3 0.7 9.9 3.3 \
                      Q4.4 5.5 6.6 0.7 T0.9 1.3 A3.3 1.1 15 0 1 2.9 8.1 Z";
        let original = Path::parse(source).unwrap();
        let mut path = original.clone();
        path.set_relative(true);
        for (a, b) in path.commands().iter().zip(original.commands()) {
            assert_eq!(a.resolved(), b.resolved());
        }
        path.set_relative(false);
        assert_eq!(path, original);
        assert_eq!(path.to_string(), original.to_string());
    }

    #[test]
    fn relative_encoding_preserves_geometry() {
        let original = Path::parse("M1.5 2.25 C3 4 5 6 7 8 S9 1 2 3 Z").unwrap();
        let mut path = original.clone();
        path.set_relative(true);
        for (a, b) in path.commands().iter().zip(original.commands()) {
            assert_abs_diff_eq!(a.target(), b.target(), epsilon = 1e-12);
            for (ca, cb) in a.controls().iter().zip(b.controls().iter()) {
                assert_abs_diff_eq!(ca, cb, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn bounding_box_includes_controls() {
        let path = Path::parse("M0 0 C0 10 10 10 10 0").unwrap();
        let (min, max) = path.bounding_box().unwrap();
        assert_eq!(min, p(0.0, 0.0));
        assert_eq!(max, p(10.0, 10.0));
        assert!(Path::new().bounding_box().is_none());
    }

    #[test]
    fn from_str_and_display() {
        let path: Path = "M0,0 L10,0".parse().unwrap();
        assert_eq!(path.to_string(), "M0,0 L10,0");
        assert!("L0,0".parse::<Path>().is_err());
    }
}
