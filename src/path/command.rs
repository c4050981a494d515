use crate::math::arc_2d::{endpoint_to_center, CenterArc};
use crate::math::bezier::{cubic_point, quad_point, CubicPoints, QuadPoints};
use crate::math::{lerp, Point2, Vector2};

/// Discriminant of a path command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Move,
    Line,
    HLine,
    VLine,
    CubicCurve,
    SmoothCubicCurve,
    QuadCurve,
    SmoothQuadCurve,
    Arc,
    Close,
}

impl CommandKind {
    /// Number of numeric parameters the command takes.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Close => 0,
            Self::HLine | Self::VLine => 1,
            Self::Move | Self::Line | Self::SmoothQuadCurve => 2,
            Self::SmoothCubicCurve | Self::QuadCurve => 4,
            Self::CubicCurve => 6,
            Self::Arc => 7,
        }
    }

    /// Path-data letter; lowercase encodes relative.
    #[must_use]
    pub fn letter(self, relative: bool) -> char {
        let upper = match self {
            Self::Move => 'M',
            Self::Line => 'L',
            Self::HLine => 'H',
            Self::VLine => 'V',
            Self::CubicCurve => 'C',
            Self::SmoothCubicCurve => 'S',
            Self::QuadCurve => 'Q',
            Self::SmoothQuadCurve => 'T',
            Self::Arc => 'A',
            Self::Close => 'Z',
        };
        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }

    /// Parses a command letter into `(kind, relative)`.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => Self::Move,
            'L' => Self::Line,
            'H' => Self::HLine,
            'V' => Self::VLine,
            'C' => Self::CubicCurve,
            'S' => Self::SmoothCubicCurve,
            'Q' => Self::QuadCurve,
            'T' => Self::SmoothQuadCurve,
            'A' => Self::Arc,
            'Z' => Self::Close,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// The smooth variant whose leading control point reflects this kind's
    /// trailing one, if any.
    #[must_use]
    pub fn smooth_follower(self) -> Option<Self> {
        match self {
            Self::CubicCurve | Self::SmoothCubicCurve => Some(Self::SmoothCubicCurve),
            Self::QuadCurve | Self::SmoothQuadCurve => Some(Self::SmoothQuadCurve),
            _ => None,
        }
    }

    /// The explicit counterpart of a smooth kind.
    #[must_use]
    pub fn explicit(self) -> Self {
        match self {
            Self::SmoothCubicCurve => Self::CubicCurve,
            Self::SmoothQuadCurve => Self::QuadCurve,
            other => other,
        }
    }
}

/// Endpoint-parameterized elliptical arc parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub rx: f64,
    pub ry: f64,
    /// X-axis rotation in degrees.
    pub x_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point2,
}

/// Raw parameters of one command, exactly as encoded in path data.
///
/// Coordinates are offsets from the command's start point when the owning
/// [`PathCommand`] is relative, absolute positions otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Move(Point2),
    Line(Point2),
    HLine(f64),
    VLine(f64),
    CubicCurve {
        ctrl1: Point2,
        ctrl2: Point2,
        to: Point2,
    },
    SmoothCubicCurve {
        ctrl2: Point2,
        to: Point2,
    },
    QuadCurve {
        ctrl: Point2,
        to: Point2,
    },
    SmoothQuadCurve(Point2),
    Arc(ArcParams),
    Close,
}

impl Segment {
    /// Returns the command kind of this segment.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Move(_) => CommandKind::Move,
            Self::Line(_) => CommandKind::Line,
            Self::HLine(_) => CommandKind::HLine,
            Self::VLine(_) => CommandKind::VLine,
            Self::CubicCurve { .. } => CommandKind::CubicCurve,
            Self::SmoothCubicCurve { .. } => CommandKind::SmoothCubicCurve,
            Self::QuadCurve { .. } => CommandKind::QuadCurve,
            Self::SmoothQuadCurve(_) => CommandKind::SmoothQuadCurve,
            Self::Arc(_) => CommandKind::Arc,
            Self::Close => CommandKind::Close,
        }
    }

    /// Builds a segment from a flat parameter list.
    ///
    /// Returns `None` when `params` does not match the arity of `kind`. Arc
    /// flags are true for any non-zero value.
    #[must_use]
    pub fn from_params(kind: CommandKind, params: &[f64]) -> Option<Self> {
        if params.len() != kind.arity() {
            return None;
        }
        let pt = |i: usize| Point2::new(params[i], params[i + 1]);
        Some(match kind {
            CommandKind::Move => Self::Move(pt(0)),
            CommandKind::Line => Self::Line(pt(0)),
            CommandKind::HLine => Self::HLine(params[0]),
            CommandKind::VLine => Self::VLine(params[0]),
            CommandKind::CubicCurve => Self::CubicCurve {
                ctrl1: pt(0),
                ctrl2: pt(2),
                to: pt(4),
            },
            CommandKind::SmoothCubicCurve => Self::SmoothCubicCurve {
                ctrl2: pt(0),
                to: pt(2),
            },
            CommandKind::QuadCurve => Self::QuadCurve {
                ctrl: pt(0),
                to: pt(2),
            },
            CommandKind::SmoothQuadCurve => Self::SmoothQuadCurve(pt(0)),
            CommandKind::Arc => Self::Arc(ArcParams {
                rx: params[0],
                ry: params[1],
                x_rotation: params[2],
                large_arc: params[3] != 0.0,
                sweep: params[4] != 0.0,
                to: pt(5),
            }),
            CommandKind::Close => Self::Close,
        })
    }

    /// Flattens the segment back into its parameter list.
    #[must_use]
    pub fn params(&self) -> Vec<f64> {
        match self {
            Self::Move(p) | Self::Line(p) | Self::SmoothQuadCurve(p) => vec![p.x, p.y],
            Self::HLine(v) | Self::VLine(v) => vec![*v],
            Self::CubicCurve { ctrl1, ctrl2, to } => {
                vec![ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y]
            }
            Self::SmoothCubicCurve { ctrl2: c, to } | Self::QuadCurve { ctrl: c, to } => {
                vec![c.x, c.y, to.x, to.y]
            }
            Self::Arc(a) => vec![
                a.rx,
                a.ry,
                a.x_rotation,
                if a.large_arc { 1.0 } else { 0.0 },
                if a.sweep { 1.0 } else { 0.0 },
                a.to.x,
                a.to.y,
            ],
            Self::Close => Vec::new(),
        }
    }

    /// Shifts every coordinate by `d` (single-axis kinds use their own axis).
    #[must_use]
    pub fn offset_by(&self, d: &Vector2) -> Self {
        match *self {
            Self::Move(p) => Self::Move(p + d),
            Self::Line(p) => Self::Line(p + d),
            Self::HLine(x) => Self::HLine(x + d.x),
            Self::VLine(y) => Self::VLine(y + d.y),
            Self::CubicCurve { ctrl1, ctrl2, to } => Self::CubicCurve {
                ctrl1: ctrl1 + d,
                ctrl2: ctrl2 + d,
                to: to + d,
            },
            Self::SmoothCubicCurve { ctrl2, to } => Self::SmoothCubicCurve {
                ctrl2: ctrl2 + d,
                to: to + d,
            },
            Self::QuadCurve { ctrl, to } => Self::QuadCurve {
                ctrl: ctrl + d,
                to: to + d,
            },
            Self::SmoothQuadCurve(p) => Self::SmoothQuadCurve(p + d),
            Self::Arc(a) => Self::Arc(ArcParams { to: a.to + d, ..a }),
            Self::Close => Self::Close,
        }
    }
}

/// Absolute control points of a command after a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Controls {
    #[default]
    None,
    One(Point2),
    Two(Point2, Point2),
}

impl Controls {
    /// The control point nearest the start of the segment.
    #[must_use]
    pub fn first(&self) -> Option<Point2> {
        match *self {
            Self::None => None,
            Self::One(a) | Self::Two(a, _) => Some(a),
        }
    }

    /// The control point nearest the end of the segment; this is the point a
    /// following smooth command reflects.
    #[must_use]
    pub fn last(&self) -> Option<Point2> {
        match *self {
            Self::None => None,
            Self::One(a) | Self::Two(_, a) => Some(a),
        }
    }

    /// Iterates over the control points in order.
    pub fn iter(&self) -> impl Iterator<Item = Point2> {
        let (a, b) = match *self {
            Self::None => (None, None),
            Self::One(a) => (Some(a), None),
            Self::Two(a, b) => (Some(a), Some(b)),
        };
        a.into_iter().chain(b)
    }
}

/// Index-based link from a smooth command to the command whose trailing
/// control point it reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRef {
    pub index: usize,
    pub kind: CommandKind,
}

/// Absolute geometry of a command, valid after the owning path's last refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Pen position before the command (the origin for the first command).
    pub start: Point2,
    /// Pen position after the command.
    pub target: Point2,
    pub controls: Controls,
    /// Set for smooth commands whose leading control point is a reflection.
    pub reflects: Option<CommandRef>,
}

impl Default for Resolved {
    fn default() -> Self {
        Self {
            start: Point2::origin(),
            target: Point2::origin(),
            controls: Controls::None,
            reflects: None,
        }
    }
}

/// The drawable shape of a resolved command, in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentShape {
    Straight(Point2, Point2),
    Cubic(CubicPoints),
    Quad(QuadPoints),
    Arc(CenterArc),
}

impl SegmentShape {
    /// Evaluates the shape at `t ∈ [0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        match self {
            Self::Straight(a, b) => lerp(a, b, t),
            Self::Cubic(c) => cubic_point(c, t),
            Self::Quad(q) => quad_point(q, t),
            Self::Arc(arc) => arc.point_at(t),
        }
    }

    /// Whether evaluating needs more than the two endpoints.
    #[must_use]
    pub fn is_curved(&self) -> bool {
        !matches!(self, Self::Straight(..))
    }
}

/// One drawing instruction plus its cached absolute geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    segment: Segment,
    relative: bool,
    resolved: Resolved,
}

impl PathCommand {
    /// Creates a command; its geometry is resolved when added to a path.
    #[must_use]
    pub fn new(segment: Segment, relative: bool) -> Self {
        Self {
            segment,
            relative,
            resolved: Resolved::default(),
        }
    }

    /// Creates an absolute command.
    #[must_use]
    pub fn absolute(segment: Segment) -> Self {
        Self::new(segment, false)
    }

    /// Creates a relative command.
    #[must_use]
    pub fn relative(segment: Segment) -> Self {
        Self::new(segment, true)
    }

    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.segment.kind()
    }

    #[must_use]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Path-data letter of this command.
    #[must_use]
    pub fn letter(&self) -> char {
        self.kind().letter(self.relative)
    }

    #[must_use]
    pub fn resolved(&self) -> &Resolved {
        &self.resolved
    }

    /// Absolute pen position before this command.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.resolved.start
    }

    /// Absolute endpoint of this command.
    #[must_use]
    pub fn target(&self) -> Point2 {
        self.resolved.target
    }

    /// Absolute control points (empty for non-curves).
    #[must_use]
    pub fn controls(&self) -> Controls {
        self.resolved.controls
    }

    pub(crate) fn set_segment(&mut self, segment: Segment) {
        self.segment = segment;
    }

    pub(crate) fn set_resolved(&mut self, resolved: Resolved) {
        self.resolved = resolved;
    }

    /// The drawable shape between `start` and `target`; `None` for moveto.
    ///
    /// Degenerate arcs are drawn as straight lines, as SVG renderers do.
    #[must_use]
    pub fn shape(&self) -> Option<SegmentShape> {
        let Resolved {
            start,
            target,
            controls,
            ..
        } = self.resolved;
        match (&self.segment, controls) {
            (Segment::Move(_), _) => None,
            (Segment::CubicCurve { .. } | Segment::SmoothCubicCurve { .. }, Controls::Two(c1, c2)) => {
                Some(SegmentShape::Cubic([start, c1, c2, target]))
            }
            (Segment::QuadCurve { .. } | Segment::SmoothQuadCurve(_), Controls::One(c)) => {
                Some(SegmentShape::Quad([start, c, target]))
            }
            (Segment::Arc(a), _) => Some(
                endpoint_to_center(&start, &target, a.rx, a.ry, a.x_rotation, a.large_arc, a.sweep)
                    .map_or(SegmentShape::Straight(start, target), SegmentShape::Arc),
            ),
            _ => Some(SegmentShape::Straight(start, target)),
        }
    }

    /// Re-encodes `template` (kind and arc radii/flags) so that, starting at
    /// `geometry.start`, it draws `geometry` with the given relativity.
    ///
    /// Smooth kinds only carry their trailing control point; the leading one
    /// is expected to be re-derived by the next refresh.
    #[must_use]
    pub fn encode(template: &Segment, geometry: &Resolved, relative: bool) -> Segment {
        let origin = if relative {
            geometry.start.coords
        } else {
            Vector2::zeros()
        };
        let rel = |p: Point2| p - origin;
        let target = rel(geometry.target);
        let first = geometry.controls.first().map_or(target, rel);
        let last = geometry.controls.last().map_or(target, rel);

        match template {
            Segment::Move(_) => Segment::Move(target),
            Segment::Line(_) => Segment::Line(target),
            Segment::HLine(_) => Segment::HLine(target.x),
            Segment::VLine(_) => Segment::VLine(target.y),
            Segment::CubicCurve { .. } => Segment::CubicCurve {
                ctrl1: first,
                ctrl2: last,
                to: target,
            },
            Segment::SmoothCubicCurve { .. } => Segment::SmoothCubicCurve {
                ctrl2: last,
                to: target,
            },
            Segment::QuadCurve { .. } => Segment::QuadCurve {
                ctrl: first,
                to: target,
            },
            Segment::SmoothQuadCurve(_) => Segment::SmoothQuadCurve(target),
            Segment::Arc(a) => Segment::Arc(ArcParams { to: target, ..*a }),
            Segment::Close => Segment::Close,
        }
    }
}
