use tracing::debug;

use crate::error::{PathError, Result};
use crate::math::bezier::{split_cubic, split_quad};
use crate::math::distance_2d::project_onto_segment;
use crate::math::{lerp, Point2};
use crate::path::{
    ArcParams, CommandKind, Controls, Path, PathCommand, Resolved, Segment, SegmentShape,
};

/// Number of samples used to locate a split point on a curve.
pub const SPLIT_SUBDIVISIONS: usize = 100;

/// Parameters closer than this to 0 or 1 would create an empty half.
const ENDPOINT_EPSILON: f64 = 1e-9;

const REFINE_ITERATIONS: usize = 64;

/// Where to split a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitAt {
    /// Segment parameter in `(0, 1)`; length fraction for straight segments.
    Parameter(f64),
    /// A point on (or near) the segment.
    Point(Point2),
}

/// The two halves replacing the split command.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// Ends at the split point; stored at the original index.
    pub left: PathCommand,
    /// Ends at the original target; stored right after `left`.
    pub right: PathCommand,
    /// Segment parameter the split happened at.
    pub parameter: f64,
}

/// Splits one command of a path into two that draw the same geometry.
///
/// Straight segments keep their kind on both halves. Cubic and quadratic
/// curves are subdivided with De Casteljau; smooth curves are emitted as
/// explicit halves. Arcs are split in center form with the large-arc flag
/// recomputed for each half.
pub struct SplitCommand {
    index: usize,
    at: SplitAt,
}

impl SplitCommand {
    /// Creates a new `SplitCommand` operation.
    #[must_use]
    pub fn new(index: usize, at: SplitAt) -> Self {
        Self { index, at }
    }

    /// Executes the split, mutating `path`.
    ///
    /// A smooth command right after the split one is first rewritten in
    /// explicit form, since its reflected control point would otherwise move.
    ///
    /// # Errors
    ///
    /// Returns `PathError::IndexOutOfRange` for an invalid index and
    /// `PathError::UnsplittableCommand` for movetos, closepaths and split
    /// locations at (or beyond) the segment's endpoints. The path is left
    /// unmodified on error.
    pub fn execute(&self, path: &mut Path) -> Result<SplitResult> {
        let index = self.index;
        let cmd = path.command(index)?.clone();
        let unsplittable = |reason| PathError::UnsplittableCommand {
            index,
            kind: cmd.kind(),
            reason,
        };

        let shape = match (cmd.kind(), cmd.shape()) {
            (CommandKind::Close, _) => return Err(unsplittable("closepath cannot be split").into()),
            (_, None) => return Err(unsplittable("moveto has no extent").into()),
            (_, Some(shape)) => shape,
        };

        let t = match self.at {
            SplitAt::Parameter(t) => t,
            SplitAt::Point(p) => locate_parameter(&shape, &p),
        };
        if !(t > ENDPOINT_EPSILON && t < 1.0 - ENDPOINT_EPSILON) {
            return Err(unsplittable("split location is not inside the segment").into());
        }

        let reflects_this = path
            .commands()
            .get(index + 1)
            .and_then(|next| next.resolved().reflects)
            .is_some_and(|r| r.index == index);
        let follower = if reflects_this {
            path.explicit_follower(index)?
        } else {
            None
        };

        let (left, right) = split_geometry(&cmd, &shape, t);
        debug!(index, kind = ?cmd.kind(), t, "splitting command");

        let commands = path.commands_mut();
        commands[index] = left;
        commands.insert(index + 1, right);
        if let Some(follower) = follower {
            commands[index + 2] = follower;
        }
        path.refresh_absolute_positions();

        Ok(SplitResult {
            left: path.commands()[index].clone(),
            right: path.commands()[index + 1].clone(),
            parameter: t,
        })
    }
}

/// Segment parameter of the point on `shape` nearest to `p`.
///
/// Straight segments project exactly. Curves are sampled at
/// [`SPLIT_SUBDIVISIONS`] intervals and the best interval is refined with a
/// golden-section search.
fn locate_parameter(shape: &SegmentShape, p: &Point2) -> f64 {
    if let SegmentShape::Straight(a, b) = shape {
        return project_onto_segment(p, a, b).0;
    }

    let dist = |t: f64| (shape.point_at(t) - p).norm_squared();
    #[allow(clippy::cast_precision_loss)]
    let n = SPLIT_SUBDIVISIONS as f64;
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for i in 0..=SPLIT_SUBDIVISIONS {
        #[allow(clippy::cast_precision_loss)]
        let d = dist(i as f64 / n);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let (lo, hi) = (
        (best.saturating_sub(1)) as f64 / n,
        (best + 1).min(SPLIT_SUBDIVISIONS) as f64 / n,
    );
    golden_section(dist, lo, hi)
}

/// Minimizes a unimodal `f` over `[lo, hi]`.
fn golden_section<F: Fn(f64) -> f64>(f: F, mut lo: f64, mut hi: f64) -> f64 {
    const INV_PHI: f64 = 0.618_033_988_749_894_8;
    let mut c = hi - INV_PHI * (hi - lo);
    let mut d = lo + INV_PHI * (hi - lo);
    let (mut fc, mut fd) = (f(c), f(d));
    for _ in 0..REFINE_ITERATIONS {
        if fc < fd {
            hi = d;
            d = c;
            fd = fc;
            c = hi - INV_PHI * (hi - lo);
            fc = f(c);
        } else {
            lo = c;
            c = d;
            fc = fd;
            d = lo + INV_PHI * (hi - lo);
            fd = f(d);
        }
    }
    (lo + hi) * 0.5
}

/// Builds the two halves of `cmd` split at `t`, keeping its relativity.
fn split_geometry(cmd: &PathCommand, shape: &SegmentShape, t: f64) -> (PathCommand, PathCommand) {
    let Resolved { start, target, .. } = *cmd.resolved();
    let relative = cmd.is_relative();
    let half = |template: &Segment, from: Point2, to: Point2, controls: Controls| {
        let geometry = Resolved {
            start: from,
            target: to,
            controls,
            reflects: None,
        };
        PathCommand::new(PathCommand::encode(template, &geometry, relative), relative)
    };

    match shape {
        SegmentShape::Straight(a, b) => {
            let mid = lerp(a, b, t);
            let template = cmd.segment();
            (
                half(template, start, mid, Controls::None),
                half(template, mid, target, Controls::None),
            )
        }
        SegmentShape::Cubic(points) => {
            let (l, r) = split_cubic(points, t);
            let template = Segment::CubicCurve {
                ctrl1: start,
                ctrl2: start,
                to: start,
            };
            (
                half(&template, start, l[3], Controls::Two(l[1], l[2])),
                half(&template, r[0], target, Controls::Two(r[1], r[2])),
            )
        }
        SegmentShape::Quad(points) => {
            let (l, r) = split_quad(points, t);
            let template = Segment::QuadCurve {
                ctrl: start,
                to: start,
            };
            (
                half(&template, start, l[2], Controls::One(l[1])),
                half(&template, r[0], target, Controls::One(r[1])),
            )
        }
        SegmentShape::Arc(arc) => {
            let mid = arc.point_at(t);
            let Segment::Arc(params) = *cmd.segment() else {
                // Only arc commands produce an arc shape.
                return (cmd.clone(), cmd.clone());
            };
            let piece = |large_arc| {
                Segment::Arc(ArcParams {
                    rx: arc.rx,
                    ry: arc.ry,
                    large_arc,
                    ..params
                })
            };
            (
                half(&piece(arc.is_large(0.0, t)), start, mid, Controls::None),
                half(&piece(arc.is_large(t, 1.0)), mid, target, Controls::None),
            )
        }
    }
}
