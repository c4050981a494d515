use tracing::debug;

use super::{ArcParams, Controls, Path, PathCommand, Resolved, Segment};
use crate::math::arc_2d::scale_ellipse;
use crate::math::{Point2, Vector2, TOLERANCE};

impl Path {
    /// Translates the path by `(dx, dy)`.
    ///
    /// Relative commands are translation invariant, so only absolute commands
    /// are shifted. A leading relative moveto is absolute in effect and is
    /// shifted too unless `absolute_only` is set.
    pub fn translate(&mut self, dx: f64, dy: f64, absolute_only: bool) {
        let d = Vector2::new(dx, dy);
        for (i, cmd) in self.commands_mut().iter_mut().enumerate() {
            let shift = !cmd.is_relative() || (i == 0 && !absolute_only);
            if shift {
                let segment = cmd.segment().offset_by(&d);
                cmd.set_segment(segment);
            }
        }
        self.refresh_absolute_positions();
    }

    /// Scales the path about the origin.
    ///
    /// Arcs get new radii and rotation for the mapped ellipse; their sweep
    /// flag flips when the scale mirrors the plane.
    pub fn scale(&mut self, kx: f64, ky: f64) {
        let mirrored = kx * ky < 0.0;
        self.remap(
            |p| Point2::new(p.x * kx, p.y * ky),
            |segment| match *segment {
                Segment::Arc(a) => {
                    let (rx, ry, x_rotation) = scale_ellipse(a.rx, a.ry, a.x_rotation, kx, ky);
                    Segment::Arc(ArcParams {
                        rx,
                        ry,
                        x_rotation,
                        sweep: a.sweep != mirrored,
                        ..a
                    })
                }
                other => other,
            },
        );
    }

    /// Rotates the path by `degrees` about `(cx, cy)`.
    ///
    /// Horizontal and vertical lines keep their kind for half turns, swap
    /// kinds for quarter turns and become plain lines otherwise.
    pub fn rotate(&mut self, cx: f64, cy: f64, degrees: f64) {
        let angle = degrees.rem_euclid(360.0);
        let quarter = quarter_turn(angle);
        if quarter == Some(0) {
            return;
        }
        let (sin, cos) = match quarter {
            Some(1) => (1.0, 0.0),
            Some(2) => (0.0, -1.0),
            Some(3) => (-1.0, 0.0),
            _ => angle.to_radians().sin_cos(),
        };
        let center = Point2::new(cx, cy);
        debug!(degrees, ?quarter, "rotating path");

        self.remap(
            |p| {
                let v = p - center;
                Point2::new(
                    center.x + v.x * cos - v.y * sin,
                    center.y + v.x * sin + v.y * cos,
                )
            },
            |segment| match (*segment, quarter) {
                (Segment::Arc(a), _) => Segment::Arc(ArcParams {
                    x_rotation: (a.x_rotation + angle).rem_euclid(360.0),
                    ..a
                }),
                (Segment::HLine(v), Some(2)) => Segment::HLine(v),
                (Segment::VLine(v), Some(2)) => Segment::VLine(v),
                (Segment::HLine(v), Some(1 | 3)) => Segment::VLine(v),
                (Segment::VLine(v), Some(1 | 3)) => Segment::HLine(v),
                (Segment::HLine(_) | Segment::VLine(_), _) => Segment::Line(Point2::origin()),
                (other, _) => other,
            },
        );
    }

    /// Centers the bounding box of targets and control points on the origin
    /// and returns the applied offset. An empty path returns a zero offset.
    pub fn normalize(&mut self) -> Vector2 {
        let Some((min, max)) = self.bounding_box() else {
            return Vector2::zeros();
        };
        let offset = -(min.coords + max.coords) * 0.5;
        self.translate(offset.x, offset.y, false);
        offset
    }

    /// Reverses [`Path::normalize`].
    pub fn denormalize(&mut self, offset: Vector2) {
        self.translate(-offset.x, -offset.y, false);
    }

    /// Maps every point of the absolute geometry and re-encodes each command
    /// from it, keeping each command's relativity.
    fn remap<M, T>(&mut self, map: M, retemplate: T)
    where
        M: Fn(&Point2) -> Point2,
        T: Fn(&Segment) -> Segment,
    {
        let mut start = Point2::origin();
        for cmd in self.commands_mut().iter_mut() {
            let resolved = cmd.resolved();
            let controls = match resolved.controls {
                Controls::None => Controls::None,
                Controls::One(a) => Controls::One(map(&a)),
                Controls::Two(a, b) => Controls::Two(map(&a), map(&b)),
            };
            let geometry = Resolved {
                start,
                target: map(&resolved.target),
                controls,
                reflects: resolved.reflects,
            };
            let template = retemplate(cmd.segment());
            let segment = PathCommand::encode(&template, &geometry, cmd.is_relative());
            cmd.set_segment(segment);
            start = geometry.target;
        }
        self.refresh_absolute_positions();
    }
}

/// Index of the quarter turn `angle` (in `[0, 360)`) lands on, if any.
#[allow(clippy::cast_possible_truncation)]
fn quarter_turn(angle: f64) -> Option<u8> {
    let turns = angle / 90.0;
    let nearest = turns.round();
    if (turns - nearest).abs() > TOLERANCE {
        return None;
    }
    // `nearest` is in 0..=4; 4 is a full turn.
    match nearest as i64 {
        1 => Some(1),
        2 => Some(2),
        3 => Some(3),
        _ => Some(0),
    }
}
