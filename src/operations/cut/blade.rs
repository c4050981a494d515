use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::bezier::{quad_point, QuadPoints};
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{lerp, Point2};
use crate::path::Path;

/// Parameters for building cut blades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeParams {
    /// Full width of the blade.
    pub thickness: f64,
    /// Points sampled along a curved cut, endpoints included.
    pub curve_samples: usize,
}

impl Default for BladeParams {
    fn default() -> Self {
        Self {
            thickness: 0.5,
            curve_samples: 32,
        }
    }
}

/// A thin closed polygon along a cut, used as the subtrahend of a boolean
/// subtraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Blade {
    outline: Vec<Point2>,
}

impl Blade {
    /// The outline, without a closing duplicate.
    #[must_use]
    pub fn outline(&self) -> &[Point2] {
        &self.outline
    }

    /// The outline as closed absolute path data.
    #[must_use]
    pub fn to_path_data(&self) -> String {
        Path::from_polygon(&self.outline).to_string()
    }
}

/// Builds the blade for a cut from `from` to `to`.
///
/// A straight cut gives a quadrilateral. A curved cut follows the quadratic
/// curve whose middle passes `depth` units left of the chord midpoint
/// (negative depths bend right), sampled into a ribbon.
#[derive(Debug)]
pub struct CutBlade {
    from: Point2,
    to: Point2,
    depth: Option<f64>,
    params: BladeParams,
}

impl CutBlade {
    /// Creates a straight blade.
    #[must_use]
    pub fn new(from: Point2, to: Point2) -> Self {
        Self {
            from,
            to,
            depth: None,
            params: BladeParams::default(),
        }
    }

    /// Bends the cut by `depth` at its middle.
    #[must_use]
    pub fn curved(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Sets the blade parameters.
    #[must_use]
    pub fn with_params(mut self, params: BladeParams) -> Self {
        self.params = params;
        self
    }

    /// Builds the blade.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the endpoints coincide
    /// and `GeometryError::ParameterOutOfRange` for a non-positive thickness
    /// or fewer than 2 curve samples.
    pub fn execute(&self) -> Result<Blade> {
        let BladeParams {
            thickness,
            curve_samples,
        } = self.params;
        if !(thickness > 0.0 && thickness.is_finite()) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "thickness",
                value: thickness,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        if curve_samples < 2 {
            #[allow(clippy::cast_precision_loss)]
            let value = curve_samples as f64;
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "curve_samples",
                value,
                min: 2.0,
                max: f64::INFINITY,
            }
            .into());
        }

        let half = thickness / 2.0;
        let normal = left_normal(segment_direction(&self.from, &self.to)?);
        let outline = match self.depth {
            None => vec![
                self.from + normal * half,
                self.to + normal * half,
                self.to - normal * half,
                self.from - normal * half,
            ],
            Some(depth) => {
                let ctrl = lerp(&self.from, &self.to, 0.5) + normal * (2.0 * depth);
                ribbon(&[self.from, ctrl, self.to], curve_samples, half)?
            }
        };

        debug!(
            curved = self.depth.is_some(),
            thickness,
            vertices = outline.len(),
            "built cut blade"
        );
        Ok(Blade { outline })
    }
}

/// Offsets `samples` points of the curve by `half` on both sides: the left
/// side forward, then the right side backward.
fn ribbon(curve: &QuadPoints, samples: usize, half: f64) -> Result<Vec<Point2>> {
    let [p0, p1, p2] = *curve;
    let mut left = Vec::with_capacity(samples);
    let mut right = Vec::with_capacity(samples);
    for i in 0..samples {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / (samples - 1) as f64;
        let point = quad_point(curve, t);
        let tangent = (p1 - p0) * (1.0 - t) + (p2 - p1) * t;
        let normal = left_normal(segment_direction(&point, &(point + tangent))?);
        left.push(point + normal * half);
        right.push(point - normal * half);
    }
    left.extend(right.into_iter().rev());
    Ok(left)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::signed_area_2d;
    use crate::operations::offset::has_crossings;
    use crate::ContourError;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn straight_blade_is_a_thin_rectangle() {
        let blade = CutBlade::new(p(0.0, 5.0), p(10.0, 5.0)).execute().unwrap();
        assert_eq!(
            blade.outline(),
            &[p(0.0, 5.25), p(10.0, 5.25), p(10.0, 4.75), p(0.0, 4.75)]
        );
        assert_abs_diff_eq!(signed_area_2d(blade.outline()).abs(), 5.0, epsilon = 1e-12);
        assert_eq!(
            blade.to_path_data(),
            "M0,5.25 L10,5.25 L10,4.75 L0,4.75 Z"
        );
    }

    #[test]
    fn curved_blade_passes_depth_at_middle() {
        let params = BladeParams {
            thickness: 1.0,
            curve_samples: 5,
        };
        let blade = CutBlade::new(p(0.0, 0.0), p(10.0, 0.0))
            .curved(2.0)
            .with_params(params)
            .execute()
            .unwrap();
        let outline = blade.outline();
        assert_eq!(outline.len(), 10);
        // Sample 2 is the curve middle, (5, 2), with a vertical normal.
        assert_abs_diff_eq!(outline[2], p(5.0, 2.5), epsilon = 1e-12);
        assert_abs_diff_eq!(outline[7], p(5.0, 1.5), epsilon = 1e-12);
        assert!(!has_crossings(outline));
    }

    #[test]
    fn negative_depth_bends_right() {
        let blade = CutBlade::new(p(0.0, 0.0), p(10.0, 0.0))
            .curved(-3.0)
            .execute()
            .unwrap();
        let lowest = blade
            .outline()
            .iter()
            .map(|q| q.y)
            .fold(f64::INFINITY, f64::min);
        assert!(lowest < -3.0);
    }

    #[test]
    fn invalid_parameters() {
        let zero = BladeParams {
            thickness: 0.0,
            ..BladeParams::default()
        };
        assert!(matches!(
            CutBlade::new(p(0.0, 0.0), p(1.0, 0.0)).with_params(zero).execute(),
            Err(ContourError::Geometry(GeometryError::ParameterOutOfRange { parameter: "thickness", .. }))
        ));
        let one_sample = BladeParams {
            curve_samples: 1,
            ..BladeParams::default()
        };
        assert!(CutBlade::new(p(0.0, 0.0), p(1.0, 0.0))
            .curved(1.0)
            .with_params(one_sample)
            .execute()
            .is_err());
        assert!(matches!(
            CutBlade::new(p(1.0, 1.0), p(1.0, 1.0)).execute(),
            Err(ContourError::Geometry(GeometryError::DegenerateSegment { .. }))
        ));
    }
}
