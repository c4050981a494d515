use tracing::debug;

use super::polygon_offset::PolygonOffset;
use crate::error::Result;
use crate::math::polygon_2d::signed_area_2d;
use crate::operations::sampling::{PathSampler, PathToPolygon, SamplingParams};
use crate::path::{CommandKind, Path, PathCommand};

/// Draws an outward or inward margin around a path.
///
/// Every subpath is sampled into a polygon, offset, repaired and written
/// back as an absolute `M … L … Z` contour. Curves are only followed as
/// closely as the sampling precision allows.
///
/// The first subpath sets the orientation. Subpaths wound the other way are
/// holes and move the opposite way, so an outward margin shrinks them.
#[derive(Debug)]
pub struct PathMargin {
    distance: f64,
    outward: bool,
    params: SamplingParams,
}

impl PathMargin {
    /// Creates a new margin operation with default sampling parameters.
    #[must_use]
    pub fn new(distance: f64, outward: bool) -> Self {
        Self {
            distance,
            outward,
            params: SamplingParams::default(),
        }
    }

    /// Sets the sampling parameters.
    #[must_use]
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the margin on path data.
    ///
    /// # Errors
    ///
    /// Returns parse errors for malformed data, sampling errors, and the
    /// errors of [`PolygonOffset::execute`] for subpaths that do not sample
    /// into a polygon.
    pub fn execute<S: PathSampler>(&self, data: &str, sampler: &S) -> Result<String> {
        let mut path = Path::parse(data)?;
        path.set_relative(false);

        let sample = PathToPolygon::new(self.params.precision);
        let polygons = subpath_data(&path)?
            .iter()
            .map(|subpath| sample.execute(subpath, sampler))
            .collect::<Result<Vec<_>>>()?;
        let orientation = polygons.first().map_or(0.0, |first| signed_area_2d(first).signum());

        let mut contours = Vec::with_capacity(polygons.len());
        let mut holes = 0;
        for polygon in &polygons {
            let hole = signed_area_2d(polygon).signum() * orientation < 0.0;
            holes += usize::from(hole);
            let outward = self.outward != hole;
            let offset = PolygonOffset::new(polygon, self.distance, outward).execute()?;
            contours.push(Path::from_polygon(&offset).to_string());
        }

        debug!(
            contours = contours.len(),
            holes,
            distance = self.distance,
            outward = self.outward,
            "computed path margin"
        );
        Ok(contours.join(" "))
    }
}

/// Absolute path data of each subpath, split at every moveto.
fn subpath_data(path: &Path) -> Result<Vec<String>> {
    let mut groups: Vec<Vec<PathCommand>> = Vec::new();
    for cmd in path.commands() {
        match groups.last_mut() {
            Some(group) if cmd.kind() != CommandKind::Move => group.push(cmd.clone()),
            _ => groups.push(vec![cmd.clone()]),
        }
    }
    groups
        .into_iter()
        .map(|group| Ok(Path::from_commands(group)?.to_string()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::sampling::FlatteningSampler;

    #[test]
    fn outward_square_margin() {
        let data = PathMargin::new(2.0, true)
            .execute("M0,0 L10,0 L10,10 L0,10 Z", &FlatteningSampler::default())
            .unwrap();
        let margin = Path::parse(&data).unwrap();
        let (min, max) = margin.bounding_box().unwrap();
        assert!((min.x + 2.0).abs() < 1e-9 && (min.y + 2.0).abs() < 1e-9);
        assert!((max.x - 12.0).abs() < 1e-9 && (max.y - 12.0).abs() < 1e-9);
        assert_eq!(margin.commands().last().unwrap().kind(), CommandKind::Close);
    }

    #[test]
    fn each_subpath_gets_a_contour() {
        let data = PathMargin::new(1.0, false)
            .execute(
                "M0 0 h10 v10 h-10 z m20 0 h10 v10 h-10 z",
                &FlatteningSampler::default(),
            )
            .unwrap();
        let path = Path::parse(&data).unwrap();
        let moves = path.commands().iter().filter(|c| c.kind() == CommandKind::Move);
        assert_eq!(moves.count(), 2);
        let (min, max) = path.bounding_box().unwrap();
        // Inward corners move along their bisector only.
        let h = 1.0 / 2.0_f64.sqrt();
        assert!((min.x - h).abs() < 1e-9);
        assert!((max.x - (30.0 - h)).abs() < 1e-9);
    }

    fn contour_bounds(data: &str) -> Vec<(Point2, Point2)> {
        subpath_data(&Path::parse(data).unwrap())
            .unwrap()
            .iter()
            .map(|d| Path::parse(d).unwrap().bounding_box().unwrap())
            .collect()
    }

    #[test]
    fn outward_margin_shrinks_holes() {
        // Counter-clockwise outline around a clockwise hole at [2, 8].
        let data = PathMargin::new(1.0, true)
            .execute(
                "M0 0 h10 v10 h-10 z M2 2 v6 h6 v-6 z",
                &FlatteningSampler::default(),
            )
            .unwrap();
        let bounds = contour_bounds(&data);
        assert_eq!(bounds.len(), 2);

        let (min, max) = bounds[0];
        assert!((min.x + 1.0).abs() < 1e-9 && (max.x - 11.0).abs() < 1e-9);
        let (min, max) = bounds[1];
        assert!(min.x > 2.5 && min.y > 2.5);
        assert!(max.x < 7.5 && max.y < 7.5);
    }

    #[test]
    fn inward_margin_grows_holes() {
        let data = PathMargin::new(1.0, false)
            .execute(
                "M0 0 h10 v10 h-10 z M2 2 v6 h6 v-6 z",
                &FlatteningSampler::default(),
            )
            .unwrap();
        let (min, max) = contour_bounds(&data)[1];
        assert!((min.x - 1.0).abs() < 1e-9 && (max.x - 9.0).abs() < 1e-9);
    }

    #[test]
    fn subpaths_split_at_moves() {
        let path = Path::parse("M0 0 L1 0 M5 5 L6 5 Z").unwrap();
        assert_eq!(subpath_data(&path).unwrap(), vec!["M0,0 L1,0", "M5,5 L6,5 Z"]);
    }

    #[test]
    fn malformed_data_is_an_error() {
        assert!(PathMargin::new(1.0, true)
            .execute("L0 0", &FlatteningSampler::default())
            .is_err());
    }
}
