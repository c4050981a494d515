use tracing::debug;

use super::{CommandKind, Path, PathCommand};

impl Path {
    /// Splits the path into disjoint contours.
    ///
    /// A new contour starts at every moveto that does not directly follow a
    /// closepath; a moveto after a closepath stays in the current contour (a
    /// hole or a further piece of the same shape). In each output path the
    /// first moveto is absolute and every other command is relative.
    #[must_use]
    pub fn split_into_subpaths(&self) -> Vec<Path> {
        let mut contours = Vec::new();
        let mut run: Vec<&PathCommand> = Vec::new();
        let mut previous: Option<CommandKind> = None;

        for cmd in self.commands() {
            let starts_contour =
                cmd.kind() == CommandKind::Move && previous != Some(CommandKind::Close);
            if starts_contour && !run.is_empty() {
                contours.push(rebase(&run));
                run.clear();
            }
            run.push(cmd);
            previous = Some(cmd.kind());
        }
        if !run.is_empty() {
            contours.push(rebase(&run));
        }

        debug!(contours = contours.len(), "split path into contours");
        contours
    }
}

fn rebase(run: &[&PathCommand]) -> Path {
    let commands = run
        .iter()
        .enumerate()
        .map(|(i, cmd)| {
            let relative = i > 0;
            let segment = PathCommand::encode(cmd.segment(), cmd.resolved(), relative);
            PathCommand::new(segment, relative)
        })
        .collect();
    let mut path = Path { commands };
    path.refresh_absolute_positions();
    path
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn splits_at_disjoint_movetos() {
        let path = Path::parse("M0 0 L10 0 L10 10 Z M20 20 L30 20 L30 30 Z").unwrap();
        // The second moveto follows a closepath: same contour.
        assert_eq!(path.split_into_subpaths().len(), 1);

        let path = Path::parse("M0 0 L10 0 L10 10 M20 20 L30 20 L30 30 Z").unwrap();
        let parts = path.split_into_subpaths();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].to_string(), "M0,0 l10,0 l0,10");
        assert_eq!(parts[1].to_string(), "M20,20 l10,0 l0,10 z");
    }

    #[test]
    fn contours_keep_absolute_geometry() {
        let path = Path::parse("m5 5 l1 0 m10 10 c1 1 2 2 3 3").unwrap();
        let parts = path.split_into_subpaths();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].commands()[0].target(), Point2::new(16.0, 15.0));
        assert_eq!(parts[1].commands()[1].target(), Point2::new(19.0, 18.0));
        assert!(!parts[1].commands()[0].is_relative());
    }

    #[test]
    fn empty_path_has_no_contours() {
        assert!(Path::new().split_into_subpaths().is_empty());
    }
}
