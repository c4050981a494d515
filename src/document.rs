use slotmap::SlotMap;
use tracing::debug;

use crate::error::{PathError, Result};
use crate::path::Path;

slotmap::new_key_type! {
    /// Unique identifier for a contour in a document.
    pub struct ContourId;
}

/// A multi-contour shape: independent paths with stable ids and an explicit
/// draw order.
#[derive(Debug, Default, Clone)]
pub struct Document {
    contours: SlotMap<ContourId, Path>,
    order: Vec<ContourId>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses path data and splits it into contours.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::Parse` for malformed text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_path(&Path::parse(text)?))
    }

    /// Builds a document from the disjoint contours of `path`.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let mut document = Self::new();
        for contour in path.split_into_subpaths() {
            document.add(contour);
        }
        debug!(contours = document.len(), "built document");
        document
    }

    /// Appends a contour at the end of the draw order and returns its id.
    pub fn add(&mut self, path: Path) -> ContourId {
        let id = self.contours.insert(path);
        self.order.push(id);
        id
    }

    /// Returns the contour with the given id.
    ///
    /// # Errors
    ///
    /// Returns `PathError::ContourNotFound` for a stale or foreign id.
    pub fn get(&self, id: ContourId) -> Result<&Path> {
        self.contours
            .get(id)
            .ok_or_else(|| PathError::ContourNotFound.into())
    }

    /// Returns the contour with the given id for mutation.
    ///
    /// # Errors
    ///
    /// Returns `PathError::ContourNotFound` for a stale or foreign id.
    pub fn get_mut(&mut self, id: ContourId) -> Result<&mut Path> {
        self.contours
            .get_mut(id)
            .ok_or_else(|| PathError::ContourNotFound.into())
    }

    /// Removes a contour and returns it.
    ///
    /// # Errors
    ///
    /// Returns `PathError::ContourNotFound` for a stale or foreign id.
    pub fn remove(&mut self, id: ContourId) -> Result<Path> {
        let path = self
            .contours
            .remove(id)
            .ok_or(PathError::ContourNotFound)?;
        self.order.retain(|&other| other != id);
        Ok(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the contours in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (ContourId, &Path)> {
        self.order
            .iter()
            .filter_map(|&id| self.contours.get(id).map(|path| (id, path)))
    }

    /// Serializes every contour in draw order as one path-data string.
    #[must_use]
    pub fn to_path_data(&self, minify: bool) -> String {
        let separator = if minify { "" } else { " " };
        self.iter()
            .map(|(_, path)| path.to_path_data(minify))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ContourError;

    #[test]
    fn contours_in_draw_order() {
        let doc = Document::parse("M0 0 L1 0 L1 1 Z M5 5 L6 5 M10 10 L11 10").unwrap();
        assert_eq!(doc.len(), 2);
        let texts: Vec<String> = doc.iter().map(|(_, p)| p.to_string()).collect();
        assert_eq!(texts, vec!["M0,0 l1,0 l0,1 z m5,5 l1,0", "M10,10 l1,0"]);
        assert_eq!(
            doc.to_path_data(false),
            "M0,0 l1,0 l0,1 z m5,5 l1,0 M10,10 l1,0"
        );
    }

    #[test]
    fn add_get_remove() {
        let mut doc = Document::new();
        let a = doc.add(Path::parse("M0 0 L1 1").unwrap());
        let b = doc.add(Path::parse("M2 2 L3 3").unwrap());
        assert_eq!(doc.get(b).unwrap().len(), 2);
        doc.get_mut(a).unwrap().translate(1.0, 0.0, false);
        assert_eq!(doc.get(a).unwrap().to_string(), "M1,0 L2,1");

        let removed = doc.remove(a).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(doc.len(), 1);
        assert!(matches!(
            doc.get(a),
            Err(ContourError::Path(PathError::ContourNotFound))
        ));
        assert!(doc.remove(a).is_err());
        assert_eq!(doc.iter().next().unwrap().0, b);
    }

    #[test]
    fn empty_document() {
        let doc = Document::parse("").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.to_path_data(true), "");
    }
}
