//! Outline editing kernel for 2D vector paths.
//!
//! Path data is parsed into a [`Path`] of typed commands that keeps the
//! absolute geometry of every command cached. Operations in [`operations`]
//! split, query, offset and cut paths; [`Document`] holds multi-contour
//! shapes.
pub mod document;
pub mod error;
pub mod math;
pub mod operations;
pub mod path;

pub use document::{ContourId, Document};
pub use error::{ContourError, Result};
pub use path::{CommandKind, Path, PathCommand, Segment};
