use thiserror::Error;

use crate::path::CommandKind;

/// Top-level error type for the contourkit editing kernel.
#[derive(Debug, Error)]
pub enum ContourError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Malformed path data. `offset` is the byte offset of the first token that
/// could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid path data at offset {offset}: {kind}")]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    #[must_use]
    pub fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// What went wrong while tokenizing path data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("path data must start with a moveto command")]
    MissingMoveTo,

    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("malformed number")]
    InvalidNumber,

    #[error("arc flag must be 0 or 1")]
    InvalidFlag,

    #[error("command {command:?} expects {expected} parameters")]
    MissingParameters { command: char, expected: usize },
}

/// Errors related to the structure of a path's command list.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("command index {index} is out of range for a path of {len} commands")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a path must begin with a moveto command, found {found:?}")]
    MissingInitialMove { found: CommandKind },

    #[error("contour not found in document")]
    ContourNotFound,

    #[error("command {index} has no previous command to start from")]
    NoPreviousCommand { index: usize },

    #[error("command {index} ({kind:?}) cannot be split: {reason}")]
    UnsplittableCommand {
        index: usize,
        kind: CommandKind,
        reason: &'static str,
    },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate (zero-length) segment at ({x}, {y})")]
    DegenerateSegment { x: f64, y: f64 },

    #[error("sampling precision {0} is outside [0, 100]")]
    PrecisionOutOfRange(f64),

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors raised by composite operations and their collaborators.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("collaborator failed: {0}")]
    Collaborator(String),
}

/// Convenience type alias for results using [`ContourError`].
pub type Result<T> = std::result::Result<T, ContourError>;
