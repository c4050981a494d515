mod insert_point;
mod split;

pub use insert_point::InsertPoint;
pub use split::{SplitAt, SplitCommand, SplitResult, SPLIT_SUBDIVISIONS};
