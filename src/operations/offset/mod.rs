mod margin;
mod polygon_offset;
mod resolve;

pub use margin::PathMargin;
pub use polygon_offset::PolygonOffset;
pub use resolve::{find_first_crossing, has_crossings, Crossing, ResolveIntersections};
