mod nearest;

pub use nearest::{points_in_draw_order, NearestHit, NearestPoint, DEFAULT_STEP};
