//! Cutting shapes along a line or curve.
//!
//! This module only builds the blade; subtracting it from the shape is left
//! to a [`BooleanEngine`] supplied by the host.
mod blade;
mod split_pattern;

pub use blade::{Blade, BladeParams, CutBlade};
pub use split_pattern::{BooleanEngine, SplitPattern};
