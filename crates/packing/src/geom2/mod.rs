//! 2D vectors and the overlap predicates built on them.
//!
//! Purpose
//! - Provide the small value types (`Vect2`, `Vect3`) used for fractional
//!   coordinates, site variables and placed vertices.
//! - Provide the orientation / segment predicates that decide whether two
//!   placed polygons overlap.
//!
//! Conventions
//! - Orientation follows screen coordinates (y grows downwards): `+1` is a
//!   clockwise turn, `-1` counter-clockwise, `0` collinear.
//! - Segments are closed: touching counts as crossing.
//! - NaN is never coerced; it flows through arithmetic unchanged.
//!
//! Code cross-refs: `crate::packed::instance` (overlap search), `crate::shape`.

mod predicates;
mod types;

pub use predicates::{
    on_segment, polygon_contains, polygons_intersect, segments_cross, triplet_orientation,
};
pub(crate) use types::positive_modulo;
pub use types::{Vect2, Vect3};

#[cfg(test)]
mod tests;
