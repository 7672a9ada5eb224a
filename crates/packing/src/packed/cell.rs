//! Periodic cell spanned by two edge-length bases and an angle basis.

use nalgebra::{Matrix2, Vector2};

use crate::basis::{BasisId, BasisSet};
use crate::geom2::Vect2;

/// Handles into the run's `BasisSet`; `x_len == y_len` for cells whose
/// edges must stay equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x_len: BasisId,
    pub y_len: BasisId,
    pub angle: BasisId,
}

impl Cell {
    /// Columns are the real-space edge vectors `a = (x_len, 0)` and
    /// `b = y_len·(cos θ, sin θ)`.
    pub fn matrix(&self, bases: &BasisSet) -> Matrix2<f64> {
        let a = bases.value(self.x_len);
        let b = bases.value(self.y_len);
        let theta = bases.value(self.angle);
        Matrix2::new(a, b * theta.cos(), 0.0, b * theta.sin())
    }

    pub fn area(&self, bases: &BasisSet) -> f64 {
        bases.value(self.x_len) * bases.value(self.y_len) * bases.value(self.angle).sin().abs()
    }

    pub fn fractional_to_real(&self, bases: &BasisSet, fractional: Vect2) -> Vect2 {
        Vect2::from(self.matrix(bases) * Vector2::from(fractional))
    }
}
