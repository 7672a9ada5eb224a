//! Bounded search parameters ("bases") and the arena that links them.
//!
//! Purpose
//! - A `Basis` is one scalar the search may move: a cell length, the cell
//!   angle, a fractional site coordinate or a shape orientation.
//! - Every write clamps into `[min, max]`; out-of-range values are never an
//!   error.
//!
//! Linking
//! - All bases of one run live in a `BasisSet`, addressed by `BasisId`.
//! - A `CellAngle` basis names the two cell-length bases it drives. Changing
//!   the angle from `θ₀` to `θ₁` scales each length by `sqrt(sin θ₀ / sin θ₁)`,
//!   which keeps the cell area fixed. The update runs inside
//!   `BasisSet::set_value`, so it has completed when the call returns.
//! - A length basis shared by both edges (square and hexagonal cells) is
//!   scaled once.
//!
//! Mutation history
//! - `previous` holds the value before the latest write; `revert` restores it
//!   (for the angle, together with its linked lengths).
//! - `reset` restores the construction-time default. Resetting an angle also
//!   returns its lengths to their defaults, the lengths at the default angle.
//! - Writes on a single `Basis` are crate-internal; callers mutate through
//!   the `BasisSet` so links always run.
//!
//! Ids
//! - `BasisSet` methods taking a `BasisId` panic on an id the set did not
//!   hand out, like slice indexing; `get` is the checked lookup.

use std::f64::consts::{PI, TAU};
use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cfg::DEFAULT_STEP_SIZE;
use crate::geom2::positive_modulo;
use crate::random::open_unit;

/// Index of a basis inside its `BasisSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BasisId(pub usize);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BasisError {
    #[error("basis {0:?} does not exist in this set")]
    UnknownId(BasisId),
    #[error("expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

/// How a basis proposes new values and whether it drives other bases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BasisKind {
    /// Additive proposals of width `step_size · value_range()`.
    Free,
    /// `min == max == default`; writes are ignored.
    Fixed,
    /// Cell edge length; proposals scale the value by `1 ± step_size/2`.
    CellLength,
    /// Cell angle driving the two cell edge lengths.
    CellAngle { x_len: BasisId, y_len: BasisId },
    /// Shape orientation on a mirror line; moves between the orientations
    /// that keep a mirror of the shape on the line.
    Mirror { mirrors: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Basis {
    value: f64,
    previous: f64,
    default: f64,
    min: f64,
    max: f64,
    step_size: f64,
    kind: BasisKind,
}

impl Basis {
    /// Free basis; `value` is clamped into `[min, max]`.
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Self::with_kind(value, min, max, BasisKind::Free)
    }

    pub fn fixed(value: f64) -> Self {
        Self::with_kind(value, value, value, BasisKind::Fixed)
    }

    pub fn cell_length(value: f64, min: f64, max: f64) -> Self {
        Self::with_kind(value, min, max, BasisKind::CellLength)
    }

    pub fn cell_angle(value: f64, min: f64, max: f64, x_len: BasisId, y_len: BasisId) -> Self {
        Self::with_kind(value, min, max, BasisKind::CellAngle { x_len, y_len })
    }

    /// Orientation basis over `[0, 2π]` for a shape with `mirrors` mirror lines.
    pub fn mirror(value: f64, mirrors: u32) -> Self {
        let start = positive_modulo(value, TAU);
        Self::with_kind(start, 0.0, TAU, BasisKind::Mirror { mirrors })
    }

    fn with_kind(value: f64, min: f64, max: f64, kind: BasisKind) -> Self {
        let value = value.clamp(min, max);
        Self {
            value,
            previous: value,
            default: value,
            min,
            max,
            step_size: DEFAULT_STEP_SIZE,
            kind,
        }
    }

    /// Builder-style override of the proposal width.
    pub fn with_step(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
    #[inline]
    pub fn previous(&self) -> f64 {
        self.previous
    }
    #[inline]
    pub fn default_value(&self) -> f64 {
        self.default
    }
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }
    #[inline]
    pub fn kind(&self) -> BasisKind {
        self.kind
    }

    #[inline]
    pub fn value_range(&self) -> f64 {
        self.max - self.min
    }

    /// Only fixed bases and zero-width ranges are immovable.
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.kind != BasisKind::Fixed && self.value_range() > 0.0
    }

    /// Clamped write. Links are not followed here; use `BasisSet::set_value`.
    pub(crate) fn set_value(&mut self, value: f64) {
        if self.kind == BasisKind::Fixed {
            return;
        }
        self.previous = self.value;
        self.value = value.clamp(self.min, self.max);
    }

    /// Restore the default value.
    pub(crate) fn reset(&mut self) {
        self.set_value(self.default);
    }

    /// Restore the value held before the latest write.
    pub(crate) fn revert(&mut self) {
        self.value = self.previous;
    }

    /// Candidate for the next value; nothing is applied.
    pub fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = open_unit(rng);
        match self.kind {
            BasisKind::Fixed => self.value,
            BasisKind::Free | BasisKind::CellAngle { .. } => {
                self.value + self.step_size * self.value_range() * (u - 0.5)
            }
            BasisKind::CellLength => self.value * (1.0 + self.step_size * (u - 0.5)),
            BasisKind::Mirror { mirrors } => {
                let step = PI / mirrors.max(1) as f64;
                if u < 0.25 {
                    positive_modulo(self.value + step, TAU)
                } else if u < 0.5 {
                    positive_modulo(self.value - step, TAU)
                } else {
                    positive_modulo(self.value + PI, TAU)
                }
            }
        }
    }
}

/// Arena of the bases of one run.
#[derive(Clone, Debug, Default)]
pub struct BasisSet {
    bases: Vec<Basis>,
}

impl BasisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a basis. A cell angle may only link bases already in the set.
    pub fn push(&mut self, basis: Basis) -> Result<BasisId, BasisError> {
        if let BasisKind::CellAngle { x_len, y_len } = basis.kind {
            for id in [x_len, y_len] {
                if id.0 >= self.bases.len() {
                    return Err(BasisError::UnknownId(id));
                }
            }
        }
        self.bases.push(basis);
        Ok(BasisId(self.bases.len() - 1))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bases.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn get(&self, id: BasisId) -> Option<&Basis> {
        self.bases.get(id.0)
    }

    /// # Panics
    /// If `id` was not handed out by this set.
    #[inline]
    pub fn value(&self, id: BasisId) -> f64 {
        self.bases[id.0].value
    }

    pub fn iter(&self) -> impl Iterator<Item = (BasisId, &Basis)> {
        self.bases.iter().enumerate().map(|(i, b)| (BasisId(i), b))
    }

    /// Bases a proposal can actually move.
    pub fn variable_ids(&self) -> Vec<BasisId> {
        self.iter()
            .filter(|(_, b)| b.is_variable())
            .map(|(id, _)| id)
            .collect()
    }

    /// Clamped write followed by link propagation.
    ///
    /// # Panics
    /// If `id` was not handed out by this set.
    pub fn set_value(&mut self, id: BasisId, value: f64) {
        let basis = &mut self.bases[id.0];
        basis.set_value(value);
        if let BasisKind::CellAngle { x_len, y_len } = basis.kind {
            let (from, to) = (basis.previous, basis.value);
            self.rescale_lengths(x_len, y_len, from, to);
        }
    }

    /// Restore the default. A cell angle also restores its lengths to their
    /// defaults, so clamping during earlier angle moves cannot leak through.
    ///
    /// # Panics
    /// If `id` was not handed out by this set.
    pub fn reset(&mut self, id: BasisId) {
        self.bases[id.0].reset();
        if let BasisKind::CellAngle { x_len, y_len } = self.bases[id.0].kind {
            self.bases[x_len.0].reset();
            if y_len != x_len {
                self.bases[y_len.0].reset();
            }
        }
    }

    /// Restore every basis to its default, without link propagation.
    pub fn reset_all(&mut self) {
        for basis in &mut self.bases {
            basis.reset();
        }
    }

    /// Undo the latest write to `id`, including the lengths a cell angle moved.
    ///
    /// # Panics
    /// If `id` was not handed out by this set.
    pub fn revert(&mut self, id: BasisId) {
        self.bases[id.0].revert();
        if let BasisKind::CellAngle { x_len, y_len } = self.bases[id.0].kind {
            self.bases[x_len.0].revert();
            if y_len != x_len {
                self.bases[y_len.0].revert();
            }
        }
    }

    /// # Panics
    /// If `id` was not handed out by this set.
    pub fn propose<R: Rng + ?Sized>(&self, id: BasisId, rng: &mut R) -> f64 {
        self.bases[id.0].propose(rng)
    }

    /// Current values in id order.
    pub fn values(&self) -> Vec<f64> {
        self.bases.iter().map(|b| b.value).collect()
    }

    /// Overwrite all values (clamped) without link propagation, e.g. to
    /// restore a snapshot taken with `values`.
    pub fn load_values(&mut self, values: &[f64]) -> Result<(), BasisError> {
        if values.len() != self.bases.len() {
            return Err(BasisError::LengthMismatch {
                expected: self.bases.len(),
                got: values.len(),
            });
        }
        for (basis, &v) in self.bases.iter_mut().zip(values) {
            basis.set_value(v);
        }
        Ok(())
    }

    fn rescale_lengths(&mut self, x_len: BasisId, y_len: BasisId, from: f64, to: f64) {
        let factor = (from.sin() / to.sin()).sqrt();
        if !factor.is_finite() {
            return;
        }
        let x_val = self.bases[x_len.0].value;
        self.bases[x_len.0].set_value(x_val * factor);
        if y_len != x_len {
            let y_val = self.bases[y_len.0].value;
            self.bases[y_len.0].set_value(y_val * factor);
        }
    }
}

/// Panics on an id the set did not hand out; `BasisSet::get` is the checked
/// form.
impl Index<BasisId> for BasisSet {
    type Output = Basis;
    fn index(&self, id: BasisId) -> &Basis {
        &self.bases[id.0]
    }
}
