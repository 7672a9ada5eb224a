//! Packed structures: a cell plus occupied Wyckoff sites, and the search loop.
//!
//! Purpose
//! - `PackedState` owns the bases of one run (cell lengths, cell angle, site
//!   coordinates, orientations) and borrows the shape and group it packs.
//! - Queries (`instances`, `packing_fraction`, `has_overlap`, `is_valid`) are
//!   pure; mutation goes through `propose`/`revert`/`reset`.
//! - `run` repeats `step` under a caller-supplied acceptance rule and keeps
//!   the densest valid configuration.
//!
//! Overlap model
//! - Every image of every occupied site is one placed polygon.
//! - Pairs come from `combinations(instances, 2)` plus each instance against
//!   its own periodic copies; the second member is shifted over a shell of
//!   lattice translations. Touching counts as overlap.
//!
//! Code cross-refs: `crate::symmetry` (site images), `crate::geom2`
//! (predicates), `crate::basis` (parameters).

mod cell;
mod instance;
mod isopointal;
mod search;
mod state;

use thiserror::Error;

use crate::basis::BasisError;

pub use cell::Cell;
pub use instance::{any_overlap, shell_count, ShapeInstance};
pub use isopointal::{isopointal_sites, valid_sites};
pub use search::{fit, greedy, run, SearchCfg, SearchReport, TracePoint};
pub use state::{Chirality, OccupiedSite, PackedState, StepOutcome};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("no occupied sites given")]
    NoSites,
    #[error("site index {index} out of range for a group with {len} sites")]
    UnknownSite { index: usize, len: usize },
    #[error("site {index} ({letter}) imposes symmetry the shape does not have")]
    IncompatibleSite { index: usize, letter: char },
    #[error("no overlap-free start found in {attempts} attempts")]
    NoValidStart { attempts: usize },
    #[error("nothing left to vary")]
    Frozen,
    #[error(transparent)]
    Basis(#[from] BasisError),
}

#[cfg(test)]
mod tests;
