//! Mutable packing state: the bases of one run over a borrowed shape and group.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::isopointal::compatible;
use super::{any_overlap, Cell, SearchCfg, ShapeInstance, StateError};
use crate::basis::{Basis, BasisId, BasisSet};
use crate::geom2::{positive_modulo, Vect2};
use crate::random::open_unit;
use crate::shape::Shape;
use crate::symmetry::{Lattice, WallpaperGroup};

/// Smallest cell edge a run may shrink to.
const MIN_CELL_LENGTH: f64 = 0.1;

/// One Wyckoff site in use, with the bases holding its free variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccupiedSite {
    /// Index into the group's sites.
    pub site: usize,
    pub x: BasisId,
    pub y: BasisId,
    pub angle: BasisId,
}

/// Handedness mix of the placed shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chirality {
    /// Every shape has the same handedness.
    Chiral,
    /// Both hands present in unequal numbers.
    Scalemic,
    /// Both hands present in equal numbers.
    Achiral,
}

/// What one `step` did with its proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Accepted,
    /// Overlap or cell misfit; the proposal was reverted.
    Invalid,
    /// Valid but refused by the acceptance rule; reverted.
    Declined,
}

#[derive(Clone, Debug)]
pub struct PackedState<'a> {
    shape: &'a Shape,
    group: &'a WallpaperGroup,
    sites: Vec<OccupiedSite>,
    cell: Cell,
    bases: BasisSet,
}

impl<'a> PackedState<'a> {
    /// Random overlap-free start for `shape` on the given sites of `group`.
    ///
    /// Site indices may repeat, and every site must be one `valid_sites`
    /// lists for the shape. Up to `cfg.init_attempts` random draws are tried
    /// before giving up with `StateError::NoValidStart`.
    pub fn initialise<R: Rng + ?Sized>(
        shape: &'a Shape,
        group: &'a WallpaperGroup,
        site_indices: &[usize],
        cfg: &SearchCfg,
        rng: &mut R,
    ) -> Result<Self, StateError> {
        if site_indices.is_empty() {
            return Err(StateError::NoSites);
        }
        let len = group.sites().len();
        if let Some(&index) = site_indices.iter().find(|&&i| i >= len) {
            return Err(StateError::UnknownSite { index, len });
        }
        for &index in site_indices {
            let site = &group.sites()[index];
            if !compatible(shape, site) {
                return Err(StateError::IncompatibleSite {
                    index,
                    letter: site.letter(),
                });
            }
        }
        let attempts = cfg.init_attempts.max(1);
        for attempt in 0..attempts {
            let state = Self::draw(shape, group, site_indices, cfg, rng)?;
            if state.is_valid() {
                debug!(attempt, group = group.label(), "initial state found");
                return Ok(state);
            }
        }
        Err(StateError::NoValidStart { attempts })
    }

    fn draw<R: Rng + ?Sized>(
        shape: &'a Shape,
        group: &'a WallpaperGroup,
        site_indices: &[usize],
        cfg: &SearchCfg,
        rng: &mut R,
    ) -> Result<Self, StateError> {
        let mut bases = BasisSet::new();
        let replicas: usize = site_indices
            .iter()
            .map(|&i| group.sites()[i].multiplicity())
            .sum();
        let length = (4.0 * shape.max_radius() * replicas as f64).max(MIN_CELL_LENGTH);

        let length_basis =
            || Basis::cell_length(length, MIN_CELL_LENGTH, length).with_step(cfg.length_step);
        let x_len = bases.push(length_basis())?;
        let y_len = if group.a_b_equal() {
            x_len
        } else {
            bases.push(length_basis())?
        };
        let angle = match group.lattice() {
            Lattice::Hexagonal => Basis::fixed(Lattice::Hexagonal.canonical_angle()),
            Lattice::Rectangular | Lattice::Square => Basis::fixed(FRAC_PI_2),
            Lattice::Oblique => Basis::cell_angle(
                FRAC_PI_4 + open_unit(rng) * FRAC_PI_2,
                FRAC_PI_4,
                3.0 * FRAC_PI_4,
                x_len,
                y_len,
            )
            .with_step(cfg.step_size),
        };
        let angle = bases.push(angle)?;
        let cell = Cell {
            x_len,
            y_len,
            angle,
        };

        let mut sites = Vec::with_capacity(site_indices.len());
        for &index in site_indices {
            let wyckoff = &group.sites()[index];
            let coordinate = |free: bool, rng: &mut R| {
                if free {
                    Basis::new(open_unit(rng), 0.0, 1.0).with_step(cfg.step_size)
                } else {
                    Basis::fixed(0.0)
                }
            };
            let x = bases.push(coordinate(wyckoff.vary_x(), rng))?;
            let y = bases.push(coordinate(wyckoff.vary_y(), rng))?;
            // Sites were checked against the shape, so a mirror site always
            // meets a shape with mirrors.
            let orientation = match wyckoff.mirror_type().line_angle() {
                Some(line) if wyckoff.has_mirror() => Basis::mirror(line, shape.mirrors()),
                _ => Basis::new(open_unit(rng) * TAU, 0.0, TAU).with_step(cfg.step_size),
            };
            let angle = bases.push(orientation)?;
            sites.push(OccupiedSite {
                site: index,
                x,
                y,
                angle,
            });
        }

        Ok(Self {
            shape,
            group,
            sites,
            cell,
            bases,
        })
    }

    #[inline]
    pub fn shape(&self) -> &'a Shape {
        self.shape
    }
    #[inline]
    pub fn group(&self) -> &'a WallpaperGroup {
        self.group
    }
    #[inline]
    pub fn sites(&self) -> &[OccupiedSite] {
        &self.sites
    }
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }
    #[inline]
    pub fn bases(&self) -> &BasisSet {
        &self.bases
    }

    /// Shapes placed in the home cell, one per image of every occupied site.
    pub fn instances(&self) -> Vec<ShapeInstance> {
        let lattice = self.cell.matrix(&self.bases);
        let mut out = Vec::with_capacity(self.replicas());
        for (occupied, site) in self.sites.iter().enumerate() {
            let wyckoff = &self.group.sites()[site.site];
            let position = Vect2::new(self.bases.value(site.x), self.bases.value(site.y));
            let angle = self.bases.value(site.angle);
            for (image, transform) in wyckoff.transforms().iter().enumerate() {
                out.push(ShapeInstance::place(
                    self.shape,
                    transform,
                    position,
                    angle,
                    &lattice,
                    occupied,
                    image,
                ));
            }
        }
        out
    }

    /// Number of shapes per cell.
    pub fn replicas(&self) -> usize {
        self.sites
            .iter()
            .map(|s| self.group.sites()[s.site].multiplicity())
            .sum()
    }

    pub fn cell_area(&self) -> f64 {
        self.cell.area(&self.bases)
    }

    /// Shape area per cell area.
    pub fn packing_fraction(&self) -> f64 {
        self.replicas() as f64 * self.shape.area() / self.cell_area()
    }

    /// The shapes could fit the cell at all: the fraction is finite and at most 1.
    pub fn fits_cell(&self) -> bool {
        let fraction = self.packing_fraction();
        fraction.is_finite() && fraction <= 1.0
    }

    pub fn has_overlap(&self) -> bool {
        any_overlap(
            &self.instances(),
            &self.cell.matrix(&self.bases),
            2.0 * self.shape.max_radius(),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.fits_cell() && !self.has_overlap()
    }

    /// Draw a variable basis uniformly and apply its proposal.
    pub fn propose<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<BasisId, StateError> {
        let ids = self.bases.variable_ids();
        if ids.is_empty() {
            return Err(StateError::Frozen);
        }
        let id = ids[rng.gen_range(0..ids.len())];
        let value = self.bases.propose(id, rng);
        self.bases.set_value(id, value);
        Ok(id)
    }

    /// Undo the latest proposal applied to `id`.
    pub fn revert(&mut self, id: BasisId) {
        self.bases.revert(id);
    }

    /// Back to the starting configuration.
    pub fn reset(&mut self) {
        self.bases.reset_all();
    }

    pub fn values(&self) -> Vec<f64> {
        self.bases.values()
    }

    pub fn load_values(&mut self, values: &[f64]) -> Result<(), StateError> {
        Ok(self.bases.load_values(values)?)
    }

    /// One Monte Carlo move: propose, drop invalid configurations, then let
    /// `accept(previous_fraction, new_fraction)` decide.
    pub fn step<R, F>(&mut self, rng: &mut R, accept: F) -> Result<StepOutcome, StateError>
    where
        R: Rng + ?Sized,
        F: FnOnce(f64, f64) -> bool,
    {
        let before = self.packing_fraction();
        let id = self.propose(rng)?;
        if !self.is_valid() {
            self.revert(id);
            return Ok(StepOutcome::Invalid);
        }
        if accept(before, self.packing_fraction()) {
            Ok(StepOutcome::Accepted)
        } else {
            self.revert(id);
            Ok(StepOutcome::Declined)
        }
    }

    /// Handedness mix over all placed shapes.
    pub fn chirality(&self) -> Chirality {
        let instances = self.instances();
        let total = instances.len() as i32;
        let sum: i32 = instances.iter().map(ShapeInstance::handedness).sum();
        if sum == 0 {
            Chirality::Achiral
        } else if sum.abs() == total {
            Chirality::Chiral
        } else {
            Chirality::Scalemic
        }
    }

    /// Cell edge lengths and angle in radians.
    pub fn cell_parameters(&self) -> (f64, f64, f64) {
        (
            self.bases.value(self.cell.x_len),
            self.bases.value(self.cell.y_len),
            self.bases.value(self.cell.angle),
        )
    }

    /// Orientation of occupied site `index`, reduced modulo the shape's
    /// rotational period `2π / rotational_symmetries`.
    pub fn orientation(&self, index: usize) -> Option<f64> {
        let site = self.sites.get(index)?;
        let period = TAU / self.shape.rotational_symmetries().max(1) as f64;
        Some(positive_modulo(self.bases.value(site.angle), period))
    }
}
