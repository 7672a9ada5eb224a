//! Plane symmetry: transforms, Wyckoff sites, wallpaper groups.
//!
//! Purpose
//! - Turn the textual site tables (`(x,y) (-x,-y)` generators plus symmetry
//!   codes like `2mm.`) into reduced affine maps once, up front.
//! - Derive what the packing search needs from them: degrees of freedom,
//!   image orientations, mirror constraints, lattice flags.
//!
//! Conventions
//! - Transforms act on fractional coordinates. Their real-space orientation
//!   is taken in the group's canonical cell (unit edges, angle `γ`), with
//!   `γ = 2π/3` for hexagonal groups and `π/2` otherwise.
//! - Special-position generators (e.g. `(x,0)`) have a singular linear part;
//!   the orientation of such an image is the general-position operation that
//!   produces it, resolved by `WallpaperGroup::new`.
//!
//! Code cross-refs: `crate::packed` consumes groups; `catalogue` holds the
//! built-in table of the 17 plane groups.

mod catalogue;
pub mod expr;
mod group;
mod transform;
mod wyckoff;

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalogue::standard_records;
pub use expr::ExprError;
pub use group::{Catalogue, GroupRecord, SiteRecord, WallpaperGroup};
pub use transform::SymmetryTransform;
pub use wyckoff::{SiteSymmetry, WyckoffSite};

use crate::cfg::ANGLE_EPS_DEG;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SymmetryError {
    #[error("Wyckoff site {letter:?} has no transforms")]
    EmptySite { letter: char },
    #[error("group {label:?} has no Wyckoff sites")]
    EmptyGroup { label: String },
    #[error("generator {generator:?}: {source}")]
    Generator {
        generator: String,
        #[source]
        source: ExprError,
    },
    #[error("generator {0:?} is not an affine function of x and y")]
    NonAffine(String),
    #[error("invalid site symmetry code {0:?}")]
    BadSymmetryCode(String),
    #[error("group {label}: site {letter} lists multiplicity {expected} but has {got} generators")]
    MultiplicityMismatch {
        label: String,
        letter: char,
        expected: usize,
        got: usize,
    },
    #[error("group {label}: image {index} of site {letter} matches no general position")]
    UnmatchedImage {
        label: String,
        letter: char,
        index: usize,
    },
    #[error("unknown wallpaper group {0:?}")]
    UnknownGroup(String),
}

/// Mirror line through a site, by its angle in degrees.
///
/// Lines are undirected, so `120°` and `300°` name the same line; the
/// enumeration keeps the historical names `M300`/`M330` for 120°/150°.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mirror {
    #[default]
    None,
    M0,
    M30,
    M45,
    M60,
    M90,
    M135,
    M300,
    M330,
}

impl Mirror {
    /// Classify a line angle in degrees; angles outside the table give `None`.
    pub fn from_line_angle_deg(angle: f64) -> Self {
        let a = crate::geom2::positive_modulo(angle, 180.0);
        let near = |target: f64| (a - target).abs() < ANGLE_EPS_DEG;
        if near(0.0) || near(180.0) {
            Mirror::M0
        } else if near(30.0) {
            Mirror::M30
        } else if near(45.0) {
            Mirror::M45
        } else if near(60.0) {
            Mirror::M60
        } else if near(90.0) {
            Mirror::M90
        } else if near(120.0) {
            Mirror::M300
        } else if near(135.0) {
            Mirror::M135
        } else if near(150.0) {
            Mirror::M330
        } else {
            Mirror::None
        }
    }

    /// Line angle in degrees as named, `None` for no mirror.
    pub fn degrees(self) -> Option<f64> {
        match self {
            Mirror::None => None,
            Mirror::M0 => Some(0.0),
            Mirror::M30 => Some(30.0),
            Mirror::M45 => Some(45.0),
            Mirror::M60 => Some(60.0),
            Mirror::M90 => Some(90.0),
            Mirror::M135 => Some(135.0),
            Mirror::M300 => Some(300.0),
            Mirror::M330 => Some(330.0),
        }
    }

    /// Line angle in radians, reduced into `[0, π)`.
    pub fn line_angle(self) -> Option<f64> {
        self.degrees()
            .map(|d| crate::geom2::positive_modulo(d.to_radians(), PI))
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Mirror::None
    }
}

/// Cell shape implied by a group's operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lattice {
    Oblique,
    Rectangular,
    Square,
    Hexagonal,
}

impl Lattice {
    /// Angle between the cell edges used to read the fractional operations.
    pub fn canonical_angle(self) -> f64 {
        match self {
            Lattice::Hexagonal => 2.0 * PI / 3.0,
            _ => FRAC_PI_2,
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lattice::Oblique => "oblique",
            Lattice::Rectangular => "rectangular",
            Lattice::Square => "square",
            Lattice::Hexagonal => "hexagonal",
        };
        f.write_str(name)
    }
}
