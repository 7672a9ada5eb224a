//! Periodic packings of convex 2D shapes under wallpaper-group symmetry.
//!
//! Layers, bottom-up:
//! - `geom2`: vectors and the orientation/segment/polygon predicates.
//! - `shape`: radial-point shapes and regular presets.
//! - `basis`: bounded, revertible parameters with the cell angle → lengths link.
//! - `symmetry`: affine site transforms, Wyckoff sites, the 17 plane groups.
//! - `packed`: packing state, periodic overlap search, Monte Carlo driver and
//!   isopointal site enumeration.
//!
//! API Policy
//! - The crate serves the `packing-cli` binary; there is no stable public API.

mod cfg;

pub mod basis;
pub mod geom2;
pub mod packed;
pub mod random;
pub mod shape;
pub mod symmetry;
pub mod util;

pub use cfg::DEFAULT_STEP_SIZE;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::basis::{Basis, BasisId, BasisKind, BasisSet};
    pub use crate::geom2::{Vect2, Vect3};
    pub use crate::packed::{
        fit, greedy, isopointal_sites, run, PackedState, SearchCfg, SearchReport,
    };
    pub use crate::shape::Shape;
    pub use crate::symmetry::{Catalogue, Lattice, Mirror, WallpaperGroup, WyckoffSite};
}
