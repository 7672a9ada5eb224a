//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants; the search-facing knobs live in `packed::SearchCfg`.

/// Coefficient magnitude below which a generator coefficient counts as zero.
pub(crate) const COEFF_EPS: f64 = 1e-9;
/// Tolerance when comparing reduced integer-like matrices (transform order).
pub(crate) const MATRIX_EPS: f64 = 1e-9;
/// Threshold used by `WyckoffSite::vary_x/vary_y` on the first transform.
pub(crate) const VARY_EPS: f64 = 0.1;
/// Tolerance (degrees) when classifying mirror-line angles.
pub(crate) const ANGLE_EPS_DEG: f64 = 1e-3;
/// Default relative proposal width for bases.
pub const DEFAULT_STEP_SIZE: f64 = 0.01;
