//! Tolerance defaults for orientation numerics (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling” during normal
//!   development. Adjustments are rare; if needed later we can make these
//!   configurable behind a small `Config` without changing call sites broadly.

/// Below this norm a vector carries no usable direction.
pub(crate) const UNIT_EPS: f64 = 1e-9;
/// Horizontal-component threshold under which trend/strike recovery falls
/// back to the documented 0° convention (vertical line, horizontal plane).
pub(crate) const HORIZ_EPS: f64 = 1e-9;
/// Eigenvalue spread below this counts as a tie (near-uniform tensor).
pub(crate) const EIGEN_TIE_EPS: f64 = 1e-6;
