//! PyO3 bindings for selected `stereostat` functions.
//!
//! Notes
//! - Keep bindings thin and predictable; conversions use simple tuples, and
//!   richer wrappers belong on the Python side.
//! - All native functionality stays in the `stereostat` crate; this module
//!   only exposes the codec and the two statistics entry points a plotting
//!   host needs.

use pyo3::prelude::*;

mod codec;
mod common;
mod stats;

#[pymodule]
fn stereostat_native(_py: Python, m: &PyModule) -> PyResult<()> {
    codec::register(m)?;
    stats::register(m)?;
    Ok(())
}
