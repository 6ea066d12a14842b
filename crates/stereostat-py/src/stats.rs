//! Eigenanalysis and density bindings.

use pyo3::prelude::*;

use crate::common::{dataset_from_pairs, map_codec_err, map_dataset_err, method_from_str};
use stereostat::density::{estimate, Bandwidth, DensityCfg};

/// Eigen summary of a batch of (azimuth, inclination) pairs.
///
/// Returns (eigenvalues, principal (trend, plunge), girdle axis
/// (trend, plunge), low_concentration).
#[pyfunction]
pub fn eigen(
    kind: &str,
    pairs: Vec<(f64, f64)>,
) -> PyResult<((f64, f64, f64), (f64, f64), (f64, f64), bool)> {
    let dataset = dataset_from_pairs(kind, pairs)?;
    let analysis = dataset.eigen().map_err(map_dataset_err)?;
    let [l1, l2, l3] = analysis.eigenvalues();
    let principal = analysis.principal_line().map_err(map_codec_err)?;
    let axis = analysis.girdle_axis().map_err(map_codec_err)?;
    Ok(((l1, l2, l3), principal, axis, analysis.low_concentration()))
}

/// Best-fit plane (strike, dip) of a batch of plane readings.
#[pyfunction]
pub fn mean_plane(pairs: Vec<(f64, f64)>) -> PyResult<(f64, f64)> {
    let dataset = dataset_from_pairs("plane", pairs)?;
    let analysis = dataset.eigen().map_err(map_dataset_err)?;
    analysis.mean_plane().map_err(map_codec_err)
}

/// Density field for contouring.
///
/// Returns (nodes as (trend, plunge), values, selected k).
#[pyfunction]
#[pyo3(signature = (kind, pairs, method = "fisher", k = None, rings = None))]
pub fn density(
    kind: &str,
    pairs: Vec<(f64, f64)>,
    method: &str,
    k: Option<f64>,
    rings: Option<usize>,
) -> PyResult<(Vec<(f64, f64)>, Vec<f64>, f64)> {
    let dataset = dataset_from_pairs(kind, pairs)?;
    let mut cfg = DensityCfg {
        method: method_from_str(method)?,
        ..DensityCfg::default()
    };
    if let Some(k) = k {
        cfg.bandwidth = Bandwidth::Fixed(k);
    }
    if let Some(rings) = rings {
        cfg.grid_rings = rings;
    }
    let field = estimate(&dataset, &cfg).map_err(map_dataset_err)?;
    let nodes = field.node_lines().map_err(map_codec_err)?;
    Ok((nodes, field.values().to_vec(), field.k()))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(eigen, m)?)?;
    m.add_function(wrap_pyfunction!(mean_plane, m)?)?;
    m.add_function(wrap_pyfunction!(density, m)?)?;
    Ok(())
}
