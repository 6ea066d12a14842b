//! Orientation codec bindings (kept separate so `lib.rs` stays tiny).

use nalgebra::Vector3;
use pyo3::prelude::*;

use crate::common::map_codec_err;

#[pyfunction]
pub fn line_to_vector(trend: f64, plunge: f64) -> PyResult<(f64, f64, f64)> {
    let v = stereostat::codec::line_to_vector(trend, plunge).map_err(map_codec_err)?;
    Ok((v.x, v.y, v.z))
}

#[pyfunction]
pub fn plane_to_pole(strike: f64, dip: f64) -> PyResult<(f64, f64, f64)> {
    let v = stereostat::codec::plane_to_pole(strike, dip).map_err(map_codec_err)?;
    Ok((v.x, v.y, v.z))
}

#[pyfunction]
pub fn vector_to_line(v: (f64, f64, f64)) -> PyResult<(f64, f64)> {
    stereostat::codec::vector_to_line(Vector3::new(v.0, v.1, v.2)).map_err(map_codec_err)
}

#[pyfunction]
pub fn pole_to_plane(v: (f64, f64, f64)) -> PyResult<(f64, f64)> {
    stereostat::codec::pole_to_plane(Vector3::new(v.0, v.1, v.2)).map_err(map_codec_err)
}

#[pyfunction]
pub fn dip_direction_to_strike(dip_dir: f64) -> PyResult<f64> {
    stereostat::codec::dip_direction_to_strike(dip_dir).map_err(map_codec_err)
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(line_to_vector, m)?)?;
    m.add_function(wrap_pyfunction!(plane_to_pole, m)?)?;
    m.add_function(wrap_pyfunction!(vector_to_line, m)?)?;
    m.add_function(wrap_pyfunction!(pole_to_plane, m)?)?;
    m.add_function(wrap_pyfunction!(dip_direction_to_strike, m)?)?;
    Ok(())
}
