//! Shared conversions and error mapping for the bindings.

use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use pyo3::PyResult;
use stereostat::codec::CodecError;
use stereostat::dataset::{Dataset, DatasetError, OrientationKind};
use stereostat::density::CountingMethod;

pub fn map_codec_err(err: CodecError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn map_dataset_err(err: DatasetError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn kind_from_str(kind: &str) -> PyResult<OrientationKind> {
    match kind {
        "line" => Ok(OrientationKind::Line),
        "plane" => Ok(OrientationKind::Plane),
        other => Err(PyValueError::new_err(format!(
            "kind must be \"line\" or \"plane\", got {other:?}"
        ))),
    }
}

pub fn method_from_str(method: &str) -> PyResult<CountingMethod> {
    match method {
        "fisher" => Ok(CountingMethod::Fisher),
        "kamb" => Ok(CountingMethod::Kamb),
        other => Err(PyValueError::new_err(format!(
            "counting method must be \"fisher\" or \"kamb\", got {other:?}"
        ))),
    }
}

pub fn dataset_from_pairs(kind: &str, pairs: Vec<(f64, f64)>) -> PyResult<Dataset> {
    Dataset::load(kind_from_str(kind)?, &pairs, "bound data").map_err(map_dataset_err)
}
