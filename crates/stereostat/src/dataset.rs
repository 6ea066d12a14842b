//! Measurement collections with cached unit vectors.
//!
//! Purpose
//! - Hold one plotting command's worth of orientation readings (lines or
//!   planes) together with their derived unit vectors and an optional
//!   attribute column (color/weight field).
//!
//! Lifecycle
//! - A `Dataset` is built in one shot by [`Dataset::load`] (or
//!   [`Dataset::load_with_attribute`]) and is read-only afterward. Loading
//!   is fail-fast: the first bad reading rejects the whole batch and no
//!   partial dataset exists.

use nalgebra::Vector3;
use std::fmt;

use crate::codec::{self, CodecError};
use crate::eigen::{self, EigenAnalysis};

/// What the two angular fields of a measurement mean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationKind {
    /// Azimuth/inclination are trend and plunge.
    Line,
    /// Azimuth/inclination are strike and dip; the cached vector is the pole.
    Plane,
}

/// A single structural reading with canonical-range angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationMeasurement {
    pub kind: OrientationKind,
    /// Trend (Line) or strike (Plane), wrapped into [0, 360).
    pub azimuth: f64,
    /// Plunge (Line) or dip (Plane), in [0, 90].
    pub inclination: f64,
    /// Optional scalar used for marker color or weighting downstream.
    pub attribute: Option<f64>,
}

/// Errors surfaced by dataset construction and statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DatasetError {
    /// Attribute column length differs from the measurement count.
    ShapeMismatch {
        measurements: usize,
        attributes: usize,
    },
    /// Statistics requested on zero measurements.
    EmptyDataset,
    /// A reading failed conversion; nothing was loaded.
    Codec(CodecError),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::ShapeMismatch {
                measurements,
                attributes,
            } => write!(
                f,
                "attribute column has {attributes} entries for {measurements} measurements"
            ),
            DatasetError::EmptyDataset => write!(f, "dataset holds no measurements"),
            DatasetError::Codec(err) => write!(f, "measurement rejected: {err}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodecError> for DatasetError {
    fn from(err: CodecError) -> Self {
        DatasetError::Codec(err)
    }
}

/// Ordered, immutable collection of measurements plus derived vectors.
///
/// Invariants:
/// - `measurements` and `vectors` always share one length.
/// - The attribute column, when present, is parallel to both.
#[derive(Clone, Debug)]
pub struct Dataset {
    kind: OrientationKind,
    label: String,
    measurements: Vec<OrientationMeasurement>,
    vectors: Vec<Vector3<f64>>,
    attribute_name: Option<String>,
}

impl Dataset {
    /// Load a batch of (azimuth, inclination) pairs, interpreted per `kind`.
    pub fn load(
        kind: OrientationKind,
        pairs: &[(f64, f64)],
        label: impl Into<String>,
    ) -> Result<Self, DatasetError> {
        Self::load_impl(kind, pairs, label.into(), None, None)
    }

    /// Load a batch together with a parallel scalar attribute column.
    pub fn load_with_attribute(
        kind: OrientationKind,
        pairs: &[(f64, f64)],
        label: impl Into<String>,
        attributes: &[f64],
        attribute_name: impl Into<String>,
    ) -> Result<Self, DatasetError> {
        Self::load_impl(
            kind,
            pairs,
            label.into(),
            Some(attributes),
            Some(attribute_name.into()),
        )
    }

    fn load_impl(
        kind: OrientationKind,
        pairs: &[(f64, f64)],
        label: String,
        attributes: Option<&[f64]>,
        attribute_name: Option<String>,
    ) -> Result<Self, DatasetError> {
        if let Some(attrs) = attributes {
            if attrs.len() != pairs.len() {
                return Err(DatasetError::ShapeMismatch {
                    measurements: pairs.len(),
                    attributes: attrs.len(),
                });
            }
        }
        let mut measurements = Vec::with_capacity(pairs.len());
        let mut vectors = Vec::with_capacity(pairs.len());
        for (i, &(azimuth, inclination)) in pairs.iter().enumerate() {
            let vector = match kind {
                OrientationKind::Line => codec::line_to_vector(azimuth, inclination)?,
                OrientationKind::Plane => codec::plane_to_pole(azimuth, inclination)?,
            };
            measurements.push(OrientationMeasurement {
                kind,
                azimuth: codec::normalize_azimuth(azimuth)?,
                inclination,
                attribute: attributes.map(|attrs| attrs[i]),
            });
            vectors.push(vector);
        }
        Ok(Self {
            kind,
            label,
            measurements,
            vectors,
            attribute_name,
        })
    }

    #[inline]
    pub fn kind(&self) -> OrientationKind {
        self.kind
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    #[inline]
    pub fn measurements(&self) -> &[OrientationMeasurement] {
        &self.measurements
    }

    /// Cached unit vectors, parallel to `measurements()`. For planes these
    /// are poles, not points on the great circle.
    #[inline]
    pub fn vectors(&self) -> &[Vector3<f64>] {
        &self.vectors
    }

    #[inline]
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }

    /// Attribute column, if one was loaded (always parallel to the data).
    pub fn attributes(&self) -> Option<Vec<f64>> {
        if self.attribute_name.is_none() {
            return None;
        }
        Some(
            self.measurements
                .iter()
                .filter_map(|m| m.attribute)
                .collect(),
        )
    }

    /// Orientation-tensor eigenanalysis of the cached vectors.
    ///
    /// Pure and deterministic; fails with `EmptyDataset` on zero entries.
    pub fn eigen(&self) -> Result<EigenAnalysis, DatasetError> {
        if self.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }
        Ok(eigen::analyze(&self.vectors))
    }
}
