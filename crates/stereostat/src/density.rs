//! Spherical kernel density (contour) estimation.
//!
//! Purpose
//! - Turn a dataset into a contourable scalar field over an equal-area grid
//!   on the lower hemisphere, using Fisher or Kamb counting.
//!
//! Model
//! - Orientations are axial, so kernels act on |g·vᵢ|. Field values are raw
//!   kernel-weighted counts: non-negative, and linear in N for a fixed
//!   distribution shape and fixed k. Presentational contour limits never
//!   reach this module; callers clip/scale at render time.
//! - Auto-bandwidth follows Kamb counting statistics with deviation σ: the
//!   counting cap covers the fraction σ²/(N+σ²) of the hemisphere, and the
//!   exponential (Fisher) analogue is k = 2·(1 + N/σ²). Both grow
//!   monotonically with N and stay positive and finite for N ≥ 1.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::codec::{self, CodecError};
use crate::dataset::{Dataset, DatasetError};

/// Kernel family used for counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountingMethod {
    /// Exponential (Fisher) kernel `exp(k·(|g·v| − 1))`.
    Fisher,
    /// Kamb small-circle counting: indicator of `|g·v| ≥ 1 − 1/k`.
    Kamb,
}

/// Concentration parameter selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bandwidth {
    /// Pick k from the sample count (see module docs).
    Auto,
    /// Use a caller-supplied k (clamped to a usable minimum).
    Fixed(f64),
}

/// Estimator configuration. Out-of-range fields are clamped, not rejected.
#[derive(Clone, Copy, Debug)]
pub struct DensityCfg {
    pub method: CountingMethod,
    pub bandwidth: Bandwidth,
    /// Grid rings between center and rim; node count grows quadratically.
    pub grid_rings: usize,
    /// Counting deviation σ for auto-bandwidth (Kamb's 3σ criterion).
    pub sigma: f64,
}

impl Default for DensityCfg {
    fn default() -> Self {
        Self {
            method: CountingMethod::Fisher,
            bandwidth: Bandwidth::Auto,
            grid_rings: 20,
            sigma: 3.0,
        }
    }
}

const MIN_RINGS: usize = 4;
const MIN_SIGMA: f64 = 1e-3;
// Kamb needs k > 1 so the counting cap stays smaller than the hemisphere.
const MIN_FISHER_K: f64 = 1e-6;
const MIN_KAMB_K: f64 = 1.0 + 1e-6;

/// Scalar density per grid node, plus the concentration that produced it.
#[derive(Clone, Debug)]
pub struct DensityField {
    method: CountingMethod,
    nodes: Vec<Vector3<f64>>,
    values: Vec<f64>,
    k: f64,
}

impl DensityField {
    #[inline]
    pub fn method(&self) -> CountingMethod {
        self.method
    }

    /// Grid nodes as unit vectors, in the documented order: the center node
    /// first, then rings from center to rim, each counterclockwise from
    /// North.
    #[inline]
    pub fn nodes(&self) -> &[Vector3<f64>] {
        &self.nodes
    }

    /// Density values, parallel to [`nodes`](Self::nodes).
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Selected concentration parameter.
    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Grid nodes as (trend, plunge) pairs, same order as [`nodes`](Self::nodes).
    pub fn node_lines(&self) -> Result<Vec<(f64, f64)>, CodecError> {
        self.nodes.iter().map(|&v| codec::vector_to_line(v)).collect()
    }

    /// Node index holding the largest density value, if any.
    pub fn peak(&self) -> Option<usize> {
        self.values
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }
}

/// Concentration parameter for `n` samples under `method` (see module docs).
pub fn auto_k(method: CountingMethod, n: usize, sigma: f64) -> f64 {
    let n = n.max(1) as f64;
    let sigma2 = sigma.max(MIN_SIGMA).powi(2);
    match method {
        CountingMethod::Fisher => 2.0 * (1.0 + n / sigma2),
        CountingMethod::Kamb => (n + sigma2) / sigma2,
    }
}

/// Equal-area node layout over the lower hemisphere.
///
/// Ring j of `rings` sits at the radial fraction j/rings of the Schmidt
/// disk (colatitude 2·asin(f/√2)), carrying nodes proportional to its
/// circumference; ordering as documented on [`DensityField::nodes`].
pub fn equal_area_grid(rings: usize) -> Vec<Vector3<f64>> {
    let rings = rings.max(MIN_RINGS);
    let mut nodes = vec![Vector3::new(0.0, 0.0, 1.0)];
    for j in 1..=rings {
        let f = j as f64 / rings as f64;
        let colat = 2.0 * (f * std::f64::consts::FRAC_1_SQRT_2).asin();
        let count = (std::f64::consts::TAU * j as f64).round().max(1.0) as usize;
        for i in 0..count {
            let az = std::f64::consts::TAU * i as f64 / count as f64;
            nodes.push(Vector3::new(
                colat.sin() * az.cos(),
                colat.sin() * az.sin(),
                colat.cos(),
            ));
        }
    }
    nodes
}

/// Compute the density field for `dataset` under `cfg`.
///
/// Fails with `EmptyDataset` on zero measurements; otherwise recomputes the
/// full field from scratch on every call.
pub fn estimate(dataset: &Dataset, cfg: &DensityCfg) -> Result<DensityField, DatasetError> {
    if dataset.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }
    let k = match cfg.bandwidth {
        Bandwidth::Auto => auto_k(cfg.method, dataset.len(), cfg.sigma),
        Bandwidth::Fixed(k) => match cfg.method {
            CountingMethod::Fisher => k.max(MIN_FISHER_K),
            CountingMethod::Kamb => k.max(MIN_KAMB_K),
        },
    };
    let nodes = equal_area_grid(cfg.grid_rings);
    let vectors = dataset.vectors();
    let values = nodes
        .iter()
        .map(|g| match cfg.method {
            CountingMethod::Fisher => vectors
                .iter()
                .map(|v| (k * (g.dot(v).abs() - 1.0)).exp())
                .sum(),
            CountingMethod::Kamb => {
                let cos_radius = 1.0 - 1.0 / k;
                vectors.iter().filter(|v| g.dot(v).abs() >= cos_radius).count() as f64
            }
        })
        .collect();
    Ok(DensityField {
        method: cfg.method,
        nodes,
        values,
        k,
    })
}
