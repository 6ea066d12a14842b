//! Orientation tensor and its eigendecomposition.
//!
//! Purpose
//! - Summarize a point cloud on the sphere by the second-moment matrix
//!   T = (1/N)·Σ vᵢ⊗vᵢ and its principal axes.
//! - The dominant axis is the mean orientation (mean line, or mean pole for
//!   plane data); the minor axis is the pole of the best-fit girdle, i.e.
//!   the common intersection line of a set of planes given by their poles.
//!
//! Numerics
//! - `nalgebra::SymmetricEigen` on the 3×3 tensor; eigenvalues are clamped
//!   at zero (tiny negative round-off) and reported descending. Exact ties
//!   keep the decomposition's natural output order (stable sort); when the
//!   whole spectrum collapses toward 1/3 the result is statistically
//!   meaningless and `low_concentration` is raised instead of failing.

use nalgebra::{Matrix3, Vector3};

use crate::cfg::EIGEN_TIE_EPS;
use crate::codec::{self, CodecError};

/// Second-moment (orientation) tensor of a set of direction vectors.
///
/// Symmetric; for unit input vectors the trace is 1.
pub fn orientation_tensor(vectors: &[Vector3<f64>]) -> Matrix3<f64> {
    let mut tensor = Matrix3::zeros();
    for v in vectors {
        tensor += v * v.transpose();
    }
    tensor / vectors.len().max(1) as f64
}

/// Eigendecomposition of an orientation tensor, axes ordered by descending
/// eigenvalue.
#[derive(Clone, Copy, Debug)]
pub struct EigenAnalysis {
    eigenvalues: [f64; 3],
    eigenvectors: [Vector3<f64>; 3],
    low_concentration: bool,
}

/// Analyze a set of unit vectors (see [`orientation_tensor`]).
pub fn analyze(vectors: &[Vector3<f64>]) -> EigenAnalysis {
    let tensor = orientation_tensor(vectors);
    let decomposition = tensor.symmetric_eigen();
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        decomposition.eigenvalues[b]
            .partial_cmp(&decomposition.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let eigenvalues = order.map(|i| decomposition.eigenvalues[i].max(0.0));
    let eigenvectors = order.map(|i| decomposition.eigenvectors.column(i).into_owned());
    EigenAnalysis {
        eigenvalues,
        eigenvectors,
        low_concentration: eigenvalues[0] - eigenvalues[2] < EIGEN_TIE_EPS,
    }
}

impl EigenAnalysis {
    /// Eigenvalues, descending; non-negative and summing to 1 for unit input.
    #[inline]
    pub fn eigenvalues(&self) -> [f64; 3] {
        self.eigenvalues
    }

    /// Orthonormal eigenvectors, parallel to [`eigenvalues`](Self::eigenvalues).
    #[inline]
    pub fn eigenvectors(&self) -> [Vector3<f64>; 3] {
        self.eigenvectors
    }

    /// Dominant axis: the mean orientation of the input cloud.
    #[inline]
    pub fn principal(&self) -> Vector3<f64> {
        self.eigenvectors[0]
    }

    /// Minor axis: pole of the best-fit great circle through the cloud.
    #[inline]
    pub fn minor(&self) -> Vector3<f64> {
        self.eigenvectors[2]
    }

    /// Advisory: the spectrum is near-uniform and the axes are arbitrary.
    #[inline]
    pub fn low_concentration(&self) -> bool {
        self.low_concentration
    }

    /// Mean orientation as (trend, plunge).
    pub fn principal_line(&self) -> Result<(f64, f64), CodecError> {
        codec::vector_to_line(self.principal())
    }

    /// Best-fit mean plane as (strike, dip); meaningful for plane datasets,
    /// where the dominant axis is the mean pole.
    pub fn mean_plane(&self) -> Result<(f64, f64), CodecError> {
        codec::pole_to_plane(self.principal())
    }

    /// Common intersection line of the input planes as (trend, plunge): the
    /// minor axis of their poles' tensor.
    pub fn girdle_axis(&self) -> Result<(f64, f64), CodecError> {
        codec::vector_to_line(self.minor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, OrientationKind};
    use crate::sample::{draw_lines, FisherCfg, ReplayToken};

    #[test]
    fn clustered_vertical_lines() {
        let pairs = [(0.0, 90.0); 4];
        let ds = Dataset::load(OrientationKind::Line, &pairs, "vertical").unwrap();
        let es = ds.eigen().unwrap();
        let [l1, l2, l3] = es.eigenvalues();
        assert!((l1 - 1.0).abs() < 1e-9);
        assert!(l2 < 1e-9 && l3 < 1e-9);
        let (trend, plunge) = es.principal_line().unwrap();
        assert_eq!(trend, 0.0);
        assert!((plunge - 90.0).abs() < 1e-6);
        assert!(!es.low_concentration());
    }

    #[test]
    fn eigenvalue_invariants_on_sampled_data() {
        let cfg = FisherCfg {
            mean_trend: 120.0,
            mean_plunge: 35.0,
            kappa: 40.0,
        };
        let pairs = draw_lines(&cfg, ReplayToken { seed: 9, index: 0 }, 200).unwrap();
        let ds = Dataset::load(OrientationKind::Line, &pairs, "sampled").unwrap();
        let es = ds.eigen().unwrap();
        let [l1, l2, l3] = es.eigenvalues();
        assert!(l1 >= l2 && l2 >= l3);
        assert!(l3 >= 0.0);
        assert!((l1 + l2 + l3 - 1.0).abs() < 1e-6);
        let [v1, v2, v3] = es.eigenvectors();
        assert!(v1.dot(&v2).abs() < 1e-6);
        assert!(v2.dot(&v3).abs() < 1e-6);
        assert!(v3.dot(&v1).abs() < 1e-6);
        for v in [v1, v2, v3] {
            assert!((v.norm() - 1.0).abs() < 1e-6);
        }
        // The dominant axis sits close to the sampling mean at this kappa.
        let mean = codec::line_to_vector(cfg.mean_trend, cfg.mean_plunge).unwrap();
        assert!(es.principal().dot(&mean).abs() > 30f64.to_radians().cos());
    }

    #[test]
    fn vertical_planes_share_a_vertical_axis() {
        // Three vertical planes all contain the vertical line; their poles
        // are horizontal, so the girdle pole is exactly vertical.
        let pairs = [(0.0, 90.0), (60.0, 90.0), (120.0, 90.0)];
        let ds = Dataset::load(OrientationKind::Plane, &pairs, "vertical planes").unwrap();
        let es = ds.eigen().unwrap();
        let (trend, plunge) = es.girdle_axis().unwrap();
        assert_eq!(trend, 0.0);
        assert!((plunge - 90.0).abs() < 1e-6);
        assert!(es.eigenvalues()[2] < 1e-9);
    }

    #[test]
    fn girdle_axis_recovers_known_intersection() {
        // Build poles perpendicular to a known axis; every such pole is the
        // pole of a plane containing that axis, so the minor eigenvector
        // must recover it.
        let axis = codec::line_to_vector(30.0, 50.0).unwrap();
        let a = axis.cross(&Vector3::z()).normalize();
        let b = axis.cross(&a);
        let mut pairs = Vec::new();
        for theta_deg in [0.0f64, 30.0, 60.0, 90.0, 120.0, 150.0] {
            let theta = theta_deg.to_radians();
            let pole = a * theta.cos() + b * theta.sin();
            pairs.push(codec::pole_to_plane(pole).unwrap());
        }
        let ds = Dataset::load(OrientationKind::Plane, &pairs, "girdle").unwrap();
        let es = ds.eigen().unwrap();
        let (trend, plunge) = es.girdle_axis().unwrap();
        assert!((trend - 30.0).abs() < 1e-6);
        assert!((plunge - 50.0).abs() < 1e-6);
    }

    #[test]
    fn mean_plane_round_trips_through_the_pole() {
        let pairs = [(40.0, 30.0), (44.0, 32.0), (36.0, 28.0), (40.0, 31.0)];
        let ds = Dataset::load(OrientationKind::Plane, &pairs, "bedding").unwrap();
        let es = ds.eigen().unwrap();
        let (strike, dip) = es.mean_plane().unwrap();
        assert!((strike - 40.0).abs() < 3.0);
        assert!((dip - 30.0).abs() < 3.0);
        assert!(!es.low_concentration());
    }

    #[test]
    fn uniform_axes_raise_low_concentration() {
        // One line along each coordinate axis: the tensor is exactly I/3.
        let pairs = [(0.0, 0.0), (90.0, 0.0), (0.0, 90.0)];
        let ds = Dataset::load(OrientationKind::Line, &pairs, "uniform").unwrap();
        let es = ds.eigen().unwrap();
        assert!(es.low_concentration());
        for l in es.eigenvalues() {
            assert!((l - 1.0 / 3.0).abs() < 1e-9);
        }
    }
}
