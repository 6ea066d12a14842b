//! Directional statistics for stereonet plotting.
//!
//! Converts structural-geology readings (trend/plunge, strike/dip,
//! dip-direction) into unit vectors in a fixed North-East-Down frame,
//! summarizes datasets through the orientation tensor's eigenanalysis
//! (mean orientations, best-fit planes, intersection axes), and estimates
//! spherical kernel densities for contouring. Rendering, projection
//! drawing, and host integration live outside this crate; it produces
//! numeric artifacts only.

pub mod codec;
pub mod dataset;
pub mod density;
pub mod eigen;
pub mod ingest;
pub mod options;
pub mod sample;

mod cfg;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports matching the structural-geology notation.
pub use nalgebra::{Matrix3 as Mat3, Vector3 as Vec3};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::codec::{
        dip_direction_to_strike, line_to_vector, normalize_azimuth, plane_to_pole, pole_to_plane,
        vector_to_line, CodecError,
    };
    pub use crate::dataset::{Dataset, DatasetError, OrientationKind, OrientationMeasurement};
    pub use crate::density::{
        estimate, Bandwidth, CountingMethod, DensityCfg, DensityField,
    };
    pub use crate::eigen::{analyze, orientation_tensor, EigenAnalysis};
    pub use crate::ingest::{collect_line_rows, collect_plane_rows, FieldRow, PlaneConvention};
    pub use crate::options::{MarkerShape, OptionsError, StereonetOptions};
    pub use crate::sample::{draw_lines, FisherCfg, ReplayToken};
    pub use nalgebra::{Matrix3 as Mat3, Vector3 as Vec3};
}
