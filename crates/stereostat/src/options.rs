//! Fixed configuration record for the plotting surface.
//!
//! Purpose
//! - Replace the host's free-form option dictionary with one struct carrying
//!   an explicit field per recognized option. Unknown keys are rejected at
//!   deserialization (`deny_unknown_fields`); value ranges are checked by
//!   [`StereonetOptions::validate`].
//! - Contour/color limits are presentational: they ride along untouched and
//!   never reach the estimator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::density::{Bandwidth, CountingMethod, DensityCfg};
use crate::ingest::PlaneConvention;

/// Marker glyph drawn per measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Point,
    Circle,
    Square,
    Triangle,
    Cross,
}

/// Errors surfaced by option validation.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionsError {
    InvalidValue {
        option: &'static str,
        reason: String,
    },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::InvalidValue { option, reason } => {
                write!(f, "invalid option {option}: {reason}")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// All recognized plotting options, with their defaults.
///
/// Field-name bindings follow the original defaults ("Strike", "Dip",
/// "Trend", "Plunge"); contours and the mean plane are on by default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StereonetOptions {
    // Field-name bindings into the feature source.
    pub strike_field: String,
    pub dip_field: String,
    pub trend_field: String,
    pub plunge_field: String,
    pub dip_direction_field: String,
    pub attribute_field: Option<String>,
    /// Whether plane azimuths are strikes or dip directions.
    pub plane_convention: PlaneConvention,

    // Marker style.
    pub marker_shape: MarkerShape,
    pub marker_size: f64,
    pub marker_color: String,
    pub colormap: String,
    /// Presentational color bounds (low, high).
    pub color_limits: Option<(f64, f64)>,
    pub color_center: Option<f64>,

    // Contouring.
    pub plot_contours: bool,
    pub contour_method: CountingMethod,
    pub auto_k: bool,
    /// Fixed concentration, used only when `auto_k` is off.
    pub contour_k: Option<f64>,
    pub contour_colormap: String,
    /// Presentational contour level bounds (low, high).
    pub contour_limits: Option<(f64, f64)>,
    pub contour_alpha: f64,
    pub grid_rings: usize,

    // Summary overlays.
    pub plot_mean_plane: bool,
}

impl Default for StereonetOptions {
    fn default() -> Self {
        Self {
            strike_field: "Strike".to_string(),
            dip_field: "Dip".to_string(),
            trend_field: "Trend".to_string(),
            plunge_field: "Plunge".to_string(),
            dip_direction_field: "DipDirection".to_string(),
            attribute_field: None,
            plane_convention: PlaneConvention::StrikeDip,
            marker_shape: MarkerShape::Point,
            marker_size: 6.0,
            marker_color: "#000000".to_string(),
            colormap: "viridis".to_string(),
            color_limits: None,
            color_center: None,
            plot_contours: true,
            contour_method: CountingMethod::Fisher,
            auto_k: true,
            contour_k: None,
            contour_colormap: "Blues".to_string(),
            contour_limits: Some((0.0, 20.0)),
            contour_alpha: 0.9,
            grid_rings: 20,
            plot_mean_plane: true,
        }
    }
}

impl StereonetOptions {
    /// Range-check every numeric field.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.marker_size.is_finite() && self.marker_size > 0.0) {
            return Err(OptionsError::InvalidValue {
                option: "marker_size",
                reason: format!("{} is not a positive size", self.marker_size),
            });
        }
        if !(0.0..=1.0).contains(&self.contour_alpha) {
            return Err(OptionsError::InvalidValue {
                option: "contour_alpha",
                reason: format!("{} outside [0, 1]", self.contour_alpha),
            });
        }
        if let Some(k) = self.contour_k {
            if !(k.is_finite() && k > 0.0) {
                return Err(OptionsError::InvalidValue {
                    option: "contour_k",
                    reason: format!("{k} is not a positive concentration"),
                });
            }
        }
        if self.grid_rings == 0 {
            return Err(OptionsError::InvalidValue {
                option: "grid_rings",
                reason: "need at least one ring".to_string(),
            });
        }
        for (option, limits) in [
            ("color_limits", self.color_limits),
            ("contour_limits", self.contour_limits),
        ] {
            if let Some((lo, hi)) = limits {
                if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                    return Err(OptionsError::InvalidValue {
                        option,
                        reason: format!("({lo}, {hi}) is not an ordered finite pair"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Estimator configuration implied by the contour options.
    pub fn density_cfg(&self) -> DensityCfg {
        DensityCfg {
            method: self.contour_method,
            bandwidth: match (self.auto_k, self.contour_k) {
                (false, Some(k)) => Bandwidth::Fixed(k),
                _ => Bandwidth::Auto,
            },
            grid_rings: self.grid_rings,
            ..DensityCfg::default()
        }
    }
}
