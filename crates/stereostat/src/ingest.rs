//! Sentinel-aware row collection from an external feature source.
//!
//! Purpose
//! - Bridge the host's per-feature field reads (each field possibly "no
//!   value") into the angle pairs `Dataset::load` expects. A row missing a
//!   required angular field is skipped outright; a missing value is never
//!   coerced to 0.
//! - Route the dip-direction convention through the codec so no angle
//!   arithmetic happens here.

use serde::{Deserialize, Serialize};

use crate::codec::{self, CodecError};

/// How plane rows encode their azimuth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaneConvention {
    /// First field is the strike.
    StrikeDip,
    /// First field is the dip direction; converted to strike on ingestion.
    DipDirection,
}

/// One row read from the feature source; `None` is the host's sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldRow {
    /// Trend (lines) or strike/dip-direction (planes).
    pub first: Option<f64>,
    /// Plunge (lines) or dip (planes).
    pub second: Option<f64>,
    /// Optional color/weight field.
    pub attribute: Option<f64>,
}

/// Rows that survived sentinel filtering, ready for `Dataset::load`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectedRows {
    pub pairs: Vec<(f64, f64)>,
    /// Present only when every surviving row carried the attribute; a
    /// half-present column would misalign with the pairs.
    pub attributes: Option<Vec<f64>>,
    /// Rows dropped for a missing required field.
    pub skipped: usize,
}

fn collect(
    rows: &[FieldRow],
    mut azimuth_of: impl FnMut(f64) -> Result<f64, CodecError>,
) -> Result<CollectedRows, CodecError> {
    let mut pairs = Vec::with_capacity(rows.len());
    let mut attributes = Vec::with_capacity(rows.len());
    let mut complete = true;
    let mut skipped = 0usize;
    for row in rows {
        match (row.first, row.second) {
            (Some(first), Some(second)) => {
                pairs.push((azimuth_of(first)?, second));
                match row.attribute {
                    Some(a) => attributes.push(a),
                    None => complete = false,
                }
            }
            _ => skipped += 1,
        }
    }
    let attributes = (complete && !attributes.is_empty()).then_some(attributes);
    Ok(CollectedRows {
        pairs,
        attributes,
        skipped,
    })
}

/// Collect line rows (trend, plunge).
pub fn collect_line_rows(rows: &[FieldRow]) -> Result<CollectedRows, CodecError> {
    collect(rows, Ok)
}

/// Collect plane rows as (strike, dip), converting dip-direction azimuths.
pub fn collect_plane_rows(
    rows: &[FieldRow],
    convention: PlaneConvention,
) -> Result<CollectedRows, CodecError> {
    match convention {
        PlaneConvention::StrikeDip => collect(rows, Ok),
        PlaneConvention::DipDirection => collect(rows, codec::dip_direction_to_strike),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(first: Option<f64>, second: Option<f64>, attribute: Option<f64>) -> FieldRow {
        FieldRow {
            first,
            second,
            attribute,
        }
    }

    #[test]
    fn missing_fields_skip_the_row() {
        let rows = [
            row(Some(10.0), Some(20.0), None),
            row(None, Some(30.0), None),
            row(Some(40.0), None, None),
            row(Some(50.0), Some(60.0), None),
        ];
        let collected = collect_line_rows(&rows).unwrap();
        assert_eq!(collected.pairs, vec![(10.0, 20.0), (50.0, 60.0)]);
        assert_eq!(collected.skipped, 2);
        assert_eq!(collected.attributes, None);
    }

    #[test]
    fn complete_attribute_column_is_kept() {
        let rows = [
            row(Some(10.0), Some(20.0), Some(1.0)),
            row(None, None, Some(99.0)),
            row(Some(30.0), Some(40.0), Some(2.0)),
        ];
        let collected = collect_line_rows(&rows).unwrap();
        assert_eq!(collected.pairs.len(), 2);
        assert_eq!(collected.attributes, Some(vec![1.0, 2.0]));
    }

    #[test]
    fn partial_attribute_column_is_dropped() {
        let rows = [
            row(Some(10.0), Some(20.0), Some(1.0)),
            row(Some(30.0), Some(40.0), None),
        ];
        let collected = collect_line_rows(&rows).unwrap();
        assert_eq!(collected.pairs.len(), 2);
        assert_eq!(collected.attributes, None);
    }

    #[test]
    fn dip_direction_rows_convert_to_strike() {
        let rows = [row(Some(90.0), Some(45.0), None)];
        let collected = collect_plane_rows(&rows, PlaneConvention::DipDirection).unwrap();
        assert_eq!(collected.pairs, vec![(0.0, 45.0)]);
        let same = collect_plane_rows(&rows, PlaneConvention::StrikeDip).unwrap();
        assert_eq!(same.pairs, vec![(90.0, 45.0)]);
    }

    #[test]
    fn non_finite_azimuth_fails_fast() {
        let rows = [row(Some(f64::NAN), Some(45.0), None)];
        assert!(collect_plane_rows(&rows, PlaneConvention::DipDirection).is_err());
    }
}
