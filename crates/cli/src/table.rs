//! CSV ingestion via polars.
//!
//! Column nulls map one-to-one onto the host's "no value" sentinel: every
//! cell comes back as `Option<f64>`, and downstream filtering decides which
//! rows survive. Integer columns are cast to floats; a non-numeric column
//! is an error, not a silent skip.

use anyhow::{Context, Result};
use polars::prelude::*;
use stereostat::ingest::FieldRow;

/// Read the bound columns of a CSV table as sentinel-aware rows.
pub fn read_rows(
    path: &str,
    first: &str,
    second: &str,
    attribute: Option<&str>,
) -> Result<Vec<FieldRow>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("reading {path}"))?
        .collect()
        .with_context(|| format!("collecting {path}"))?;
    let first = float_column(&df, first)?;
    let second = float_column(&df, second)?;
    let attribute = match attribute {
        Some(name) => Some(float_column(&df, name)?),
        None => None,
    };
    Ok(first
        .into_iter()
        .zip(second)
        .enumerate()
        .map(|(i, (first, second))| FieldRow {
            first,
            second,
            attribute: attribute.as_ref().and_then(|col| col[i]),
        })
        .collect())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)
        .with_context(|| format!("column {name:?} not found"))?;
    let series = series
        .cast(&DataType::Float64)
        .with_context(|| format!("column {name:?} is not numeric"))?;
    Ok(series.f64()?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn nulls_become_sentinels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        fs::write(&path, "Trend,Plunge,Quality\n10,20,1.5\n,30,2.0\n40,,2.5\n").unwrap();
        let rows = read_rows(path.to_str().unwrap(), "Trend", "Plunge", Some("Quality")).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].first, Some(10.0));
        assert_eq!(rows[0].attribute, Some(1.5));
        assert_eq!(rows[1].first, None);
        assert_eq!(rows[2].second, None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        fs::write(&path, "Trend,Plunge\n10,20\n").unwrap();
        assert!(read_rows(path.to_str().unwrap(), "Strike", "Dip", None).is_err());
    }
}
