//! Usage CSV loading
//!
//! Reads the recorder's CSV into a polars DataFrame and checks that the
//! columns the plot needs are present. Any other column is carried along
//! untouched.

use super::error::{PlotError, Result};
use polars::prelude::*;
use std::path::Path;

/// Read a CSV file with a header row and check the required columns
pub fn read_usage_csv(path: &Path, required: &[&str]) -> Result<DataFrame> {
    log::debug!("Reading {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    check_columns(&df, required, path)?;

    log::info!(
        "Loaded {} rows × {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Fail with the first required column that the frame lacks
pub fn check_columns(df: &DataFrame, required: &[&str], path: &Path) -> Result<()> {
    let names = df.get_column_names();
    for column in required {
        if !names.iter().any(|name| name.as_str() == *column) {
            return Err(PlotError::MissingColumn {
                column: column.to_string(),
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Values of a column strictly cast to f64
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| PlotError::UnknownColumn(name.to_string()))?;
    let series = column
        .as_materialized_series()
        .strict_cast(&DataType::Float64)?;
    let values = series.f64()?.into_iter().collect();
    Ok(values)
}
