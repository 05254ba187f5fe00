//! Wide to long reshaping
//!
//! `unpivot` turns one column per metric into a `variable`/`value` pair per
//! (row, metric), keeping an index column alongside. The long table has
//! `height × value_columns` rows: all rows of the first metric, then all rows
//! of the second, each block in the original row order.

use super::error::{PlotError, Result};
use super::loader::f64_values;
use polars::prelude::*;

/// Name of the column holding the metric name in the long table
pub const VARIABLE_COLUMN: &str = "variable";

/// Name of the column holding the metric value in the long table
pub const VALUE_COLUMN: &str = "value";

/// One row of the long table
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedSample {
    pub elapsed_seconds: f64,
    pub variable: String,
    pub value: Option<f64>,
}

/// Unpivot `on` columns into `variable`/`value`, keyed by `index`
///
/// The index column keeps its name, values and dtype. Value columns are
/// strictly cast to Float64.
pub fn unpivot(df: &DataFrame, index: &str, on: &[&str]) -> Result<DataFrame> {
    if on.is_empty() {
        return Err(PlotError::NoValueColumns);
    }

    let index_column = df
        .column(index)
        .map_err(|_| PlotError::UnknownColumn(index.to_string()))?
        .clone();
    let height = df.height();

    let mut melted: Option<DataFrame> = None;

    for name in on {
        let values = df
            .column(name)
            .map_err(|_| PlotError::UnknownColumn(name.to_string()))?
            .as_materialized_series()
            .strict_cast(&DataType::Float64)?
            .with_name(VALUE_COLUMN.into());
        let variable = Series::new(VARIABLE_COLUMN.into(), vec![*name; height]);

        let block = DataFrame::new(vec![
            index_column.clone(),
            Column::from(variable),
            Column::from(values),
        ])?;

        melted = Some(match melted {
            None => block,
            Some(mut acc) => {
                acc.vstack_mut(&block)?;
                acc
            }
        });
    }

    let melted = melted.ok_or(PlotError::NoValueColumns)?;
    log::debug!(
        "Unpivoted {} rows × {} columns into {} rows",
        height,
        on.len(),
        melted.height()
    );
    Ok(melted)
}

/// Read the long table back as typed rows
///
/// Rows whose index value is null are skipped; null metric values are kept
/// as `None`.
pub fn melted_samples(melted: &DataFrame, index: &str) -> Result<Vec<MeltedSample>> {
    let index_values = f64_values(melted, index)?;
    let values = f64_values(melted, VALUE_COLUMN)?;
    let variables = melted
        .column(VARIABLE_COLUMN)
        .map_err(|_| PlotError::UnknownColumn(VARIABLE_COLUMN.to_string()))?
        .as_materialized_series()
        .str()?;

    let samples = index_values
        .into_iter()
        .zip(variables)
        .zip(values)
        .filter_map(|((elapsed, variable), value)| {
            Some(MeltedSample {
                elapsed_seconds: elapsed?,
                variable: variable?.to_string(),
                value,
            })
        })
        .collect();

    Ok(samples)
}

/// Every value recorded for `(elapsed_seconds, variable)` in the long table
///
/// A table produced by `unpivot` from a frame with unique index values
/// yields exactly one value per pair.
pub fn pivot_values(samples: &[MeltedSample], elapsed_seconds: f64, variable: &str) -> Vec<f64> {
    samples
        .iter()
        .filter(|s| s.elapsed_seconds == elapsed_seconds && s.variable == variable)
        .filter_map(|s| s.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_frame() -> DataFrame {
        df! {
            "elapsed_seconds" => [0i64, 1, 2],
            "cpu_percent" => [10i64, 20, 15],
            "ram_percent" => [20.0, 25.0, 30.0]
        }
        .unwrap()
    }

    #[test]
    fn test_unpivot_shape() {
        let df = usage_frame();
        let melted = unpivot(&df, "elapsed_seconds", &["cpu_percent", "ram_percent"]).unwrap();

        assert_eq!(melted.height(), 2 * df.height());
        assert_eq!(melted.width(), 3);

        let names: Vec<String> = melted
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["elapsed_seconds", "variable", "value"]);

        // Index dtype is preserved, values become Float64
        assert_eq!(
            melted.column("elapsed_seconds").unwrap().dtype(),
            &DataType::Int64
        );
        assert_eq!(melted.column("value").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_unpivot_scenario() {
        let melted = unpivot(
            &usage_frame(),
            "elapsed_seconds",
            &["cpu_percent", "ram_percent"],
        )
        .unwrap();
        // Printed with cell contents, one line per long row
        let printed = melted.to_string();
        assert!(printed.contains("shape: (6, 3)"));
        assert!(printed
            .lines()
            .any(|line| line.contains("ram_percent") && line.contains("30.0")));

        let samples = melted_samples(&melted, "elapsed_seconds").unwrap();

        let rows: Vec<(f64, &str, f64)> = samples
            .iter()
            .map(|s| (s.elapsed_seconds, s.variable.as_str(), s.value.unwrap()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0.0, "cpu_percent", 10.0),
                (1.0, "cpu_percent", 20.0),
                (2.0, "cpu_percent", 15.0),
                (0.0, "ram_percent", 20.0),
                (1.0, "ram_percent", 25.0),
                (2.0, "ram_percent", 30.0),
            ]
        );
    }

    #[test]
    fn test_pivot_back() {
        let df = usage_frame();
        let melted = unpivot(&df, "elapsed_seconds", &["cpu_percent", "ram_percent"]).unwrap();
        let samples = melted_samples(&melted, "elapsed_seconds").unwrap();

        let elapsed = f64_values(&df, "elapsed_seconds").unwrap();
        for column in ["cpu_percent", "ram_percent"] {
            let original = f64_values(&df, column).unwrap();
            for (x, v) in elapsed.iter().zip(original) {
                let found = pivot_values(&samples, x.unwrap(), column);
                assert_eq!(found, vec![v.unwrap()]);
            }
        }
    }

    #[test]
    fn test_unpivot_single_column() {
        let melted = unpivot(&usage_frame(), "elapsed_seconds", &["ram_percent"]).unwrap();
        assert_eq!(melted.height(), 3);
        assert_eq!(melted.width(), 3);
    }

    #[test]
    fn test_unpivot_errors() {
        let df = usage_frame();
        assert!(matches!(
            unpivot(&df, "elapsed_seconds", &[]),
            Err(PlotError::NoValueColumns)
        ));
        assert!(matches!(
            unpivot(&df, "elapsed", &["cpu_percent"]),
            Err(PlotError::UnknownColumn(c)) if c == "elapsed"
        ));
        assert!(matches!(
            unpivot(&df, "elapsed_seconds", &["gpu_percent"]),
            Err(PlotError::UnknownColumn(c)) if c == "gpu_percent"
        ));
    }

    #[test]
    fn test_unpivot_non_numeric_column() {
        let df = df! {
            "elapsed_seconds" => [0i64, 1],
            "cpu_percent" => ["high", "low"]
        }
        .unwrap();
        assert!(matches!(
            unpivot(&df, "elapsed_seconds", &["cpu_percent"]),
            Err(PlotError::Polars(_))
        ));
    }

    #[test]
    fn test_nulls_are_kept() {
        let df = df! {
            "elapsed_seconds" => [Some(0i64), Some(1), None],
            "cpu_percent" => [Some(1.0), None, Some(3.0)]
        }
        .unwrap();
        let melted = unpivot(&df, "elapsed_seconds", &["cpu_percent"]).unwrap();
        assert_eq!(melted.height(), 3);

        // Null index rows cannot be placed on the x axis
        let samples = melted_samples(&melted, "elapsed_seconds").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].value, None);
    }
}
