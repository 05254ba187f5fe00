//! Typed rows of the wide usage table
//!
//! `UsageSample` mirrors one CSV row; `DataSummary` is logged after loading.

use super::error::Result;
use super::loader::f64_values;
use polars::prelude::DataFrame;

/// Column names written by the recorder and read by the plot
pub const ELAPSED_SECONDS: &str = "elapsed_seconds";
pub const CPU_PERCENT: &str = "cpu_percent";
pub const RAM_PERCENT: &str = "ram_percent";

/// One wide row of the usage file
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSample {
    pub elapsed_seconds: Option<f64>,
    pub cpu_percent: Option<f64>,
    pub ram_percent: Option<f64>,
}

impl UsageSample {
    /// Extract typed samples from a loaded usage frame
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let elapsed = f64_values(df, ELAPSED_SECONDS)?;
        let cpu = f64_values(df, CPU_PERCENT)?;
        let ram = f64_values(df, RAM_PERCENT)?;

        Ok(elapsed
            .into_iter()
            .zip(cpu)
            .zip(ram)
            .map(|((elapsed_seconds, cpu_percent), ram_percent)| UsageSample {
                elapsed_seconds,
                cpu_percent,
                ram_percent,
            })
            .collect())
    }
}

/// Summary statistics for a usage recording
#[derive(Debug, Clone)]
pub struct DataSummary {
    pub total_rows: usize,
    pub elapsed_min: f64,
    pub elapsed_max: f64,
    pub cpu_max: f64,
    pub ram_max: f64,
}

impl DataSummary {
    pub fn from_samples(samples: &[UsageSample]) -> Self {
        let elapsed = samples.iter().filter_map(|s| s.elapsed_seconds);
        let cpu = samples.iter().filter_map(|s| s.cpu_percent);
        let ram = samples.iter().filter_map(|s| s.ram_percent);

        DataSummary {
            total_rows: samples.len(),
            elapsed_min: elapsed.clone().fold(f64::INFINITY, f64::min),
            elapsed_max: elapsed.fold(f64::NEG_INFINITY, f64::max),
            cpu_max: cpu.fold(f64::NEG_INFINITY, f64::max),
            ram_max: ram.fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Whether elapsed_seconds never decreases (nulls skipped)
    pub fn is_monotonic(samples: &[UsageSample]) -> bool {
        let elapsed: Vec<f64> = samples.iter().filter_map(|s| s.elapsed_seconds).collect();
        elapsed.windows(2).all(|w| w[0] <= w[1])
    }
}

impl std::fmt::Display for DataSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DataSummary {{ rows: {}, elapsed: [{:.1}, {:.1}]s, cpu max: {:.1}%, ram max: {:.1}% }}",
            self.total_rows, self.elapsed_min, self.elapsed_max, self.cpu_max, self.ram_max
        )
    }
}
