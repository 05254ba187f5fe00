//! Usage CSV records written by the recorder
//!
//! The header row carries the same column names the plot reads back.

use super::error::{PlotError, Result};
use super::system::CpuRamUsage;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const MIB: f64 = (1u64 << 20) as f64;

/// One row of the usage CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord {
    pub timestamp: String,
    pub elapsed_seconds: u64,
    pub cpu_percent: String,
    pub ram_percent: String,
    pub ram_mb: String,
}

impl UsageRecord {
    /// Build a row for a sample taken at `now`
    ///
    /// Percentages and MiB are written with one decimal; elapsed time is
    /// rounded to whole seconds.
    pub fn new(
        start: DateTime<Local>,
        now: DateTime<Local>,
        total_memory: u64,
        usage: &CpuRamUsage,
    ) -> Self {
        let elapsed_ms = (now - start).num_milliseconds().max(0);
        let elapsed_seconds = ((elapsed_ms as f64) / 1000.0).round() as u64;

        let ram_percent = if total_memory == 0 {
            0.0
        } else {
            100.0 * usage.memory_bytes as f64 / total_memory as f64
        };

        Self {
            timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            elapsed_seconds,
            cpu_percent: format!("{:.1}", usage.cpu_percent),
            ram_percent: format!("{:.1}", ram_percent),
            ram_mb: format!("{:.1}", usage.memory_bytes as f64 / MIB),
        }
    }
}

/// CSV writer that flushes after every record
pub struct UsageWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl UsageWriter<File> {
    /// Create (or truncate) the output file
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self {
            inner: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> UsageWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
        }
    }

    /// Append one record and flush it to the underlying writer
    pub fn write(&mut self, record: &UsageRecord) -> Result<()> {
        self.inner.serialize(record)?;
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner.into_inner().map_err(|e| {
            let err = e.error();
            PlotError::Io(std::io::Error::new(err.kind(), err.to_string()))
        })
    }
}
