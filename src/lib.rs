//! Process Usage Plot Library
//!
//! Core modules shared by the `plot_usage` and `record` binaries:
//! - `usage`: loading, reshaping and sampling of process usage data
//! - `plotters_integration`: faceted PNG rendering
//! - `config`: plot configuration from the embedded properties
//! - `pipeline`: load, unpivot and render in one call

pub mod config;
pub mod memprof;
pub mod pipeline;
pub mod plotters_integration;
pub mod usage;
