//! Process usage data module
//!
//! Everything between the CSV on disk and the facet panels handed to the
//! renderer, plus the recorder's side of the same file.
//!
//! Structure:
//! - `loader.rs` / `data.rs`: CSV reading and typed wide rows
//! - `reshape.rs`: wide to long unpivot
//! - `facets.rs`: long table to per-variable panels
//! - `plot_properties.rs` / `palettes.rs`: embedded defaults
//! - `record.rs` / `system.rs`: the recorder's rows and process sampling
//! - `guard.rs` / `logger.rs`: process environment checks and log setup
//! - `error.rs`: Error types

pub mod data;
pub mod error;
pub mod facets;
pub mod guard;
pub mod loader;
pub mod logger;
pub mod palettes;
pub mod plot_properties;
pub mod record;
pub mod reshape;
pub mod system;

// Re-exports for convenience
pub use data::{DataSummary, UsageSample};
pub use error::{PlotError, Result};
pub use facets::{FacetInfo, FacetPanel};
pub use reshape::{MeltedSample, VALUE_COLUMN, VARIABLE_COLUMN};
pub use system::{CpuRamUsage, ProcessSampler};
