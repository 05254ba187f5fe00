//! Plot generation pipeline
//!
//! The pipeline:
//! 1. Loads the usage CSV
//! 2. Unpivots the metric columns into `variable`/`value`
//! 3. Partitions the long table into facet panels and renders them
//!
//! Both tables are printed to stdout on the way.

use crate::config::PlotConfig;
use crate::memprof;
use crate::plotters_integration::render_facets;
use crate::usage::data::{DataSummary, UsageSample};
use crate::usage::error::Result;
use crate::usage::facets::FacetInfo;
use crate::usage::{loader, reshape};
use std::path::PathBuf;
use std::time::Instant;

/// What was written by a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PlotResult {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Rows in the wide input table
    pub n_rows: usize,
    /// Rows in the long table
    pub n_melted_rows: usize,
    pub n_panels: usize,
}

/// Load, reshape and render according to `config`
pub fn generate_plot(config: &PlotConfig) -> Result<PlotResult> {
    let m0 = memprof::checkpoint_return("generate_plot START");
    let t0 = Instant::now();

    println!("[1/3] Loading {}...", config.input_path.display());
    let data = loader::read_usage_csv(&config.input_path, &config.required_columns())?;
    println!("{}", data);

    let usage = UsageSample::from_frame(&data)?;
    log::info!("{}", DataSummary::from_samples(&usage));
    if !DataSummary::is_monotonic(&usage) {
        log::warn!("elapsed_seconds is not monotonically non-decreasing");
    }
    let m1 = memprof::delta("After read_usage_csv", m0);
    let t1 = memprof::time_delta("After read_usage_csv", t0, t0);

    println!("\n[2/3] Unpivoting {:?}...", config.value_columns);
    let melted = reshape::unpivot(&data, &config.index_column, &config.value_column_refs())?;
    println!("{}", melted);

    let samples = reshape::melted_samples(&melted, &config.index_column)?;
    let facets = FacetInfo::from_samples(&samples);
    let _m2 = memprof::delta("After unpivot", m1);
    let t2 = memprof::time_delta("After unpivot", t0, t1);

    println!(
        "\n[3/3] Rendering {} panel(s) to {}...",
        facets.n_panels(),
        config.output_path.display()
    );
    for panel in &facets.panels {
        println!("  {}: {} points", panel.label, panel.points.len());
    }
    let (width, height) = render_facets(&facets, config, &config.output_path)?;
    let _t3 = memprof::time_delta("After render_facets", t0, t2);

    Ok(PlotResult {
        output_path: config.output_path.clone(),
        width,
        height,
        n_rows: data.height(),
        n_melted_rows: melted.height(),
        n_panels: facets.n_panels(),
    })
}
