//! Process Usage Plot - Main entry point
//!
//! Reads `process_usage.csv` from the working directory, unpivots the CPU and
//! RAM columns and writes a faceted line plot to `seaborn_plot.png`.
//!
//! Refuses to run outside an isolated environment (`VIRTUAL_ENV` unset).

use anyhow::Context;
use process_usage_plot::config::PlotConfig;
use process_usage_plot::pipeline;
use process_usage_plot::usage::{guard, logger};

fn main() {
    let config = match PlotConfig::from_registry() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Must run before any file is touched
    if let Err(e) = guard::check_isolated_env(&config.env_marker) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    logger::init_from_env();

    if let Err(e) = run(&config) {
        eprintln!("\n✗ Plot generation failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &PlotConfig) -> anyhow::Result<()> {
    let result = pipeline::generate_plot(config).with_context(|| {
        format!(
            "Failed to plot {} into {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    println!(
        "\n✓ Saved {} ({}×{}, {} panel(s), {} rows)",
        result.output_path.display(),
        result.width,
        result.height,
        result.n_panels,
        result.n_rows
    );
    Ok(())
}
