//! Logging setup for the binaries
//!
//! Both binaries log through the `log` facade into `env_logger`. The plot
//! honours `RUST_LOG`; the recorder maps `-v` counts onto level filters,
//! with a louder filter for this crate than for its dependencies.

use super::error::{PlotError, Result};
use log::LevelFilter;

/// (local, dependency) level filters for a `-v` count, None past `-vvv`
pub fn verbosity_filters(verbosity: u8) -> Option<(LevelFilter, LevelFilter)> {
    match verbosity {
        0 => Some((LevelFilter::Warn, LevelFilter::Warn)),
        1 => Some((LevelFilter::Info, LevelFilter::Warn)),
        2 => Some((LevelFilter::Debug, LevelFilter::Warn)),
        3 => Some((LevelFilter::Trace, LevelFilter::Info)),
        _ => None,
    }
}

/// Initialise env_logger from a `-v` count
///
/// `bin_target` is the calling binary's module path so that its own records
/// get the local filter too.
pub fn setup_logging(verbosity: u8, bin_target: &str) -> Result<LevelFilter> {
    let (local, deps) = verbosity_filters(verbosity).ok_or_else(|| {
        PlotError::Config(format!(
            "Too many levels of verbosity ({}), you can have up to 3",
            verbosity
        ))
    })?;

    env_logger::Builder::new()
        .filter_level(deps)
        .filter_module(env!("CARGO_CRATE_NAME"), local)
        .filter_module(bin_target, local)
        .try_init()
        .map_err(|e| PlotError::Config(format!("Logger already initialised: {}", e)))?;

    log::info!("Local log level set to {}, dependencies at {}", local, deps);
    Ok(local)
}

/// Initialise env_logger from `RUST_LOG`, warnings only by default
pub fn init_from_env() {
    let env = env_logger::Env::default().default_filter_or("warn");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Logger already initialised: {}", e);
    }
}
