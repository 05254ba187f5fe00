//! Isolated-environment check
//!
//! The plot refuses to run unless an environment marker variable is set.
//! The check happens before any file is read or written.

use super::error::{PlotError, Result};
use std::ffi::OsString;

/// Fail with `PlotError::NotIsolated` when `marker` is absent from the
/// process environment. An empty value counts as present.
pub fn check_isolated_env(marker: &str) -> Result<()> {
    check_with(marker, |name| std::env::var_os(name))
}

/// Same check against an arbitrary variable lookup
pub fn check_with<F>(marker: &str, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<OsString>,
{
    match lookup(marker) {
        Some(_) => {
            log::debug!("{} is set, environment is isolated", marker);
            Ok(())
        }
        None => Err(PlotError::NotIsolated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_present() {
        let lookup = |name: &str| (name == "VIRTUAL_ENV").then(|| OsString::from("/tmp/venv"));
        assert!(check_with("VIRTUAL_ENV", lookup).is_ok());
    }

    #[test]
    fn test_marker_empty_counts_as_present() {
        assert!(check_with("VIRTUAL_ENV", |_| Some(OsString::new())).is_ok());
    }

    #[test]
    fn test_marker_missing() {
        let err = check_with("VIRTUAL_ENV", |_| None).unwrap_err();
        assert!(matches!(err, PlotError::NotIsolated));
        assert_eq!(
            err.to_string(),
            "Run this program from a venv to avoid polluting your system."
        );
    }

    #[test]
    fn test_process_environment() {
        // PATH is set in any sane test environment, this name never is
        assert!(check_isolated_env("PATH").is_ok());
        assert!(check_isolated_env("PROCESS_USAGE_PLOT_UNSET_MARKER_7f3a").is_err());
    }
}
