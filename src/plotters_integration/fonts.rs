//! Font registration
//!
//! The bitmap backend rasterises text with ab_glyph, which only knows fonts
//! registered at runtime. The first readable font from the configured paths
//! is registered as "sans-serif" once per process; without one, plots are
//! drawn without text.

use crate::usage::error::{PlotError, Result};
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Family name used for every text element
pub const FONT_FAMILY: &str = "sans-serif";

static FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register the first usable font; returns whether text can be drawn
///
/// Only the first call looks at `paths`.
pub fn ensure_font(paths: &[PathBuf]) -> bool {
    FONT.get_or_init(|| {
        let found = paths.iter().find_map(|path| match register_path(path) {
            Ok(true) => Some(path.clone()),
            Ok(false) => None,
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        });

        match &found {
            Some(path) => log::info!("Using font {}", path.display()),
            None => log::warn!("No usable font found, rendering without text"),
        }
        found
    })
    .is_some()
}

/// Font registered by `ensure_font`, if any
pub fn registered_font() -> Option<&'static Path> {
    FONT.get().and_then(|f| f.as_deref())
}

/// Ok(false) when the file cannot be read, Err when it is not a font
fn register_path(path: &Path) -> Result<bool> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("Skipping font {}: {}", path.display(), e);
            return Ok(false);
        }
    };

    // ab_glyph keeps borrowing the font data for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| PlotError::Font(format!("{} is not a valid font", path.display())))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_path_is_skipped() {
        let path = PathBuf::from("/nonexistent/fonts/NoSuchFont.ttf");
        assert!(!register_path(&path).unwrap());
    }

    #[test]
    fn test_invalid_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        assert!(matches!(register_path(&path), Err(PlotError::Font(_))));
    }

    #[test]
    fn test_ensure_font_is_stable() {
        let first = ensure_font(&[]);
        // Later calls keep the first answer whatever paths they pass
        assert_eq!(ensure_font(&[PathBuf::from("/nonexistent.ttf")]), first);
        assert_eq!(registered_font().is_some(), first);
    }
}
