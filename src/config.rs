//! Plot configuration
//!
//! Configuration is built from the properties embedded from plot.json.
//! All default values live there; nothing is read from the command line or a
//! configuration file at runtime.

use crate::usage::error::{PlotError, Result};
use crate::usage::plot_properties::{registry, PropertyRegistry};
use std::path::PathBuf;

/// Largest image side in pixels
const MAX_PIXELS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// CSV file read by the loader
    pub input_path: PathBuf,

    /// PNG file written by the renderer
    pub output_path: PathBuf,

    /// Index column kept when unpivoting (x axis)
    pub index_column: String,

    /// Metric columns, one panel each
    pub value_columns: Vec<String>,

    /// Environment variable that must be set before anything runs
    pub env_marker: String,

    /// Height of one panel in pixels
    pub panel_height: u32,

    /// Panel width / panel height
    pub panel_aspect: f64,

    /// Categorical palette name, the line uses its first colour
    pub palette: String,

    /// Line stroke width in pixels
    pub line_width: u32,

    /// TrueType fonts tried in order
    pub font_paths: Vec<PathBuf>,
}

impl PlotConfig {
    /// Create config from the embedded plot.json properties
    pub fn from_registry() -> Result<Self> {
        Self::from_properties(registry())
    }

    pub fn from_properties(props: &PropertyRegistry) -> Result<Self> {
        let value_columns = props.get_list("column.values")?;
        if value_columns.is_empty() {
            return Err(PlotError::Config(
                "column.values must name at least one column".into(),
            ));
        }

        let panel_aspect = props.get_f64("panel.aspect")?;
        if !(panel_aspect > 0.0 && panel_aspect.is_finite()) {
            return Err(PlotError::Config(format!(
                "panel.aspect must be positive, got {}",
                panel_aspect
            )));
        }

        Ok(Self {
            input_path: PathBuf::from(props.get_string("input.path")?),
            output_path: PathBuf::from(props.get_string("output.path")?),
            index_column: props.get_string("column.index")?,
            value_columns,
            env_marker: props.get_string("env.marker")?,
            panel_height: props.get_u32("panel.height")?,
            panel_aspect,
            palette: props.get_string("palette")?,
            line_width: props.get_u32("line.width")?,
            font_paths: props
                .get_list("font.paths")?
                .into_iter()
                .map(PathBuf::from)
                .collect(),
        })
    }

    /// Columns the input file must have
    pub fn required_columns(&self) -> Vec<&str> {
        std::iter::once(self.index_column.as_str())
            .chain(self.value_columns.iter().map(String::as_str))
            .collect()
    }

    pub fn value_column_refs(&self) -> Vec<&str> {
        self.value_columns.iter().map(String::as_str).collect()
    }

    /// Width of one panel in pixels
    pub fn panel_width(&self) -> u32 {
        (self.panel_height as f64 * self.panel_aspect).round().max(1.0) as u32
    }

    /// Resolve image dimensions for a number of vertically stacked panels
    ///
    /// One panel height per panel (at least one), each side capped at 10000px.
    /// Returns (width, height) in pixels
    pub fn resolve_dimensions(&self, n_panels: usize) -> (u32, u32) {
        let width = (self.panel_width() as u64).min(MAX_PIXELS) as u32;
        let height = (n_panels.max(1) as u64 * self.panel_height as u64).min(MAX_PIXELS) as u32;
        (width, height)
    }
}
