//! Faceted line plot rendering
//!
//! Panels are stacked top to bottom, one per variable. They share the x
//! range; each has its own y range. The x-axis description only appears on
//! the bottom panel.

use super::fonts::{ensure_font, FONT_FAMILY};
use crate::config::PlotConfig;
use crate::usage::error::{PlotError, Result};
use crate::usage::facets::{FacetInfo, FacetPanel};
use crate::usage::palettes::color_from_palette;
use crate::usage::reshape::VALUE_COLUMN;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// How every panel is drawn
struct PanelStyle<'a> {
    line_color: RGBColor,
    line_width: u32,
    with_text: bool,
    x_desc: &'a str,
}

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Render all facet panels into a PNG at `path`, overwriting it
///
/// Returns the image size in pixels.
pub fn render_facets(facets: &FacetInfo, config: &PlotConfig, path: &Path) -> Result<(u32, u32)> {
    if facets.is_empty() {
        return Err(PlotError::EmptyData);
    }

    let (width, height) = config.resolve_dimensions(facets.n_panels());
    let [r, g, b] = color_from_palette(&config.palette, 0)?;
    let style = PanelStyle {
        line_color: RGBColor(r, g, b),
        line_width: config.line_width,
        with_text: ensure_font(&config.font_paths),
        x_desc: &config.index_column,
    };

    log::debug!(
        "Rendering {} panel(s) at {}×{} to {}",
        facets.n_panels(),
        width,
        height,
        path.display()
    );

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let areas = root.split_evenly((facets.n_panels(), 1));
    let x_range = facets.x_range();
    let last = facets.n_panels() - 1;

    for (panel, area) in facets.panels.iter().zip(areas.iter()) {
        draw_panel(area, panel, x_range, panel.index == last, &style)?;
    }

    root.present().map_err(render_err)?;
    Ok((width, height))
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &FacetPanel,
    x_range: (f64, f64),
    is_bottom: bool,
    style: &PanelStyle<'_>,
) -> Result<()> {
    let (y_min, y_max) = panel.y_range();

    let mut builder = ChartBuilder::on(area);
    builder.margin(10);
    if style.with_text {
        builder
            .caption(&panel.label, (FONT_FAMILY, 16).into_font())
            .x_label_area_size(if is_bottom { 40 } else { 25 })
            .y_label_area_size(55);
    }

    let mut chart = builder
        .build_cartesian_2d(x_range.0..x_range.1, y_min..y_max)
        .map_err(render_err)?;

    let blank = |_: &f64| String::new();
    {
        // Axes only, no grid
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh().disable_y_mesh();

        if style.with_text {
            mesh.x_labels(6).y_labels(5).y_desc(VALUE_COLUMN);
            if is_bottom {
                mesh.x_desc(style.x_desc);
            } else {
                mesh.x_label_formatter(&blank);
            }
        } else {
            mesh.x_labels(0).y_labels(0);
        }

        mesh.draw().map_err(render_err)?;
    }

    chart
        .draw_series(LineSeries::new(
            panel.points.iter().copied(),
            style.line_color.stroke_width(style.line_width),
        ))
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::reshape::MeltedSample;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn facets() -> FacetInfo {
        let rows = [
            (0.0, "cpu_percent", 10.0),
            (1.0, "cpu_percent", 20.0),
            (2.0, "cpu_percent", 15.0),
            (0.0, "ram_percent", 20.0),
            (1.0, "ram_percent", 25.0),
            (2.0, "ram_percent", 30.0),
        ];
        let samples: Vec<MeltedSample> = rows
            .iter()
            .map(|(x, v, y)| MeltedSample {
                elapsed_seconds: *x,
                variable: v.to_string(),
                value: Some(*y),
            })
            .collect();
        FacetInfo::from_samples(&samples)
    }

    /// (width, height) from the PNG IHDR chunk
    fn png_size(bytes: &[u8]) -> (u32, u32) {
        let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (w, h)
    }

    #[test]
    fn test_render_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let config = PlotConfig::from_registry().unwrap();

        let (w, h) = render_facets(&facets(), &config, &path).unwrap();
        assert_eq!((w, h), (600, 600));

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes[..8], PNG_MAGIC);
        assert_eq!(png_size(&bytes), (600, 600));
    }

    #[test]
    fn test_render_is_deterministic_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        std::fs::write(&path, b"stale").unwrap();

        let config = PlotConfig::from_registry().unwrap();

        render_facets(&facets(), &config, &path).unwrap();
        let first = std::fs::read(&path).unwrap();
        render_facets(&facets(), &config, &path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first[..8], PNG_MAGIC);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_flat_panel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        let samples = vec![MeltedSample {
            elapsed_seconds: 5.0,
            variable: "ram_percent".into(),
            value: Some(42.0),
        }];
        let config = PlotConfig::from_registry().unwrap();

        let size = render_facets(&FacetInfo::from_samples(&samples), &config, &path).unwrap();
        assert_eq!(size, (600, 300));
    }

    #[test]
    fn test_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let config = PlotConfig::from_registry().unwrap();

        assert!(matches!(
            render_facets(&FacetInfo::default(), &config, &path),
            Err(PlotError::EmptyData)
        ));
        assert!(!path.exists());
    }
}
