//! Plotters integration
//!
//! Draws facet panels into a PNG with the plotters bitmap backend.
//!
//! Module organization:
//! - `fonts`: runtime TrueType font registration
//! - `renderer`: panel layout and line drawing

pub mod fonts;
pub mod renderer;

pub use renderer::render_facets;
