//! Palette registry for loading and accessing color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name. `tab10` is matplotlib's colour cycle, so the line gets the
//! usual statistical-plot blue.

use super::error::{PlotError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Palette used when the configured one is unknown
pub const DEFAULT_PALETTE: &str = "tab10";

static PALETTE_REGISTRY: OnceLock<PaletteRegistry> = OnceLock::new();

/// Global palette registry, initialized lazily on first access
pub fn palette_registry() -> &'static PaletteRegistry {
    PALETTE_REGISTRY.get_or_init(|| {
        PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
            log::error!("Failed to load palettes.json: {}", e);
            PaletteRegistry::default()
        })
    })
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index (wraps around)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return [128, 128, 128]; // Gray fallback
        }
        let idx = index % self.colors.len();
        parse_hex_color(&self.colors[idx]).unwrap_or([128, 128, 128])
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| PlotError::Config(format!("Failed to parse palettes JSON: {}", e)))?;

        let palettes: HashMap<_, _> = definitions
            .into_iter()
            .map(|def| (def.name.to_lowercase(), def))
            .collect();
        log::debug!("Loaded {} palettes", palettes.len());

        Ok(Self { palettes })
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }
}

/// Parse a hex color string to RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored) and both without `#`.
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        log::warn!("Invalid hex color length '{}': {}", hex, hex.len());
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Get a color from a named palette by index
///
/// Falls back to the default palette if the name is unknown.
pub fn color_from_palette(palette_name: &str, index: usize) -> Result<[u8; 3]> {
    let registry = palette_registry();
    let palette = match registry.get(palette_name) {
        Some(palette) => palette,
        None => {
            log::warn!(
                "Unknown palette '{}', using '{}'",
                palette_name,
                DEFAULT_PALETTE
            );
            registry.get(DEFAULT_PALETTE).ok_or_else(|| {
                PlotError::Config(format!("Default palette '{}' not found", DEFAULT_PALETTE))
            })?
        }
    };

    Ok(palette.get_color(index))
}
