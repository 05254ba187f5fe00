//! Plot property definitions with defaults from plot.json
//!
//! plot.json is embedded at compile time and is the single place where the
//! plot's file names, column names and geometry are defined. Nothing is read
//! from disk or from the command line at runtime.

use super::error::{PlotError, Result};
use std::collections::HashMap;

/// plot.json embedded at compile time
const PLOT_JSON: &str = include_str!("../../plot.json");

/// Property definition from plot.json
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub default_value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String,
    Number,
}

/// Registry of all plot properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse a plot.json document and build the registry
    pub fn from_json(json: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| PlotError::Config(format!("plot.json is invalid JSON: {}", e)))?;

        let properties_array = json["properties"]
            .as_array()
            .ok_or_else(|| PlotError::Config("plot.json missing 'properties' array".into()))?;

        let mut properties = HashMap::new();

        for prop in properties_array {
            let name = prop["name"]
                .as_str()
                .ok_or_else(|| PlotError::Config("property missing 'name'".into()))?
                .to_string();

            let kind = match prop["kind"].as_str() {
                Some("StringProperty") => PropertyKind::String,
                Some("NumberProperty") => PropertyKind::Number,
                other => {
                    return Err(PlotError::Config(format!(
                        "Unknown kind {:?} for property '{}'",
                        other, name
                    )))
                }
            };

            let default_value = prop["defaultValue"].as_str().unwrap_or("").to_string();
            let description = prop["description"].as_str().unwrap_or("").to_string();

            properties.insert(
                name.clone(),
                PropertyDef {
                    name,
                    kind,
                    default_value,
                    description,
                },
            );
        }

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// String property value
    pub fn get_string(&self, name: &str) -> Result<String> {
        self.get_default(name)
            .map(str::to_string)
            .ok_or_else(|| PlotError::Config(format!("Unknown property '{}'", name)))
    }

    /// Numeric property value
    pub fn get_f64(&self, name: &str) -> Result<f64> {
        let value = self.get_string(name)?;
        value.trim().parse::<f64>().map_err(|_| {
            PlotError::Config(format!(
                "Invalid numeric value '{}' for property '{}'",
                value, name
            ))
        })
    }

    /// Numeric property value that must be a positive whole number
    pub fn get_u32(&self, name: &str) -> Result<u32> {
        let value = self.get_string(name)?;
        match value.trim().parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(PlotError::Config(format!(
                "Invalid positive integer '{}' for property '{}'",
                value, name
            ))),
        }
    }

    /// Comma separated list property, blank entries dropped
    pub fn get_list(&self, name: &str) -> Result<Vec<String>> {
        let value = self.get_string(name)?;
        Ok(value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Global registry instance (initialized lazily)
static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(PLOT_JSON).unwrap_or_else(|e| {
            log::error!("Failed to load plot.json: {}", e);
            PropertyRegistry::default()
        })
    })
}
