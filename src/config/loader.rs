//! Configuration file loading
//!
//! Files are parsed as YAML, which also accepts plain JSON. A missing file is
//! not an error: it loads as an empty layer.

use crate::config::layer::RawLayer;
use crate::types::{ConfigError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Load a configuration layer from `path`.
///
/// Returns an empty layer when `path` is `None` or does not exist.
pub fn load(path: Option<&Path>) -> Result<RawLayer> {
    let path = match path {
        Some(path) => path,
        None => {
            debug!("No configuration file to load");
            return Ok(RawLayer::default());
        }
    };

    if !path.exists() {
        debug!("Configuration file {} does not exist", path.display());
        return Ok(RawLayer::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let layer = parse_layer(&content, path)?;
    info!(
        "Loaded configuration from {} ({} rules)",
        path.display(),
        layer.rules.len()
    );

    Ok(layer)
}

/// Parse configuration text into a layer, attributing errors to `origin`
pub fn parse_layer(content: &str, origin: &Path) -> Result<RawLayer> {
    if content.trim().is_empty() {
        return Ok(RawLayer::default());
    }

    let value: Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse(origin, e))?;

    RawLayer::from_value(value, origin)
}
