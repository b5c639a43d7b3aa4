//! Built-in default configuration
//!
//! The defaults file is embedded at compile time from `defaults/`.

use crate::config::layer::RawLayer;
use crate::config::loader::parse_layer;
use crate::types::{ConfigError, Result};
use include_dir::{include_dir, Dir};
use std::path::Path;
use tracing::debug;

// Embed the defaults directory at compile time
static DEFAULTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/defaults");

pub const DEFAULTS_FILENAME: &str = "lintrc.yml";

/// Parse the bundled defaults layer
pub fn bundled_defaults() -> Result<RawLayer> {
    let origin = Path::new("<bundled>").join(DEFAULTS_FILENAME);

    let file = DEFAULTS_DIR
        .get_file(DEFAULTS_FILENAME)
        .ok_or_else(|| ConfigError::parse(&origin, "bundled defaults are missing"))?;

    let content = file
        .contents_utf8()
        .ok_or_else(|| ConfigError::parse(&origin, "invalid UTF-8"))?;

    let defaults = parse_layer(content, &origin)?;
    debug!("Loaded {} default rules", defaults.rules.len());

    Ok(defaults)
}
