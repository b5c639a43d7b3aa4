//! Project manifest lookup
//!
//! A project manifest (`package.json`) may point at the configuration file
//! through a string field, resolved relative to the manifest's directory.

use path_clean::PathClean;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_MANIFEST_FILENAME: &str = "package.json";
pub const DEFAULT_MANIFEST_FIELD: &str = "lintConfig";

/// Read the configuration pointer from the manifest at `manifest_path`.
///
/// Returns `None` if the manifest is unreadable, is not a JSON object, or
/// does not declare `field` as a string.
pub fn config_path_from_manifest(manifest_path: &Path, field: &str) -> Option<PathBuf> {
    let content = match std::fs::read_to_string(manifest_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read manifest {}: {}", manifest_path.display(), e);
            return None;
        }
    };

    let manifest: Value = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!("Failed to parse manifest {}: {}", manifest_path.display(), e);
            return None;
        }
    };

    let pointer = match manifest.get(field) {
        Some(Value::String(pointer)) if !pointer.is_empty() => pointer,
        Some(_) => {
            debug!("Manifest field `{}` is not a path, ignoring", field);
            return None;
        }
        None => return None,
    };

    let base = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    let resolved = base.join(pointer).clean();
    debug!(
        "Manifest {} points at {}",
        manifest_path.display(),
        resolved.display()
    );

    Some(resolved)
}

/// Resolve an explicitly requested path against `cwd`
pub fn resolve_explicit(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        cwd.join(path).clean()
    }
}
