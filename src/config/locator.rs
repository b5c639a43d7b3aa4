//! Upward file search
//!
//! Walks from a starting directory toward the filesystem root looking for a
//! file by name. The walk stops at the user's home directory.

use path_clean::PathClean;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variables consulted for the home directory, in order
const HOME_VARS: [&str; 3] = ["HOME", "HOMEPATH", "USERPROFILE"];

/// The user's home directory.
///
/// Uses the first defined of `HOME`, `HOMEPATH` and `USERPROFILE`, falling
/// back to the platform lookup.
pub fn home_dir() -> Option<PathBuf> {
    HOME_VARS
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Absolute, symlink-resolved form of `path`.
///
/// Relative paths are joined onto the working directory. Paths that cannot be
/// canonicalized (for example, ones that do not exist) are only normalized.
pub fn absolute_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    if path.is_absolute() {
        return path.clean();
    }

    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path).clean(),
        Err(_) => path.clean(),
    }
}

/// Bounded upward search for a file by name
#[derive(Debug, Clone, Default)]
pub struct FileLocator {
    home: Option<PathBuf>,
}

impl FileLocator {
    /// Create a locator bounded by `home`
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            home: home.map(|home| absolute_path(&home)),
        }
    }

    /// Create a locator bounded by the current user's home directory
    pub fn from_env() -> Self {
        Self::new(home_dir())
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Search upward from `start_dir` (or the working directory) for `filename`.
    ///
    /// Returns the canonical path of the first match. The search ends without
    /// a match at the home directory or at a filesystem root.
    pub fn locate(&self, start_dir: Option<&Path>, filename: &str) -> Option<PathBuf> {
        let start = match start_dir {
            Some(dir) => absolute_path(dir),
            None => std::env::current_dir().ok()?,
        };

        let mut dir = start.as_path();
        loop {
            let candidate = dir.join(filename);
            if candidate.exists() {
                return match candidate.canonicalize() {
                    Ok(path) => {
                        debug!("Found {} at {}", filename, path.display());
                        Some(path)
                    }
                    Err(e) => {
                        warn!("Failed to resolve {}: {}", candidate.display(), e);
                        None
                    }
                };
            }

            if self.home.as_deref() == Some(dir) {
                debug!("Reached home directory looking for {}", filename);
                return None;
            }

            match dir.parent() {
                Some(parent) if parent != dir => dir = parent,
                _ => {
                    debug!("Reached filesystem root looking for {}", filename);
                    return None;
                }
            }
        }
    }
}
