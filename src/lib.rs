//! lintrc - layered configuration resolution for lint tooling
//!
//! Resolves the configuration a lint run should use by merging built-in
//! defaults, the nearest (or explicitly named) configuration file, and inline
//! options supplied by the caller.

pub mod config;
pub mod types;

pub use config::{
    CachePolicy, ConfigResolver, FileLocator, Flag, RawLayer, ResolutionCache, ResolvedConfig,
    ResolverSettings,
};
pub use types::{ConfigError, Result};

use std::path::Path;
use std::sync::{Arc, PoisonError};

/// Resolve the configuration for the current process.
///
/// Uses the working directory, the user's home directory and the bundled
/// defaults, with the process-wide resolution cache. Callers wanting an
/// isolated cache should use [`ConfigResolver::resolve`] directly.
pub fn resolve(inline: &RawLayer, config_path: Option<&Path>) -> Result<Arc<ResolvedConfig>> {
    let resolver = ConfigResolver::new(ResolverSettings::from_env()?)?;
    let mut cache = config::global_cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    resolver.resolve(&mut cache, inline, config_path)
}
