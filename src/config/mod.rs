//! Configuration resolution for lintrc
//!
//! Resolves the effective configuration from three layers:
//! 1. Inline options (highest priority)
//! 2. Configuration file (explicit, manifest pointer, or discovered)
//! 3. Built-in defaults (lowest priority)

mod cache;
mod defaults;
mod layer;
mod loader;
mod locator;
mod manifest;
mod merge;
mod resolver;

pub use cache::{global_cache, CachePolicy, ResolutionCache};
pub use defaults::{bundled_defaults, DEFAULTS_FILENAME};
pub use layer::{
    Flag, RawLayer, ResolvedConfig, CACHE_CONFIG_OPTION, CONFIG_FILE_OPTION,
    MERGE_DEFAULT_RULES_OPTION, OPTIONS_KEY, RULES_KEY,
};
pub use loader::{load, parse_layer};
pub use locator::{absolute_path, home_dir, FileLocator};
pub use manifest::{
    config_path_from_manifest, resolve_explicit, DEFAULT_MANIFEST_FIELD, DEFAULT_MANIFEST_FILENAME,
};
pub use merge::{deep_merge, merge_layers, merge_maps};
pub use resolver::{ConfigResolver, ResolverSettings, DEFAULT_CONFIG_FILENAME};
