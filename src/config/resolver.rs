//! Configuration resolution
//!
//! Combines three layers in ascending precedence:
//! 1. Built-in defaults (bundled with the crate)
//! 2. Configuration file (explicit path, manifest pointer, or upward search)
//! 3. Inline options supplied by the caller
//!
//! Each of the file and inline layers may set `options.merge-default-rules`
//! to `false` to replace the rules beneath it instead of merging into them.

use crate::config::cache::{CachePolicy, Fingerprint, ResolutionCache};
use crate::config::defaults::bundled_defaults;
use crate::config::layer::{
    RawLayer, ResolvedConfig, CACHE_CONFIG_OPTION, MERGE_DEFAULT_RULES_OPTION,
};
use crate::config::loader;
use crate::config::locator::{absolute_path, home_dir, FileLocator};
use crate::config::manifest::{
    config_path_from_manifest, resolve_explicit, DEFAULT_MANIFEST_FIELD,
    DEFAULT_MANIFEST_FILENAME,
};
use crate::config::merge::{merge_layers, merge_maps};
use crate::types::{ConfigError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILENAME: &str = ".lintrc.yml";

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Directory searches start from and relative paths resolve against (absolute)
    pub cwd: PathBuf,
    /// Upper bound of the upward search
    pub home: Option<PathBuf>,
    pub config_filename: String,
    pub manifest_filename: String,
    /// Manifest field holding the configuration file path
    pub manifest_field: String,
    pub cache_policy: CachePolicy,
}

impl ResolverSettings {
    /// Settings rooted at `cwd`; a relative `cwd` is taken from the working directory
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: absolute_path(&cwd.into()),
            home: None,
            config_filename: DEFAULT_CONFIG_FILENAME.to_string(),
            manifest_filename: DEFAULT_MANIFEST_FILENAME.to_string(),
            manifest_field: DEFAULT_MANIFEST_FIELD.to_string(),
            cache_policy: CachePolicy::default(),
        }
    }

    /// Settings for the current process: working directory and home directory
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
            path: PathBuf::from("."),
            source: e,
        })?;

        Ok(Self::new(cwd).with_home(home_dir()))
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = absolute_path(&cwd.into());
        self
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home.map(|home| absolute_path(&home));
        self
    }

    pub fn with_config_filename(mut self, filename: impl Into<String>) -> Self {
        self.config_filename = filename.into();
        self
    }

    pub fn with_manifest_filename(mut self, filename: impl Into<String>) -> Self {
        self.manifest_filename = filename.into();
        self
    }

    pub fn with_manifest_field(mut self, field: impl Into<String>) -> Self {
        self.manifest_field = field.into();
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

/// Merges defaults, the configuration file and inline options into one config
pub struct ConfigResolver {
    settings: ResolverSettings,
    locator: FileLocator,
    defaults: RawLayer,
}

impl ConfigResolver {
    /// Create a resolver using the bundled defaults
    pub fn new(settings: ResolverSettings) -> Result<Self> {
        let defaults = bundled_defaults()?;
        Ok(Self::with_defaults(settings, defaults))
    }

    /// Create a resolver with a caller-provided defaults layer
    pub fn with_defaults(settings: ResolverSettings, defaults: RawLayer) -> Self {
        let locator = FileLocator::new(settings.home.clone());
        Self {
            settings,
            locator,
            defaults,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn defaults(&self) -> &RawLayer {
        &self.defaults
    }

    /// Resolve the effective configuration.
    ///
    /// `config_path` is overridden by inline `options.config-file`. The cache
    /// is consulted first and updated afterwards according to the final
    /// `options.cache-config`.
    pub fn resolve(
        &self,
        cache: &mut ResolutionCache,
        inline: &RawLayer,
        config_path: Option<&Path>,
    ) -> Result<Arc<ResolvedConfig>> {
        let fingerprint = Fingerprint::new(inline, config_path);
        let request = inline.option_flag(CACHE_CONFIG_OPTION);

        if let Some(cached) = cache.lookup(request, self.settings.cache_policy, &fingerprint) {
            debug!("Returning cached configuration");
            return Ok(cached);
        }

        let path = self.config_path(inline, config_path);
        let file = loader::load(path.as_deref())?;

        let mut resolved = ResolvedConfig::from_merged(merge_layers([
            self.defaults.to_value(),
            file.to_value(),
            inline.to_value(),
        ]));

        if file.option_flag(MERGE_DEFAULT_RULES_OPTION).is_off() {
            debug!("Configuration file replaces default rules");
            resolved.rules = file.rules.clone();
        }

        let inline_merge = inline.option_flag(MERGE_DEFAULT_RULES_OPTION);
        if inline_merge.is_off() {
            debug!("Inline options replace configured rules");
            resolved.rules = inline.rules.clone();
        } else if inline_merge.is_on() || !inline.rules.is_empty() {
            resolved.rules = merge_maps(resolved.rules, inline.rules.clone());
        }

        let resolved = Arc::new(resolved);

        if resolved.option_flag(CACHE_CONFIG_OPTION).is_on() {
            debug!("Caching resolved configuration");
            cache.store(Arc::clone(&resolved), fingerprint);
        } else {
            cache.clear();
        }

        info!("Resolved configuration with {} rules", resolved.rules.len());
        Ok(resolved)
    }

    /// Determine which configuration file applies.
    ///
    /// Priority: inline `options.config-file`, then `explicit`, then the
    /// manifest pointer, then the nearest default-named file.
    pub fn config_path(&self, inline: &RawLayer, explicit: Option<&Path>) -> Option<PathBuf> {
        let explicit = inline.config_file().map(Path::new).or(explicit);
        if let Some(path) = explicit {
            let path = resolve_explicit(path, &self.settings.cwd);
            debug!("Using explicit configuration path {}", path.display());
            return Some(path);
        }

        let cwd = Some(self.settings.cwd.as_path());

        if let Some(manifest) = self.locator.locate(cwd, &self.settings.manifest_filename) {
            let field = &self.settings.manifest_field;
            if let Some(path) = config_path_from_manifest(&manifest, field) {
                return Some(path);
            }
        }

        self.locator.locate(cwd, &self.settings.config_filename)
    }
}
