//! Resolution cache
//!
//! A single-slot memo of the last resolved configuration. It is a
//! best-effort optimization: entries are never invalidated by file changes,
//! only replaced or cleared by later resolutions.

use crate::config::layer::{Flag, RawLayer, ResolvedConfig};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

/// When a populated cache may answer a resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Any populated entry answers, regardless of the inputs that produced it
    #[default]
    Lenient,
    /// Only an entry produced by identical inline options and path answers
    Strict,
}

/// The inputs a resolution was made from
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fingerprint {
    inline: RawLayer,
    config_path: Option<PathBuf>,
}

impl Fingerprint {
    pub(crate) fn new(inline: &RawLayer, config_path: Option<&Path>) -> Self {
        Self {
            inline: inline.clone(),
            config_path: config_path.map(Path::to_path_buf),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    config: Arc<ResolvedConfig>,
    fingerprint: Fingerprint,
}

/// Single-slot cache of the last resolved configuration
#[derive(Debug, Default)]
pub struct ResolutionCache {
    enabled: bool,
    entry: Option<CacheEntry>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_populated(&self) -> bool {
        self.entry.is_some()
    }

    /// The cached configuration, if any
    pub fn get(&self) -> Option<Arc<ResolvedConfig>> {
        self.entry.as_ref().map(|entry| Arc::clone(&entry.config))
    }

    pub fn clear(&mut self) {
        self.enabled = false;
        self.entry = None;
    }

    /// Look up the entry for a resolution whose inline `cache-config` reads as `request`.
    ///
    /// An explicit inline `On` uses any populated entry, an explicit `Off`
    /// never does, and `Unset` uses the entry only while the cache is enabled.
    pub(crate) fn lookup(
        &self,
        request: Flag,
        policy: CachePolicy,
        fingerprint: &Fingerprint,
    ) -> Option<Arc<ResolvedConfig>> {
        let entry = self.entry.as_ref()?;

        let usable = match request {
            Flag::On => true,
            Flag::Off => false,
            Flag::Unset => self.enabled,
        };
        if !usable {
            return None;
        }

        if policy == CachePolicy::Strict && entry.fingerprint != *fingerprint {
            debug!("Cached configuration was resolved from different inputs");
            return None;
        }

        Some(Arc::clone(&entry.config))
    }

    pub(crate) fn store(&mut self, config: Arc<ResolvedConfig>, fingerprint: Fingerprint) {
        self.enabled = true;
        self.entry = Some(CacheEntry {
            config,
            fingerprint,
        });
    }
}

/// The process-wide cache behind [`crate::resolve`]
pub fn global_cache() -> &'static Mutex<ResolutionCache> {
    static GLOBAL: OnceLock<Mutex<ResolutionCache>> = OnceLock::new();
    GLOBAL.get_or_init(|| Mutex::new(ResolutionCache::new()))
}
