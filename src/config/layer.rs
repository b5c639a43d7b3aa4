//! Configuration layer types
//!
//! A layer is a mapping with two recognized top-level keys, `rules` and
//! `options`. Any other top-level keys are carried along untouched and merged
//! like every other mapping.

use crate::types::{ConfigError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

pub const RULES_KEY: &str = "rules";
pub const OPTIONS_KEY: &str = "options";

/// Explicit configuration file path (inline layer only)
pub const CONFIG_FILE_OPTION: &str = "config-file";
/// Per-layer toggle: merge this layer's rules into the rules beneath it, or replace them
pub const MERGE_DEFAULT_RULES_OPTION: &str = "merge-default-rules";
/// Enables the resolution cache
pub const CACHE_CONFIG_OPTION: &str = "cache-config";

/// Three-state reading of a recognized option key.
///
/// A key that is present but holds a non-boolean value is read by truthiness:
/// `null`, `0` and `""` are `Off`, everything else is `On`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Unset,
    On,
    Off,
}

impl Flag {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Flag::Unset,
            Some(value) if truthy(value) => Flag::On,
            Some(_) => Flag::Off,
        }
    }

    pub fn is_set(self) -> bool {
        self != Flag::Unset
    }

    pub fn is_on(self) -> bool {
        self == Flag::On
    }

    pub fn is_off(self) -> bool {
        self == Flag::Off
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One configuration source: bundled defaults, a config file, or inline options
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawLayer {
    pub options: Map<String, Value>,
    pub rules: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from parsed structured data.
    ///
    /// `null` yields an empty layer. Missing or `null` `rules`/`options`
    /// default to empty mappings; any other non-mapping shape is a parse error
    /// attributed to `origin`.
    pub fn from_value(value: Value, origin: &Path) -> Result<Self> {
        let mut map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::parse(
                    origin,
                    format!("expected a mapping at the top level, found {}", kind(&other)),
                ))
            }
        };

        let rules = take_mapping(&mut map, RULES_KEY, origin)?;
        let options = take_mapping(&mut map, OPTIONS_KEY, origin)?;

        Ok(Self {
            options,
            rules,
            extra: map,
        })
    }

    pub fn with_rule(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.rules.insert(name.into(), value.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option_flag(&self, key: &str) -> Flag {
        Flag::from_value(self.options.get(key))
    }

    /// Explicit config path requested through `options.config-file`
    pub fn config_file(&self) -> Option<&str> {
        match self.options.get(CONFIG_FILE_OPTION) {
            Some(Value::String(path)) if !path.is_empty() => Some(path),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.options.is_empty() && self.extra.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert(OPTIONS_KEY.to_string(), Value::Object(self.options.clone()));
        map.insert(RULES_KEY.to_string(), Value::Object(self.rules.clone()));
        Value::Object(map)
    }
}

/// The final configuration produced by a resolution.
///
/// `rules` and `options` are always present, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub(crate) options: Map<String, Value>,
    pub(crate) rules: Map<String, Value>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl ResolvedConfig {
    /// Split a deep-merged layer value into its recognized parts
    pub(crate) fn from_merged(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let mut take = |key: &str| match map.remove(key) {
            Some(Value::Object(inner)) => inner,
            _ => Map::new(),
        };
        let rules = take(RULES_KEY);
        let options = take(OPTIONS_KEY);

        Self {
            options,
            rules,
            extra: map,
        }
    }

    pub fn rules(&self) -> &Map<String, Value> {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&Value> {
        self.rules.get(name)
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn option_flag(&self, key: &str) -> Flag {
        Flag::from_value(self.options.get(key))
    }

    /// Top-level keys other than `rules` and `options`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert(OPTIONS_KEY.to_string(), Value::Object(self.options.clone()));
        map.insert(RULES_KEY.to_string(), Value::Object(self.rules.clone()));
        Value::Object(map)
    }
}

fn take_mapping(
    map: &mut Map<String, Value>,
    key: &str,
    origin: &Path,
) -> Result<Map<String, Value>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(inner)) => Ok(inner),
        Some(other) => Err(ConfigError::parse(
            origin,
            format!("`{}` must be a mapping, found {}", key, kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
