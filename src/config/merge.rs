//! Deep merge of configuration values
//!
//! - Mappings: merged key by key (recursive)
//! - Sequences: replaced, the later layer wins entirely
//! - Scalars: replaced, the later layer wins

use serde_json::{Map, Value};

/// Deep merge `overlay` on top of `base`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }
        (_, overlay) => overlay,
    }
}

/// Deep merge two mappings, `overlay` taking precedence on conflicts
pub fn merge_maps(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, overlay_value) in overlay {
        match base.get_mut(&key) {
            Some(base_value) => {
                let merged = deep_merge(std::mem::take(base_value), overlay_value);
                *base_value = merged;
            }
            None => {
                base.insert(key, overlay_value);
            }
        }
    }
    base
}

/// Merge layers in ascending precedence (first is the base, last wins)
pub fn merge_layers<I>(layers: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    layers
        .into_iter()
        .fold(Value::Object(Map::new()), deep_merge)
}
