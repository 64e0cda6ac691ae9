//! Deep merge of a tenant's remote configuration over the local default.
//!
//! Objects are merged key by key, recursively. Arrays, scalars and `null`
//! from the overlay replace the base value wholesale. Keys missing from the
//! overlay keep the base value, so a tenant only has to send what it changes.

use serde_json::Value;

/// Merge `overlay` over `base`, returning a new value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let next = match merged.get(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}
