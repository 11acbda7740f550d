//! Values merging and input-document assembly.

use crate::error::HcunitError;
use crate::model::ValuesSource;
use hcunit_types::ids;
use serde_json::{Map, Value};

/// Arbitrarily nested mapping handed to the policy engine as input.
pub type ConfigDocument = Map<String, Value>;

/// Parse YAML text into a JSON value; `Ok(None)` for an empty/null document.
pub(crate) fn parse_yaml(text: &str) -> Result<Option<Value>, String> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    // `<<: *anchor` stays a literal key until merges are applied.
    yaml.apply_merge().map_err(|e| e.to_string())?;
    if yaml.is_null() {
        return Ok(None);
    }
    let json = serde_json::to_value(&yaml).map_err(|e| e.to_string())?;
    Ok(Some(json))
}

/// Parse every source and left-fold them with [`merge_documents`].
///
/// An empty source contributes nothing. A source whose top level is not a
/// mapping is a parse error.
pub fn merge_values(sources: &[ValuesSource]) -> Result<ConfigDocument, HcunitError> {
    let mut base = ConfigDocument::new();
    for source in sources {
        let parsed = parse_yaml(&source.text).map_err(|message| HcunitError::Parse {
            source_id: source.origin.clone(),
            message,
        })?;
        let overlay = match parsed {
            None => ConfigDocument::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(HcunitError::Parse {
                    source_id: source.origin.clone(),
                    message: format!("expected a mapping at the top level, found {}", kind_of(&other)),
                });
            }
        };
        tracing::debug!(origin = %source.origin, keys = overlay.len(), "merging values source");
        base = merge_documents(base, overlay);
    }
    Ok(base)
}

/// Rightmost wins, maps merge, everything else overwrites.
///
/// When both sides hold a mapping under the same key the mappings are merged
/// recursively; in every other case the overlay value replaces the base value
/// (sequences are not concatenated, types are not coerced).
pub fn merge_documents(mut base: ConfigDocument, overlay: ConfigDocument) -> ConfigDocument {
    for (key, incoming) in overlay {
        let merged = match (base.remove(&key), incoming) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                Value::Object(merge_documents(existing, incoming))
            }
            (_, incoming) => incoming,
        };
        base.insert(key, merged);
    }
    base
}

/// Final evaluation input: rendered manifests plus the merged values under
/// the reserved [`ids::VALUES_KEY`].
pub fn assemble_input(manifests: ConfigDocument, values: ConfigDocument) -> Value {
    let mut input = manifests;
    if input.contains_key(ids::VALUES_KEY) {
        tracing::warn!(
            key = ids::VALUES_KEY,
            "a rendered file shares the reserved values key; the merged values take precedence"
        );
    }
    input.insert(ids::VALUES_KEY.to_string(), Value::Object(values));
    Value::Object(input)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
