//! JSON dump of a parsed model.

use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::parser::ParsedModel;

/// Serialize the model as a JSON object keyed by fully-qualified name.
///
/// With `discard_empty`, nulls, empty strings, arrays and objects are
/// dropped recursively. Numbers and booleans are always kept, `0` and
/// `false` included.
pub fn to_json(model: &ParsedModel, discard_empty: bool) -> Result<Value, ModelError> {
    let mut entries = Map::new();
    for class in &model.classes {
        entries.insert(class.fully_qualified_name.clone(), serde_json::to_value(class)?);
    }
    for namespace in &model.namespaces {
        entries.insert(
            namespace.fully_qualified_name.clone(),
            serde_json::to_value(namespace)?,
        );
    }
    let value = Value::Object(entries);
    Ok(if discard_empty {
        prune(value).unwrap_or(Value::Object(Map::new()))
    } else {
        value
    })
}

fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let items: Vec<_> = items.into_iter().filter_map(prune).collect();
            (!items.is_empty()).then_some(Value::Array(items))
        }
        Value::Object(map) => {
            let map: Map<_, _> = map
                .into_iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k, v)))
                .collect();
            (!map.is_empty()).then_some(Value::Object(map))
        }
        other => Some(other),
    }
}
