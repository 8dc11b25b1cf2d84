//! Tolerant field deserializers for backend payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads any JSON scalar as a string. Null becomes empty, numbers and
/// booleans are stringified, objects and arrays keep their JSON text.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Reads the field leniently as a string, then converts it.
pub(crate) fn parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => T::default(),
        Some(Value::String(s)) => T::from(s),
        Some(other) => T::from(other.to_string()),
    })
}
