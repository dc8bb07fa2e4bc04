// Serde helpers for fields that may arrive with the wrong JSON type.
//
// Device records come from several backend generations. A field holding an
// unexpected type is dropped to `None` instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::id::Id;

/// Deserializes any `T`, mapping a type mismatch to `None`.
pub(crate) fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserializes an identifier or label from either a JSON string or a number,
/// keeping which of the two it was.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<Option<Id>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(Id::from(s)),
        Some(Value::Number(n)) => Some(Id::from(n)),
        _ => None,
    })
}
