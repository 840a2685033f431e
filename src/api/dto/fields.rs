//! Serde helpers shared by request DTOs.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Deserializes an optional string with surrounding whitespace removed.
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// Like [`trimmed`], but maps a blank string to `None`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(trimmed(deserializer)?.filter(|s| !s.is_empty()))
}

/// Rejects an explicit `null`; pair with `#[serde(default)]` for absence.
pub fn not_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(D::Error::custom("This field may not be null.")),
    }
}
