//! Deserializers for fields the API sends as either numbers or strings.
//!
//! Record details carry `port` as a string and `ip` as either form depending on
//! the record type; both shapes are accepted here.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

/// `"443"`, `443` and `null` all deserialize; empty strings become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) if !s.is_empty() => Some(s),
            Some(StringOrNumber::Int(n)) => Some(n.to_string()),
            Some(StringOrNumber::Float(f)) => Some(f.to_string()),
            Some(StringOrNumber::String(_)) | None => None,
        },
    )
}

/// Numeric field that may arrive quoted. Out-of-range or non-numeric values
/// become `None`.
pub fn opt_u16<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) => s.trim().parse().ok(),
            Some(StringOrNumber::Int(n)) => u16::try_from(n).ok(),
            Some(StringOrNumber::Float(_)) | None => None,
        },
    )
}
