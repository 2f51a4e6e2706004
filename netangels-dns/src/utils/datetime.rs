//! 日期时间序列化/反序列化工具
//!
//! - 序列化: `DateTime`<Utc> -> RFC3339 字符串
//! - 反序列化: RFC3339 字符串、无时区的 ISO-8601 字符串（按 UTC 处理）或 Unix 时间戳
//!
//! The API does not document its timestamp format, so strings that match none
//! of the known layouts deserialize to `None` instead of failing the response.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Naive layouts tried after RFC 3339, in order.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 序列化 Option<`DateTime`<Utc>> 为 Option<RFC3339 字符串>
#[allow(clippy::ref_option)]
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// 反序列化：支持 RFC3339 / naive ISO-8601 字符串或 Unix 时间戳（秒/毫秒自动识别）
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionalTimestamp {
        String(String),
        I64(i64),
        U64(u64),
        F64(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(
        match Option::<OptionalTimestamp>::deserialize(deserializer)? {
            Some(OptionalTimestamp::String(s)) => parse_timestamp_str(&s),
            Some(OptionalTimestamp::I64(ts)) => parse_unix_timestamp(ts),
            Some(OptionalTimestamp::U64(ts)) => i64::try_from(ts).ok().and_then(parse_unix_timestamp),
            Some(OptionalTimestamp::F64(ts)) => parse_fractional_timestamp(ts),
            Some(OptionalTimestamp::Other(_)) | None => None,
        },
    )
}

/// Parses the string forms the API has been seen to return.
pub fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let parsed = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc());
    if parsed.is_none() {
        log::debug!("Unrecognized timestamp format: {s}");
    }
    parsed
}

/// 解析 Unix 时间戳（自动判断秒/毫秒）
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // 如果时间戳 > 10^11，认为是毫秒
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

/// 带小数的 Unix 时间戳（秒或毫秒），精确到毫秒
#[allow(clippy::cast_possible_truncation)]
fn parse_fractional_timestamp(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let millis = if ts.abs() > 1e11 { ts } else { ts * 1000.0 };
    if millis.abs() >= 9.0e18 {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}
