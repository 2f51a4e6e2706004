//! NetAngels API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Record, RecordDetails, RecordId, RecordType, ZoneId};
use crate::utils::lenient;

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// Body of create (`POST`) and update (`PUT`) record requests.
#[derive(Debug, Serialize)]
pub(crate) struct RecordBody<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub value: &'a str,
    pub ttl: u32,
}

/// Create/update response. The id is either top level or nested under
/// `record`, depending on the API version that answers.
#[derive(Debug, Deserialize)]
pub(crate) struct SavedRecordResponse {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default)]
    record: Option<SavedRecordId>,
}

#[derive(Debug, Deserialize)]
struct SavedRecordId {
    #[serde(default)]
    id: Option<RecordId>,
}

impl SavedRecordResponse {
    pub fn id(&self) -> Option<RecordId> {
        self.id.or_else(|| self.record.as_ref().and_then(|r| r.id))
    }
}

/// `GET /dns/zones/{id}/records/` response.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordListResponse {
    #[serde(default, alias = "getrecords", alias = "records")]
    pub entities: Vec<WireRecord>,
}

/// DNS record as sent by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct WireRecord {
    pub id: RecordId,
    #[serde(default)]
    pub zone_id: Option<ZoneId>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub value: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u16")]
    pub priority: Option<u16>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ip: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub details: Option<WireDetails>,
}

/// Flat detail object; which fields are set depends on the record type.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireDetails {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub data: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u16")]
    pub priority: Option<u16>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ip: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u16")]
    pub port: Option<u16>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u16")]
    pub weight: Option<u16>,
    #[serde(default)]
    pub nameserver: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub flag: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl WireRecord {
    /// Convert to the public [`Record`].
    ///
    /// Returns `None` for record types outside [`RecordType`] (e.g. SOA), which
    /// the API may list but this client never manages.
    pub fn into_record(self) -> Option<Record> {
        let Ok(record_type) = self.record_type.parse::<RecordType>() else {
            log::debug!(
                "Skipping record {} with unsupported type {}",
                self.id,
                self.record_type
            );
            return None;
        };
        let d = self.details.unwrap_or_default();
        let value = self
            .value
            .or_else(|| d.data.clone())
            .or_else(|| d.value.clone())
            .unwrap_or_default();
        let priority = self.priority.or(d.priority);

        let details = match record_type {
            RecordType::A => RecordDetails::A {
                ip: d.ip.or(self.ip),
            },
            RecordType::Aaaa => RecordDetails::AAAA {
                ip: d.ip.or(self.ip),
            },
            RecordType::Cname => RecordDetails::CNAME {
                hostname: d.hostname,
            },
            RecordType::Mx => RecordDetails::MX {
                priority,
                hostname: d.hostname,
            },
            RecordType::Ns => RecordDetails::NS {
                nameserver: d.nameserver.or(d.hostname),
            },
            RecordType::Txt => RecordDetails::TXT {
                value: d.data.or(d.value).or_else(|| Some(value.clone())),
            },
            RecordType::Srv => RecordDetails::SRV {
                priority,
                weight: d.weight,
                port: d.port,
                protocol: d.protocol,
                service: d.service,
                hostname: d.hostname,
            },
            RecordType::Caa => RecordDetails::CAA {
                flag: d.flag,
                tag: d.tag,
                value: d.value.or(d.data),
            },
        };

        Some(Record {
            id: self.id,
            zone_id: self.zone_id,
            record_type,
            name: self.name,
            value,
            ttl: self.ttl,
            priority,
            created_at: self.created_at,
            updated_at: self.updated_at,
            details,
        })
    }
}
