use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::utils::domain::full_name_to_relative;

/// Numeric zone identifier assigned by the API.
pub type ZoneId = u64;

/// Numeric record identifier assigned by the API.
pub type RecordId = u64;

// ============ Record Types ============

/// DNS record types accepted by the API.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
/// Parsing from a string is case-insensitive; anything outside this set is
/// rejected with [`ClientError::InvalidRecordType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Text record.
    Txt,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl RecordType {
    /// Every supported record type.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Txt,
        Self::Srv,
        Self::Caa,
    ];

    /// 将 `RecordType` 转换为大写字符串
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClientError::InvalidRecordType {
                record_type: s.to_string(),
            })
    }
}

impl TryFrom<&str> for RecordType {
    type Error = ClientError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for RecordType {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Type-specific record details.
///
/// The API returns these as one flat `details` object whose meaningful fields
/// depend on the record type; each variant keeps only the fields that apply.
/// Every field is optional because the API omits the ones it has no value for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordDetails {
    /// A record: IPv4 address.
    A {
        /// IPv4 address.
        ip: Option<String>,
    },

    /// AAAA record: IPv6 address.
    AAAA {
        /// IPv6 address.
        ip: Option<String>,
    },

    /// CNAME record: alias target.
    CNAME {
        /// Target hostname.
        hostname: Option<String>,
    },

    /// MX record: mail exchange server.
    MX {
        /// Priority (lower = preferred).
        priority: Option<u16>,
        /// Mail server hostname.
        hostname: Option<String>,
    },

    /// NS record: authoritative name server.
    NS {
        /// Name server hostname.
        nameserver: Option<String>,
    },

    /// TXT record: arbitrary text.
    TXT {
        /// Text content.
        value: Option<String>,
    },

    /// SRV record: service locator.
    SRV {
        /// Priority (lower = preferred).
        priority: Option<u16>,
        /// Weight among same-priority targets.
        weight: Option<u16>,
        /// TCP/UDP port.
        port: Option<u16>,
        /// Protocol label (e.g. `"_tcp"`).
        protocol: Option<String>,
        /// Service label (e.g. `"_sip"`).
        service: Option<String>,
        /// Target hostname.
        hostname: Option<String>,
    },

    /// CAA record: Certificate Authority Authorization.
    CAA {
        /// Issuer critical flag.
        flag: Option<String>,
        /// Property tag (`"issue"`, `"issuewild"`, `"iodef"`).
        tag: Option<String>,
        /// CA domain or reporting URI.
        value: Option<String>,
    },
}

impl RecordDetails {
    /// Returns the [`RecordType`] discriminant for these details.
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A { .. } => RecordType::A,
            Self::AAAA { .. } => RecordType::Aaaa,
            Self::CNAME { .. } => RecordType::Cname,
            Self::MX { .. } => RecordType::Mx,
            Self::NS { .. } => RecordType::Ns,
            Self::TXT { .. } => RecordType::Txt,
            Self::SRV { .. } => RecordType::Srv,
            Self::CAA { .. } => RecordType::Caa,
        }
    }
}

// ============ Zone Types ============

/// A DNS zone hosted by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub records_count: Option<u32>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub is_technical_zone: bool,
    #[serde(default)]
    pub is_in_transfer: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub soa_email: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Secondary DNS servers serving this zone, when the API includes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_dns: Option<SecondaryDns>,
}

/// Secondary DNS entities attached to a zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecondaryDns {
    #[serde(default)]
    pub entities: Vec<Zone>,
}

/// Response of `GET /dns/zones/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneList {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub entities: Vec<Zone>,
}

impl ZoneList {
    /// First zone whose name equals `name` exactly (case-sensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Zone> {
        self.entities.iter().find(|zone| zone.name == name)
    }

    /// The zone that owns `fqdn`: an exact match, or else the longest zone
    /// name that is a parent domain of `fqdn`.
    pub fn find_owner_of(&self, fqdn: &str) -> Option<&Zone> {
        self.find_by_name(fqdn).or_else(|| {
            self.entities
                .iter()
                .filter(|zone| crate::utils::domain::is_within_zone(fqdn, &zone.name))
                .max_by_key(|zone| zone.name.len())
        })
    }
}

// ============ DNS Record ============

/// A DNS record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    /// Owning zone, when the API reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ZoneId>,
    pub record_type: RecordType,
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub details: RecordDetails,
}

impl Record {
    /// Record name relative to `zone_name` (`"@"` for the apex).
    pub fn relative_name(&self, zone_name: &str) -> String {
        full_name_to_relative(&self.name, zone_name)
    }

    /// Whether this record has the given type and exactly the given name.
    pub fn matches(&self, name: &str, record_type: RecordType) -> bool {
        self.record_type == record_type && self.name == name
    }
}
