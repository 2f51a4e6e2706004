use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::RecordId;

/// The API call an error originated from.
///
/// Carried by every I/O-related [`ClientError`] variant so callers can tell,
/// for example, a failure while listing zones apart from a failure while
/// listing the records of the zone that was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `POST` to the gateway token endpoint.
    Authenticate,
    /// `GET /dns/zones/`.
    ListZones,
    /// `GET /dns/zones/{id}/records/`.
    ListRecords,
    /// `POST /dns/records/`.
    CreateRecord,
    /// `PUT /dns/records/{id}/`.
    UpdateRecord,
    /// `DELETE /dns/records/{id}/`.
    DeleteRecord,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::ListZones => "list_zones",
            Self::ListRecords => "list_records",
            Self::CreateRecord => "create_record",
            Self::UpdateRecord => "update_record",
            Self::DeleteRecord => "delete_record",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for all client operations.
///
/// All variants are serializable for structured error reporting. Nothing is
/// retried internally: every failure is returned to the caller as soon as it
/// happens.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// The record type is not one of the supported types.
    ///
    /// Raised before any request is sent.
    #[error("Invalid record type: {record_type}")]
    InvalidRecordType {
        /// The rejected record type string.
        record_type: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{operation}] Network error: {detail}")]
    NetworkError {
        /// Operation that produced the error.
        operation: Operation,
        /// Error details.
        detail: String,
    },

    /// The underlying HTTP client could not be built (TLS backend initialization).
    #[error("Failed to initialize HTTP client: {detail}")]
    HttpClientInit {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{operation}] Request timeout: {detail}")]
    Timeout {
        /// Operation that produced the error.
        operation: Operation,
        /// Error details.
        detail: String,
    },

    /// A successful response carried a body that could not be decoded.
    #[error("[{operation}] Parse error: {detail}")]
    ParseError {
        /// Operation that produced the error.
        operation: Operation,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("[{operation}] Serialization error: {detail}")]
    SerializationError {
        /// Operation that produced the error.
        operation: Operation,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The token endpoint answered with something other than HTTP 200.
    #[error("[authenticate] Token request failed (HTTP {status}): {raw_message}")]
    AuthFailed {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        raw_message: String,
    },

    /// The API rejected the record payload (HTTP 400).
    #[error("[{operation}] Invalid or missing record parameters: {raw_message}")]
    InvalidParameter {
        /// Operation that produced the error.
        operation: Operation,
        /// Raw response body.
        raw_message: String,
    },

    /// No zone matches the requested name.
    #[error("Zone '{zone}' not found")]
    ZoneNotFound {
        /// Zone (or FQDN) that was looked up.
        zone: String,
    },

    /// The record does not exist (HTTP 404).
    #[error("Record '{record_id}' not found")]
    RecordNotFound {
        /// ID of the record that was not found.
        record_id: RecordId,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The API answered with a status code the operation does not handle.
    #[error("[{operation}] Unexpected HTTP status {status}: {raw_message}")]
    UnexpectedStatus {
        /// Operation that produced the error.
        operation: Operation,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        raw_message: String,
    },
}

impl ClientError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecordType { .. }
                | Self::AuthFailed { .. }
                | Self::InvalidParameter { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordNotFound { .. }
        )
    }

    /// The operation this error belongs to, if it came from a request.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::NetworkError { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::ParseError { operation, .. }
            | Self::SerializationError { operation, .. }
            | Self::InvalidParameter { operation, .. }
            | Self::UnexpectedStatus { operation, .. } => Some(*operation),
            Self::AuthFailed { .. } => Some(Operation::Authenticate),
            Self::InvalidRecordType { .. }
            | Self::HttpClientInit { .. }
            | Self::ZoneNotFound { .. }
            | Self::RecordNotFound { .. } => None,
        }
    }
}

/// Lets operations accept both `RecordType` and strings through one
/// `TryInto<RecordType>` bound.
impl From<std::convert::Infallible> for ClientError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
