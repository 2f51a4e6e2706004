//! # netangels-dns
//!
//! Typed async client for the [NetAngels](https://www.netangels.ru/) DNS API.
//!
//! | Endpoint | Method | Operation |
//! |----------|--------|-----------|
//! | gateway token endpoint | `POST` (form `api_key=...`) | [`NetangelsClient::authenticate`] |
//! | `/dns/zones/` | `GET` | [`NetangelsClient::list_zones`], [`NetangelsClient::resolve_zone_id`] |
//! | `/dns/zones/{id}/records/` | `GET` | [`NetangelsClient::list_records`], [`NetangelsClient::resolve_record_id`] |
//! | `/dns/records/` | `POST` | [`NetangelsClient::add_record`] |
//! | `/dns/records/{id}/` | `PUT` | [`NetangelsClient::update_record`] |
//! | `/dns/records/{id}/` | `DELETE` | [`NetangelsClient::remove_record`] |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use netangels_dns::{ClientConfig, Credentials, NetangelsClient, RecordType, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NetangelsClient::new(ClientConfig::default())?;
//!     let mut session = Session::new(Credentials::new("account", "api-key"));
//!
//!     // 1. Exchange the API key for a bearer token (stored on the session)
//!     client.authenticate(&mut session).await?;
//!
//!     // 2. Create a TXT record; a TTL of 0 means "use the default" (300 s)
//!     let id = client
//!         .add_record(&session, "_acme-challenge.example.com.", "token", RecordType::Txt, 0)
//!         .await?;
//!
//!     // 3. Find it again by type and name
//!     let found = client
//!         .resolve_record_id(&session, "example.com", "_acme-challenge.example.com", "TXT")
//!         .await?;
//!     assert_eq!(found, Some(id));
//!
//!     // 4. Remove it
//!     client.remove_record(&session, id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ClientError>`](ClientError):
//!
//! - [`ClientError::InvalidRecordType`]: rejected locally, nothing was sent
//! - [`ClientError::AuthFailed`]: the token endpoint refused the API key
//! - [`ClientError::ZoneNotFound`] / [`ClientError::RecordNotFound`]: missing resource
//! - [`ClientError::InvalidParameter`]: the API rejected the record payload (HTTP 400)
//! - [`ClientError::UnexpectedStatus`]: any other unhandled status
//! - [`ClientError::NetworkError`] / [`ClientError::Timeout`]: no response received
//!
//! Nothing is retried. I/O errors carry the [`Operation`] that produced them.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade; install any logger to see
//! request lines, statuses and (truncated) response bodies at `debug`. API keys
//! and tokens are never logged.

mod client;
mod config;
mod error;
mod session;
mod transport;
mod types;
mod utils;

// Re-export error types
pub use error::{ClientError, Operation, Result};

pub use client::NetangelsClient;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL, DEFAULT_TTL};
pub use session::{Credentials, Session, Token};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, RequestBody, Transport};

// Re-export types
pub use types::{
    Record, RecordDetails, RecordId, RecordType, SecondaryDns, Zone, ZoneId, ZoneList,
};

// Re-export utils module
pub use utils::{datetime, domain};
