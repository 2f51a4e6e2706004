//! Utility modules.

/// Date/time serialization helpers for API timestamps.
pub mod datetime;

/// Domain name and TTL normalization.
pub mod domain;

/// Number-or-string field deserializers.
pub(crate) mod lenient;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
