//! Utility modules.

/// Log truncation helpers for captured process output.
pub(crate) mod log;

/// TTL string to TimeSpan conversion.
pub mod ttl;
