//! Utility modules.

/// Lenient serde helpers for backend payloads.
pub mod lenient;

/// Log truncation to keep response bodies out of full-length logs.
pub mod log_sanitizer;
