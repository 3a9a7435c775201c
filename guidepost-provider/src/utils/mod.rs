//! Utility modules.

/// Keeps response bodies short in debug/error logs.
pub mod log_sanitizer;
