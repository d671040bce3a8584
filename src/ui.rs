//! ui
//!
//! Output formatting and display.
//!
//! # Design
//!
//! The cf CLI prints user-facing messages, errors included, to stdout; this
//! plugin keeps that behavior. Request/response tracing is gated on the
//! `CF_TRACE` environment variable, the CLI's own convention.

use std::fmt::Display;

/// Print a user-facing message.
pub fn print(message: impl Display) {
    println!("{}", message);
}

/// Print an error message.
///
/// Errors go to stdout, matching the CLI's behavior for plugin failures.
pub fn error(message: impl Display) {
    println!("{}", message);
}

/// Whether request/response tracing is enabled.
///
/// `CF_TRACE=true` (case-insensitive) turns tracing on; any other value,
/// including a filename, leaves it off here.
pub fn trace_enabled() -> bool {
    std::env::var("CF_TRACE")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Print a trace message (only when `CF_TRACE` is enabled).
pub fn trace(message: impl Display) {
    if trace_enabled() {
        eprintln!("[trace] {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_disabled_by_default() {
        // CF_TRACE is not set in the test environment.
        if std::env::var_os("CF_TRACE").is_none() {
            assert!(!trace_enabled());
        }
    }
}
