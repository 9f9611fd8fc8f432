use std::time::Duration;

use altolink_domain::AltoLinkError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` selects the filter (default `info`). Setting
/// `ALTOLINK_LOG_JSON` to `1`/`true` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("ALTOLINK_LOG_JSON")
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    // A subscriber may already be installed (tests); keep the existing one.
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Log the outcome of a route handler with structured fields.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Log a handler result, including the error category on failure.
pub fn log_command_result<T>(command: &str, elapsed: Duration, result: &Result<T, AltoLinkError>) {
    log_command_execution(command, elapsed, result.is_ok());
    if let Err(err) = result {
        warn!(command, error_type = error_label(err), error = %err, "command returned error");
    }
}

/// Convert an `AltoLinkError` into a stable label suitable for logging and
/// response codes.
#[inline]
pub fn error_label(error: &AltoLinkError) -> &'static str {
    match error {
        AltoLinkError::Database(_) => "database",
        AltoLinkError::Config(_) => "config",
        AltoLinkError::Network(_) => "network",
        AltoLinkError::Auth(_) => "auth",
        AltoLinkError::PartnerRejected(_) => "partner_rejected",
        AltoLinkError::NotFound(_) => "not_found",
        AltoLinkError::InvalidInput(_) => "invalid_input",
        AltoLinkError::Internal(_) => "internal",
    }
}
