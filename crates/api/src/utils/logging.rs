use std::time::Duration;

use mediaauth_domain::NormalizedError;
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"auth::get_user_token"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - The normalized failure, if the command failed.
///
/// Callers must avoid forwarding token values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&NormalizedError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = err.kind.as_str(),
            error_code = error_label(err),
            recoverable = err.is_recoverable(),
            "command_execution_failure"
        ),
    }
}

/// Convert a `NormalizedError` into a stable label suitable for logging.
#[inline]
#[must_use]
pub const fn error_label(error: &NormalizedError) -> &'static str {
    error.code().as_str()
}
