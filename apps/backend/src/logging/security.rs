use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Login rejected. `reason` stays in logs only; the client sees a generic 401.
pub fn login_failed(reason: &str, login: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        login = %Redacted(login),
        reason,
        "Authentication failure"
    );
}

/// Bearer token or its account was rejected on a protected route.
pub fn request_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_REQUEST_UNAUTHENTICATED",
        %trace_id,
        reason,
        "Request rejected"
    );
}

/// Authenticated caller denied by the access policy.
pub fn access_denied(login: &str, reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        login = %Redacted(login),
        reason,
        "Access denied"
    );
}
