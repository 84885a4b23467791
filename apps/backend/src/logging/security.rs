//! Security audit events. Emails pass through [`Redacted`].

use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub fn login_failed(email: &str) {
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        trace_id = %trace_ctx::trace_id(),
        email = %Redacted(email),
        "authentication failure"
    );
}

pub fn rate_limit_hit(client: &str, path: &str) {
    warn!(
        event = "SECURITY_RATE_LIMIT_HIT",
        trace_id = %trace_ctx::trace_id(),
        client,
        path,
        "rate limit exceeded"
    );
}
