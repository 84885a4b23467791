//! Redaction of emails and opaque tokens in log output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b([A-Za-z0-9._%+-])[A-Za-z0-9._%+-]*(@[A-Za-z0-9.-]+\.[A-Za-z]+)\b").unwrap()
});

/// JWS compact tokens and long base64/hex runs.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]*|[A-Za-z0-9+/_-]{24,}={0,2}")
        .unwrap()
});

/// Mask emails (`u***@example.com`) and tokens (`[REDACTED_TOKEN]`).
pub fn redact(input: &str) -> String {
    let emails = EMAIL.replace_all(input, "$1***$2");
    TOKEN.replace_all(&emails, "[REDACTED_TOKEN]").into_owned()
}

/// Display/Debug wrapper that applies [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
