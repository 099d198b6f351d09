use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Regex patterns used for PII redaction. Each is a vetted literal.
pub struct PiiPatterns;

impl PiiPatterns {
    /// E-mail addresses
    pub fn email() -> &'static Regex {
        static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL
    }

    /// Brazilian CPF, with or without punctuation
    pub fn cpf() -> &'static Regex {
        static CPF: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b\d{3}\.?\d{3}\.?\d{3}-?(\d{2})\b").unwrap()
        });
        &CPF
    }

    /// Opaque token runs (base64, base64url or hex, 16+ chars)
    pub fn token() -> &'static Regex {
        static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"[A-Za-z0-9+/_-]{16,}={0,2}").unwrap()
        });
        &TOKEN
    }
}

/// Mask e-mails, CPF numbers and token-like strings.
///
/// E-mails keep the first character of the local part and the domain.
/// CPFs keep their check digits. Tokens become `[REDACTED_TOKEN]`.
pub fn redact(input: &str) -> String {
    let step = PiiPatterns::email().replace_all(input, |caps: &Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full.to_string(),
        }
    });
    let step = PiiPatterns::cpf().replace_all(&step, |caps: &Captures| {
        format!("***.***.***-{}", &caps[1])
    });

    PiiPatterns::token()
        .replace_all(&step, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts on format.
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
