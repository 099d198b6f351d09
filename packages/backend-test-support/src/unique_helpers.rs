//! Unique test data built on ULIDs, so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("cliente");
/// assert!(a.starts_with("cliente-"));
/// assert_ne!(a, unique_str("cliente"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique, lowercase account login.
pub fn unique_login(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}

/// A unique e-mail address under the reserved `example.test` domain.
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_login(prefix))
}
