use std::env;

use crate::error::AppError;

/// Connection URL from `DATABASE_URL` (Postgres or SQLite).
pub fn db_url() -> Result<String, AppError> {
    let url = must_var("DATABASE_URL")?;
    validate_db_url(&url)?;
    Ok(url)
}

/// Accepts the schemes sea-orm is built with here.
pub fn validate_db_url(url: &str) -> Result<(), AppError> {
    let supported = ["postgres://", "postgresql://", "sqlite:"];
    if supported.iter().any(|p| url.starts_with(p)) {
        Ok(())
    } else {
        Err(AppError::config(
            "DATABASE_URL must start with postgres://, postgresql:// or sqlite:",
        ))
    }
}

/// True when every connection would open a fresh in-memory database.
pub fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::config(format!(
            "Missing required environment variable: {name}"
        ))),
    }
}
