//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here into
//! `crate::errors::domain::DomainError`, and higher layers map that to
//! `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..].split_whitespace().next()
}

fn map_unique_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    let sqlite_hit = extract_sqlite_table_column(error_msg) == Some("usuarios.login");
    // Postgres names the constraint after the table and column
    let pg_hit = error_msg.contains("usuarios_login_key") || error_msg.contains("idx-usuarios-login");
    if sqlite_hit || pg_hit {
        return Some((ConflictKind::LoginTaken, "Login already registered"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        if let Some((kind, detail)) = map_unique_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("ForeignKey".into()),
            "Record is referenced by other records",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::*;

    fn exec_err(msg: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(msg.to_string()))
    }

    #[test]
    fn sqlite_unique_login_maps_to_login_taken() {
        let e = exec_err("error returned from database: (code: 2067) UNIQUE constraint failed: usuarios.login");
        assert!(matches!(
            map_db_err(e),
            DomainError::Conflict(ConflictKind::LoginTaken, _)
        ));
    }

    #[test]
    fn postgres_unique_login_maps_to_login_taken() {
        let e = exec_err(
            "duplicate key value violates unique constraint \"usuarios_login_key\" SQLSTATE(23505)",
        );
        assert!(matches!(
            map_db_err(e),
            DomainError::Conflict(ConflictKind::LoginTaken, _)
        ));
    }

    #[test]
    fn other_unique_is_generic_conflict() {
        let e = exec_err("UNIQUE constraint failed: clientes.id");
        assert!(matches!(
            map_db_err(e),
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }

    #[test]
    fn foreign_key_is_conflict() {
        let e = exec_err("FOREIGN KEY constraint failed");
        assert!(matches!(map_db_err(e), DomainError::Conflict(_, _)));
    }

    #[test]
    fn record_not_found_is_not_found() {
        let e = DbErr::RecordNotFound("clientes".into());
        assert!(matches!(map_db_err(e), DomainError::NotFound(_, _)));
    }

    #[test]
    fn unknown_is_infra() {
        let e = exec_err("something odd");
        assert!(matches!(
            map_db_err(e),
            DomainError::Infra(InfraErrorKind::Other(_), _)
        ));
    }
}
