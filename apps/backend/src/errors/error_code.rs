//! Error codes for the JurixPrev backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP problem-details responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required (reason never disclosed)
    Unauthorized,
    /// Login or password rejected
    InvalidCredentials,
    /// Caller's role does not allow the operation
    InsufficientRole,
    /// Caller does not own the target record
    NotOwner,

    // Request Validation
    /// Path identifier is not a UUID
    InvalidId,
    /// Field-level validation failure
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Account not found
    UsuarioNotFound,
    /// Client record not found
    ClienteNotFound,
    /// Document record not found
    DocumentoNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Login already registered
    LoginTaken,
    /// Account still owns records
    AccountHasRecords,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Stored data could not be decoded
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::NotOwner => "NOT_OWNER",

            Self::InvalidId => "INVALID_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UsuarioNotFound => "USUARIO_NOT_FOUND",
            Self::ClienteNotFound => "CLIENTE_NOT_FOUND",
            Self::DocumentoNotFound => "DOCUMENTO_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::LoginTaken => "LOGIN_TAKEN",
            Self::AccountHasRecords => "ACCOUNT_HAS_RECORDS",
            Self::Conflict => "CONFLICT",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, used by uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::InvalidCredentials,
        Self::InsufficientRole,
        Self::NotOwner,
        Self::InvalidId,
        Self::ValidationError,
        Self::BadRequest,
        Self::UsuarioNotFound,
        Self::ClienteNotFound,
        Self::DocumentoNotFound,
        Self::NotFound,
        Self::LoginTaken,
        Self::AccountHasRecords,
        Self::Conflict,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
