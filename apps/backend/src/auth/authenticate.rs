//! Bearer token to [`Principal`].

use std::time::SystemTime;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use super::claims;
use super::policy::Principal;
use super::token::TokenService;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::usuarios::{self, Usuario};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("account not found")]
    AccountNotFound,
    #[error("insufficient role")]
    InsufficientRole,
    #[error("not the record owner")]
    NotOwner,
}

impl AuthError {
    pub fn is_unauthenticated(self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::AccountNotFound
        )
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            // Reason is never disclosed to the client
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::AccountNotFound => {
                AppError::unauthorized()
            }
            AuthError::InsufficientRole => AppError::forbidden(
                ErrorCode::InsufficientRole,
                "Administrative profile required",
            ),
            AuthError::NotOwner => {
                AppError::forbidden(ErrorCode::NotOwner, "Record belongs to another user")
            }
        }
    }
}

/// Account resolution used during authentication.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn resolve_account_by_login(&self, login: &str) -> Result<Option<Usuario>, DomainError>;
    async fn resolve_account_by_id(&self, id: Uuid) -> Result<Option<Usuario>, DomainError>;
}

#[async_trait]
impl AccountLookup for DatabaseConnection {
    async fn resolve_account_by_login(&self, login: &str) -> Result<Option<Usuario>, DomainError> {
        usuarios::find_by_login(self, login).await
    }

    async fn resolve_account_by_id(&self, id: Uuid) -> Result<Option<Usuario>, DomainError> {
        usuarios::find_by_id(self, id).await
    }
}

fn reject(e: AuthError) -> AuthError {
    security::request_rejected(&e.to_string());
    e
}

/// Verify `bearer` at `now` and resolve its account.
///
/// The `login` claim is the primary key; `sub` is the fallback. An account
/// found by login must also match a UUID `sub`. Lookup errors and inactive
/// accounts both report `AccountNotFound`.
pub async fn authenticate<L>(
    tokens: &TokenService,
    lookup: &L,
    bearer: Option<&str>,
    now: SystemTime,
) -> Result<Principal, AuthError>
where
    L: AccountLookup + ?Sized,
{
    let token = bearer
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| reject(AuthError::MissingToken))?;

    let claims = tokens
        .verify_at(token, now)
        .into_claims()
        .ok_or_else(|| reject(AuthError::InvalidToken))?;
    let sub = claims::subject(&claims).ok_or_else(|| reject(AuthError::InvalidToken))?;

    let sub_id = Uuid::parse_str(sub).ok();

    let mut account = match claims::login(&claims) {
        Some(login) => lookup
            .resolve_account_by_login(login)
            .await
            .map_err(lookup_failed)?,
        None => None,
    };
    // A login reused by a newer account does not belong to this token
    if let (Some(u), Some(id)) = (&account, sub_id) {
        if u.id != id {
            account = None;
        }
    }
    if account.is_none() {
        if let Some(id) = sub_id {
            account = lookup
                .resolve_account_by_id(id)
                .await
                .map_err(lookup_failed)?;
        }
    }

    match account {
        Some(u) if u.is_active() => Ok(u.principal()),
        _ => Err(reject(AuthError::AccountNotFound)),
    }
}

fn lookup_failed(e: DomainError) -> AuthError {
    warn!(error = %e, "account lookup failed during authentication");
    reject(AuthError::AccountNotFound)
}
