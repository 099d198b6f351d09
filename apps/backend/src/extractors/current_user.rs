use std::time::SystemTime;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use super::auth_token::bearer_from_request;
use crate::auth::authenticate::{authenticate, AuthError};
use crate::auth::policy::Principal;
use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Authenticated caller, resolved from the bearer token and the stored account.
///
/// Any failure yields 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl std::ops::Deref for CurrentUser {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let bearer = bearer_from_request(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = state.ok_or_else(|| AppError::internal("AppState not available"))?;
            if bearer.is_none() {
                return Err(AuthError::MissingToken.into());
            }
            let db = require_db(&state)?;

            let principal =
                authenticate(&state.tokens, db, bearer.as_deref(), SystemTime::now()).await?;
            Ok(CurrentUser(principal))
        })
    }
}
