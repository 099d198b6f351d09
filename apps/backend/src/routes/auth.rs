use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::usuarios::UsuarioResponse;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::usuarios;
use crate::services::usuarios as usuarios_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub senha: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioResponse,
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let LoginRequest { login, senha } = body.into_inner();

    let outcome = usuarios_service::login(db, &app_state.tokens, &login, &senha).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: outcome.token,
        usuario: outcome.usuario.into(),
    }))
}

async fn me(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let usuario = usuarios::require_by_id(db, current_user.id).await?;
    Ok(HttpResponse::Ok().json(UsuarioResponse::from(usuario)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/me", web::get().to(me));
}
