use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::access::require_account_manager;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::extractors::{CurrentUser, RecordId, ValidatedJson};
use crate::repos::usuarios::{self, Usuario};
use crate::services::usuarios::{self as usuarios_service, EditUsuario, RegisterUsuario};
use crate::state::app_state::AppState;

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub nome: String,
    pub login: String,
    pub perfil: String,
    pub status: String,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nome: u.nome,
            login: u.login,
            perfil: u.role.code().to_string(),
            status: u.status.code().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUsuarioRequest {
    pub nome: String,
    pub login: String,
    pub senha: String,
    #[serde(default)]
    pub perfil: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUsuarioRequest {
    pub nome: String,
    pub perfil: String,
    pub status: String,
    #[serde(default)]
    pub senha: Option<String>,
}

async fn list_usuarios(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_account_manager(&current_user)?;
    let db = require_db(&app_state)?;

    let list: Vec<UsuarioResponse> = usuarios::list_all(db)
        .await?
        .into_iter()
        .map(UsuarioResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(list))
}

async fn create_usuario(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateUsuarioRequest>,
) -> Result<HttpResponse, AppError> {
    require_account_manager(&current_user)?;
    let CreateUsuarioRequest {
        nome,
        login,
        senha,
        perfil,
    } = body.into_inner();

    let usuario = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            usuarios_service::register(
                txn,
                RegisterUsuario {
                    nome,
                    login,
                    senha,
                    perfil,
                },
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(UsuarioResponse::from(usuario)))
}

async fn get_usuario(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_account_manager(&current_user)?;
    let db = require_db(&app_state)?;
    let usuario = usuarios::require_by_id(db, id.0).await?;
    Ok(HttpResponse::Ok().json(UsuarioResponse::from(usuario)))
}

async fn get_usuario_by_login(
    current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_account_manager(&current_user)?;
    let db = require_db(&app_state)?;
    let login = path.into_inner();

    let usuario = usuarios::find_by_login(db, login.trim()).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Usuario, "No account with that login")
    })?;
    Ok(HttpResponse::Ok().json(UsuarioResponse::from(usuario)))
}

async fn update_usuario(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<UpdateUsuarioRequest>,
) -> Result<HttpResponse, AppError> {
    require_account_manager(&current_user)?;
    let UpdateUsuarioRequest {
        nome,
        perfil,
        status,
        senha,
    } = body.into_inner();

    let usuario = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            usuarios_service::edit(
                txn,
                id.0,
                EditUsuario {
                    nome,
                    perfil,
                    status,
                    senha,
                },
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(UsuarioResponse::from(usuario)))
}

async fn delete_usuario(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_account_manager(&current_user)?;

    with_txn(&app_state, move |txn| {
        Box::pin(async move { usuarios::delete(txn, id.0).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_usuarios))
            .route(web::post().to(create_usuario)),
    )
    .route("/by-login/{login}", web::get().to(get_usuario_by_login))
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_usuario))
            .route(web::put().to(update_usuario))
            .route(web::delete().to(delete_usuario)),
    );
}
