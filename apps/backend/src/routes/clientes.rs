use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use super::access::require_record_access;
use crate::auth::policy::AccessPolicy;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, RecordId, ValidatedJson};
use crate::repos::clientes::{self, Cliente, ClienteFields};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteResponse {
    pub id: Uuid,
    pub usuario_id: Uuid,
    #[serde(flatten)]
    pub fields: ClienteFields,
}

impl From<Cliente> for ClienteResponse {
    fn from(c: Cliente) -> Self {
        Self {
            id: c.id,
            usuario_id: c.usuario_id,
            fields: c.fields,
        }
    }
}

async fn list_clientes(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let scope = AccessPolicy.list_scope(&current_user);

    let list: Vec<ClienteResponse> = clientes::list(db, scope)
        .await?
        .into_iter()
        .map(ClienteResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(list))
}

async fn create_cliente(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<ClienteFields>,
) -> Result<HttpResponse, AppError> {
    let owner = current_user.id;
    let fields = body.into_inner();

    let cliente = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(clientes::create(txn, owner, fields).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(ClienteResponse::from(cliente)))
}

async fn get_cliente(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let cliente = clientes::require_by_id(db, id.0).await?;
    require_record_access(&current_user, cliente.usuario_id)?;
    Ok(HttpResponse::Ok().json(ClienteResponse::from(cliente)))
}

async fn update_cliente(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<ClienteFields>,
) -> Result<HttpResponse, AppError> {
    let principal = current_user.0;
    let fields = body.into_inner();

    let cliente = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            let existing = clientes::require_by_id(txn, id.0).await?;
            require_record_access(&principal, existing.usuario_id)?;
            Ok(clientes::update(txn, id.0, fields).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ClienteResponse::from(cliente)))
}

async fn delete_cliente(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let principal = current_user.0;

    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            let existing = clientes::require_by_id(txn, id.0).await?;
            require_record_access(&principal, existing.usuario_id)?;
            Ok(clientes::delete(txn, id.0).await?)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_clientes))
            .route(web::post().to(create_cliente)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_cliente))
            .route(web::put().to(update_cliente))
            .route(web::delete().to(delete_cliente)),
    );
}
