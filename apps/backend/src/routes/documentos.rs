use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use super::access::require_record_access;
use crate::auth::policy::AccessPolicy;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, RecordId, ValidatedJson};
use crate::repos::documentos::{self, Documento, DocumentoFields};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoResponse {
    pub id: Uuid,
    pub usuario_id: Uuid,
    #[serde(flatten)]
    pub fields: DocumentoFields,
}

impl From<Documento> for DocumentoResponse {
    fn from(c: Documento) -> Self {
        Self {
            id: c.id,
            usuario_id: c.usuario_id,
            fields: c.fields,
        }
    }
}

/// Most recently edited first.
async fn list_documentos(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let scope = AccessPolicy.list_scope(&current_user);

    let list: Vec<DocumentoResponse> = documentos::list(db, scope)
        .await?
        .into_iter()
        .map(DocumentoResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(list))
}

async fn create_documento(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<DocumentoFields>,
) -> Result<HttpResponse, AppError> {
    let owner = current_user.id;
    let fields = body.into_inner();

    let documento = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(documentos::create(txn, owner, fields).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(DocumentoResponse::from(documento)))
}

async fn get_documento(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let documento = documentos::require_by_id(db, id.0).await?;
    require_record_access(&current_user, documento.usuario_id)?;
    Ok(HttpResponse::Ok().json(DocumentoResponse::from(documento)))
}

async fn update_documento(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<DocumentoFields>,
) -> Result<HttpResponse, AppError> {
    let principal = current_user.0;
    let fields = body.into_inner();

    let documento = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            let existing = documentos::require_by_id(txn, id.0).await?;
            require_record_access(&principal, existing.usuario_id)?;
            Ok(documentos::update(txn, id.0, fields).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DocumentoResponse::from(documento)))
}

async fn delete_documento(
    current_user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let principal = current_user.0;

    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            let existing = documentos::require_by_id(txn, id.0).await?;
            require_record_access(&principal, existing.usuario_id)?;
            Ok(documentos::delete(txn, id.0).await?)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_documentos))
            .route(web::post().to(create_documento)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_documento))
            .route(web::put().to(update_documento))
            .route(web::delete().to(delete_documento)),
    );
}
