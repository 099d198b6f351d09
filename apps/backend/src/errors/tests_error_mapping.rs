// Error mapping tests: domain errors to HTTP status and code, no I/O.
use actix_web::body::to_bytes;
use actix_web::http::header;
use actix_web::ResponseError;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let app: AppError = DomainError::validation("uf must have two letters").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::LoginTaken, "taken").into();
    assert_eq!(app.code().as_str(), "LOGIN_TAKEN");
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError =
        DomainError::conflict(ConflictKind::AccountHasRecords, "owns records").into();
    assert_eq!(app.code(), ErrorCode::AccountHasRecords);
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError =
        DomainError::conflict(ConflictKind::Other("x".into()), "generic").into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let cases = [
        (NotFoundKind::Usuario, "USUARIO_NOT_FOUND"),
        (NotFoundKind::Cliente, "CLIENTE_NOT_FOUND"),
        (NotFoundKind::Documento, "DOCUMENTO_NOT_FOUND"),
        (NotFoundKind::Other("Record".into()), "NOT_FOUND"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 404);
    }
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad").into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("?".into()), "other").into();
    assert_eq!(app.code().as_str(), "INTERNAL");
    assert_eq!(app.status().as_u16(), 500);
}

#[actix_web::test]
async fn unauthorized_response_carries_bearer_challenge() {
    let resp = AppError::unauthorized().error_response();
    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(
        resp.headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    assert_eq!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );

    let body = to_bytes(resp.into_body()).await.expect("body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["detail"], "Authentication required");
    assert_eq!(json["title"], "Unauthorized");
    assert_eq!(json["type"], "https://jurixprev.app/errors/UNAUTHORIZED");
}

#[actix_web::test]
async fn forbidden_response_has_no_challenge() {
    let resp = AppError::forbidden(ErrorCode::NotOwner, "not yours").error_response();
    assert_eq!(resp.status().as_u16(), 403);
    assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());

    let body = to_bytes(resp.into_body()).await.expect("body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["code"], "NOT_OWNER");
    assert_eq!(json["title"], "Not Owner");
}
