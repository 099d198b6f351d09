use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// UUID taken from the `{id}` route segment. Existence is checked by the
/// handler so a missing record reports 404 before any ownership decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub Uuid);

impl FromRequest for RecordId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(parse(req.match_info().get("id")))
    }
}

fn parse(raw: Option<&str>) -> Result<RecordId, AppError> {
    let raw = raw.ok_or_else(|| AppError::bad_request(ErrorCode::InvalidId, "Missing id parameter"))?;
    Uuid::parse_str(raw)
        .map(RecordId)
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidId, format!("Invalid id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uuid_segment() {
        let id = Uuid::new_v4();
        assert_eq!(parse(Some(&id.to_string())).unwrap(), RecordId(id));
    }

    #[test]
    fn rejects_non_uuid() {
        for raw in [Some("42"), Some("abc"), None] {
            let err = parse(raw).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidId);
            assert_eq!(err.status().as_u16(), 400);
        }
    }
}
