use actix_web::{http::header, HttpRequest};

/// Token part of `Bearer <token>`, or `None` for any other shape.
pub fn bearer_from_request(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    parse_bearer(value).map(str::to_string)
}

pub fn parse_bearer(value: &str) -> Option<&str> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() => {
            Some(token)
        }
        _ => None,
    }
}
