use serde_json::{json, Value};

use super::token::Claims;

/// Claims this backend puts into session tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Account id (UUID string)
    pub sub: String,
    /// Account handle
    pub login: String,
    /// Role storage code (`A` / `U`)
    pub perfil: String,
}

impl SessionClaims {
    pub fn into_claims(self) -> Claims {
        let mut c = Claims::new();
        c.insert("sub".to_string(), json!(self.sub));
        c.insert("login".to_string(), json!(self.login));
        c.insert("perfil".to_string(), json!(self.perfil));
        c
    }
}

/// String-valued `sub`, if any.
pub fn subject(claims: &Claims) -> Option<&str> {
    claims.get("sub").and_then(Value::as_str)
}

/// String-valued `login`, if any.
pub fn login(claims: &Claims) -> Option<&str> {
    claims.get("login").and_then(Value::as_str)
}
