//! Compact HMAC-SHA256 session tokens.
//!
//! Wire format: `<header>.<body>.<signature>`, each segment base64url
//! without padding. The header is always `{"alg":"HS256","typ":"JWT"}`;
//! the body is a JSON object of claims plus `iat`/`exp` in Unix seconds.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use crate::state::security_config::SecurityConfig;

type HmacSha256 = Hmac<Sha256>;

/// Claim name to JSON value. Keys serialize in sorted order.
pub type Claims = serde_json::Map<String, Value>;

const ALG: &str = "HS256";
const TYP: &str = "JWT";

/// Outcome of [`TokenService::verify`]. Every failure is `Invalid`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenVerification {
    Valid(Claims),
    Invalid,
}

impl TokenVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenVerification::Valid(_))
    }

    pub fn into_claims(self) -> Option<Claims> {
        match self {
            TokenVerification::Valid(c) => Some(c),
            TokenVerification::Invalid => None,
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    default_ttl_secs: u64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("default_ttl_secs", &self.default_ttl_secs)
            .finish()
    }
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            secret: security.jwt_secret.clone(),
            default_ttl_secs: security.token_ttl_secs,
        }
    }

    pub fn default_ttl_secs(&self) -> u64 {
        self.default_ttl_secs
    }

    /// Sign `claims` with `iat = now` and `exp = now + ttl`.
    pub fn create(&self, claims: &Claims, ttl: Option<u64>) -> String {
        self.create_at(claims, ttl, SystemTime::now())
    }

    /// Caller-supplied `iat`/`exp` are overwritten. A missing or zero `ttl`
    /// uses the configured default.
    pub fn create_at(&self, claims: &Claims, ttl: Option<u64>, now: SystemTime) -> String {
        let ttl = match ttl {
            Some(t) if t > 0 => t,
            _ => self.default_ttl_secs,
        };
        let iat = unix_secs(now);
        let exp = iat.saturating_add(i64::try_from(ttl).unwrap_or(i64::MAX));

        let mut body = claims.clone();
        body.insert("iat".to_string(), json!(iat));
        body.insert("exp".to_string(), json!(exp));

        let h64 = URL_SAFE_NO_PAD.encode(json!({ "alg": ALG, "typ": TYP }).to_string());
        let b64 = URL_SAFE_NO_PAD.encode(Value::Object(body).to_string());
        let signing_input = format!("{h64}.{b64}");

        let Some(mut mac) = self.mac() else {
            // Unreachable: HMAC takes keys of any length
            return String::new();
        };
        mac.update(signing_input.as_bytes());
        let s64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{signing_input}.{s64}")
    }

    pub fn verify(&self, token: &str) -> TokenVerification {
        self.verify_at(token, SystemTime::now())
    }

    /// Valid only inside `[iat, exp)`. Every check runs before the outcome
    /// is chosen, so callers cannot tell which one failed.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> TokenVerification {
        let parts: Vec<&str> = token.split('.').collect();
        let [h64, b64, s64] = parts.as_slice() else {
            return TokenVerification::Invalid;
        };

        let signature_ok = match (URL_SAFE_NO_PAD.decode(s64), self.mac()) {
            (Ok(sig), Some(mut mac)) => {
                mac.update(h64.as_bytes());
                mac.update(b".");
                mac.update(b64.as_bytes());
                // constant-time comparison
                mac.verify_slice(&sig).is_ok()
            }
            _ => false,
        };

        let header_ok = decode_object(h64)
            .map(|h| h.get("alg").and_then(Value::as_str) == Some(ALG))
            .unwrap_or(false);

        let body = decode_object(b64);
        let not_expired = match &body {
            Some(claims) => match claims.get("exp") {
                None => unix_secs(now) < 0,
                Some(v) => v.as_i64().is_some_and(|exp| unix_secs(now) < exp),
            },
            None => false,
        };

        match body {
            Some(claims) if signature_ok & header_ok & not_expired => {
                TokenVerification::Valid(claims)
            }
            _ => TokenVerification::Invalid,
        }
    }

    fn mac(&self) -> Option<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).ok()
    }
}

fn decode_object(segment: &str) -> Option<Claims> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn unix_secs(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => -i64::try_from(e.duration().as_secs()).unwrap_or(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecurityConfig::new(
            "test_secret_key_for_testing_purposes_only".as_bytes(),
        ))
    }

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn claims(pairs: &[(&str, Value)]) -> Claims {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_create_and_verify_roundtrip() {
        let svc = service();
        let input = claims(&[
            ("sub", json!("u1")),
            ("login", json!("alice")),
            ("perfil", json!("A")),
        ]);
        let t = 1_700_000_000;

        let token = svc.create_at(&input, Some(100), at(t));
        let got = svc.verify_at(&token, at(t + 50)).into_claims().unwrap();

        assert_eq!(got["sub"], "u1");
        assert_eq!(got["perfil"], "A");
        assert_eq!(got["iat"], json!(t));
        assert_eq!(got["exp"], json!(t + 100));
        assert_eq!(got.len(), 5);
    }

    #[test]
    fn test_header_is_fixed() {
        let token = service().create_at(&Claims::new(), None, at(10));
        let h64 = token.split('.').next().unwrap();
        let header = URL_SAFE_NO_PAD.decode(h64).unwrap();
        assert_eq!(header, br#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn test_expiry_boundary() {
        let svc = service();
        let token = svc.create_at(&claims(&[("sub", json!("u1"))]), Some(100), at(1000));

        assert!(svc.verify_at(&token, at(1000)).is_valid());
        assert!(svc.verify_at(&token, at(1099)).is_valid());
        assert_eq!(svc.verify_at(&token, at(1100)), TokenVerification::Invalid);
        assert_eq!(svc.verify_at(&token, at(1101)), TokenVerification::Invalid);
    }

    #[test]
    fn test_zero_or_missing_ttl_uses_default() {
        let svc = service();
        let c = claims(&[("sub", json!("u1"))]);
        for ttl in [None, Some(0)] {
            let token = svc.create_at(&c, ttl, at(0));
            let got = svc.verify_at(&token, at(1)).into_claims().unwrap();
            assert_eq!(got["exp"], json!(svc.default_ttl_secs()));
        }
    }

    #[test]
    fn test_supplied_iat_exp_are_overwritten() {
        let svc = service();
        let c = claims(&[("sub", json!("u1")), ("exp", json!(i64::MAX)), ("iat", json!(5))]);
        let token = svc.create_at(&c, Some(10), at(100));
        let got = svc.verify_at(&token, at(105)).into_claims().unwrap();
        assert_eq!(got["iat"], json!(100));
        assert_eq!(got["exp"], json!(110));
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let svc = service();
        let a = claims(&[("sub", json!("u1")), ("login", json!("alice"))]);
        let b = claims(&[("login", json!("alice")), ("sub", json!("u1"))]);
        assert_eq!(
            svc.create_at(&a, Some(60), at(42)),
            svc.create_at(&b, Some(60), at(42))
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = service().create_at(&Claims::new(), Some(60), at(0));
        let other = TokenService::new(&SecurityConfig::new(b"another".to_vec()));
        assert_eq!(other.verify_at(&token, at(1)), TokenVerification::Invalid);
    }

    fn sign_raw(svc: &TokenService, body: &str) -> String {
        let h64 = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let b64 = URL_SAFE_NO_PAD.encode(body);
        let mut mac = svc.mac().unwrap();
        mac.update(format!("{h64}.{b64}").as_bytes());
        let s64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{h64}.{b64}.{s64}")
    }

    #[test]
    fn test_missing_exp_is_invalid() {
        let svc = service();
        let token = sign_raw(&svc, r#"{"sub":"u1"}"#);
        assert_eq!(svc.verify_at(&token, at(10)), TokenVerification::Invalid);
    }

    #[test]
    fn test_non_integer_exp_is_invalid() {
        let svc = service();
        for body in [
            r#"{"sub":"u1","exp":"9999999999"}"#,
            r#"{"sub":"u1","exp":9999999999.5}"#,
            r#"{"sub":"u1","exp":null}"#,
        ] {
            let token = sign_raw(&svc, body);
            assert_eq!(svc.verify_at(&token, at(10)), TokenVerification::Invalid);
        }
    }

    #[test]
    fn test_non_object_body_is_invalid() {
        let svc = service();
        let token = sign_raw(&svc, r#"["sub","u1"]"#);
        assert_eq!(svc.verify_at(&token, at(10)), TokenVerification::Invalid);
    }

    #[test]
    fn test_malformed_strings_are_invalid() {
        let svc = service();
        for s in ["", ".", "..", "a.b", "a.b.c.d", "not a token", "%%%.%%%.%%%"] {
            assert_eq!(svc.verify_at(s, at(0)), TokenVerification::Invalid);
        }
    }

    #[test]
    fn test_debug_hides_secret() {
        let dbg = format!("{:?}", service());
        assert!(!dbg.contains("test_secret_key"));
    }
}
