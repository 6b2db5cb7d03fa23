use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// Default token lifetime: one hour
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Decoded token payload: whatever object the client posted to `/jwt`,
/// plus the registered claims added at issuance.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }
}

/// Issues and verifies HS256 bearer tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Signs `claims`, overwriting any client supplied `iat`/`exp`/`jti`.
    pub fn issue(&self, claims: Map<String, Value>) -> AppResult<String> {
        let now = Utc::now();
        self.sign(claims, now.timestamp(), (now + self.ttl).timestamp())
    }

    fn sign(&self, mut claims: Map<String, Value>, iat: i64, exp: i64) -> AppResult<String> {
        claims.insert("iat".to_string(), Value::from(iat));
        claims.insert("exp".to_string(), Value::from(exp));
        claims.insert("jti".to_string(), Value::from(Uuid::new_v4().to_string()));

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Claims are client supplied, only the signature and expiry are checked
        validation.validate_aud = false;
        validation.leeway = 0;

        decode::<Map<String, Value>>(token, &self.decoding, &validation)
            .map(|data| Claims(data.claims))
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_issue_then_verify_keeps_claims() {
        let tokens = TokenService::new("secret", TOKEN_TTL_SECS);
        let token = tokens
            .issue(claims(json!({ "email": "jane@example.com", "plan": "gold" })))
            .unwrap();

        let decoded = tokens.verify(&token).unwrap();
        assert_eq!(decoded.email(), Some("jane@example.com"));
        assert_eq!(decoded.0.get("plan"), Some(&json!("gold")));

        let iat = decoded.0.get("iat").and_then(Value::as_i64).unwrap();
        let exp = decoded.0.get("exp").and_then(Value::as_i64).unwrap();
        assert_eq!(exp - iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_client_expiry_is_overwritten() {
        let tokens = TokenService::new("secret", TOKEN_TTL_SECS);
        let token = tokens.issue(claims(json!({ "exp": 1 }))).unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = TokenService::new("secret", TOKEN_TTL_SECS);
        let issued = Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let token = tokens
            .sign(claims(json!({ "email": "old@example.com" })), issued, issued + TOKEN_TTL_SECS)
            .unwrap();

        assert!(matches!(tokens.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let ours = TokenService::new("secret", TOKEN_TTL_SECS);
        let theirs = TokenService::new("another-secret", TOKEN_TTL_SECS);
        let token = theirs.issue(claims(json!({ "email": "x@example.com" }))).unwrap();

        assert!(matches!(ours.verify(&token), Err(AppError::InvalidToken)));
        assert!(matches!(ours.verify("not-a-jwt"), Err(AppError::InvalidToken)));
    }
}
