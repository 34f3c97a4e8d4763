//! Access token decoding
//!
//! The identity provider issues HS256 JWTs; this module only decodes and
//! validates them. Token issuance, refresh, and revocation all live outside
//! this codebase.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id (UUID string)
    pub sub: String,
    /// Audience, checked against the configured value
    pub aud: String,
    /// Expiry as Unix seconds
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Identity extracted from a validated token, attached to authenticated
/// requests as an extension.
#[derive(Debug, Clone)]
pub struct TokenData {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl From<Claims> for TokenData {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Decode a JWT and validate its signature, expiry, and audience.
///
/// Returns the claims if valid, `None` otherwise. Callers translate `None`
/// into their own 401 response; no error detail is surfaced to clients.
pub fn decode_access_token(token: &str, secret: &str, audience: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";
    const AUDIENCE: &str = "authenticated";

    fn make_token(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode should succeed")
    }

    fn valid_claims() -> Claims {
        Claims {
            sub: "9f6c8f5e-0000-4000-8000-000000000001".to_string(),
            aud: AUDIENCE.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
            email: Some("creator@example.com".to_string()),
            role: None,
        }
    }

    #[test]
    fn test_roundtrip_decode() {
        let claims = valid_claims();
        let token = make_token(&claims, SECRET);

        let decoded = decode_access_token(&token, SECRET, AUDIENCE).expect("token should decode");
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.email, claims.email);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = make_token(&valid_claims(), SECRET);
        assert!(decode_access_token(&token, "other-secret", AUDIENCE).is_none());
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let mut claims = valid_claims();
        claims.aud = "something-else".to_string();
        let token = make_token(&claims, SECRET);
        assert!(decode_access_token(&token, SECRET, AUDIENCE).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = valid_claims();
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        let token = make_token(&claims, SECRET);
        assert!(decode_access_token(&token, SECRET, AUDIENCE).is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(decode_access_token("not-a-jwt", SECRET, AUDIENCE).is_none());
    }
}
