//! Session token claims

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::Document;

/// Registered claims managed by the server, never taken from the caller
const RESERVED_CLAIMS: [&str; 3] = ["exp", "iat", "nbf"];

/// JWT claims: the caller-supplied identity plus issue/expiry timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: Document,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(mut identity: Document, issued_at: i64, ttl_seconds: i64) -> Self {
        for claim in RESERVED_CLAIMS {
            identity.remove(claim);
        }
        Self {
            identity,
            iat: issued_at,
            exp: issued_at + ttl_seconds,
        }
    }

    /// Email of the session holder, when the payload carried one
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }

    /// Create a signed JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token (signature and expiry).
    ///
    /// An `aud` claim is part of the caller identity and is not checked.
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.validate_aud = false;

        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }
}
