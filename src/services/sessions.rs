//! Session token issuance and verification

use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{document::Document, session::SessionClaims},
};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

#[derive(Clone)]
pub struct SessionService {
    config: AuthConfig,
}

impl SessionService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    fn ttl_seconds(&self) -> i64 {
        self.config.jwt_expiration_hours as i64 * 3600
    }

    /// Sign a time-limited token for the given identity
    pub fn issue(&self, identity: Document) -> AppResult<String> {
        if self.config.jwt_secret.is_empty() {
            return Err(AppError::Internal("JWT secret is not configured".to_string()));
        }

        let claims = SessionClaims::new(identity, Utc::now().timestamp(), self.ttl_seconds());
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(
            "Session issued for {}",
            claims.email().unwrap_or("<anonymous>")
        );
        Ok(token)
    }

    /// Validate signature and expiry of a session token
    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        if self.config.jwt_secret.is_empty() {
            return Err(AppError::Unauthorized("JWT secret is not configured".to_string()));
        }

        SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))
    }
}
