//! Admin account model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Credential check request (`POST /admin`)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Admin identifier; usually an email but any non-empty string is accepted
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of an admin account; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdminSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Credential check response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginStatus {
    pub status: bool,
}

/// Admin account to insert; the password is hashed before storage
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub role: String,
}
