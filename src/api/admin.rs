//! Admin endpoints

use axum::{extract::State, Json};
use serde_json::Value;

use super::Payload;
use crate::{
    error::{AppError, AppResult},
    models::admin::{AdminSummary, LoginRequest, LoginStatus},
    AppState,
};

/// List admin identities
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    responses(
        (status = 200, description = "Admin emails and roles", body = Vec<AdminSummary>)
    )
)]
pub async fn list_admins(State(state): State<AppState>) -> AppResult<Json<Vec<AdminSummary>>> {
    let admins = state.services.admins.list().await?;
    Ok(Json(admins))
}

/// Check admin credentials
#[utoipa::path(
    post,
    path = "/admin",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginStatus),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> AppResult<Json<LoginStatus>> {
    let request: LoginRequest = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::BadRequest(format!("Invalid login request: {}", e)))?;

    state.services.admins.authenticate(&request).await?;
    Ok(Json(LoginStatus { status: true }))
}
