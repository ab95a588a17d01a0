//! Session cookie endpoints

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::{responses::SuccessResponse, Payload};
use crate::{error::AppResult, services::sessions::SESSION_COOKIE, AppState};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// Issue a signed session token in the `token` cookie
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "session",
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Token could not be signed")
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Payload(identity): Payload,
) -> AppResult<(CookieJar, Json<SuccessResponse>)> {
    let token = state.services.sessions.issue(identity)?;
    Ok((jar.add(session_cookie(token)), Json(SuccessResponse::ok())))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "session",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    let mut expired = session_cookie(String::new());
    expired.make_removal();
    (jar.add(expired), Json(SuccessResponse::ok()))
}
