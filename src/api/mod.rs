//! API handlers and routing for the catalog REST endpoints

pub mod admin;
pub mod books;
pub mod borrowed;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod responses;
pub mod session;


use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use axum_extra::extract::CookieJar;
use serde_json::Value;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    models::document::Document,
    services::sessions::SESSION_COOKIE,
    AppState,
};

/// JSON object request body.
///
/// An empty body reads as an empty document and the content type is not
/// checked; anything that is not a JSON object is a bad request.
pub struct Payload(pub Document);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Unreadable body: {}", e)))?;
        parse_payload(&bytes).map(Payload)
    }
}

fn parse_payload(bytes: &[u8]) -> AppResult<Document> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Document::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(AppError::BadRequest("Body is not a JSON object".to_string())),
        Err(e) => Err(AppError::BadRequest(format!("Malformed JSON: {}", e))),
    }
}

/// Session guard for gated routes.
///
/// Rejects with 401 before the handler runs when the `token` cookie is
/// missing or fails verification; otherwise the decoded claims are placed
/// in the request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("no token found".to_string()))?;

    let claims = state.services.sessions.verify(&token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Build the application router.
///
/// Gated routes: `GET /books`, `POST /book`, `PUT /book/:id`, `DELETE /book/:id`.
pub fn create_router(state: AppState) -> Router {
    let session_gate = middleware::from_fn_with_state(state.clone(), require_session);
    let cors = cors_layer(&state.config.server.cors_origins);

    let api = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Admin and session
        .route("/admin", get(admin::list_admins).post(admin::login))
        .route("/jwt", post(session::issue_token))
        .route("/logout", post(session::logout))
        // Categories
        .route("/categories", get(categories::list_categories))
        .route("/categories-name", get(categories::list_category_names))
        .route("/category/:name", get(categories::get_category))
        // Books
        .route(
            "/books",
            get(books::list_books).route_layer(session_gate.clone()),
        )
        .route("/books/:category", get(books::books_by_category))
        .route("/numOfBooks", get(books::count_books))
        .route(
            "/book",
            post(books::create_book).route_layer(session_gate.clone()),
        )
        .route(
            "/book/:id",
            get(books::get_book).merge(
                put(books::update_book)
                    .delete(books::delete_book)
                    .route_layer(session_gate),
            ),
        )
        // Borrowed books
        .route(
            "/borrowed",
            get(borrowed::list_borrowed).post(borrowed::create_borrowed),
        )
        .route(
            "/borrowed/:id",
            get(borrowed::get_borrowed)
                .put(borrowed::update_borrowed)
                .delete(borrowed::delete_borrowed),
        )
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Credentialed CORS for the configured front-end origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
