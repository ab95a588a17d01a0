//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, books, borrowed, categories, health, responses, session};
use crate::services::sessions::SESSION_COOKIE;

/// Registers the `token` cookie as the session security scheme
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Admin, book catalog and borrowed-book REST API"
    ),
    paths(
        // Health
        health::root,
        health::health_check,
        health::readiness_check,
        // Admin and session
        admin::list_admins,
        admin::login,
        session::issue_token,
        session::logout,
        // Categories
        categories::list_categories,
        categories::list_category_names,
        categories::get_category,
        // Books
        books::list_books,
        books::count_books,
        books::get_book,
        books::books_by_category,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrowed
        borrowed::list_borrowed,
        borrowed::get_borrowed,
        borrowed::create_borrowed,
        borrowed::update_borrowed,
        borrowed::delete_borrowed,
    ),
    components(
        schemas(
            crate::models::admin::LoginRequest,
            crate::models::admin::LoginStatus,
            crate::models::admin::AdminSummary,
            crate::models::catalog::BookCounts,
            responses::SuccessResponse,
            responses::CreatedResponse,
            responses::MutationResponse,
            health::HealthResponse,
            crate::error::MessageResponse,
        )
    ),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Admin accounts"),
        (name = "session", description = "Session cookie"),
        (name = "categories", description = "Book categories"),
        (name = "books", description = "Book catalog"),
        (name = "borrowed", description = "Borrowed books")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
