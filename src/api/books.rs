//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::{
    responses::{CreatedResponse, MutationResponse},
    Payload,
};
use crate::{
    error::AppResult,
    models::{
        catalog::BookCounts,
        document::{Document, DocumentId, PageQuery},
        session::SessionClaims,
    },
    AppState,
};

/// List one page of books (session required)
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("session_cookie" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Books in storage order; order is not stable across calls"),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<Document>>> {
    let books = state.services.catalog.list_books(query.page()).await?;
    Ok(Json(books))
}

/// Total and available book counts
#[utoipa::path(
    get,
    path = "/numOfBooks",
    tag = "books",
    responses(
        (status = 200, description = "Book counts", body = BookCounts)
    )
)]
pub async fn count_books(State(state): State<AppState>) -> AppResult<Json<BookCounts>> {
    let counts = state.services.catalog.count_books().await?;
    Ok(Json(counts))
}

/// Get a book by identifier
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book record"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Document>> {
    let id: DocumentId = id.parse()?;
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// All books in a category
#[utoipa::path(
    get,
    path = "/books/{category}",
    tag = "books",
    params(("category" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Books of the category")
    )
)]
pub async fn books_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Document>>> {
    let books = state.services.catalog.books_by_category(&category).await?;
    Ok(Json(books))
}

/// Add a book (session required)
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Book inserted", body = CreatedResponse),
        (status = 400, description = "Empty or invalid payload"),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Payload(book): Payload,
) -> AppResult<Json<CreatedResponse>> {
    tracing::debug!("Book create requested by {:?}", session.email());
    let id = state.services.catalog.create_book(book).await?;
    Ok(Json(CreatedResponse::from(id)))
}

/// Merge fields into a book, creating it when the identifier is unknown (session required)
#[utoipa::path(
    put,
    path = "/book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "`success` is false when no field changed", body = MutationResponse),
        (status = 400, description = "Empty payload or malformed identifier"),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Path(id): Path<String>,
    Payload(changes): Payload,
) -> AppResult<Json<MutationResponse>> {
    let id: DocumentId = id.parse()?;
    tracing::debug!("Book {} update requested by {:?}", id, session.email());
    let status = state.services.catalog.update_book(id, changes).await?;
    Ok(Json(MutationResponse::from(status)))
}

/// Delete a book (session required)
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "`success` is false when nothing was deleted", body = MutationResponse),
        (status = 400, description = "Malformed identifier"),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Path(id): Path<String>,
) -> AppResult<Json<MutationResponse>> {
    let id: DocumentId = id.parse()?;
    tracing::debug!("Book {} delete requested by {:?}", id, session.email());
    let status = state.services.catalog.delete_book(id).await?;
    Ok(Json(MutationResponse::from(status)))
}
