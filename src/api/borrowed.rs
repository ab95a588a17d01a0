//! Borrowed-book record endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{
    responses::{CreatedResponse, MutationResponse},
    Payload,
};
use crate::{
    error::AppResult,
    models::{
        borrowed::BorrowedQuery,
        document::{Document, DocumentId},
    },
    AppState,
};

/// List borrowed records, optionally for one borrower
#[utoipa::path(
    get,
    path = "/borrowed",
    tag = "borrowed",
    params(BorrowedQuery),
    responses(
        (status = 200, description = "Borrowed records in storage order")
    )
)]
pub async fn list_borrowed(
    State(state): State<AppState>,
    Query(query): Query<BorrowedQuery>,
) -> AppResult<Json<Vec<Document>>> {
    let records = state
        .services
        .borrowed
        .list(query.email.as_deref(), query.requested_page())
        .await?;
    Ok(Json(records))
}

/// Get a borrowed record by identifier
#[utoipa::path(
    get,
    path = "/borrowed/{id}",
    tag = "borrowed",
    params(("id" = String, Path, description = "Borrowed record identifier")),
    responses(
        (status = 200, description = "Borrowed record"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_borrowed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Document>> {
    let id: DocumentId = id.parse()?;
    let record = state.services.borrowed.get(id).await?;
    Ok(Json(record))
}

/// Record a borrowed book
#[utoipa::path(
    post,
    path = "/borrowed",
    tag = "borrowed",
    responses(
        (status = 200, description = "Record inserted", body = CreatedResponse),
        (status = 400, description = "Empty or invalid payload")
    )
)]
pub async fn create_borrowed(
    State(state): State<AppState>,
    Payload(record): Payload,
) -> AppResult<Json<CreatedResponse>> {
    let id = state.services.borrowed.create(record).await?;
    Ok(Json(CreatedResponse::from(id)))
}

/// Merge fields into a borrowed record, creating it when the identifier is unknown
#[utoipa::path(
    put,
    path = "/borrowed/{id}",
    tag = "borrowed",
    params(("id" = String, Path, description = "Borrowed record identifier")),
    responses(
        (status = 200, description = "`success` is false when no field changed", body = MutationResponse),
        (status = 400, description = "Empty payload or malformed identifier")
    )
)]
pub async fn update_borrowed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(changes): Payload,
) -> AppResult<Json<MutationResponse>> {
    let id: DocumentId = id.parse()?;
    let status = state.services.borrowed.update(id, changes).await?;
    Ok(Json(MutationResponse::from(status)))
}

/// Delete a borrowed record
#[utoipa::path(
    delete,
    path = "/borrowed/{id}",
    tag = "borrowed",
    params(("id" = String, Path, description = "Borrowed record identifier")),
    responses(
        (status = 200, description = "`success` is false when nothing was deleted", body = MutationResponse),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn delete_borrowed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MutationResponse>> {
    let id: DocumentId = id.parse()?;
    let status = state.services.borrowed.delete(id).await?;
    Ok(Json(MutationResponse::from(status)))
}
