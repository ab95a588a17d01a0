//! Borrowed-book record service

use super::documents::{require_fields, DeleteStatus, UpdateStatus};
use crate::{
    error::{AppError, AppResult},
    models::document::{Document, DocumentId, Filter, Page},
    repository::SharedStore,
};

#[derive(Clone)]
pub struct BorrowedService {
    borrowed: SharedStore,
}

impl BorrowedService {
    pub fn new(borrowed: SharedStore) -> Self {
        Self { borrowed }
    }

    /// Records of one borrower, or every record when no email is given
    pub async fn list(&self, email: Option<&str>, page: Option<Page>) -> AppResult<Vec<Document>> {
        let filter = match email {
            Some(email) => Filter::eq("email", email),
            None => Filter::All,
        };
        self.borrowed.find(&filter, page).await
    }

    pub async fn get(&self, id: DocumentId) -> AppResult<Document> {
        self.borrowed
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrowed record {} not found", id)))
    }

    pub async fn create(&self, record: Document) -> AppResult<DocumentId> {
        let record = require_fields(record)?;
        let id = self.borrowed.insert_one(record).await?;
        tracing::info!("Borrowed record {} created", id);
        Ok(id)
    }

    pub async fn update(&self, id: DocumentId, changes: Document) -> AppResult<UpdateStatus> {
        let changes = require_fields(changes)?;
        let status = UpdateStatus::from_outcome(self.borrowed.upsert_by_id(id, changes).await?)?;
        tracing::info!("Borrowed record {} update: {:?}", id, status);
        Ok(status)
    }

    pub async fn delete(&self, id: DocumentId) -> AppResult<DeleteStatus> {
        let status = DeleteStatus::from_count(self.borrowed.delete_by_id(id).await?)?;
        tracing::info!("Borrowed record {} delete: {:?}", id, status);
        Ok(status)
    }
}
