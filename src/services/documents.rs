//! Write-path rules shared by every collection

use crate::{
    error::{AppError, AppResult},
    models::document::{without_id, Document, UpdateOutcome},
};

/// Reject bodies with no fields (an `_id` alone does not count).
pub fn require_fields(document: Document) -> AppResult<Document> {
    let document = without_id(document);
    if document.is_empty() {
        return Err(AppError::BadRequest("Empty payload".to_string()));
    }
    Ok(document)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// At least one field changed, or the record was created by the upsert
    Updated,
    /// The record matched but every field already had the sent value
    Unchanged,
}

impl UpdateStatus {
    pub fn from_outcome(outcome: UpdateOutcome) -> AppResult<Self> {
        if outcome.upserted || outcome.modified > 0 {
            Ok(UpdateStatus::Updated)
        } else if outcome.matched > 0 {
            Ok(UpdateStatus::Unchanged)
        } else {
            Err(AppError::BadRequest("Update matched nothing".to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    NothingDeleted,
}

impl DeleteStatus {
    pub fn from_count(deleted: u64) -> AppResult<Self> {
        match deleted {
            1 => Ok(DeleteStatus::Deleted),
            0 => Ok(DeleteStatus::NothingDeleted),
            n => Err(AppError::BadRequest(format!("Deleted {} records for one identifier", n))),
        }
    }
}
