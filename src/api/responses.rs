//! Response bodies shared by the resource handlers

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::document::DocumentId,
    services::{DeleteStatus, UpdateStatus},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Insert acknowledgement
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    /// Identifier assigned to the new record
    pub inserted_id: String,
}

impl From<DocumentId> for CreatedResponse {
    fn from(id: DocumentId) -> Self {
        Self {
            success: true,
            inserted_id: id.to_string(),
        }
    }
}

/// Update/delete result; `success` is false when nothing changed
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}

impl From<UpdateStatus> for MutationResponse {
    fn from(status: UpdateStatus) -> Self {
        let (success, message) = match status {
            UpdateStatus::Updated => (true, "Updated Successfully"),
            UpdateStatus::Unchanged => (false, "No Data Updated"),
        };
        Self {
            success,
            message: message.to_string(),
        }
    }
}

impl From<DeleteStatus> for MutationResponse {
    fn from(status: DeleteStatus) -> Self {
        let (success, message) = match status {
            DeleteStatus::Deleted => (true, "Deleted Successfully"),
            DeleteStatus::NothingDeleted => (false, "No Data Deleted"),
        };
        Self {
            success,
            message: message.to_string(),
        }
    }
}
