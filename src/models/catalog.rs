//! Book catalog and category models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Total and available (quantity > 0) book counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCounts {
    pub total_count: i64,
    pub available_count: i64,
}
