//! Borrowed-book record model

use serde::Deserialize;
use utoipa::IntoParams;

use super::document::{Page, PageQuery};

/// `GET /borrowed` query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BorrowedQuery {
    /// Borrower email; all records when omitted
    pub email: Option<String>,
    /// Zero-based page index
    pub page: Option<String>,
    /// Page size
    pub size: Option<String>,
}

impl BorrowedQuery {
    pub fn requested_page(&self) -> Option<Page> {
        PageQuery {
            page: self.page.clone(),
            size: self.size.clone(),
        }
        .requested_page()
    }
}
