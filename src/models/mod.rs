//! Data models for the catalog server

pub mod admin;
pub mod borrowed;
pub mod catalog;
pub mod document;
pub mod session;

// Re-export commonly used types
pub use admin::{AdminSummary, LoginRequest, NewAdmin};
pub use catalog::BookCounts;
pub use document::{Document, DocumentId, Filter, Page, PageQuery, UpdateOutcome};
pub use session::SessionClaims;
