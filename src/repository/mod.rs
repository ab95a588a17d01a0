//! Repository layer for document storage

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::document::{Document, DocumentId, Filter, Page, UpdateOutcome},
};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// The collections backing the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Admin,
    Categories,
    Books,
    Borrowed,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Admin => "admin",
            Collection::Categories => "categories",
            Collection::Books => "books",
            Collection::Borrowed => "borrowed",
        }
    }
}

/// One collection of schemaless documents.
///
/// Returned documents always carry their identifier in the `_id` field.
/// Listing order is storage order and is not guaranteed to be stable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, filter: &Filter, page: Option<Page>) -> AppResult<Vec<Document>>;

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<Document>>;

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>>;

    async fn insert_one(&self, document: Document) -> AppResult<DocumentId>;

    /// Overwrite the fields present in `patch`, creating the record when
    /// no document has `id`.
    async fn upsert_by_id(&self, id: DocumentId, patch: Document) -> AppResult<UpdateOutcome>;

    /// Returns the number of removed documents (0 or 1)
    async fn delete_by_id(&self, id: DocumentId) -> AppResult<u64>;

    async fn count(&self, filter: &Filter) -> AppResult<i64>;

    async fn ping(&self) -> AppResult<()>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

/// Main repository struct holding one store per collection
#[derive(Clone)]
pub struct Repository {
    pub admins: SharedStore,
    pub categories: SharedStore,
    pub books: SharedStore,
    pub borrowed: SharedStore,
}

impl Repository {
    /// Create a repository backed by PostgreSQL JSONB tables
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        let store = |collection| -> SharedStore {
            Arc::new(PgDocumentStore::new(pool.clone(), collection))
        };
        Self {
            admins: store(Collection::Admin),
            categories: store(Collection::Categories),
            books: store(Collection::Books),
            borrowed: store(Collection::Borrowed),
        }
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        Self {
            admins: Arc::new(MemoryDocumentStore::new()),
            categories: Arc::new(MemoryDocumentStore::new()),
            books: Arc::new(MemoryDocumentStore::new()),
            borrowed: Arc::new(MemoryDocumentStore::new()),
        }
    }
}
