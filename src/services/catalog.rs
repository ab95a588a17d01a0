//! Book catalog and category service

use serde_json::Value;

use super::documents::{require_fields, DeleteStatus, UpdateStatus};
use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::BookCounts,
        document::{Document, DocumentId, Filter, Page, ID_FIELD},
    },
    repository::SharedStore,
};

#[derive(Clone)]
pub struct CatalogService {
    books: SharedStore,
    categories: SharedStore,
}

impl CatalogService {
    pub fn new(books: SharedStore, categories: SharedStore) -> Self {
        Self { books, categories }
    }

    /// One page of books in storage order
    pub async fn list_books(&self, page: Page) -> AppResult<Vec<Document>> {
        self.books.find(&Filter::All, Some(page)).await
    }

    /// All books of a category
    pub async fn books_by_category(&self, category: &str) -> AppResult<Vec<Document>> {
        self.books.find(&Filter::eq("category", category), None).await
    }

    /// Total books and books with a positive quantity
    pub async fn count_books(&self) -> AppResult<BookCounts> {
        let total_count = self.books.count(&Filter::All).await?;
        let available_count = self
            .books
            .count(&Filter::greater_than("quantity", 0))
            .await?;
        Ok(BookCounts {
            total_count,
            available_count,
        })
    }

    pub async fn get_book(&self, id: DocumentId) -> AppResult<Document> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn create_book(&self, book: Document) -> AppResult<DocumentId> {
        let book = require_fields(book)?;
        let id = self.books.insert_one(book).await?;
        tracing::info!("Book {} created", id);
        Ok(id)
    }

    /// Merge the sent fields into the book, creating it if the id is unknown
    pub async fn update_book(&self, id: DocumentId, changes: Document) -> AppResult<UpdateStatus> {
        let changes = require_fields(changes)?;
        let outcome = self.books.upsert_by_id(id, changes).await?;
        if outcome.upserted {
            tracing::info!("Book {} did not exist and was created by update", id);
        }
        let status = UpdateStatus::from_outcome(outcome)?;
        tracing::info!("Book {} update: {:?}", id, status);
        Ok(status)
    }

    pub async fn delete_book(&self, id: DocumentId) -> AppResult<DeleteStatus> {
        let status = DeleteStatus::from_count(self.books.delete_by_id(id).await?)?;
        tracing::info!("Book {} delete: {:?}", id, status);
        Ok(status)
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Document>> {
        self.categories.find(&Filter::All, None).await
    }

    /// Categories projected to their identifier and name
    pub async fn category_names(&self) -> AppResult<Vec<Document>> {
        let categories = self.categories.find(&Filter::All, None).await?;
        Ok(categories
            .into_iter()
            .map(|category| {
                category
                    .into_iter()
                    .filter(|(field, _)| field == ID_FIELD || field == "name")
                    .collect()
            })
            .collect())
    }

    pub async fn get_category(&self, name: &str) -> AppResult<Document> {
        self.categories
            .find_one(&Filter::eq("name", Value::String(name.to_string())))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", name)))
    }

    /// Storage round-trip used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.books.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{DocumentStore, MemoryDocumentStore};
    use serde_json::json;
    use std::sync::Arc;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn service() -> (CatalogService, Arc<MemoryDocumentStore>) {
        let categories = Arc::new(MemoryDocumentStore::new());
        let service = CatalogService::new(Arc::new(MemoryDocumentStore::new()), categories.clone());
        (service, categories)
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let (catalog, _) = service();
        let id = catalog
            .create_book(doc(json!({"title": "X", "quantity": 3, "category": "Fiction"})))
            .await
            .unwrap();

        let book = catalog.get_book(id).await.unwrap();
        assert_eq!(book["title"], json!("X"));
        assert_eq!(book[ID_FIELD], json!(id.to_string()));

        assert_eq!(
            catalog.update_book(id, doc(json!({"quantity": 2}))).await.unwrap(),
            UpdateStatus::Updated
        );
        assert_eq!(
            catalog.update_book(id, doc(json!({"quantity": 2}))).await.unwrap(),
            UpdateStatus::Unchanged
        );

        assert_eq!(catalog.delete_book(id).await.unwrap(), DeleteStatus::Deleted);
        assert_eq!(catalog.delete_book(id).await.unwrap(), DeleteStatus::NothingDeleted);
        assert!(matches!(catalog.get_book(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_payloads_rejected() {
        let (catalog, _) = service();
        assert!(matches!(
            catalog.create_book(Document::new()).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            catalog.update_book(DocumentId::generate(), Document::new()).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(catalog.count_books().await.unwrap().total_count, 0);
    }

    #[tokio::test]
    async fn test_update_unknown_id_creates_book() {
        let (catalog, _) = service();
        let id = DocumentId::generate();

        let status = catalog.update_book(id, doc(json!({"title": "Ghost"}))).await.unwrap();
        assert_eq!(status, UpdateStatus::Updated);
        assert_eq!(catalog.get_book(id).await.unwrap()["title"], json!("Ghost"));
    }

    #[tokio::test]
    async fn test_counts_and_category_lookup() {
        let (catalog, _) = service();
        for (category, quantity) in [("Fiction", 3), ("Fiction", 0), ("History", 1)] {
            catalog
                .create_book(doc(json!({"category": category, "quantity": quantity})))
                .await
                .unwrap();
        }

        assert_eq!(
            catalog.count_books().await.unwrap(),
            BookCounts {
                total_count: 3,
                available_count: 2
            }
        );
        assert_eq!(catalog.books_by_category("Fiction").await.unwrap().len(), 2);
        assert!(catalog.books_by_category("Poetry").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categories() {
        let (catalog, store) = service();
        store
            .insert_one(doc(json!({"name": "Fiction", "image": "fiction.png"})))
            .await
            .unwrap();

        let names = catalog.category_names().await.unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0]["name"], json!("Fiction"));
        assert!(names[0].contains_key(ID_FIELD));
        assert!(!names[0].contains_key("image"));

        assert_eq!(
            catalog.get_category("Fiction").await.unwrap()["image"],
            json!("fiction.png")
        );
        assert!(matches!(
            catalog.get_category("Poetry").await,
            Err(AppError::NotFound(_))
        ));
    }
}
