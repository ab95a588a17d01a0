//! In-process document store, kept in insertion order

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::{
    error::AppResult,
    models::document::{with_id, without_id, Document, DocumentId, Filter, Page, UpdateOutcome},
};

#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<Vec<(DocumentId, Document)>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(&self, filter: &Filter, page: Option<Page>) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().await;
        let matching = documents.iter().filter(|(_, doc)| filter.matches(doc));

        let selected: Vec<Document> = match page {
            Some(page) => matching
                .skip(usize::try_from(page.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
                .map(|(id, doc)| with_id(*id, doc.clone()))
                .collect(),
            None => matching.map(|(id, doc)| with_id(*id, doc.clone())).collect(),
        };
        Ok(selected)
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|(_, doc)| filter.matches(doc))
            .map(|(id, doc)| with_id(*id, doc.clone())))
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(id, doc)| with_id(*id, doc.clone())))
    }

    async fn insert_one(&self, document: Document) -> AppResult<DocumentId> {
        let id = DocumentId::generate();
        self.documents.write().await.push((id, without_id(document)));
        Ok(id)
    }

    async fn upsert_by_id(&self, id: DocumentId, patch: Document) -> AppResult<UpdateOutcome> {
        let patch = without_id(patch);
        let mut documents = self.documents.write().await;

        let Some(index) = documents.iter().position(|(doc_id, _)| *doc_id == id) else {
            documents.push((id, patch));
            return Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
                upserted: true,
            });
        };

        let existing = &mut documents[index].1;
        let mut changed = false;
        for (field, value) in patch {
            if existing.get(&field) != Some(&value) {
                existing.insert(field, value);
                changed = true;
            }
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
            upserted: false,
        })
    }

    async fn delete_by_id(&self, id: DocumentId) -> AppResult<u64> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|(doc_id, _)| *doc_id != id);
        Ok((before - documents.len()) as u64)
    }

    async fn count(&self, filter: &Filter) -> AppResult<i64> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|(_, doc)| filter.matches(doc)).count() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
