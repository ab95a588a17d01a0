//! Document store tests against a running PostgreSQL
//!
//! Point `DATABASE_URL` at a scratch database and run with `cargo test -- --ignored`.

use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use library_catalog_server::{
    config::AppConfig,
    models::{Document, DocumentId, Filter, Page, UpdateOutcome},
    repository::{Collection, DocumentStore, PgDocumentStore},
};

/// Helper to connect and migrate
async fn books_store() -> PgDocumentStore {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| AppConfig::default().database.url);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    PgDocumentStore::new(pool, Collection::Books)
}

fn doc(value: Value) -> Document {
    value.as_object().cloned().unwrap()
}

/// Field name no other row uses, so shared tables do not disturb counts
fn unique_field(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_upsert_insert_change_and_no_op() {
    let store = books_store().await;
    let id = DocumentId::generate();

    let created = store
        .upsert_by_id(id, doc(json!({"title": "Ghost", "quantity": 1})))
        .await
        .unwrap();
    assert_eq!(created, UpdateOutcome { matched: 0, modified: 0, upserted: true });

    let unchanged = store
        .upsert_by_id(id, doc(json!({"title": "Ghost"})))
        .await
        .unwrap();
    assert_eq!(unchanged, UpdateOutcome { matched: 1, modified: 0, upserted: false });

    let changed = store
        .upsert_by_id(id, doc(json!({"quantity": 4})))
        .await
        .unwrap();
    assert_eq!(changed, UpdateOutcome { matched: 1, modified: 1, upserted: false });

    // Merge keeps fields the patch did not name
    let book = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(book["title"], json!("Ghost"));
    assert_eq!(book["quantity"], json!(4));
    assert_eq!(book["_id"], json!(id.to_string()));

    assert_eq!(store.delete_by_id(id).await.unwrap(), 1);
    assert_eq!(store.delete_by_id(id).await.unwrap(), 0);
}

#[tokio::test]
#[ignore]
async fn test_greater_than_only_matches_numbers() {
    let store = books_store().await;
    let field = unique_field("stock");

    let mut ids = Vec::new();
    for value in [json!(3), json!(0), json!(-2), json!("5"), json!(null), json!(2.5)] {
        let mut book = Document::new();
        book.insert(field.clone(), value);
        ids.push(store.insert_one(book).await.unwrap());
    }
    ids.push(store.insert_one(doc(json!({"title": "no stock field"}))).await.unwrap());

    let available = Filter::greater_than(&field, 0);
    assert_eq!(store.count(&available).await.unwrap(), 2);
    assert_eq!(store.find(&available, None).await.unwrap().len(), 2);

    for id in ids {
        store.delete_by_id(id).await.unwrap();
    }
}

#[tokio::test]
#[ignore]
async fn test_equality_filter_and_paging() {
    let store = books_store().await;
    let category = unique_field("category");

    let mut ids = Vec::new();
    for n in 0..5 {
        ids.push(
            store
                .insert_one(doc(json!({"category": category.as_str(), "n": n})))
                .await
                .unwrap(),
        );
    }

    let filter = Filter::eq("category", category.as_str());
    assert_eq!(store.count(&filter).await.unwrap(), 5);
    assert!(store.find_one(&filter).await.unwrap().is_some());

    let page = store
        .find(&filter, Some(Page { skip: 4, limit: 10 }))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);

    let beyond = store
        .find(
            &filter,
            Some(Page { skip: u64::MAX, limit: u64::MAX }),
        )
        .await
        .unwrap();
    assert!(beyond.is_empty());

    for id in ids {
        store.delete_by_id(id).await.unwrap();
    }
}
