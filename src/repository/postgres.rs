//! PostgreSQL document store: one `(id UUID, data JSONB)` table per collection

use async_trait::async_trait;
use sqlx::{types::Json, FromRow, Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{Collection, DocumentStore};
use crate::{
    error::AppResult,
    models::document::{with_id, without_id, Document, DocumentId, Filter, Page, UpdateOutcome},
};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Json<Document>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        with_id(row.id.into(), row.data.0)
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: Pool<Postgres>,
    table: &'static str,
}

impl PgDocumentStore {
    pub fn new(pool: Pool<Postgres>, collection: Collection) -> Self {
        Self {
            pool,
            table: collection.name(),
        }
    }

    fn select(&self, filter: &Filter) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT id, data FROM {} WHERE", self.table));
        push_filter(&mut builder, filter);
        builder
    }
}

/// Append the WHERE predicate; field names and values are always bound.
fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            builder.push(" TRUE");
        }
        Filter::Eq { field, value } => {
            builder
                .push(" data -> ")
                .push_bind(field.clone())
                .push(" = ")
                .push_bind(Json(value.clone()));
        }
        Filter::GreaterThan { field, value } => {
            builder
                .push(" CASE WHEN jsonb_typeof(data -> ")
                .push_bind(field.clone())
                .push(") = 'number' THEN (data ->> ")
                .push_bind(field.clone())
                .push(")::numeric > ")
                .push_bind(*value)
                .push(" ELSE FALSE END");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(&self, filter: &Filter, page: Option<Page>) -> AppResult<Vec<Document>> {
        let mut builder = self.select(filter);
        if let Some(page) = page {
            builder
                .push(" OFFSET ")
                .push_bind(i64::try_from(page.skip).unwrap_or(i64::MAX))
                .push(" LIMIT ")
                .push_bind(i64::try_from(page.limit).unwrap_or(i64::MAX));
        }

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<Document>> {
        let mut builder = self.select(filter);
        builder.push(" LIMIT 1");

        let row = builder
            .build_query_as::<DocumentRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Document::from))
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        let sql = format!("SELECT id, data FROM {} WHERE id = $1", self.table);
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Document::from))
    }

    async fn insert_one(&self, document: Document) -> AppResult<DocumentId> {
        let id = DocumentId::generate();
        let sql = format!("INSERT INTO {} (id, data) VALUES ($1, $2)", self.table);
        sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(Json(without_id(document)))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn upsert_by_id(&self, id: DocumentId, patch: Document) -> AppResult<UpdateOutcome> {
        // The conditional DO UPDATE returns no row when the merge changes nothing.
        let sql = format!(
            r#"
            INSERT INTO {table} (id, data) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET data = {table}.data || EXCLUDED.data
            WHERE {table}.data IS DISTINCT FROM {table}.data || EXCLUDED.data
            RETURNING (xmax = 0) AS inserted
            "#,
            table = self.table
        );
        let inserted: Option<bool> = sqlx::query_scalar(&sql)
            .bind(id.as_uuid())
            .bind(Json(without_id(patch)))
            .fetch_optional(&self.pool)
            .await?;

        Ok(match inserted {
            Some(true) => UpdateOutcome {
                matched: 0,
                modified: 0,
                upserted: true,
            },
            Some(false) => UpdateOutcome {
                matched: 1,
                modified: 1,
                upserted: false,
            },
            None => UpdateOutcome {
                matched: 1,
                modified: 0,
                upserted: false,
            },
        })
    }

    async fn delete_by_id(&self, id: DocumentId) -> AppResult<u64> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self, filter: &Filter) -> AppResult<i64> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {} WHERE", self.table));
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sql_for(filter: &Filter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id, data FROM books WHERE");
        push_filter(&mut builder, filter);
        builder.sql().to_string()
    }

    #[test]
    fn test_filters_bind_every_value() {
        assert_eq!(sql_for(&Filter::All), "SELECT id, data FROM books WHERE TRUE");
        assert_eq!(
            sql_for(&Filter::eq("category", json!("Fiction"))),
            "SELECT id, data FROM books WHERE data -> $1 = $2"
        );
        let available = sql_for(&Filter::greater_than("quantity", 0));
        assert!(available.contains("jsonb_typeof(data -> $1) = 'number'"));
        assert!(available.contains("(data ->> $2)::numeric > $3"));
        assert!(!available.contains("quantity"));
    }
}
