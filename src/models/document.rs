//! Schemaless documents and the primitives used to query them

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::AppError;

/// A stored record: a JSON object with free-form fields.
pub type Document = Map<String, Value>;

/// Field carrying the record identifier in every response body.
pub const ID_FIELD: &str = "_id";

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest skip or limit a store accepts (a signed 64-bit SQL bound)
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Record identifier (UUID v4, generated server-side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AppError::BadRequest(format!("Malformed identifier: {}", s)))
    }
}

/// Attach the identifier to a document for output.
pub fn with_id(id: DocumentId, mut document: Document) -> Document {
    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    document
}

/// Drop any client-supplied identifier; ids are only assigned by the store.
pub fn without_id(mut document: Document) -> Document {
    document.remove(ID_FIELD);
    document
}

/// Single-field selection over a collection
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Eq { field: String, value: Value },
    /// Numeric comparison; non-numeric or missing fields never match
    GreaterThan { field: String, value: i64 },
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn greater_than(field: &str, value: i64) -> Self {
        Filter::GreaterThan {
            field: field.to_string(),
            value,
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => document.get(field) == Some(value),
            Filter::GreaterThan { field, value } => document
                .get(field)
                .and_then(Value::as_f64)
                .map_or(false, |n| n > *value as f64),
        }
    }
}

/// Offset window over a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

/// `?page=&size=` query parameters. Zero-based page; missing or
/// non-numeric values fall back to page 0, size 10.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index (default: 0)
    pub page: Option<String>,
    /// Page size (default: 10)
    pub size: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        let page = parse_count(self.page.as_deref()).unwrap_or(0);
        let size = parse_count(self.size.as_deref())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Page {
            skip: page.saturating_mul(size).min(MAX_OFFSET),
            limit: size.min(MAX_OFFSET),
        }
    }

    /// Pagination only when the caller asked for it
    pub fn requested_page(&self) -> Option<Page> {
        if self.page.is_some() || self.size.is_some() {
            Some(self.page())
        } else {
            None
        }
    }
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
}

/// Result of a merge-patch upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
    /// No record had the identifier, so one was created
    pub upserted: bool,
}
