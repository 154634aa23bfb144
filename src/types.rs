//! Core types for serverless-api

use serde::Serialize;
use utoipa::ToSchema;

/// Placeholder record served by the collection endpoints
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Record {
    pub name: String,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The fixed sequence every collection endpoint returns.
pub fn sample_records() -> Vec<Record> {
    vec![Record::new("Foo"), Record::new("Bar")]
}

/// Body of the health route
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

/// Body of framework-level error responses, e.g. `{"detail": "Not Found"}`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}
