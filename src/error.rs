//! Error types for schema extraction and export.

use thiserror::Error;

/// Failures surfaced by the extractor, the export dispatcher and the service.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("No JSON payload found in model output: {0}")]
    MalformedPayload(String),

    #[error("Schema validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    InvalidRequest(String),
}

/// A single violated IR invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    Shape(String),

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("duplicate table: {0}")]
    DuplicateTable(String),

    #[error("table {0} has no columns")]
    NoColumns(String),

    #[error("table {0} has a column with an empty name")]
    EmptyColumnName(String),

    #[error("duplicate column {column} in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("duplicate index {index} on table {table}")]
    DuplicateIndex { table: String, index: String },

    #[error("index {index} on table {table} lists no columns")]
    EmptyIndex { table: String, index: String },

    #[error("index {index} on table {table} references unknown column {column}")]
    UnknownIndexColumn {
        table: String,
        index: String,
        column: String,
    },

    #[error("relationship #{position} references unknown table {table}")]
    UnknownRelationshipTable { position: usize, table: String },

    #[error("relationship #{position} references unknown column {table}.{column}")]
    UnknownRelationshipColumn {
        position: usize,
        table: String,
        column: String,
    },
}
