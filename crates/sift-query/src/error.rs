//! Error types for the query core.

use miette::Diagnostic;
use sift_client::ClientError;
use thiserror::Error;

/// Errors raised while building or executing a query.
///
/// The desync variants (`UnknownField`, `UnknownFieldType`,
/// `UnknownOperator`) indicate a broken invariant between the fetched
/// schema and the state driving it; they are fatal to the current
/// operation and must never be swallowed.
#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    #[error("failed to fetch project schema: {source}")]
    #[diagnostic(
        code(sift_query::schema_fetch),
        help("Field selection stays disabled until a schema loads; check the domain, token, and project name")
    )]
    SchemaFetch {
        #[source]
        source: ClientError,
    },

    #[error("field '{0}' is not part of the current project schema")]
    #[diagnostic(code(sift_query::unknown_field))]
    UnknownField(String),

    #[error("field '{field}' has type '{field_type}', which has no operator catalog entry")]
    #[diagnostic(code(sift_query::unknown_field_type))]
    UnknownFieldType { field: String, field_type: String },

    #[error("operator '{operator}' is not legal for field '{field}'")]
    #[diagnostic(code(sift_query::unknown_operator))]
    UnknownOperator { field: String, operator: String },

    #[error("no schema loaded; select a project first")]
    #[diagnostic(
        code(sift_query::schema_not_loaded),
        help("Select a project to fetch its field schema")
    )]
    SchemaNotLoaded,

    #[error("field '{0}' has no comparison operator selected")]
    #[diagnostic(
        code(sift_query::missing_operator),
        help("Select an operator for the field, or clear the field selection")
    )]
    MissingOperator(String),

    #[error("query execution failed: {source}")]
    #[diagnostic(
        code(sift_query::execution),
        help("The service rejected the query or the connection failed; no partial count is reported")
    )]
    Execution {
        #[source]
        source: ClientError,
    },
}

/// A specialized Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
