//! The capability the query core needs from the remote service.

use serde_json::Value;

use crate::{
    error::Result,
    types::{FieldsResponse, ProjectEntry, Record, TypeEntry},
};

/// A lazily produced, finite, non-restartable stream of records.
pub type RecordStream = Box<dyn Iterator<Item = Result<Record>>>;

/// Abstract interface to the record service.
///
/// [`HttpClient`](crate::http::HttpClient) is the production
/// implementation; tests substitute in-memory fakes.
pub trait RecordService {
    /// Lists the projects visible to the authenticated user.
    fn projects(&self) -> Result<Vec<ProjectEntry>>;

    /// Describes the field schema of a project.
    fn fields(&self, project: &str) -> Result<FieldsResponse>;

    /// Returns the catalog of field types and their legal lookups.
    fn types(&self) -> Result<Vec<TypeEntry>>;

    /// Submits a filter scoped to a project and returns the matching
    /// records.
    ///
    /// The stream is finite and cannot be restarted; consuming it again
    /// requires a fresh call.
    fn search(&self, project: &str, filter: &Value) -> Result<RecordStream>;
}
