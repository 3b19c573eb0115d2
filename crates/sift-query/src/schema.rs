//! Project field schema and operator catalog.
//!
//! The schema is an immutable value fetched once per project selection
//! and shared by every filter slot through an [`Arc`]. A new project
//! selection replaces the whole value; it is never mutated in place.

use std::sync::Arc;

use indexmap::IndexMap;
use sift_client::{FieldSpec, RecordService, TypeEntry};
use tracing::debug;

use crate::error::{QueryError, Result};

/// Shared handle to a fetched schema.
pub type SchemaHandle = Arc<FieldSchema>;

/// The field list of a project together with the service's
/// per-type operator catalog.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: IndexMap<String, FieldSpec>,
    lookups: IndexMap<String, Vec<String>>,
}

impl FieldSchema {
    pub fn new(
        fields: IndexMap<String, FieldSpec>,
        catalog: impl IntoIterator<Item = TypeEntry>,
    ) -> Self {
        let lookups = catalog
            .into_iter()
            .map(|entry| (entry.type_name, entry.lookups))
            .collect();
        Self {
            fields,
            lookups,
        }
    }

    /// Fetches the schema for a project.
    ///
    /// Issues exactly one describe-fields call and one describe-types
    /// call. On failure no schema value is produced; callers must leave
    /// field selection disabled.
    pub fn fetch(service: &dyn RecordService, project: &str) -> Result<SchemaHandle> {
        let fields = service
            .fields(project)
            .map_err(|source| QueryError::SchemaFetch { source })?;
        let catalog = service
            .types()
            .map_err(|source| QueryError::SchemaFetch { source })?;

        debug!(
            project = project,
            field_count = fields.fields.len(),
            "fetched project schema"
        );
        Ok(Arc::new(Self::new(fields.fields, catalog)))
    }

    /// Field declarations, in the service's order.
    pub fn fields(&self) -> &IndexMap<String, FieldSpec> {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolves the comparison operators legal for a field.
    ///
    /// A field name absent from the schema, or a field whose type tag
    /// has no catalog entry, indicates a desync between the schema and
    /// whatever is driving the selection; both are reported as errors
    /// rather than an empty list.
    pub fn operators_for(&self, field: &str) -> Result<&[String]> {
        let spec = self
            .fields
            .get(field)
            .ok_or_else(|| QueryError::UnknownField(field.to_string()))?;
        let operators =
            self.lookups
                .get(&spec.field_type)
                .ok_or_else(|| QueryError::UnknownFieldType {
                    field: field.to_string(),
                    field_type: spec.field_type.clone(),
                })?;
        Ok(operators)
    }
}
