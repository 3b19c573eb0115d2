//! Wire types for the record service API.
//!
//! Every endpoint wraps its payload in a `data` envelope; the query
//! endpoint additionally carries a `next` link for cursor pagination.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single record, as returned by the query endpoint.
///
/// Records are schema-less on the client side; the service owns the
/// field typing.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Envelope every non-paginated endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// One row of the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectEntry {
    pub project: String,
}

/// Declared schema of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldSpec {
    /// The field's type tag, e.g. `text`, `date`, `choice`.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload of the describe-fields endpoint.
///
/// Field order follows the service's declaration order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FieldsResponse {
    pub fields: IndexMap<String, FieldSpec>,
}

/// One entry of the type catalog: a type tag and the comparison
/// operators ("lookups") legal for fields of that type, in the order
/// the service advertises them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub lookups: Vec<String>,
}

/// A single page of query results.
#[derive(Debug, Default, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub data: Vec<Record>,
    /// Absolute URL of the next page, absent on the last one.
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_response_preserves_order() {
        let raw = r#"{"fields": {
            "sample_id": {"type": "text", "description": "Sample identifier"},
            "collection_date": {"type": "date"},
            "site": {"type": "choice"}
        }}"#;
        let resp: FieldsResponse = serde_json::from_str(raw).unwrap();
        let names: Vec<_> = resp.fields.keys().cloned().collect();
        assert_eq!(names, ["sample_id", "collection_date", "site"]);
        assert_eq!(resp.fields["sample_id"].field_type, "text");
        assert_eq!(
            resp.fields["sample_id"].description.as_deref(),
            Some("Sample identifier")
        );
        assert_eq!(resp.fields["collection_date"].description, None);
    }

    #[test]
    fn test_type_entry_lookup_order() {
        let raw = r#"[{"type": "text", "lookups": ["exact", "contains", "startswith"]}]"#;
        let types: Vec<TypeEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(types[0].type_name, "text");
        assert_eq!(types[0].lookups, ["exact", "contains", "startswith"]);
    }

    #[test]
    fn test_record_page_last_page() {
        let raw = r#"{"data": [{"sample_id": "S-1"}]}"#;
        let page: RecordPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.next.is_none());
    }
}
