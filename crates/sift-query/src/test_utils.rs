//! In-memory fake of the record service for tests.

use std::sync::Mutex;

use indexmap::IndexMap;
use serde_json::Value;
use sift_client::{
    ClientError, FieldSpec, FieldsResponse, ProjectEntry, Record, RecordService, RecordStream,
    TypeEntry,
};

use crate::schema::{FieldSchema, SchemaHandle};

fn sample_fields() -> IndexMap<String, FieldSpec> {
    [
        (
            "sample_id".to_string(),
            FieldSpec {
                field_type: "text".to_string(),
                description: Some("Sample identifier".to_string()),
            },
        ),
        (
            "collection_date".to_string(),
            FieldSpec {
                field_type: "date".to_string(),
                description: None,
            },
        ),
        (
            "site".to_string(),
            FieldSpec {
                field_type: "choice".to_string(),
                description: None,
            },
        ),
    ]
    .into_iter()
    .collect()
}

fn sample_types() -> Vec<TypeEntry> {
    vec![
        TypeEntry {
            type_name: "text".to_string(),
            lookups: vec!["exact".to_string(), "contains".to_string()],
        },
        TypeEntry {
            type_name: "date".to_string(),
            lookups: vec!["exact".to_string(), "gte".to_string(), "lte".to_string()],
        },
        TypeEntry {
            type_name: "choice".to_string(),
            lookups: vec!["exact".to_string()],
        },
    ]
}

/// A ready-made schema handle matching [`FakeService::sample`].
pub fn sample_schema() -> SchemaHandle {
    std::sync::Arc::new(FieldSchema::new(sample_fields(), sample_types()))
}

/// Scriptable [`RecordService`] fake: fixed schema and records, with
/// switches to simulate the interesting failure points.
pub struct FakeService {
    pub fields: IndexMap<String, FieldSpec>,
    pub types: Vec<TypeEntry>,
    pub records: Vec<Record>,
    pub fail_fields: bool,
    pub fail_types: bool,
    pub fail_search: bool,
    /// Yield one record, then an error, to exercise mid-stream
    /// pagination failures.
    pub fail_mid_stream: bool,
    calls: Mutex<Calls>,
}

#[derive(Default)]
struct Calls {
    fields: usize,
    types: usize,
    searches: Vec<(String, Value)>,
}

impl FakeService {
    pub fn sample() -> Self {
        Self {
            fields: sample_fields(),
            types: sample_types(),
            records: Vec::new(),
            fail_fields: false,
            fail_types: false,
            fail_search: false,
            fail_mid_stream: false,
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn with_records(mut self, count: usize) -> Self {
        self.records = (0..count)
            .map(|index| {
                let mut record = Record::new();
                record.insert("sample_id".to_string(), Value::String(format!("S-{index}")));
                record
            })
            .collect();
        self
    }

    pub fn fields_calls(&self) -> usize {
        self.calls.lock().unwrap().fields
    }

    pub fn types_calls(&self) -> usize {
        self.calls.lock().unwrap().types
    }

    /// Every `(project, filter)` pair submitted so far.
    pub fn searches(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().searches.clone()
    }

    fn simulated_failure() -> ClientError {
        ClientError::Api {
            status: 500,
            detail: "simulated failure".to_string(),
        }
    }
}

impl RecordService for FakeService {
    fn projects(&self) -> Result<Vec<ProjectEntry>, ClientError> {
        Ok(vec![ProjectEntry {
            project: "mvgen".to_string(),
        }])
    }

    fn fields(&self, _project: &str) -> Result<FieldsResponse, ClientError> {
        self.calls.lock().unwrap().fields += 1;
        if self.fail_fields {
            return Err(Self::simulated_failure());
        }
        Ok(FieldsResponse {
            fields: self.fields.clone(),
        })
    }

    fn types(&self) -> Result<Vec<TypeEntry>, ClientError> {
        self.calls.lock().unwrap().types += 1;
        if self.fail_types {
            return Err(Self::simulated_failure());
        }
        Ok(self.types.clone())
    }

    fn search(&self, project: &str, filter: &Value) -> Result<RecordStream, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .searches
            .push((project.to_string(), filter.clone()));

        if self.fail_search {
            return Err(Self::simulated_failure());
        }

        let items: Vec<Result<Record, ClientError>> = if self.fail_mid_stream {
            self.records
                .iter()
                .take(1)
                .cloned()
                .map(Ok)
                .chain(std::iter::once(Err(Self::simulated_failure())))
                .collect()
        } else {
            self.records.iter().cloned().map(Ok).collect()
        };

        Ok(Box::new(items.into_iter()))
    }
}
