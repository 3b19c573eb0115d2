//! Interactive query session state.
//!
//! The session owns the filter set, the currently selected project and
//! its schema handle, and reports every state transition through an
//! event sink so frontends other than the REPL can observe it.

use sift_client::{ProjectEntry, RecordService};
use sift_events::{EventSinkHandle, QueryEvent};
use sift_query::{count_records, FieldSchema, FilterSet, QueryPolicy, SchemaHandle};

use crate::error::{CliError, Result};

pub struct Session {
    service: Box<dyn RecordService>,
    events: EventSinkHandle,
    policy: QueryPolicy,
    filters: FilterSet,
    project: Option<String>,
    schema: Option<SchemaHandle>,
}

impl Session {
    pub fn new(
        service: Box<dyn RecordService>,
        slots: usize,
        policy: QueryPolicy,
        events: EventSinkHandle,
    ) -> Self {
        Self {
            service,
            events,
            policy,
            filters: FilterSet::new(slots),
            project: None,
            schema: None,
        }
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn schema(&self) -> Option<&SchemaHandle> {
        self.schema.as_ref()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn projects(&self) -> Result<Vec<ProjectEntry>> {
        Ok(self.service.projects()?)
    }

    /// Selects a project: fetches its schema and distributes it to
    /// every slot before returning.
    ///
    /// On failure the previous schema is discarded and every slot
    /// returns to disabled, so nothing stale can be read as if it
    /// belonged to the new project.
    pub fn select_project(&mut self, project: &str) -> Result<()> {
        self.events.emit(QueryEvent::SchemaFetching {
            project: project.to_string(),
        });

        match FieldSchema::fetch(self.service.as_ref(), project) {
            Ok(schema) => {
                self.filters.bind_schema(schema.clone());
                self.events.emit(QueryEvent::SchemaLoaded {
                    project: project.to_string(),
                    field_count: schema.len(),
                });
                self.schema = Some(schema);
                self.project = Some(project.to_string());
                Ok(())
            }
            Err(err) => {
                self.filters.unbind_schema();
                self.schema = None;
                self.project = None;
                self.events.emit(QueryEvent::SchemaFetchFailed {
                    project: project.to_string(),
                    error: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// The operators legal for a field under the current schema.
    pub fn operators_for(&self, field: &str) -> Result<Vec<String>> {
        let schema = self.schema.as_ref().ok_or(CliError::NoProject)?;
        Ok(schema.operators_for(field)?.to_vec())
    }

    /// Selects (or clears) a slot's field and returns the re-derived
    /// operator list.
    pub fn select_field(&mut self, slot: usize, field: Option<&str>) -> Result<Vec<String>> {
        let operators = self.slot_mut(slot)?.select_field(field)?.to_vec();
        self.events.emit(QueryEvent::OperatorsUpdated {
            slot,
            field: field.map(str::to_string),
            operators: operators.clone(),
        });
        Ok(operators)
    }

    pub fn select_operator(&mut self, slot: usize, operator: Option<&str>) -> Result<()> {
        self.slot_mut(slot)?.select_operator(operator)?;
        Ok(())
    }

    pub fn set_value(&mut self, slot: usize, value: &str) -> Result<()> {
        self.slot_mut(slot)?.set_value(value);
        Ok(())
    }

    pub fn clear_slot(&mut self, slot: usize) -> Result<()> {
        self.slot_mut(slot)?.clear();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        for index in 0..self.filters.len() {
            if let Some(slot) = self.filters.slot_mut(index) {
                slot.clear();
            }
        }
    }

    /// Builds the composite query from the slots and reduces the
    /// matching records to a count.
    pub fn count(&self) -> Result<u64> {
        let project = self.project.clone().ok_or(CliError::NoProject)?;
        self.events.emit(QueryEvent::SearchStarted {
            project: project.clone(),
        });

        let outcome = self
            .filters
            .build_query(&self.policy)
            .and_then(|query| count_records(self.service.as_ref(), &project, &query));

        match outcome {
            Ok(count) => {
                self.events.emit(QueryEvent::SearchComplete {
                    project,
                    count,
                });
                Ok(count)
            }
            Err(err) => {
                self.events.emit(QueryEvent::SearchFailed {
                    project,
                    error: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut sift_query::FilterSlot> {
        let capacity = self.filters.len();
        self.filters
            .slot_mut(slot)
            .ok_or(CliError::InvalidSlot {
                index: slot + 1,
                capacity,
            })
    }
}
