//! A single field/operator/value selection slot.

use crate::{
    error::{QueryError, Result},
    predicate::Predicate,
    schema::{FieldSchema, SchemaHandle},
};

/// How a slot with a selected field but no selected operator builds its
/// predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingOperator {
    /// Emit the bare field key; the service applies its default
    /// comparison.
    #[default]
    ServiceDefault,
    /// Refuse to build the predicate.
    Reject,
}

/// Explicit policy for the two input behaviors the service leaves to
/// the client: placeholder handling and operator-less predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Raw value text treated as "nothing entered". A matching slot
    /// value becomes the empty string in the predicate; set to `None`
    /// to pass placeholder text through as an ordinary literal.
    pub placeholder: Option<String>,
    pub missing_operator: MissingOperator,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            placeholder: Some("Enter value".to_string()),
            missing_operator: MissingOperator::ServiceDefault,
        }
    }
}

/// One field/operator/value selection.
///
/// A slot is disabled until a schema is bound; disabled slots reject
/// edits and contribute no predicate. The selected operator is always
/// drawn from the catalog entry for the selected field's type.
#[derive(Debug, Clone, Default)]
pub struct FilterSlot {
    schema: Option<SchemaHandle>,
    field: Option<String>,
    operator: Option<String>,
    value: String,
    operators: Vec<String>,
}

impl FilterSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a schema has been bound and selection is possible.
    pub fn is_enabled(&self) -> bool {
        self.schema.is_some()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The operators legal for the currently selected field; empty when
    /// no field is selected.
    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    /// Binds a freshly fetched schema, replacing any previous one.
    ///
    /// Field and operator selections belong to the schema they were
    /// made under, so they are cleared; the raw value text persists.
    pub fn bind_schema(&mut self, schema: SchemaHandle) {
        self.schema = Some(schema);
        self.field = None;
        self.operator = None;
        self.operators.clear();
    }

    /// Drops the schema binding, returning the slot to disabled.
    pub fn unbind_schema(&mut self) {
        self.schema = None;
        self.field = None;
        self.operator = None;
        self.operators.clear();
    }

    fn schema(&self) -> Result<&FieldSchema> {
        self.schema.as_deref().ok_or(QueryError::SchemaNotLoaded)
    }

    /// Selects a field (or clears the selection with `None`) and
    /// re-derives the legal operator list from the schema's catalog.
    ///
    /// Returns the derived operators. A name missing from the schema,
    /// or a field type missing from the catalog, fails loudly and
    /// leaves the slot unchanged. Selecting a field always clears the
    /// previous operator selection.
    pub fn select_field(&mut self, field: Option<&str>) -> Result<&[String]> {
        match field {
            None => {
                self.field = None;
                self.operator = None;
                self.operators.clear();
            }
            Some(name) => {
                let operators = self.schema()?.operators_for(name)?.to_vec();
                self.field = Some(name.to_string());
                self.operator = None;
                self.operators = operators;
            }
        }
        Ok(&self.operators)
    }

    /// Selects an operator from the derived list, or clears it.
    pub fn select_operator(&mut self, operator: Option<&str>) -> Result<()> {
        self.schema()?;
        match operator {
            None => self.operator = None,
            Some(name) if self.operators.iter().any(|op| op == name) => {
                self.operator = Some(name.to_string());
            }
            Some(name) => {
                return Err(QueryError::UnknownOperator {
                    field: self.field.clone().unwrap_or_default(),
                    operator: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Clears field, operator, and value; the schema binding persists.
    pub fn clear(&mut self) {
        self.field = None;
        self.operator = None;
        self.operators.clear();
        self.value.clear();
    }

    /// Builds this slot's predicate, or `None` when no field is
    /// selected (the slot is inert, not an error).
    ///
    /// No local validation of the value is performed; a malformed value
    /// produces a predicate the service rejects at execution time.
    pub fn predicate(&self, policy: &QueryPolicy) -> Result<Option<Predicate>> {
        let Some(field) = &self.field else {
            return Ok(None);
        };

        let operator = match (&self.operator, policy.missing_operator) {
            (Some(operator), _) => Some(operator.clone()),
            (None, MissingOperator::ServiceDefault) => None,
            (None, MissingOperator::Reject) => {
                return Err(QueryError::MissingOperator(field.clone()));
            }
        };

        let value = match &policy.placeholder {
            Some(placeholder) if self.value == *placeholder => String::new(),
            _ => self.value.clone(),
        };

        Ok(Some(Predicate::new(field.clone(), operator, value)))
    }
}
