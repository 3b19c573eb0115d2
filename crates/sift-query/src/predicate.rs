//! Predicates and their conjunction.

use serde_json::Value;

/// A single-field condition: `field__operator = value`.
///
/// Derived on demand from a filter slot, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: String,
    /// `None` applies the service's default comparison.
    pub operator: Option<String>,
    pub value: String,
}

impl Predicate {
    pub fn new(field: impl Into<String>, operator: Option<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// The wire key: `field__operator`, or the bare field name when the
    /// service's default comparison applies.
    pub fn key(&self) -> String {
        match &self.operator {
            Some(operator) => format!("{}__{}", self.field, operator),
            None => self.field.clone(),
        }
    }

    fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert(self.key(), Value::String(self.value.clone()));
        Value::Object(object)
    }
}

/// The logical AND of zero or more predicates.
///
/// [`CompositeQuery::match_all`] is the explicit AND identity: with no
/// predicates the query matches every record, so folding an empty slot
/// set is always well defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeQuery {
    predicates: Vec<Predicate>,
}

impl CompositeQuery {
    /// The AND identity: a query matching every record.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Appends one more conjunct.
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Serializes to the service's filter grammar: `{}` for the
    /// identity, the bare predicate object for a single conjunct, and
    /// `{"&": [...]}` otherwise.
    pub fn to_body(&self) -> Value {
        match self.predicates.as_slice() {
            [] => Value::Object(serde_json::Map::new()),
            [single] => single.to_value(),
            many => {
                let mut object = serde_json::Map::new();
                object.insert(
                    "&".to_string(),
                    Value::Array(many.iter().map(Predicate::to_value).collect()),
                );
                Value::Object(object)
            }
        }
    }
}

impl From<Predicate> for CompositeQuery {
    fn from(predicate: Predicate) -> Self {
        Self::match_all().and(predicate)
    }
}
