//! Dynamic filter/query builder core.
//!
//! This crate turns a project's remotely discovered field schema into
//! interactive filter state and conjunctive queries:
//!
//! - [`FieldSchema`]: the field list and per-type operator catalog,
//!   fetched once per project selection and shared immutably
//! - [`FilterSlot`]: one field/operator/value selection; its legal
//!   operators are re-derived from the catalog on every field edit
//! - [`FilterSet`]: a fixed number of slots whose active predicates
//!   fold, in slot order, onto the explicit AND identity
//! - [`count_records`]: submits the composite query and reduces the
//!   record stream to a count
//!
//! The remote service is abstract ([`sift_client::RecordService`]); no
//! UI types appear here, so every state transition is directly
//! testable.

pub mod error;
pub mod exec;
pub mod filter;
pub mod predicate;
pub mod schema;
pub mod set;

pub use error::{QueryError, Result};
pub use exec::count_records;
pub use filter::{FilterSlot, MissingOperator, QueryPolicy};
pub use predicate::{CompositeQuery, Predicate};
pub use schema::{FieldSchema, SchemaHandle};
pub use set::{FilterSet, DEFAULT_SLOTS};

#[cfg(test)]
pub mod test_utils;
