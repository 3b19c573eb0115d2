//! Client for the remote record-management service sift queries.
//!
//! This crate owns the wire protocol: the [`RecordService`] capability
//! the query core consumes, the data types the service exchanges, and
//! a blocking [`HttpClient`] implementation built on `ureq`.
//!
//! # Filter grammar
//!
//! The service accepts JSON filter bodies on its query endpoint:
//! - `{"field__op": value}`: one predicate; a bare `{"field": value}`
//!   key applies the service's default comparison
//! - `{"&": [p1, p2, ...]}`: conjunction of predicates
//! - `{}`: matches every record
//!
//! The grammar is owned by the service; this crate only transports it.

pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod types;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::HttpClient;
pub use service::{RecordService, RecordStream};
pub use types::{Envelope, FieldSpec, FieldsResponse, ProjectEntry, Record, RecordPage, TypeEntry};
