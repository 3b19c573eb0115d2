//! Session events and the sinks that consume them.
//!
//! The query session reports every state transition through an
//! [`EventSink`], so frontends observe schema loads, operator
//! re-derivations, and search outcomes without the core depending on
//! any UI machinery. Operator re-derivation itself is a plain method
//! call on a filter slot; these events only mirror it outward.

use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc, Mutex,
};

/// All event types emitted by a query session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    /// Schema fetch for a newly selected project is starting.
    SchemaFetching { project: String },
    /// Schema fetched and distributed to every filter slot.
    SchemaLoaded {
        project: String,
        field_count: usize,
    },
    /// Schema fetch failed; field selection stays disabled.
    SchemaFetchFailed { project: String, error: String },
    /// A slot's legal operator list was re-derived after a field edit.
    OperatorsUpdated {
        slot: usize,
        field: Option<String>,
        operators: Vec<String>,
    },
    /// A search was submitted.
    SearchStarted { project: String },
    /// A search completed with a full record count.
    SearchComplete { project: String, count: u64 },
    /// A search failed; no count is reported.
    SearchFailed { project: String, error: String },
}

/// Trait for consuming session events.
///
/// Each frontend provides its own implementation.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: QueryEvent);
}

/// Shared handle to an event sink.
pub type EventSinkHandle = Arc<dyn EventSink>;

/// No-op sink for headless operation.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: QueryEvent) {}
}

/// Sink that forwards events through a standard mpsc channel, for
/// frontends that poll from their own loop.
pub struct ChannelSink {
    sender: Sender<QueryEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<QueryEvent>) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                sender,
            },
            receiver,
        )
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: QueryEvent) {
        let _ = self.sender.send(event);
    }
}

/// Sink that stores every event, for inspection in tests.
#[derive(Default)]
pub struct CollectorSink {
    events: Mutex<Vec<QueryEvent>>,
}

impl CollectorSink {
    pub fn events(&self) -> Vec<QueryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for CollectorSink {
    fn emit(&self, event: QueryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
