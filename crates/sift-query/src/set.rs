//! A fixed-capacity, ordered collection of filter slots.

use crate::{
    error::Result,
    filter::{FilterSlot, QueryPolicy},
    predicate::CompositeQuery,
    schema::SchemaHandle,
};

/// Default number of filter slots.
pub const DEFAULT_SLOTS: usize = 3;

/// An ordered set of [`FilterSlot`]s with a capacity fixed at
/// construction time.
///
/// Slots are created once and reused across searches; their contents
/// persist until edited. No slot is ever added or removed.
#[derive(Debug, Clone)]
pub struct FilterSet {
    slots: Vec<FilterSlot>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

impl FilterSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![FilterSlot::new(); capacity],
        }
    }

    /// Number of slots, fixed for the set's lifetime.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[FilterSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&FilterSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut FilterSlot> {
        self.slots.get_mut(index)
    }

    /// Distributes one schema handle to every slot.
    ///
    /// Completes synchronously before returning, so once a project
    /// selection finishes no slot can be read against the old schema.
    pub fn bind_schema(&mut self, schema: SchemaHandle) {
        for slot in &mut self.slots {
            slot.bind_schema(schema.clone());
        }
    }

    /// Returns every slot to disabled, e.g. after a failed schema
    /// fetch, so no stale schema remains usable as if valid.
    pub fn unbind_schema(&mut self) {
        for slot in &mut self.slots {
            slot.unbind_schema();
        }
    }

    /// Folds the active slots' predicates, in slot order, onto the
    /// explicit AND identity.
    ///
    /// Inert slots are skipped; zero active slots therefore yields
    /// [`CompositeQuery::match_all`].
    pub fn build_query(&self, policy: &QueryPolicy) -> Result<CompositeQuery> {
        let mut query = CompositeQuery::match_all();
        for slot in &self.slots {
            if let Some(predicate) = slot.predicate(policy)? {
                query = query.and(predicate);
            }
        }
        Ok(query)
    }
}
