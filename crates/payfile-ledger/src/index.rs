use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use payfile_types::{CorrelationId, DomainEvent};

use crate::log::EventLog;

/// Correlation key → events sharing that key, in append order.
///
/// Maintained incrementally: [`CorrelationIndex::index_on`] runs once per
/// append, inside the same critical section as the log push.
#[derive(Debug, Default)]
pub struct CorrelationIndex {
    buckets: HashMap<CorrelationId, Vec<Arc<DomainEvent>>>,
}

impl CorrelationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `event` under its correlation key, creating the bucket if needed.
    pub fn index_on(&mut self, event: Arc<DomainEvent>) {
        let key = correlation_key(&event);
        self.buckets.entry(key).or_default().push(event);
    }

    /// Events grouped under `key`; empty when the key was never seen.
    pub fn get(&self, key: &CorrelationId) -> Vec<DomainEvent> {
        self.buckets
            .get(key)
            .map(|bucket| bucket.iter().map(|e| DomainEvent::clone(e)).collect())
            .unwrap_or_default()
    }

    pub fn bucket_len(&self, key: &CorrelationId) -> usize {
        self.buckets.get(key).map(Vec::len).unwrap_or(0)
    }

    /// Every correlation ID carried by a stored event.
    ///
    /// Derived by scanning the log, not this index's key set. An ID is known
    /// only once some stored event bears it.
    pub fn list_known_correlation_ids(log: &EventLog) -> BTreeSet<CorrelationId> {
        log.iter().map(correlation_key).collect()
    }

    pub fn keys(&self) -> BTreeSet<CorrelationId> {
        self.buckets.keys().copied().collect()
    }
}

/// Exhaustive over every variant so a new event kind must state its key.
fn correlation_key(event: &DomainEvent) -> CorrelationId {
    match event {
        DomainEvent::Received { metadata, .. }
        | DomainEvent::Validated { metadata, .. }
        | DomainEvent::ChannelAssigned { metadata, .. }
        | DomainEvent::FraudChecked { metadata, .. }
        | DomainEvent::Optimized { metadata, .. }
        | DomainEvent::OptimizedFileCreated { metadata, .. }
        | DomainEvent::SubmittedToBank { metadata } => metadata.correlation_key(),
    }
}
