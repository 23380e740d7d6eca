use std::sync::Arc;

use payfile_types::DomainEvent;

/// Global append-only sequence of every recorded domain event.
///
/// Not synchronized on its own; [`crate::InMemoryEventStore`] guards it
/// together with the [`crate::CorrelationIndex`] under one lock.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Arc<DomainEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `event` at the end of the append order and hand it back.
    pub fn append(&mut self, event: Arc<DomainEvent>) -> Arc<DomainEvent> {
        self.events.push(Arc::clone(&event));
        event
    }

    /// Owned snapshot of every event, in append order.
    pub fn all(&self) -> Vec<DomainEvent> {
        self.events.iter().map(|e| DomainEvent::clone(e)).collect()
    }

    pub fn get(&self, position: usize) -> Option<&DomainEvent> {
        self.events.get(position).map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainEvent> {
        self.events.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
