use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use payfile_types::{CorrelationId, DomainEvent};

use crate::error::LedgerError;
use crate::index::CorrelationIndex;
use crate::log::EventLog;
use crate::traits::{EventReader, EventWriter};

/// In-memory event store: the process-wide log plus its correlation index.
///
/// Both live under a single lock so that an append and its index update are
/// one step to every other caller. Readers see either both or neither.
#[derive(Default)]
pub struct InMemoryEventStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    log: EventLog,
    index: CorrelationIndex,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store behind an `Arc`, ready to hand to command and query handlers.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn read_state(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, StoreState>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::LockPoisoned { operation })
    }

    fn write_state(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, StoreState>, LedgerError> {
        self.inner
            .write()
            .map_err(|_| LedgerError::LockPoisoned { operation })
    }
}

impl EventWriter for InMemoryEventStore {
    fn append(&self, event: DomainEvent) -> Result<DomainEvent, LedgerError> {
        let event = Arc::new(event);
        let mut state = self.write_state("append")?;

        let stored = state.log.append(Arc::clone(&event));
        state.index.index_on(Arc::clone(&stored));
        let position = state.log.len();
        drop(state);

        tracing::debug!(
            event_id = %stored.event_id(),
            kind = %stored.kind(),
            correlation = %stored.correlation_key(),
            position,
            "event appended"
        );
        Ok(DomainEvent::clone(&stored))
    }
}

impl EventReader for InMemoryEventStore {
    fn all(&self) -> Result<Vec<DomainEvent>, LedgerError> {
        let state = self.read_state("all")?;
        Ok(state.log.all())
    }

    fn by_correlation(&self, key: &CorrelationId) -> Result<Vec<DomainEvent>, LedgerError> {
        let state = self.read_state("by_correlation")?;
        let events = state.index.get(key);
        tracing::trace!(correlation = %key, count = events.len(), "correlation bucket read");
        Ok(events)
    }

    fn correlation_ids(&self) -> Result<BTreeSet<CorrelationId>, LedgerError> {
        let state = self.read_state("correlation_ids")?;
        Ok(CorrelationIndex::list_known_correlation_ids(&state.log))
    }

    fn event_count(&self) -> Result<u64, LedgerError> {
        let state = self.read_state("event_count")?;
        Ok(state.log.len() as u64)
    }
}
