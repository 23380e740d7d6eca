use std::collections::BTreeSet;

use payfile_types::{CorrelationId, DomainEvent};

use crate::error::LedgerError;

/// Write boundary for event store append operations.
pub trait EventWriter: Send + Sync {
    /// Record `event` at the end of the global append order and return it.
    fn append(&self, event: DomainEvent) -> Result<DomainEvent, LedgerError>;
}

/// Read boundary for event store queries.
pub trait EventReader: Send + Sync {
    fn all(&self) -> Result<Vec<DomainEvent>, LedgerError>;

    fn by_correlation(&self, key: &CorrelationId) -> Result<Vec<DomainEvent>, LedgerError>;

    fn correlation_ids(&self) -> Result<BTreeSet<CorrelationId>, LedgerError>;

    fn event_count(&self) -> Result<u64, LedgerError>;
}
