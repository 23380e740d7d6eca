use std::sync::Arc;

use payfile_ledger::{
    EventReader, PaymentFileState, Projector, Timeline, WorkflowAudit, WorkflowAuditor,
};
use payfile_types::{CorrelationId, DomainEvent};

use crate::error::SdkResult;

/// Read side exposed to the transport layer.
///
/// Unknown correlation IDs are not errors: they read as an empty event list,
/// an empty state, and an empty timeline.
#[derive(Clone)]
pub struct QueryHandlers {
    reader: Arc<dyn EventReader>,
}

impl QueryHandlers {
    pub fn new(reader: Arc<dyn EventReader>) -> Self {
        Self { reader }
    }

    /// Every known correlation ID, in ascending order.
    pub fn correlation_ids(&self) -> SdkResult<Vec<CorrelationId>> {
        Ok(self.reader.correlation_ids()?.into_iter().collect())
    }

    pub fn events_by_correlation_id(&self, id: &CorrelationId) -> SdkResult<Vec<DomainEvent>> {
        Ok(self.reader.by_correlation(id)?)
    }

    /// Same as [`Self::events_by_correlation_id`] for a raw ID string.
    pub fn events_by_correlation_str(&self, id: &str) -> SdkResult<Vec<DomainEvent>> {
        let id: CorrelationId = id.parse()?;
        self.events_by_correlation_id(&id)
    }

    pub fn all_events(&self) -> SdkResult<Vec<DomainEvent>> {
        Ok(self.reader.all()?)
    }

    pub fn event_count(&self) -> SdkResult<u64> {
        Ok(self.reader.event_count()?)
    }

    pub fn state(&self, id: &CorrelationId) -> SdkResult<PaymentFileState> {
        Ok(Projector::state_of(self.reader.as_ref(), id)?)
    }

    pub fn timeline(&self, id: &CorrelationId) -> SdkResult<Timeline> {
        Ok(Timeline::load(self.reader.as_ref(), id)?)
    }

    pub fn audit(&self, id: &CorrelationId) -> SdkResult<WorkflowAudit> {
        Ok(WorkflowAuditor::audit(self.reader.as_ref(), id)?)
    }

    pub fn audit_all(&self) -> SdkResult<Vec<WorkflowAudit>> {
        Ok(WorkflowAuditor::audit_all(self.reader.as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use payfile_ledger::InMemoryEventStore;
    use payfile_types::{BankChannel, PaymentFileId};

    use crate::commands::{AssignChannel, CommandContext, ReceiveFile, ValidateFile};
    use crate::handlers::CommandHandlers;
    use crate::SdkError;

    use super::*;

    fn setup() -> (CommandHandlers, QueryHandlers) {
        let store = InMemoryEventStore::shared();
        (CommandHandlers::new(store.clone()), QueryHandlers::new(store))
    }

    #[test]
    fn empty_store_has_no_correlation_ids() {
        let (_, queries) = setup();
        assert!(queries.correlation_ids().unwrap().is_empty());
        assert_eq!(queries.event_count().unwrap(), 0);
    }

    #[test]
    fn receipt_makes_file_id_known() {
        let (commands, queries) = setup();
        let event = commands
            .receive(ReceiveFile::new("blob://a", "alice", "portal"))
            .unwrap();

        let key = CorrelationId::from(event.payment_file_id());
        assert_eq!(queries.correlation_ids().unwrap(), vec![key]);
        assert_eq!(queries.events_by_correlation_id(&key).unwrap(), vec![event]);
    }

    #[test]
    fn validated_and_swift_project_into_state() {
        let (commands, queries) = setup();
        let id = PaymentFileId::new();
        let group = CorrelationId::from(id);
        let ctx = CommandContext::new(id, "alice", "portal").correlated(group);

        commands
            .validate(ValidateFile { context: ctx.clone(), is_valid: true })
            .unwrap();
        commands
            .assign_channel(AssignChannel { context: ctx, channel: "SWIFT".into() })
            .unwrap();

        let state = queries.state(&group).unwrap();
        assert_eq!(
            state,
            PaymentFileState {
                is_valid: Some(true),
                channel: Some(BankChannel::Swift),
                ..PaymentFileState::default()
            }
        );
    }

    #[test]
    fn unknown_group_reads_as_empty() {
        let (_, queries) = setup();
        let unknown = CorrelationId::from(PaymentFileId::new());
        assert!(queries.events_by_correlation_id(&unknown).unwrap().is_empty());
        assert_eq!(queries.state(&unknown).unwrap(), PaymentFileState::default());
        assert!(queries.timeline(&unknown).unwrap().is_empty());
        assert!(queries.audit(&unknown).unwrap().is_clean());
    }

    #[test]
    fn string_lookup_parses_or_fails() {
        let (commands, queries) = setup();
        let event = commands
            .receive(ReceiveFile::new("blob://a", "alice", "portal"))
            .unwrap();

        let found = queries
            .events_by_correlation_str(&event.payment_file_id().to_string())
            .unwrap();
        assert_eq!(found.len(), 1);

        let err = queries.events_by_correlation_str("nope").unwrap_err();
        assert!(matches!(err, SdkError::InvalidInput(_)));
    }
}
