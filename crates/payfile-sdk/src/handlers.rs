use std::sync::Arc;

use payfile_ledger::EventWriter;
use payfile_types::{
    BankChannel, CorrelationId, DomainEvent, EventMetadata, FraudCheckResult, OptimizationResult,
    PaymentFile, PaymentFileId,
};

use crate::commands::{
    AssignChannel, Command, CommandContext, CompleteFraudCheck, CreateOptimizedFile, OptimizeFile,
    ReceiveFile, SubmitToBank, ValidateFile,
};
use crate::error::SdkResult;

/// Turns command DTOs into domain events and appends them.
///
/// Handlers perform no workflow validation: any command for any file is
/// recorded, in whatever order it arrives.
#[derive(Clone)]
pub struct CommandHandlers {
    writer: Arc<dyn EventWriter>,
}

impl CommandHandlers {
    pub fn new(writer: Arc<dyn EventWriter>) -> Self {
        Self { writer }
    }

    pub fn receive(&self, cmd: ReceiveFile) -> SdkResult<DomainEvent> {
        let id = cmd.payment_file_id.unwrap_or_default();
        let file = PaymentFile::with_id(id, cmd.storage_ref, cmd.actor.clone(), cmd.source.clone());
        let metadata = metadata(id, cmd.actor, cmd.source, cmd.correlation_id);
        self.record(DomainEvent::Received { metadata, file })
    }

    pub fn validate(&self, cmd: ValidateFile) -> SdkResult<DomainEvent> {
        self.record(DomainEvent::Validated {
            metadata: from_context(cmd.context),
            is_valid: cmd.is_valid,
        })
    }

    pub fn assign_channel(&self, cmd: AssignChannel) -> SdkResult<DomainEvent> {
        let channel = BankChannel::from_name(&cmd.channel);
        if !BankChannel::is_recognized(&cmd.channel) {
            tracing::debug!(requested = %cmd.channel, %channel, "unrecognized channel name, using fallback");
        }
        self.record(DomainEvent::ChannelAssigned {
            metadata: from_context(cmd.context),
            channel,
        })
    }

    pub fn complete_fraud_check(&self, cmd: CompleteFraudCheck) -> SdkResult<DomainEvent> {
        self.record(DomainEvent::FraudChecked {
            metadata: from_context(cmd.context),
            result: FraudCheckResult::from_outcome(cmd.passed, cmd.error),
        })
    }

    pub fn optimize(&self, cmd: OptimizeFile) -> SdkResult<DomainEvent> {
        self.record(DomainEvent::Optimized {
            metadata: from_context(cmd.context),
            result: OptimizationResult::new(cmd.optimized, cmd.details),
        })
    }

    /// Mint the optimized file and record it under its own ID.
    pub fn create_optimized_file(&self, cmd: CreateOptimizedFile) -> SdkResult<DomainEvent> {
        let file = PaymentFile::new(cmd.storage_ref, cmd.actor.clone(), cmd.source.clone());
        tracing::debug!(
            original = %cmd.original_file_id,
            optimized = %file.id,
            "minted optimized payment file"
        );
        let metadata = metadata(file.id, cmd.actor, cmd.source, cmd.correlation_id);
        self.record(DomainEvent::OptimizedFileCreated { metadata, file })
    }

    pub fn submit_to_bank(&self, cmd: SubmitToBank) -> SdkResult<DomainEvent> {
        self.record(DomainEvent::SubmittedToBank {
            metadata: from_context(cmd.context),
        })
    }

    /// Dispatch any command to its handler.
    pub fn execute(&self, command: Command) -> SdkResult<DomainEvent> {
        match command {
            Command::Receive(cmd) => self.receive(cmd),
            Command::Validate(cmd) => self.validate(cmd),
            Command::AssignChannel(cmd) => self.assign_channel(cmd),
            Command::CompleteFraudCheck(cmd) => self.complete_fraud_check(cmd),
            Command::Optimize(cmd) => self.optimize(cmd),
            Command::CreateOptimizedFile(cmd) => self.create_optimized_file(cmd),
            Command::SubmitToBank(cmd) => self.submit_to_bank(cmd),
        }
    }

    fn record(&self, event: DomainEvent) -> SdkResult<DomainEvent> {
        Ok(self.writer.append(event)?)
    }
}

/// Metadata for a new event about `id`. The correlation ID falls back to
/// `id` itself, so the stored metadata always names its group.
fn metadata(
    id: PaymentFileId,
    actor: String,
    source: String,
    correlation_id: Option<CorrelationId>,
) -> EventMetadata {
    let correlation = correlation_id.unwrap_or_else(|| CorrelationId::from(id));
    EventMetadata::new(id, actor, source, Some(correlation))
}

fn from_context(ctx: CommandContext) -> EventMetadata {
    metadata(ctx.payment_file_id, ctx.actor, ctx.source, ctx.correlation_id)
}

#[cfg(test)]
mod tests {
    use payfile_ledger::{EventReader, InMemoryEventStore};
    use payfile_types::DEFAULT_FRAUD_FAILURE_REASON;

    use super::*;

    fn setup() -> (Arc<InMemoryEventStore>, CommandHandlers) {
        let store = InMemoryEventStore::shared();
        let handlers = CommandHandlers::new(store.clone());
        (store, handlers)
    }

    fn ctx(id: PaymentFileId) -> CommandContext {
        CommandContext::new(id, "alice", "portal")
    }

    #[test]
    fn receive_defaults_correlation_to_file_id() {
        let (store, handlers) = setup();
        let event = handlers
            .receive(ReceiveFile::new("blob://a", "alice", "portal"))
            .unwrap();

        let DomainEvent::Received { metadata, file } = &event else {
            panic!("expected Received, got {event:?}");
        };
        assert_eq!(metadata.payment_file_id, file.id);
        assert_eq!(metadata.correlation_id, Some(CorrelationId::from(file.id)));
        assert_eq!(file.storage_ref, "blob://a");
        assert_eq!(file.actor, "alice");

        let bucket = store.by_correlation(&CorrelationId::from(file.id)).unwrap();
        assert_eq!(bucket, vec![event.clone()]);
    }

    #[test]
    fn receive_keeps_supplied_id_and_correlation() {
        let (_, handlers) = setup();
        let id = PaymentFileId::new();
        let group = CorrelationId::from(PaymentFileId::new());
        let event = handlers
            .receive(ReceiveFile::new("blob://a", "alice", "portal").with_id(id).correlated(group))
            .unwrap();

        assert_eq!(event.payment_file_id(), id);
        assert_eq!(event.correlation_key(), group);
    }

    #[test]
    fn validate_copies_dto_fields() {
        let (_, handlers) = setup();
        let id = PaymentFileId::new();
        let event = handlers
            .validate(ValidateFile { context: ctx(id), is_valid: false })
            .unwrap();

        let DomainEvent::Validated { metadata, is_valid } = event else {
            panic!("expected Validated");
        };
        assert!(!is_valid);
        assert_eq!(metadata.payment_file_id, id);
        assert_eq!(metadata.actor, "alice");
        assert_eq!(metadata.source, "portal");
    }

    #[test]
    fn channel_names_resolve_with_fallback() {
        let (_, handlers) = setup();
        let id = PaymentFileId::new();
        let channel_of = |name: &str| {
            match handlers
                .assign_channel(AssignChannel { context: ctx(id), channel: name.into() })
                .unwrap()
            {
                DomainEvent::ChannelAssigned { channel, .. } => channel,
                other => panic!("expected ChannelAssigned, got {other:?}"),
            }
        };

        assert_eq!(channel_of("SWIFT"), BankChannel::Swift);
        assert_eq!(channel_of("swift"), BankChannel::Ebics);
        assert_eq!(channel_of("EBICS"), BankChannel::Ebics);
        assert_eq!(channel_of("carrier-pigeon"), BankChannel::Ebics);
    }

    #[test]
    fn fraud_failure_keeps_explicit_reason() {
        let (_, handlers) = setup();
        let event = handlers
            .complete_fraud_check(CompleteFraudCheck {
                context: ctx(PaymentFileId::new()),
                passed: false,
                error: Some("mismatch".into()),
            })
            .unwrap();

        let DomainEvent::FraudChecked { result, .. } = event else {
            panic!("expected FraudChecked");
        };
        assert_eq!(result, FraudCheckResult::Failed { reason: "mismatch".into() });
    }

    #[test]
    fn fraud_failure_without_reason_uses_default() {
        let (_, handlers) = setup();
        let event = handlers
            .complete_fraud_check(CompleteFraudCheck {
                context: ctx(PaymentFileId::new()),
                passed: false,
                error: None,
            })
            .unwrap();

        let DomainEvent::FraudChecked { result, .. } = event else {
            panic!("expected FraudChecked");
        };
        assert_eq!(
            result,
            FraudCheckResult::Failed { reason: DEFAULT_FRAUD_FAILURE_REASON.into() }
        );
    }

    #[test]
    fn optimized_file_gets_new_identity() {
        let (store, handlers) = setup();
        let original = PaymentFileId::new();
        let event = handlers
            .create_optimized_file(CreateOptimizedFile {
                original_file_id: original,
                storage_ref: "blob://opt".into(),
                actor: "optimizer".into(),
                source: "engine".into(),
                correlation_id: None,
            })
            .unwrap();

        let DomainEvent::OptimizedFileCreated { metadata, file } = &event else {
            panic!("expected OptimizedFileCreated");
        };
        assert_ne!(file.id, original);
        assert_eq!(metadata.payment_file_id, file.id);
        assert_eq!(event.correlation_key(), CorrelationId::from(file.id));
        assert!(store.by_correlation(&CorrelationId::from(original)).unwrap().is_empty());
    }

    #[test]
    fn optimized_file_can_join_the_original_journey() {
        let (store, handlers) = setup();
        let original = PaymentFileId::new();
        let group = CorrelationId::from(original);
        handlers
            .create_optimized_file(CreateOptimizedFile {
                original_file_id: original,
                storage_ref: "blob://opt".into(),
                actor: "optimizer".into(),
                source: "engine".into(),
                correlation_id: Some(group),
            })
            .unwrap();

        assert_eq!(store.by_correlation(&group).unwrap().len(), 1);
    }

    #[test]
    fn execute_dispatches_every_command() {
        let (store, handlers) = setup();
        let id = PaymentFileId::new();
        let commands = vec![
            Command::Receive(ReceiveFile::new("blob://a", "alice", "portal").with_id(id)),
            Command::Validate(ValidateFile { context: ctx(id), is_valid: true }),
            Command::AssignChannel(AssignChannel { context: ctx(id), channel: "SWIFT".into() }),
            Command::CompleteFraudCheck(CompleteFraudCheck { context: ctx(id), passed: true, error: None }),
            Command::Optimize(OptimizeFile { context: ctx(id), optimized: true, details: "merged".into() }),
            Command::CreateOptimizedFile(CreateOptimizedFile {
                original_file_id: id,
                storage_ref: "blob://b".into(),
                actor: "optimizer".into(),
                source: "engine".into(),
                correlation_id: Some(CorrelationId::from(id)),
            }),
            Command::SubmitToBank(SubmitToBank { context: ctx(id) }),
        ];

        let names: Vec<&str> = commands.iter().map(Command::name).collect();
        for command in commands {
            handlers.execute(command).unwrap();
        }

        let events = store.by_correlation(&CorrelationId::from(id)).unwrap();
        let kinds: Vec<String> = events.iter().map(|e| e.kind().to_string()).collect();
        assert_eq!(events.len(), 7);
        assert_eq!(kinds[0], "Received");
        assert_eq!(kinds[6], "SubmittedToBank");
        assert_eq!(names.len(), 7);
    }
}
