use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::PaymentFile;
use crate::identity::{CorrelationId, EventId, PaymentFileId};
use crate::payload::{BankChannel, FraudCheckResult, OptimizationResult};
use crate::temporal::{self, Timestamp};

/// Metadata attached to every domain event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_id: EventId,
    pub created_at: Timestamp,
    /// The payment file this event is about.
    pub payment_file_id: PaymentFileId,
    /// Who or what triggered the event.
    pub actor: String,
    /// Originating subsystem or channel.
    pub source: String,
    pub correlation_id: Option<CorrelationId>,
}

impl EventMetadata {
    /// Fresh metadata with a new event ID stamped at the current time.
    pub fn new(
        payment_file_id: PaymentFileId,
        actor: impl Into<String>,
        source: impl Into<String>,
        correlation_id: Option<CorrelationId>,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            created_at: temporal::now(),
            payment_file_id,
            actor: actor.into(),
            source: source.into(),
            correlation_id,
        }
    }

    /// The key this event is grouped under.
    ///
    /// Falls back to the subject payment file when no correlation ID was
    /// given, so every event belongs to exactly one group.
    pub fn correlation_key(&self) -> CorrelationId {
        self.correlation_id
            .unwrap_or_else(|| CorrelationId::from(self.payment_file_id))
    }
}

/// An immutable fact about one completed step of a payment file's workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    Received {
        metadata: EventMetadata,
        file: PaymentFile,
    },
    Validated {
        metadata: EventMetadata,
        is_valid: bool,
    },
    ChannelAssigned {
        metadata: EventMetadata,
        channel: BankChannel,
    },
    FraudChecked {
        metadata: EventMetadata,
        result: FraudCheckResult,
    },
    Optimized {
        metadata: EventMetadata,
        result: OptimizationResult,
    },
    /// An optimized variant was produced. `metadata.payment_file_id` is the
    /// new file's ID.
    OptimizedFileCreated {
        metadata: EventMetadata,
        file: PaymentFile,
    },
    SubmittedToBank {
        metadata: EventMetadata,
    },
}

impl DomainEvent {
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            Self::Received { metadata, .. }
            | Self::Validated { metadata, .. }
            | Self::ChannelAssigned { metadata, .. }
            | Self::FraudChecked { metadata, .. }
            | Self::Optimized { metadata, .. }
            | Self::OptimizedFileCreated { metadata, .. }
            | Self::SubmittedToBank { metadata } => metadata,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Received { .. } => EventKind::Received,
            Self::Validated { .. } => EventKind::Validated,
            Self::ChannelAssigned { .. } => EventKind::ChannelAssigned,
            Self::FraudChecked { .. } => EventKind::FraudChecked,
            Self::Optimized { .. } => EventKind::Optimized,
            Self::OptimizedFileCreated { .. } => EventKind::OptimizedFileCreated,
            Self::SubmittedToBank { .. } => EventKind::SubmittedToBank,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.metadata().event_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.metadata().created_at
    }

    pub fn payment_file_id(&self) -> PaymentFileId {
        self.metadata().payment_file_id
    }

    pub fn correlation_key(&self) -> CorrelationId {
        self.metadata().correlation_key()
    }
}

/// Classification of domain events without their payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Received,
    Validated,
    ChannelAssigned,
    FraudChecked,
    Optimized,
    OptimizedFileCreated,
    SubmittedToBank,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        Self::Received,
        Self::Validated,
        Self::ChannelAssigned,
        Self::FraudChecked,
        Self::Optimized,
        Self::OptimizedFileCreated,
        Self::SubmittedToBank,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Received => "Received",
            Self::Validated => "Validated",
            Self::ChannelAssigned => "ChannelAssigned",
            Self::FraudChecked => "FraudChecked",
            Self::Optimized => "Optimized",
            Self::OptimizedFileCreated => "OptimizedFileCreated",
            Self::SubmittedToBank => "SubmittedToBank",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(correlation_id: Option<CorrelationId>) -> EventMetadata {
        EventMetadata::new(PaymentFileId::new(), "alice", "portal", correlation_id)
    }

    #[test]
    fn correlation_key_defaults_to_subject() {
        let meta = metadata(None);
        assert_eq!(
            meta.correlation_key(),
            CorrelationId::from(meta.payment_file_id)
        );
    }

    #[test]
    fn explicit_correlation_id_wins() {
        let group = CorrelationId::from(PaymentFileId::new());
        let meta = metadata(Some(group));
        assert_eq!(meta.correlation_key(), group);
        assert_ne!(meta.correlation_key(), CorrelationId::from(meta.payment_file_id));
    }

    #[test]
    fn new_metadata_gets_unique_event_ids() {
        assert_ne!(metadata(None).event_id, metadata(None).event_id);
    }

    #[test]
    fn accessors_read_through_metadata() {
        let meta = metadata(None);
        let event = DomainEvent::Validated {
            metadata: meta.clone(),
            is_valid: true,
        };
        assert_eq!(event.kind(), EventKind::Validated);
        assert_eq!(event.event_id(), meta.event_id);
        assert_eq!(event.payment_file_id(), meta.payment_file_id);
        assert_eq!(event.created_at(), meta.created_at);
        assert_eq!(event.metadata(), &meta);
    }

    #[test]
    fn serde_roundtrip_keeps_variant() {
        let file = PaymentFile::new("blob://x", "alice", "portal");
        let event = DomainEvent::OptimizedFileCreated {
            metadata: EventMetadata::new(file.id, "optimizer", "engine", None),
            file,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "OptimizedFileCreated");
        let parsed: DomainEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn kind_display() {
        assert_eq!(EventKind::SubmittedToBank.to_string(), "SubmittedToBank");
        assert_eq!(EventKind::ALL.len(), 7);
    }
}
