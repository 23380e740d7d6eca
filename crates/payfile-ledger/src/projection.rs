use serde::{Deserialize, Serialize};

use payfile_types::{
    BankChannel, CorrelationId, DomainEvent, EventId, EventKind, FraudCheckResult,
    OptimizationResult, PaymentFile, PaymentFileId, Timestamp,
};

use crate::error::LedgerError;
use crate::traits::EventReader;

/// Point-in-time state of a payment-file journey, derived from its events.
///
/// Never stored and never mutated directly: it is always the fold of a prefix
/// of one correlation group's event sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFileState {
    pub file: Option<PaymentFile>,
    pub is_valid: Option<bool>,
    pub channel: Option<BankChannel>,
    pub fraud_check: Option<FraudCheckResult>,
    pub optimization: Option<OptimizationResult>,
    pub optimized_file: Option<PaymentFile>,
    pub submitted_at: Option<Timestamp>,
}

impl PaymentFileState {
    /// Apply one event on top of this state.
    ///
    /// Total over every variant and independent of prior state: an event
    /// arriving out of logical order still applies and leaves the other
    /// fields as they were.
    pub fn apply(&mut self, event: &DomainEvent) {
        match event {
            DomainEvent::Received { file, .. } => {
                self.file = Some(file.clone());
            }
            DomainEvent::Validated { is_valid, .. } => {
                self.is_valid = Some(*is_valid);
            }
            DomainEvent::ChannelAssigned { channel, .. } => {
                self.channel = Some(*channel);
            }
            DomainEvent::FraudChecked { result, .. } => {
                self.fraud_check = Some(result.clone());
            }
            DomainEvent::Optimized { result, .. } => {
                self.optimization = Some(result.clone());
            }
            DomainEvent::OptimizedFileCreated { file, .. } => {
                self.optimized_file = Some(file.clone());
            }
            DomainEvent::SubmittedToBank { metadata } => {
                self.submitted_at = Some(metadata.created_at);
            }
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }
}

/// Pure fold from an ordered event sequence to [`PaymentFileState`].
pub struct Projector;

impl Projector {
    pub fn project(events: &[DomainEvent]) -> PaymentFileState {
        events.iter().fold(PaymentFileState::default(), |mut state, event| {
            state.apply(event);
            state
        })
    }

    /// State after the first `count` events (clamped to the sequence length).
    pub fn project_prefix(events: &[DomainEvent], count: usize) -> PaymentFileState {
        Self::project(&events[..count.min(events.len())])
    }

    /// State as of `at`: the longest prefix whose events were all created at
    /// or before it.
    pub fn project_until(events: &[DomainEvent], at: Timestamp) -> PaymentFileState {
        let count = events
            .iter()
            .take_while(|event| event.created_at() <= at)
            .count();
        Self::project_prefix(events, count)
    }

    /// Read a correlation group from `reader` and fold it.
    pub fn state_of<R: EventReader + ?Sized>(
        reader: &R,
        key: &CorrelationId,
    ) -> Result<PaymentFileState, LedgerError> {
        let events = reader.by_correlation(key)?;
        Ok(Self::project(&events))
    }
}

/// One row of a correlation group's timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// 1-based position within the group.
    pub position: u64,
    pub event_id: EventId,
    pub kind: EventKind,
    pub created_at: Timestamp,
    pub payment_file_id: PaymentFileId,
    pub actor: String,
    pub source: String,
    pub summary: String,
}

/// Ordered, human-readable history of a correlation group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub correlation_id: CorrelationId,
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn build(correlation_id: CorrelationId, events: &[DomainEvent]) -> Self {
        let entries = events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                let metadata = event.metadata();
                TimelineEntry {
                    position: index as u64 + 1,
                    event_id: metadata.event_id,
                    kind: event.kind(),
                    created_at: metadata.created_at,
                    payment_file_id: metadata.payment_file_id,
                    actor: metadata.actor.clone(),
                    source: metadata.source.clone(),
                    summary: summarize(event),
                }
            })
            .collect();

        Self {
            correlation_id,
            entries,
        }
    }

    pub fn load<R: EventReader + ?Sized>(
        reader: &R,
        key: &CorrelationId,
    ) -> Result<Self, LedgerError> {
        let events = reader.by_correlation(key)?;
        Ok(Self::build(*key, &events))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn summarize(event: &DomainEvent) -> String {
    match event {
        DomainEvent::Received { file, .. } => {
            format!("file {} received from {}", file.id.short_id(), file.storage_ref)
        }
        DomainEvent::Validated { is_valid, .. } => {
            if *is_valid {
                "validation passed".into()
            } else {
                "validation failed".into()
            }
        }
        DomainEvent::ChannelAssigned { channel, .. } => format!("routed via {channel}"),
        DomainEvent::FraudChecked { result, .. } => format!("fraud check {result}"),
        DomainEvent::Optimized { result, .. } => {
            if result.optimized {
                format!("optimized: {}", result.details)
            } else {
                format!("not optimized: {}", result.details)
            }
        }
        DomainEvent::OptimizedFileCreated { file, .. } => {
            format!("optimized file {} created", file.id.short_id())
        }
        DomainEvent::SubmittedToBank { .. } => "submitted to bank".into(),
    }
}
