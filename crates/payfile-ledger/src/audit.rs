use serde::{Deserialize, Serialize};

use payfile_types::{CorrelationId, DomainEvent, EventKind};

use crate::error::LedgerError;
use crate::projection::PaymentFileState;
use crate::traits::EventReader;

/// Advisory report on the logical ordering of a correlation group.
///
/// The event store accepts any sequence and the projector folds it as-is.
/// This report only names the steps that happened out of workflow order; it
/// never rejects or rewrites events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowAudit {
    pub correlation_id: CorrelationId,
    pub event_count: u64,
    pub findings: Vec<Finding>,
}

impl WorkflowAudit {
    /// Returns `true` if the group followed the expected workflow.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// A single out-of-order step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based position of the offending event within the group.
    pub position: u64,
    pub event: EventKind,
    pub kind: FindingKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    EventBeforeReceipt,
    DuplicateReceipt,
    SubmittedBeforeValidation,
    SubmittedWhileInvalid,
    SubmittedWithoutChannel,
    SubmittedBeforeFraudCheck,
    SubmittedAfterFailedFraudCheck,
    OptimizedFileWithoutOptimization,
}

/// Checks correlation groups against the expected payment-file workflow.
pub struct WorkflowAuditor;

impl WorkflowAuditor {
    pub fn audit_events(correlation_id: CorrelationId, events: &[DomainEvent]) -> WorkflowAudit {
        let mut state = PaymentFileState::default();
        let mut findings = Vec::new();

        for (index, event) in events.iter().enumerate() {
            let position = index as u64 + 1;
            let mut flag = |kind: FindingKind, description: &str| {
                findings.push(Finding {
                    position,
                    event: event.kind(),
                    kind,
                    description: description.to_string(),
                });
            };

            match event {
                DomainEvent::Received { .. } => {
                    if state.file.is_some() {
                        flag(FindingKind::DuplicateReceipt, "file received more than once");
                    }
                }
                DomainEvent::Validated { .. }
                | DomainEvent::ChannelAssigned { .. }
                | DomainEvent::FraudChecked { .. }
                | DomainEvent::Optimized { .. } => {
                    if state.file.is_none() {
                        flag(FindingKind::EventBeforeReceipt, "no file received yet");
                    }
                }
                DomainEvent::OptimizedFileCreated { .. } => {
                    if state.file.is_none() {
                        flag(FindingKind::EventBeforeReceipt, "no file received yet");
                    }
                    if !state.optimization.as_ref().is_some_and(|o| o.optimized) {
                        flag(
                            FindingKind::OptimizedFileWithoutOptimization,
                            "optimized file created without a successful optimization",
                        );
                    }
                }
                DomainEvent::SubmittedToBank { .. } => {
                    if state.file.is_none() {
                        flag(FindingKind::EventBeforeReceipt, "no file received yet");
                    }
                    match state.is_valid {
                        None => flag(
                            FindingKind::SubmittedBeforeValidation,
                            "submitted before validation",
                        ),
                        Some(false) => flag(
                            FindingKind::SubmittedWhileInvalid,
                            "submitted although validation failed",
                        ),
                        Some(true) => {}
                    }
                    if state.channel.is_none() {
                        flag(
                            FindingKind::SubmittedWithoutChannel,
                            "submitted without an assigned channel",
                        );
                    }
                    match &state.fraud_check {
                        None => flag(
                            FindingKind::SubmittedBeforeFraudCheck,
                            "submitted before fraud check",
                        ),
                        Some(result) if !result.is_passed() => flag(
                            FindingKind::SubmittedAfterFailedFraudCheck,
                            "submitted although fraud check failed",
                        ),
                        Some(_) => {}
                    }
                }
            }

            state.apply(event);
        }

        WorkflowAudit {
            correlation_id,
            event_count: events.len() as u64,
            findings,
        }
    }

    pub fn audit<R: EventReader + ?Sized>(
        reader: &R,
        key: &CorrelationId,
    ) -> Result<WorkflowAudit, LedgerError> {
        let events = reader.by_correlation(key)?;
        Ok(Self::audit_events(*key, &events))
    }

    /// Audit every known correlation group.
    pub fn audit_all<R: EventReader + ?Sized>(reader: &R) -> Result<Vec<WorkflowAudit>, LedgerError> {
        reader
            .correlation_ids()?
            .iter()
            .map(|key| Self::audit(reader, key))
            .collect()
    }
}
