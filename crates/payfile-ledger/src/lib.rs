//! Append-only event store for payment file journeys.
//!
//! This crate is the heart of the system. It provides:
//! - [`EventLog`], the global append-only sequence of domain events
//! - [`CorrelationIndex`], events grouped by correlation key in append order
//! - `EventWriter` / `EventReader` trait boundaries
//! - [`InMemoryEventStore`], guarding log and index under one lock
//! - [`Projector`], the pure fold from events to [`PaymentFileState`]
//! - Timeline and workflow-audit projections over a correlation group

pub mod audit;
pub mod error;
pub mod index;
pub mod log;
pub mod memory;
pub mod projection;
pub mod traits;

pub use audit::{Finding, FindingKind, WorkflowAudit, WorkflowAuditor};
pub use error::LedgerError;
pub use index::CorrelationIndex;
pub use log::EventLog;
pub use memory::InMemoryEventStore;
pub use projection::{PaymentFileState, Projector, Timeline, TimelineEntry};
pub use traits::{EventReader, EventWriter};
