//! Foundation types for the payment file event store.
//!
//! Every other `payfile` crate depends on `payfile-types`.
//!
//! # Key Types
//!
//! - [`PaymentFileId`]: UUID v7 identity of an immutable payment file
//! - [`CorrelationId`]: Key grouping the events of one payment-file journey
//! - [`PaymentFile`]: A received (or optimized) payment file
//! - [`EventMetadata`]: Who, when, and about which file an event was recorded
//! - [`DomainEvent`]: The closed set of workflow facts

pub mod error;
pub mod event;
pub mod file;
pub mod identity;
pub mod payload;
pub mod temporal;

pub use error::TypeError;
pub use event::{DomainEvent, EventKind, EventMetadata};
pub use file::PaymentFile;
pub use identity::{CorrelationId, EventId, PaymentFileId};
pub use payload::{BankChannel, FraudCheckResult, OptimizationResult, DEFAULT_FRAUD_FAILURE_REASON};
pub use temporal::Timestamp;
