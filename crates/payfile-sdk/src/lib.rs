//! Command and query handlers for the payment file event store.
//!
//! Provides the API the transport layer calls: one append-returning
//! operation per command, plus correlation-group queries. [`PaymentFiles`]
//! is the main entry point for applications embedding the store.

pub mod commands;
pub mod error;
pub mod handlers;
pub mod queries;
pub mod service;

pub use commands::{
    AssignChannel, Command, CommandContext, CompleteFraudCheck, CreateOptimizedFile, OptimizeFile,
    ReceiveFile, SubmitToBank, ValidateFile,
};
pub use error::{SdkError, SdkResult};
pub use handlers::CommandHandlers;
pub use queries::QueryHandlers;
pub use service::PaymentFiles;

// Re-export key types
pub use payfile_ledger::{InMemoryEventStore, PaymentFileState, Timeline, WorkflowAudit};
pub use payfile_types::{BankChannel, CorrelationId, DomainEvent, EventKind, PaymentFileId};
