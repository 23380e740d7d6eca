/// Errors produced by ledger operations.
///
/// Appends and reads never fail for business reasons. The only failure is a
/// store lock poisoned by a thread that panicked while holding it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("event store lock poisoned during {operation}")]
    LockPoisoned { operation: &'static str },
}
