use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("ledger error: {0}")]
    Ledger(#[from] payfile_ledger::LedgerError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] payfile_types::TypeError),

    #[error("malformed command: {0}")]
    MalformedCommand(#[from] serde_json::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
