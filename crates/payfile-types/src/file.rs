use serde::{Deserialize, Serialize};

use crate::identity::PaymentFileId;
use crate::temporal::{self, Timestamp};

/// A payment file as received by the system.
///
/// Payment files never change after creation. An optimized variant is a new
/// `PaymentFile` with its own ID, related to the original only through event
/// metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFile {
    pub id: PaymentFileId,
    /// Opaque reference to where the file content is stored.
    pub storage_ref: String,
    pub received_at: Timestamp,
    pub actor: String,
    pub source: String,
}

impl PaymentFile {
    /// Create a payment file with a freshly minted ID, received now.
    pub fn new(storage_ref: impl Into<String>, actor: impl Into<String>, source: impl Into<String>) -> Self {
        Self::with_id(PaymentFileId::new(), storage_ref, actor, source)
    }

    /// Create a payment file with a caller-supplied ID, received now.
    pub fn with_id(
        id: PaymentFileId,
        storage_ref: impl Into<String>,
        actor: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id,
            storage_ref: storage_ref.into(),
            received_at: temporal::now(),
            actor: actor.into(),
            source: source.into(),
        }
    }
}
