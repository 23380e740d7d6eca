use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Identity of a single payment file (UUID v7 for time-ordering).
///
/// Payment files are immutable. Producing an optimized variant mints a new
/// `PaymentFileId` rather than mutating the original.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentFileId(Uuid);

impl PaymentFileId {
    /// Mint a new time-ordered payment file ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of the UUID).
    pub fn short_id(&self) -> String {
        short(&self.0)
    }
}

impl Default for PaymentFileId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for PaymentFileId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uuid("payment file", s).map(Self)
    }
}

impl fmt::Debug for PaymentFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaymentFileId({})", self.short_id())
    }
}

impl fmt::Display for PaymentFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a recorded domain event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Generate a new time-ordered event ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn short_id(&self) -> String {
        short(&self.0)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.short_id())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}", self.short_id())
    }
}

/// Key grouping every event of one payment-file journey.
///
/// An event without an explicit correlation ID is grouped under its subject
/// payment file, so every `PaymentFileId` converts into the `CorrelationId`
/// carrying the same UUID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn short_id(&self) -> String {
        short(&self.0)
    }
}

impl From<PaymentFileId> for CorrelationId {
    fn from(id: PaymentFileId) -> Self {
        Self(id.0)
    }
}

impl From<&PaymentFileId> for CorrelationId {
    fn from(id: &PaymentFileId) -> Self {
        Self(id.0)
    }
}

impl FromStr for CorrelationId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uuid("correlation", s).map(Self)
    }
}

impl fmt::Debug for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CorrelationId({})", self.short_id())
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn short(uuid: &Uuid) -> String {
    uuid.to_string()[..8].to_string()
}

fn parse_uuid(kind: &'static str, s: &str) -> Result<Uuid, TypeError> {
    Uuid::parse_str(s.trim()).map_err(|_| TypeError::InvalidId {
        kind,
        value: s.to_string(),
    })
}
