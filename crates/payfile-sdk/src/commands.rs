use serde::{Deserialize, Serialize};

use payfile_types::{CorrelationId, PaymentFileId};

use crate::error::SdkResult;

/// Fields shared by every command that targets an existing payment file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandContext {
    pub payment_file_id: PaymentFileId,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub correlation_id: Option<CorrelationId>,
}

impl CommandContext {
    pub fn new(payment_file_id: PaymentFileId, actor: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            payment_file_id,
            actor: actor.into(),
            source: source.into(),
            correlation_id: None,
        }
    }

    pub fn correlated(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }
}

/// Import a payment file. The ID is minted when the caller does not supply one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveFile {
    #[serde(default)]
    pub payment_file_id: Option<PaymentFileId>,
    pub storage_ref: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub correlation_id: Option<CorrelationId>,
}

impl ReceiveFile {
    pub fn new(storage_ref: impl Into<String>, actor: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            payment_file_id: None,
            storage_ref: storage_ref.into(),
            actor: actor.into(),
            source: source.into(),
            correlation_id: None,
        }
    }

    pub fn with_id(mut self, id: PaymentFileId) -> Self {
        self.payment_file_id = Some(id);
        self
    }

    pub fn correlated(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateFile {
    #[serde(flatten)]
    pub context: CommandContext,
    pub is_valid: bool,
}

/// Route a file to a bank channel.
///
/// `channel` is the raw name sent by the caller; see
/// [`payfile_types::BankChannel::from_name`] for how it resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignChannel {
    #[serde(flatten)]
    pub context: CommandContext,
    pub channel: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteFraudCheck {
    #[serde(flatten)]
    pub context: CommandContext,
    pub passed: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeFile {
    #[serde(flatten)]
    pub context: CommandContext,
    pub optimized: bool,
    #[serde(default)]
    pub details: String,
}

/// Record the optimized variant of `original_file_id`.
///
/// The handler mints the new file's ID. Without a `correlation_id` the event
/// is grouped under that new ID; pass the original's correlation ID to keep
/// the optimized file in the same journey.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptimizedFile {
    pub original_file_id: PaymentFileId,
    pub storage_ref: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub correlation_id: Option<CorrelationId>,
}

/// Submit (or resubmit) a file to the bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitToBank {
    #[serde(flatten)]
    pub context: CommandContext,
}

/// Any command, tagged by name, as read from a script or a transport payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    Receive(ReceiveFile),
    Validate(ValidateFile),
    AssignChannel(AssignChannel),
    CompleteFraudCheck(CompleteFraudCheck),
    Optimize(OptimizeFile),
    CreateOptimizedFile(CreateOptimizedFile),
    SubmitToBank(SubmitToBank),
}

impl Command {
    /// Parse a JSON array of tagged commands.
    pub fn parse_script(json: &str) -> SdkResult<Vec<Command>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Receive(_) => "Receive",
            Self::Validate(_) => "Validate",
            Self::AssignChannel(_) => "AssignChannel",
            Self::CompleteFraudCheck(_) => "CompleteFraudCheck",
            Self::Optimize(_) => "Optimize",
            Self::CreateOptimizedFile(_) => "CreateOptimizedFile",
            Self::SubmitToBank(_) => "SubmitToBank",
        }
    }

    /// Fill in an empty actor or source with the given defaults.
    pub fn fill_defaults(&mut self, actor: &str, source: &str) {
        let (a, s) = match self {
            Self::Receive(c) => (&mut c.actor, &mut c.source),
            Self::CreateOptimizedFile(c) => (&mut c.actor, &mut c.source),
            Self::Validate(ValidateFile { context, .. })
            | Self::AssignChannel(AssignChannel { context, .. })
            | Self::CompleteFraudCheck(CompleteFraudCheck { context, .. })
            | Self::Optimize(OptimizeFile { context, .. })
            | Self::SubmitToBank(SubmitToBank { context }) => (&mut context.actor, &mut context.source),
        };
        if a.is_empty() {
            *a = actor.to_string();
        }
        if s.is_empty() {
            *s = source.to_string();
        }
    }
}
