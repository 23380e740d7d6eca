use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason recorded when a fraud check fails without an explicit error.
pub const DEFAULT_FRAUD_FAILURE_REASON: &str = "Fraud check failed";

/// Channel through which a payment file is delivered to the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BankChannel {
    Swift,
    Ebics,
}

impl BankChannel {
    /// Resolve a channel name as sent by callers.
    ///
    /// Only the exact string `"SWIFT"` selects [`BankChannel::Swift`]. Every
    /// other input, including `"swift"` and unknown names, falls back to
    /// [`BankChannel::Ebics`]; unrecognized names are never rejected.
    pub fn from_name(name: &str) -> Self {
        if name == "SWIFT" {
            Self::Swift
        } else {
            Self::Ebics
        }
    }

    /// Whether `name` maps to a channel without falling back.
    pub fn is_recognized(name: &str) -> bool {
        matches!(name, "SWIFT" | "EBICS")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swift => "SWIFT",
            Self::Ebics => "EBICS",
        }
    }
}

impl fmt::Display for BankChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a fraud screening.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FraudCheckResult {
    Passed,
    Failed { reason: String },
}

impl FraudCheckResult {
    /// Build a result from a pass flag and an optional failure message.
    ///
    /// A failed check without a message records
    /// [`DEFAULT_FRAUD_FAILURE_REASON`]. The message is ignored when the check
    /// passed.
    pub fn from_outcome(passed: bool, error: Option<String>) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed {
                reason: error.unwrap_or_else(|| DEFAULT_FRAUD_FAILURE_REASON.to_string()),
            }
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl fmt::Display for FraudCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Result of running the optimizer over a payment file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub optimized: bool,
    pub details: String,
}

impl OptimizationResult {
    pub fn new(optimized: bool, details: impl Into<String>) -> Self {
        Self {
            optimized,
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_parse_is_case_sensitive() {
        assert_eq!(BankChannel::from_name("SWIFT"), BankChannel::Swift);
        assert_eq!(BankChannel::from_name("swift"), BankChannel::Ebics);
        assert_eq!(BankChannel::from_name("Swift"), BankChannel::Ebics);
    }

    #[test]
    fn unknown_channel_falls_back_to_ebics() {
        assert_eq!(BankChannel::from_name("EBICS"), BankChannel::Ebics);
        assert_eq!(BankChannel::from_name("SEPA"), BankChannel::Ebics);
        assert_eq!(BankChannel::from_name(""), BankChannel::Ebics);
        assert!(!BankChannel::is_recognized("SEPA"));
        assert!(BankChannel::is_recognized("EBICS"));
    }

    #[test]
    fn channel_display_matches_wire_name() {
        assert_eq!(BankChannel::Swift.to_string(), "SWIFT");
        assert_eq!(
            serde_json::to_string(&BankChannel::Ebics).unwrap(),
            "\"EBICS\""
        );
    }

    #[test]
    fn failed_check_keeps_explicit_reason() {
        let result = FraudCheckResult::from_outcome(false, Some("mismatch".into()));
        assert_eq!(
            result,
            FraudCheckResult::Failed {
                reason: "mismatch".into()
            }
        );
    }

    #[test]
    fn failed_check_without_reason_uses_default() {
        let result = FraudCheckResult::from_outcome(false, None);
        assert_eq!(
            result,
            FraudCheckResult::Failed {
                reason: DEFAULT_FRAUD_FAILURE_REASON.into()
            }
        );
    }

    #[test]
    fn passed_check_ignores_error() {
        let result = FraudCheckResult::from_outcome(true, Some("ignored".into()));
        assert!(result.is_passed());
    }
}
